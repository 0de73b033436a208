//! Pluggable dice distributions, ported from `royalur/model/dice.py`.

use rand::Rng;

/// The result of a roll of the dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    value: u8,
}

impl Roll {
    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }
}

/// A source of dice rolls. Each variant knows its own maximum roll value
/// and probability distribution, and can either draw randomly or be
/// forced to a specific value (for replay and deterministic tests).
#[derive(Debug, Clone, Copy)]
pub enum Dice {
    /// `n` fair binary (0/1) dice summed; roll `0` means "no move".
    Binary(BinaryDice),
    /// Like `Binary`, but a roll that would be `0` is instead read as the
    /// highest possible value (used by some Aseb rule variants).
    BinaryZeroAsMax(BinaryDice),
}

impl Dice {
    #[must_use]
    pub fn four_binary() -> Self {
        Self::Binary(BinaryDice::new(4))
    }

    #[must_use]
    pub fn three_binary_zero_as_max() -> Self {
        Self::BinaryZeroAsMax(BinaryDice::new(3))
    }

    #[must_use]
    pub fn max_roll(&self) -> u8 {
        match self {
            Self::Binary(d) => d.num_die,
            Self::BinaryZeroAsMax(d) => d.num_die + 1,
        }
    }

    /// Probabilities indexed by roll value, `0..=max_roll()`, summing to 1.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        match self {
            Self::Binary(d) => d.binomial_probabilities(),
            Self::BinaryZeroAsMax(d) => {
                let mut probs = d.binomial_probabilities();
                let zero_mass = probs[0];
                probs[0] = 0.0;
                probs.push(zero_mass);
                probs
            }
        }
    }

    /// Draws a random roll from the process-wide PRNG.
    pub fn roll(&self) -> Roll {
        let value = match self {
            Self::Binary(d) => d.sample_value(),
            Self::BinaryZeroAsMax(d) => {
                let value = d.sample_value();
                if value == 0 {
                    d.num_die + 1
                } else {
                    value
                }
            }
        };
        self.roll_forced(value)
    }

    /// Forces a specific roll value, used for replay and tests.
    #[must_use]
    pub fn roll_forced(&self, value: u8) -> Roll {
        assert!(
            value <= self.max_roll(),
            "dice cannot roll {value}, max is {}",
            self.max_roll()
        );
        if matches!(self, Self::BinaryZeroAsMax(_)) {
            assert!(value > 0, "this dice cannot roll 0");
        }
        Roll { value }
    }
}

/// `num_die` independent fair coins, summed. The base for both the
/// `Binary` and `BinaryZeroAsMax` dice variants.
#[derive(Debug, Clone, Copy)]
pub struct BinaryDice {
    num_die: u8,
}

impl BinaryDice {
    fn new(num_die: u8) -> Self {
        Self { num_die }
    }

    /// Binomial distribution over `0..=num_die`, computed via the
    /// incremental `nChooseK` recurrence rather than factorials.
    fn binomial_probabilities(&self) -> Vec<f64> {
        let base_prob = 0.5_f64.powi(i32::from(self.num_die));
        let mut n_choose_k: u64 = 1;
        let mut probabilities = Vec::with_capacity(self.num_die as usize + 1);
        for roll in 0..=self.num_die {
            probabilities.push(base_prob * n_choose_k as f64);
            n_choose_k = n_choose_k * u64::from(self.num_die - roll) / u64::from(roll + 1);
        }
        probabilities
    }

    fn sample_value(&self) -> u8 {
        let mut rng = rand::thread_rng();
        (0..self.num_die)
            .filter(|_| rng.gen_bool(0.5))
            .count() as u8
    }
}
