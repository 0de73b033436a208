use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use log::info;
use royal_ur::{enumerate_keys, GameSettings};

/// Only the two Standard-board variants: `StateEncoder`'s 31-bit layout is
/// fixed to the Standard board's 6-tile side lanes and 8-tile center lane,
/// so it has nothing meaningful to say about Aseb's differently-shaped
/// board (a 12-tall shared center column). Aseb play is still fully
/// supported by the rules engine and driver; it just has no generatable
/// LUT corpus here.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Variant {
    Finkel,
    Masters,
}

impl Variant {
    fn settings(self) -> GameSettings {
        match self {
            Self::Finkel => GameSettings::finkel(),
            Self::Masters => GameSettings::masters(),
        }
    }
}

/// Enumerates every legal light-to-move state for a rule variant and
/// writes the sorted 31-bit keys to disk as a solver corpus. Assigning
/// win-probability values to each key is an external solving step, out
/// of scope for this crate — the corpus is the input to that step, not
/// a playable look-up table.
#[derive(Args, Debug)]
pub struct Generate {
    #[arg(short, long, value_enum, default_value_t = Variant::Finkel)]
    variant: Variant,
    #[arg(short, long, default_value = "corpus.keys")]
    output: PathBuf,
}

impl Generate {
    pub fn run(self) {
        let settings = self.variant.settings();
        let mut keys = Vec::new();
        enumerate_keys(&settings, |key| keys.push(key));
        keys.sort_unstable();
        keys.dedup();
        info!("enumerated {} distinct light-to-move states", keys.len());

        let mut bytes = Vec::with_capacity(keys.len() * 4);
        for key in &keys {
            bytes.extend_from_slice(&key.to_be_bytes());
        }
        fs::write(&self.output, &bytes).unwrap_or_else(|e| {
            panic!("failed to write corpus to {}: {e}", self.output.display())
        });
        info!(
            "wrote {} bytes ({} keys) to {}",
            bytes.len(),
            keys.len(),
            self.output.display()
        );
    }
}
