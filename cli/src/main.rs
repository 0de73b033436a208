mod generate;
mod play;
mod probe;

use env_logger::{Builder, Target};
use log::LevelFilter;

use clap::{ArgAction, Parser, Subcommand};

use crate::generate::Generate;
use crate::play::Play;
use crate::probe::Probe;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
    #[arg(short, long, action = ArgAction::Count, default_value_t = 2)]
    verbose: u8,
    #[arg(
        long,
        help = "If set, logs will not include a timestamp",
        action = ArgAction::SetTrue
    )]
    no_time: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    Generate(Generate),
    Probe(Probe),
    Play(Play),
}

impl Cmd {
    fn run(self) {
        match self {
            Self::Generate(gen) => gen.run(),
            Self::Probe(probe) => probe.run(),
            Self::Play(play) => play.run(),
        }
    }
}

fn main() {
    let args = Cli::parse();
    let mut builder = Builder::new();
    builder
        .filter(
            None,
            match args.verbose {
                0 => LevelFilter::Error,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            },
        )
        .default_format()
        .target(Target::Stdout);

    if args.no_time {
        builder.format_timestamp(None);
    }
    builder.init();
    args.cmd.run()
}
