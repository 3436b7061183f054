use std::num::ParseIntError;
use std::path::PathBuf;

use clap::Parser;

use vm8::constants::{DEFAULT_CLOCK_HZ, PROGRAM_START, TIMER_HZ};
use vm8::Config;

mod keyboard;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(name = "vm8", about = "Run a program on the 8-bit virtual machine")]
struct Args {
    /// Program image to load
    rom: PathBuf,

    /// Address to load the program at; accepts a 0x prefix for hex
    #[arg(long, value_parser = parse_address, default_value_t = PROGRAM_START)]
    offset: u16,

    /// Instructions per second
    #[arg(long, default_value_t = DEFAULT_CLOCK_HZ)]
    clock: u32,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Window pixels per display pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,
}

fn parse_address(s: &str) -> Result<u16, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config {
        load_offset: args.offset,
        clock_hz: args.clock,
        timer_hz: TIMER_HZ,
        seed: args.seed,
    };
    run::run(&args.rom, config, args.scale)
}
