use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

mod display;
mod keymap;
mod run;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = otto8::constants::DEFAULT_CYCLES_PER_SECOND)]
    cycles_per_second: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run::run(&args.rom, args.cycles_per_second) {
        error!("{e}");
        process::exit(1);
    }
}
