const DEFAULT_MAX_STEPS: u64 = 10_000_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!(
                "No ROM path provided.\n\
                 Usage: dotmatrix path/to/your.gb [max-steps]"
            );
            std::process::exit(1);
        }
    };
    let max_steps = args
        .next()
        .map(|s| s.parse::<u64>().expect("max-steps must be a number"))
        .unwrap_or(DEFAULT_MAX_STEPS);

    log::info!("Running ROM: '{}'", rom_path);
    let rom = std::fs::read(&rom_path).expect("Failed to read ROM file");

    match dotmatrix::run(&rom, max_steps) {
        Ok(summary) => {
            println!(
                "executed {} instructions ({} cycles), PC at {:#06X}",
                summary.steps, summary.cycles, summary.pc
            );
        }
        Err(err) => {
            log::error!("{:#}", err);
            std::process::exit(1);
        }
    }
}
