use std::fs::{File, OpenOptions};
use std::io;

use log::{debug, error};
use snaketracker::app;
use snaketracker::error::TrackerError;

fn main() {
    std::env::set_var("RUST_LOG", "snaketracker=debug");
    env_logger::init();
    debug!("Debug on");

    let args: Vec<String> = std::env::args().collect();
    let result = match args.as_slice() {
        // a FIFO pair; opening blocks until the peer attaches its end
        [_, input_path, output_path] => run_on_fifos(input_path, output_path),
        _ => app::run(&mut io::stdin().lock(), &mut io::stdout().lock()),
    };

    // the loop only returns on a fatal channel or pipeline failure
    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run_on_fifos(input_path: &str, output_path: &str) -> Result<(), TrackerError> {
    let mut input = File::open(input_path)?;
    let mut output = OpenOptions::new().write(true).open(output_path)?;
    app::run(&mut input, &mut output)
}
