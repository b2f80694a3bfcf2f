// External call service for the elevator simulator
//
// Reads called floors from stdin and publishes them to the simulator over TCP
// until the user stops adding floors.
//
// ```console
// $ ./target/release/elevator-call-server --port 13000
// ```

use anyhow::Context;
use clap::Parser;
use elevator_simulator::external::{CallServer, CallStore};
use elevator_simulator::simulation::LoggingConfig;
use elevator_simulator::types::{CallServerArgs, ElevatorConfig, Floor};
use std::io::{self, BufRead, Write};
use std::process;
use tracing::{error, info};

fn main() {
    let args = CallServerArgs::parse();

    let _log_guard = match LoggingConfig::for_call_server().with_verbosity(args.verbose, false).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        error!("External call service failed: {:#}", e);
        eprintln!("An unexpected error occurred while running the external service: {:#}.", e);
        process::exit(1);
    }
}

fn run(args: CallServerArgs) -> anyhow::Result<()> {
    let config =
        ElevatorConfig::from_call_server_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    let store = CallStore::new();
    let mut handle = CallServer::new(config.external_service_address(), store.clone())
        .start()
        .context("Failed to start external call service")?;

    println!("External server service started successfully.");
    println!("Address: {}.", handle.local_addr());
    println!("............................................\n");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    while let Some(floor) = read_floor(&mut input, &mut stdout, config.floor_count)? {
        store.add_call(floor);
        info!(floor, pending = store.len(), "External call queued");

        write!(stdout, "New floor? [y/n]: ")?;
        stdout.flush()?;
        match read_trimmed(&mut input)? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => {}
            _ => break,
        }
    }

    handle.stop();
    println!("\nApplication finished!");
    Ok(())
}

/// Ask for a floor in `0..=floor_count` until one is given; `None` on end of input
fn read_floor(
    input: &mut impl BufRead,
    output: &mut impl Write,
    floor_count: Floor,
) -> io::Result<Option<Floor>> {
    loop {
        write!(output, "\nPlease, insert a valid floor [0..{}]: ", floor_count)?;
        output.flush()?;

        let Some(line) = read_trimmed(input)? else {
            return Ok(None);
        };
        match line.parse::<Floor>() {
            Ok(floor) if (0..=floor_count).contains(&floor) => return Ok(Some(floor)),
            Ok(_) => writeln!(
                output,
                "Error invalid floor. Please enter with floor between 0 and {}.",
                floor_count
            )?,
            Err(e) => writeln!(output, "Error, please enter a valid floor: {}.", e)?,
        }
    }
}

fn read_trimmed(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
