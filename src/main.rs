// Elevator Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/elevator-simulator
// ```
//
// Start the external call service first to feed external calls:
//
// ```console
// $ ./target/release/elevator-call-server
// $ ./target/release/elevator-simulator --verbose
// ```

use anyhow::Context;
use clap::Parser;
use elevator_simulator::simulation::{ConsoleSession, ConsoleSink, Dispatcher, LoggingConfig};
use elevator_simulator::types::{CliArgs, ElevatorConfig};
use elevator_simulator::TcpCallSource;
use std::io;
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match ElevatorConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging = LoggingConfig::new().with_verbosity(args.verbose, args.debug);
    let logging = match &args.log_dir {
        Some(directory) => logging.with_file_logging(directory.clone()),
        None => logging,
    };

    let _log_guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        error!("Elevator simulator failed: {:#}", e);
        eprintln!("An unexpected error occurred while running the simulator: {:#}.", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let dry_run = args.dry_run;

    let config = ElevatorConfig::from_cli_args(args).context("Failed to load configuration")?;

    if dry_run {
        config.validate().context("Configuration validation failed")?;
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulator will not be started.");
        print_configuration_summary(&config);
        return Ok(());
    }

    let source = TcpCallSource::from_config(&config);
    let dispatcher = Dispatcher::try_new(&config, source, ConsoleSink::new())
        .context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    print_startup_banner(&config);

    let stdin = io::stdin();
    let mut session = ConsoleSession::new(dispatcher, stdin.lock(), io::stdout())
        .with_idle_timing(config.idle_poll_interval(), config.idle_wait());
    session.run().context("Console session failed")?;

    info!("Elevator simulator finished");
    Ok(())
}

fn print_startup_banner(config: &ElevatorConfig) {
    eprintln!("Elevator Simulator");
    eprintln!("==================");
    eprintln!("For external calls, start 'elevator-call-server' first.");
    eprintln!();

    print_configuration_summary(config);
}

fn print_configuration_summary(config: &ElevatorConfig) {
    eprintln!("Configuration:");
    eprintln!("  Floors: 0 - {}", config.floor_count);
    eprintln!("  Car Class: {}", config.car_class);
    eprintln!("  Weight Limit: {}", config.weight_limit());
    eprintln!("  External Service: {}", config.external_service_address());
    if !config.car_class.accepts_external_calls() {
        eprintln!("  (this car class ignores external calls)");
    }
    eprintln!();
}
