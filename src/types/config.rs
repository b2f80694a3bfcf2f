//! Configuration structures for the elevator simulator
//!
//! This module contains the elevator configuration structure, its command line
//! surface and the validation logic applied before a dispatcher is built.

use super::{CarClass, Floor};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default values used when neither a config file nor the CLI sets a field
pub mod defaults {
    /// Highest floor served by the car (floors run from 0 to this value)
    pub const FLOOR_COUNT: i32 = 30;

    /// Weight capacity of a standard passenger car
    pub const STANDARD_WEIGHT_LIMIT: f64 = 600.0;

    /// Weight capacity of a service car
    pub const SERVICE_WEIGHT_LIMIT: f64 = 1000.0;

    /// Address the external call service listens on
    pub const EXTERNAL_SERVICE_HOST: &str = "127.0.0.1";

    /// Port the external call service listens on
    pub const EXTERNAL_SERVICE_PORT: u16 = 13000;

    /// Connect/read timeout for a single external call poll
    pub const POLL_TIMEOUT_MS: u64 = 200;

    /// Delay between polls while the car is idle and waiting for calls
    pub const IDLE_POLL_INTERVAL_MS: u64 = 500;

    /// How long an idle car waits for external calls before prompting again
    pub const IDLE_WAIT_SECS: u64 = 10;
}

/// Command line arguments for the simulator binary
#[derive(Debug, Clone, Parser)]
#[command(
    name = "elevator-simulator",
    version = "0.1.0",
    about = "Elevator Simulator - Drives a single elevator car through requested floors",
    long_about = "Simulates a single elevator car. Passengers board, choose destination floors and \
alight; the car visits floors in scan order (finishing its current direction before reversing). \
Standard cars also pick up floor calls published by the external call service.

EXAMPLES:
    # Run with default settings
    elevator-simulator

    # Run a service car that ignores external calls
    elevator-simulator --car-class service

    # Use a configuration file
    elevator-simulator --config elevator.json

    # Generate configuration template
    elevator-simulator --print-config > elevator.json

    # Validate configuration without running
    elevator-simulator --config elevator.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Highest floor served by the car
    #[arg(
        long,
        help = "Highest floor served by the car",
        long_help = "Floors run from 0 up to and including this value. Must be greater than 0. Default: 30"
    )]
    pub floor_count: Option<i32>,

    /// Car class (standard or service)
    #[arg(
        long,
        help = "Car class (standard or service)",
        long_help = "Standard cars answer external calls; service cars only serve floors chosen inside the car. Default: standard"
    )]
    pub car_class: Option<CarClass>,

    /// Weight capacity of a standard car
    #[arg(long, help = "Weight capacity of a standard car")]
    pub standard_weight_limit: Option<f64>,

    /// Weight capacity of a service car
    #[arg(long, help = "Weight capacity of a service car")]
    pub service_weight_limit: Option<f64>,

    /// External call service host
    #[arg(long, help = "External call service host")]
    pub host: Option<String>,

    /// External call service port
    #[arg(short, long, help = "External call service port")]
    pub port: Option<u16>,

    /// Timeout for a single external call poll, in milliseconds
    #[arg(long, help = "External call poll timeout in milliseconds")]
    pub poll_timeout_ms: Option<u64>,

    /// Seconds an idle car waits for external calls
    #[arg(long, help = "Seconds an idle car waits for external calls")]
    pub idle_wait_secs: Option<u64>,

    /// Directory for rolling log files
    #[arg(long, help = "Write logs to daily rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running the simulator
    #[arg(long, help = "Validate configuration without running the simulator")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

impl CliArgs {
    /// Arguments with every option unset, for building configurations in code
    pub fn empty() -> Self {
        Self {
            config: None,
            floor_count: None,
            car_class: None,
            standard_weight_limit: None,
            service_weight_limit: None,
            host: None,
            port: None,
            poll_timeout_ms: None,
            idle_wait_secs: None,
            log_dir: None,
            verbose: false,
            debug: false,
            dry_run: false,
            print_config: false,
        }
    }
}

/// Command line arguments for the external call service binary
#[derive(Debug, Clone, Parser)]
#[command(
    name = "elevator-call-server",
    version = "0.1.0",
    about = "External call service - publishes floor calls for the elevator simulator"
)]
pub struct CallServerArgs {
    /// Configuration file path (JSON format)
    #[arg(short, long, help = "Configuration file path (JSON format)")]
    pub config: Option<String>,

    /// Address to listen on
    #[arg(long, help = "Address to listen on")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, help = "Port to listen on")]
    pub port: Option<u16>,

    /// Highest floor that may be called
    #[arg(long, help = "Highest floor that may be called")]
    pub floor_count: Option<i32>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Highest floor served by the car
    pub floor_count: Option<i32>,

    /// Car class
    pub car_class: Option<CarClass>,

    /// Weight capacity of a standard car
    pub standard_weight_limit: Option<f64>,

    /// Weight capacity of a service car
    pub service_weight_limit: Option<f64>,

    /// External call service host
    pub external_service_host: Option<String>,

    /// External call service port
    pub external_service_port: Option<u16>,

    /// Timeout for a single external call poll, in milliseconds
    pub poll_timeout_ms: Option<u64>,

    /// Delay between idle polls, in milliseconds
    pub idle_poll_interval_ms: Option<u64>,

    /// Seconds an idle car waits for external calls
    pub idle_wait_secs: Option<u64>,
}

/// Configuration for an elevator simulation run
///
/// Supplied once when the dispatcher is built and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatorConfig {
    /// Highest floor served by the car; valid floors are `0..=floor_count`
    pub floor_count: Floor,

    /// Car class
    pub car_class: CarClass,

    /// Weight capacity of a standard car
    pub standard_weight_limit: f64,

    /// Weight capacity of a service car
    pub service_weight_limit: f64,

    /// External call service host
    pub external_service_host: String,

    /// External call service port
    pub external_service_port: u16,

    /// Timeout for a single external call poll, in milliseconds
    pub poll_timeout_ms: u64,

    /// Delay between idle polls, in milliseconds
    pub idle_poll_interval_ms: u64,

    /// Seconds an idle car waits for external calls
    pub idle_wait_secs: u64,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for elevator configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Floor count is invalid
    #[error("Floor count must be greater than 0, got {0}")]
    InvalidFloorCount(i32),

    /// A weight limit is not a positive finite number
    #[error("Invalid weight limit for {field}: {value} (must be a positive number)")]
    InvalidWeightLimit {
        /// Name of the field with the invalid limit
        field: String,
        /// The invalid limit
        value: f64,
    },

    /// Port is invalid
    #[error("External service port must be greater than 0")]
    InvalidPort,

    /// A timeout or interval is zero
    #[error("{0} must be greater than 0")]
    InvalidTimeout(String),
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            floor_count: defaults::FLOOR_COUNT,
            car_class: CarClass::Standard,
            standard_weight_limit: defaults::STANDARD_WEIGHT_LIMIT,
            service_weight_limit: defaults::SERVICE_WEIGHT_LIMIT,
            external_service_host: defaults::EXTERNAL_SERVICE_HOST.to_string(),
            external_service_port: defaults::EXTERNAL_SERVICE_PORT,
            poll_timeout_ms: defaults::POLL_TIMEOUT_MS,
            idle_poll_interval_ms: defaults::IDLE_POLL_INTERVAL_MS,
            idle_wait_secs: defaults::IDLE_WAIT_SECS,
        }
    }
}

impl ElevatorConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Create configuration for the call server binary
    pub fn from_call_server_args(args: CallServerArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(host) = args.host {
            config.external_service_host = host;
        }
        if let Some(port) = args.port {
            config.external_service_port = port;
        }
        if let Some(floor_count) = args.floor_count {
            config.floor_count = floor_count;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            floor_count: config_file.floor_count.unwrap_or(defaults.floor_count),
            car_class: config_file.car_class.unwrap_or(defaults.car_class),
            standard_weight_limit: config_file
                .standard_weight_limit
                .unwrap_or(defaults.standard_weight_limit),
            service_weight_limit: config_file
                .service_weight_limit
                .unwrap_or(defaults.service_weight_limit),
            external_service_host: config_file
                .external_service_host
                .unwrap_or(defaults.external_service_host),
            external_service_port: config_file
                .external_service_port
                .unwrap_or(defaults.external_service_port),
            poll_timeout_ms: config_file.poll_timeout_ms.unwrap_or(defaults.poll_timeout_ms),
            idle_poll_interval_ms: config_file
                .idle_poll_interval_ms
                .unwrap_or(defaults.idle_poll_interval_ms),
            idle_wait_secs: config_file.idle_wait_secs.unwrap_or(defaults.idle_wait_secs),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.floor_count {
            config.floor_count = value;
        }
        if let Some(value) = args.car_class {
            config.car_class = value;
        }
        if let Some(value) = args.standard_weight_limit {
            config.standard_weight_limit = value;
        }
        if let Some(value) = args.service_weight_limit {
            config.service_weight_limit = value;
        }
        if let Some(value) = args.host {
            config.external_service_host = value;
        }
        if let Some(value) = args.port {
            config.external_service_port = value;
        }
        if let Some(value) = args.poll_timeout_ms {
            config.poll_timeout_ms = value;
        }
        if let Some(value) = args.idle_wait_secs {
            config.idle_wait_secs = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.floor_count <= 0 {
            return Err(ConfigValidationError::InvalidFloorCount(self.floor_count));
        }

        self.validate_weight_limit("standard_weight_limit", self.standard_weight_limit)?;
        self.validate_weight_limit("service_weight_limit", self.service_weight_limit)?;

        if self.external_service_port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if self.poll_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidTimeout("poll_timeout_ms".to_string()));
        }
        if self.idle_poll_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "idle_poll_interval_ms".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_weight_limit(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigValidationError::InvalidWeightLimit {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Weight capacity for the configured car class
    pub fn weight_limit(&self) -> f64 {
        match self.car_class {
            CarClass::Standard => self.standard_weight_limit,
            CarClass::ServiceOnly => self.service_weight_limit,
        }
    }

    /// `host:port` of the external call service
    pub fn external_service_address(&self) -> String {
        format!("{}:{}", self.external_service_host, self.external_service_port)
    }

    /// Poll timeout as a duration
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Idle poll interval as a duration
    pub fn idle_poll_interval(&self) -> Duration {
        Duration::from_millis(self.idle_poll_interval_ms)
    }

    /// Idle wait as a duration
    pub fn idle_wait(&self) -> Duration {
        Duration::from_secs(self.idle_wait_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevator_config_default() {
        let config = ElevatorConfig::default();

        assert_eq!(config.floor_count, 30);
        assert_eq!(config.car_class, CarClass::Standard);
        assert_eq!(config.standard_weight_limit, 600.0);
        assert_eq!(config.service_weight_limit, 1000.0);
        assert_eq!(config.external_service_host, "127.0.0.1");
        assert_eq!(config.external_service_port, 13000);
        config.validate().unwrap();
    }

    #[test]
    fn test_weight_limit_follows_car_class() {
        let mut config = ElevatorConfig::default();
        assert_eq!(config.weight_limit(), 600.0);

        config.car_class = CarClass::ServiceOnly;
        assert_eq!(config.weight_limit(), 1000.0);
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "floor_count": 12,
            "car_class": "service_only",
            "service_weight_limit": 1500.0
        }"#;
        temp_file.write_all(config_json.as_bytes()).unwrap();

        let config = ElevatorConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.floor_count, 12);
        assert_eq!(config.car_class, CarClass::ServiceOnly);
        assert_eq!(config.weight_limit(), 1500.0);
        // Unset fields fall back to defaults
        assert_eq!(config.standard_weight_limit, 600.0);
        assert_eq!(config.external_service_port, 13000);
    }

    #[test]
    fn test_config_file_errors() {
        use tempfile::Builder;

        let missing = ElevatorConfig::from_file("/definitely/not/here.json");
        assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));

        let toml_file = Builder::new().suffix(".toml").tempfile().unwrap();
        let unsupported = ElevatorConfig::from_file(toml_file.path());
        assert!(matches!(unsupported, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs {
            floor_count: Some(8),
            car_class: Some(CarClass::ServiceOnly),
            port: Some(14000),
            ..CliArgs::empty()
        };

        let config = ElevatorConfig::from_cli_args(args).unwrap();
        assert_eq!(config.floor_count, 8);
        assert_eq!(config.car_class, CarClass::ServiceOnly);
        assert_eq!(config.external_service_port, 14000);
        assert_eq!(config.external_service_address(), "127.0.0.1:14000");
    }

    #[test]
    fn test_validation_floor_count() {
        let config = ElevatorConfig { floor_count: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidFloorCount(0))));
    }

    #[test]
    fn test_validation_weight_limits() {
        let config = ElevatorConfig { standard_weight_limit: -1.0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidWeightLimit { .. })
        ));

        let config = ElevatorConfig { service_weight_limit: f64::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_port_and_timeouts() {
        let config = ElevatorConfig { external_service_port: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidPort)));

        let config = ElevatorConfig { poll_timeout_ms: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidTimeout(_))));
    }

    #[test]
    fn test_config_serialization_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("elevator.json");

        let config = ElevatorConfig { floor_count: 5, ..Default::default() };
        config.save_to_file(&path).unwrap();

        let loaded = ElevatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
