//! TCP client for the external call service

use super::ExternalRequestSource;
use crate::simulation::{ElevatorError, ElevatorResult};
use crate::types::{ElevatorConfig, Floor};
use std::io::{self, Read};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// Polls a [`CallServer`](super::CallServer) for external calls
///
/// Every poll opens a fresh connection and reads one JSON array of floors.
/// Connection, timeout and decode failures all count as "no calls pending".
#[derive(Debug, Clone)]
pub struct TcpCallSource {
    address: String,
    timeout: Duration,
}

impl TcpCallSource {
    /// Create a source for `address` (`host:port`)
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self { address: address.into(), timeout }
    }

    /// Create a source for the service named in the configuration
    pub fn from_config(config: &ElevatorConfig) -> Self {
        Self::new(config.external_service_address(), config.poll_timeout())
    }

    /// Address polled
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Fetch the calls once, reporting failures
    pub fn fetch(&self) -> ElevatorResult<Vec<Floor>> {
        let mut stream = self.connect()?;
        stream.set_read_timeout(Some(self.timeout))?;

        let mut payload = Vec::new();
        stream.read_to_end(&mut payload)?;

        Ok(serde_json::from_slice(&payload)?)
    }

    fn connect(&self) -> ElevatorResult<TcpStream> {
        let mut last_error = None;
        for addr in self.address.to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_error = Some(e),
            }
        }

        Err(ElevatorError::Io(last_error.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("no address resolved for {}", self.address),
            )
        })))
    }
}

impl ExternalRequestSource for TcpCallSource {
    fn poll(&mut self) -> Vec<Floor> {
        match self.fetch() {
            Ok(floors) => floors,
            Err(e) => {
                debug!(address = %self.address, "External call poll failed: {}", e);
                Vec::new()
            }
        }
    }
}
