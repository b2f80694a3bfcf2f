//! External call service
//!
//! A background TCP listener that hands out the calls in a [`CallStore`].
//! Each accepted connection receives the currently stored floors as a JSON
//! array, after which the connection is closed and the delivered floors are
//! removed from the store.

use super::CallStore;
use crate::simulation::ElevatorResult;
use std::io::{ErrorKind, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause between accept attempts when no client is waiting
const ACCEPT_BACKOFF: Duration = Duration::from_millis(20);

/// Serves stored floor calls over TCP
#[derive(Debug)]
pub struct CallServer {
    address: String,
    store: CallStore,
}

impl CallServer {
    /// Create a server for `address` (`host:port`) backed by `store`
    pub fn new(address: impl Into<String>, store: CallStore) -> Self {
        Self { address: address.into(), store }
    }

    /// Bind the listener and start serving on a background thread
    pub fn start(self) -> ElevatorResult<CallServerHandle> {
        let listener = TcpListener::bind(&self.address)?;
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let store = self.store;

        let thread = thread::spawn(move || serve(listener, store, flag));

        info!("External call service listening on {}", local_addr);
        Ok(CallServerHandle { local_addr, running, thread: Some(thread) })
    }
}

/// Handle to a running [`CallServer`]; stops the server when dropped
#[derive(Debug)]
pub struct CallServerHandle {
    local_addr: SocketAddr,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl CallServerHandle {
    /// Address the server is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether the accept loop is still running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop accepting connections and wait for the accept loop to exit
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("External call service thread panicked");
            }
            info!("External call service on {} stopped", self.local_addr);
        }
    }
}

impl Drop for CallServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn serve(listener: TcpListener, store: CallStore, running: Arc<AtomicBool>) {
    while running.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, peer)) => match deliver(stream, &store) {
                Ok(count) => debug!(%peer, count, "Delivered external calls"),
                Err(e) => warn!(%peer, "Failed to deliver external calls: {}", e),
            },
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(ACCEPT_BACKOFF),
            Err(e) => warn!("Incoming connection errored: {}", e),
        }
    }
}

/// Write the stored calls to `stream`, then forget the ones written
fn deliver(mut stream: TcpStream, store: &CallStore) -> ElevatorResult<usize> {
    stream.set_nonblocking(false)?;

    let floors = store.pending();
    let payload = serde_json::to_vec(&floors)?;
    stream.write_all(&payload)?;
    stream.flush()?;
    if let Err(e) = stream.shutdown(Shutdown::Both) {
        debug!("Failed to shut down call connection: {}", e);
    }

    store.remove_delivered(&floors);
    Ok(floors.len())
}
