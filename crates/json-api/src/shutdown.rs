//! Graceful shutdown on Cloud Run instance termination

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use tokio::signal;
use tracing::info;

/// Cloud Run sends SIGTERM and allows ten seconds before SIGKILL.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(9);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Interrupt => f.write_str("SIGINT"),
            Signal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

#[cfg(unix)]
async fn next_signal() -> io::Result<Signal> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    tokio::select! {
        result = signal::ctrl_c() => result.map(|()| Signal::Interrupt),
        _ = terminate.recv() => Ok(Signal::Terminate),
    }
}

#[cfg(not(unix))]
async fn next_signal() -> io::Result<Signal> {
    signal::ctrl_c().await.map(|()| Signal::Interrupt)
}

/// Wait for a shutdown signal, then let in-flight requests finish.
pub(crate) async fn listen(handle: ServerHandle) -> io::Result<()> {
    let received = next_signal().await?;

    info!(signal = %received, drain_timeout = ?DRAIN_TIMEOUT, "shutting down");

    handle.stop_graceful(Some(DRAIN_TIMEOUT));

    Ok(())
}
