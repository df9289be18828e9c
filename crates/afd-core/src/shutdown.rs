//! OS signal handling for graceful shutdown.
//!
//! SIGINT, SIGTERM and SIGQUIT all trigger the same behaviour: the shared
//! [`CancellationToken`] is cancelled and the labeling loop stops at its
//! next wait point.
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::CoreError;

/// Install signal handlers and spawn a task cancelling `cancel` on the first signal.
///
/// Handlers are registered before this function returns, so a registration
/// failure is reported to the caller rather than lost in the task. Must be
/// called from within a tokio runtime.
///
/// The task also exits quietly if `cancel` is cancelled by someone else.
#[cfg(unix)]
pub fn spawn_signal_listener(cancel: CancellationToken) -> Result<JoinHandle<()>, CoreError> {
    use tokio::signal::unix::{SignalKind, signal};

    let register = |kind: SignalKind, name: &'static str| {
        signal(kind).map_err(|source| CoreError::Signal {
            signal: name,
            source,
        })
    };
    let mut sigint = register(SignalKind::interrupt(), "SIGINT")?;
    let mut sigterm = register(SignalKind::terminate(), "SIGTERM")?;
    let mut sigquit = register(SignalKind::quit(), "SIGQUIT")?;

    Ok(tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
            _ = sigquit.recv() => "SIGQUIT",
            _ = cancel.cancelled() => {
                debug!("signal listener released");
                return;
            }
        };
        info!(signal = name, "received signal, shutting down");
        cancel.cancel();
    }))
}

/// Non-unix fallback: only Ctrl-C is available.
#[cfg(not(unix))]
pub fn spawn_signal_listener(cancel: CancellationToken) -> Result<JoinHandle<()>, CoreError> {
    Ok(tokio::spawn(async move {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    debug!("ctrl-c listener failed: {e}");
                    return;
                }
            }
            _ = cancel.cancelled() => return,
        }
        info!(signal = "ctrl-c", "received signal, shutting down");
        cancel.cancel();
    }))
}
