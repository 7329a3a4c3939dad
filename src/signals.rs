// src/signals.rs

//! Waiting for a shutdown request from the OS.

use tracing::info;

/// Resolve once SIGINT (Ctrl-C) or, on unix, SIGTERM is received.
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res?;
                info!("received Ctrl-C");
            }
            _ = term.recv() => {
                info!("received SIGTERM");
            }
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("received Ctrl-C");
        Ok(())
    }
}
