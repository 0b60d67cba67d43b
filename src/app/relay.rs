use crate::host::{HostLevel, LogCallbacks, parse_line};
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

/// Reads host log lines from `reader` and emits each one through `callbacks`.
///
/// Lines in the host format keep their own level and tag; anything else is
/// emitted at INFO under `default_tag`. Blank lines are skipped. Returns the
/// number of lines emitted once the reader hits EOF or `shutdown` completes.
pub async fn run_relay<R, F>(
    reader: R,
    callbacks: &mut LogCallbacks,
    default_tag: &str,
    shutdown: F,
) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = reader.lines();
    let mut relayed = 0u64;
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            () = &mut shutdown => {
                info!("Shutdown signal received, stopping relay");
                break;
            }
        };
        let Some(line) = line else {
            debug!("Input closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(Some(host_line)) => {
                callbacks.emit(host_line.level.as_u8(), &host_line.tag, &host_line.message);
            }
            Ok(None) => callbacks.emit(HostLevel::Info.as_u8(), default_tag, &line),
            Err(e) => {
                warn!("Host line pattern unavailable: {}", e);
                callbacks.emit(HostLevel::Info.as_u8(), default_tag, &line);
            }
        }
        relayed += 1;
    }

    info!(relayed, "Relay finished");
    Ok(relayed)
}
