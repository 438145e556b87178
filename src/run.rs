//! Application execution logic.
//!
//! This module runs the `query`, `watch` and `serve` commands against the
//! platform probe built from the validated configuration.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::signal;
use tokio_stream::StreamExt;

use net_advisor::advisor::{AdvisorError, NetworkAdvisor};
use net_advisor::channel::{CHANNEL_NAME, NetworkChannel};
use net_advisor::config::{Command, ValidatedConfig};
use net_advisor::monitor::{ChangeListener, PollOnlyListener};
use net_advisor::network::platform::PlatformProbe;
use net_advisor::network::{ConnectivityProbe, NetworkClassification};

#[cfg(target_os = "linux")]
use net_advisor::network::platform::MeteredSource;

#[cfg(windows)]
use net_advisor::monitor::platform::PlatformListener;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The platform connectivity service could not be asked.
    #[error(transparent)]
    Advisor(#[from] AdvisorError),

    /// Failed to encode a classification for output.
    #[error("Failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    /// Failed to read requests from stdin.
    #[error("Failed to read requests: {0}")]
    Input(#[source] io::Error),

    /// Failed to write to stdout.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),

    /// Unexpected stream termination.
    #[error("Classification stream terminated unexpectedly")]
    StreamTerminated,
}

impl RunError {
    /// Returns true if the failure was an unavailable connectivity probe.
    pub const fn is_probe_unavailable(&self) -> bool {
        matches!(self, Self::Advisor(AdvisorError::ProbeUnavailable(_)))
    }
}

/// Executes the selected command.
///
/// # Errors
///
/// Returns an error if:
/// - `query` cannot reach the platform connectivity service
/// - stdin or stdout fail
/// - the `watch` stream terminates unexpectedly
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Platform-specific network APIs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: Command, config: ValidatedConfig) -> Result<(), RunError> {
    let advisor =
        NetworkAdvisor::new(create_probe(&config)).with_poll_interval(config.poll_interval);

    match command {
        Command::Query => run_query(&advisor, config.json).await,
        Command::Watch => run_watch(&advisor, &config).await,
        Command::Serve => run_serve(NetworkChannel::new(advisor)).await,
        // Handled before the configuration is loaded
        Command::Init { .. } => Ok(()),
    }
}

/// Builds the platform probe from configuration.
#[cfg(target_os = "linux")]
fn create_probe(config: &ValidatedConfig) -> PlatformProbe {
    let source = if config.network_manager {
        MeteredSource::NetworkManager {
            nmcli: config.nmcli_path.clone(),
        }
    } else {
        MeteredSource::Disabled
    };

    PlatformProbe::new().with_metered_source(source)
}

/// Builds the platform probe from configuration.
#[cfg(not(target_os = "linux"))]
fn create_probe(_config: &ValidatedConfig) -> PlatformProbe {
    PlatformProbe::default()
}

/// Renders a classification as one output line.
fn render(classification: &NetworkClassification, json: bool) -> Result<String, RunError> {
    if json {
        return serde_json::to_string(classification).map_err(RunError::Encode);
    }

    Ok(if classification.is_connected() {
        classification.to_string()
    } else {
        format!("{classification} (metered)")
    })
}

/// Writes one line to `out` and flushes it.
async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> Result<(), RunError> {
    out.write_all(line.as_bytes())
        .await
        .map_err(RunError::Output)?;
    out.write_all(b"\n").await.map_err(RunError::Output)?;
    out.flush().await.map_err(RunError::Output)
}

/// Prints the current classification once.
async fn run_query<P>(advisor: &NetworkAdvisor<P>, json: bool) -> Result<(), RunError>
where
    P: ConnectivityProbe + 'static,
{
    let status = advisor.query_metered_status_async().await?;
    write_line(&mut tokio::io::stdout(), &render(&status, json)?).await
}

/// Prints the current classification, then every transition until shutdown.
///
/// Excluded from coverage - requires platform APIs and signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_watch<P>(
    advisor: &NetworkAdvisor<P>,
    config: &ValidatedConfig,
) -> Result<(), RunError>
where
    P: ConnectivityProbe + Unpin + 'static,
{
    if config.poll_only {
        tracing::info!(
            "Polling-only mode enabled (interval: {}s)",
            config.poll_interval.as_secs()
        );
        return watch_loop(advisor, PollOnlyListener, config.json).await;
    }

    run_watch_with_platform_listener(advisor, config).await
}

#[cfg(not(tarpaulin_include))]
#[cfg(windows)]
async fn run_watch_with_platform_listener<P>(
    advisor: &NetworkAdvisor<P>,
    config: &ValidatedConfig,
) -> Result<(), RunError>
where
    P: ConnectivityProbe + Unpin + 'static,
{
    tracing::info!(
        "Hybrid mode enabled (change notifications + polling every {}s)",
        config.poll_interval.as_secs()
    );
    watch_loop(advisor, PlatformListener::new(), config.json).await
}

#[cfg(not(tarpaulin_include))]
#[cfg(not(windows))]
async fn run_watch_with_platform_listener<P>(
    advisor: &NetworkAdvisor<P>,
    config: &ValidatedConfig,
) -> Result<(), RunError>
where
    P: ConnectivityProbe + Unpin + 'static,
{
    tracing::info!(
        "Change notifications not supported on this platform, polling every {}s",
        config.poll_interval.as_secs()
    );
    watch_loop(advisor, PollOnlyListener, config.json).await
}

#[cfg(not(tarpaulin_include))]
async fn watch_loop<P, L>(
    advisor: &NetworkAdvisor<P>,
    listener: L,
    json: bool,
) -> Result<(), RunError>
where
    P: ConnectivityProbe + Unpin + 'static,
    L: ChangeListener,
{
    let mut stdout = tokio::io::stdout();

    match advisor.query_metered_status_async().await {
        Ok(status) => write_line(&mut stdout, &render(&status, json)?).await?,
        Err(e) => tracing::warn!("Initial query failed: {e}"),
    }

    let mut stream = advisor.watch(listener);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            next = stream.next() => {
                match next {
                    Some(status) => {
                        tracing::info!("Network changed: {status}");
                        write_line(&mut stdout, &render(&status, json)?).await?;
                    }
                    None => return Err(RunError::StreamTerminated),
                }
            }
        }
    }
}

/// Answers method calls read from stdin, one JSON request per line.
///
/// Excluded from coverage - requires stdio and signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_serve<P>(channel: NetworkChannel<P>) -> Result<(), RunError>
where
    P: ConnectivityProbe + 'static,
{
    tracing::info!("Serving channel '{CHANNEL_NAME}' on stdin/stdout");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        biased;

        () = &mut shutdown => {
            tracing::info!("Shutdown signal received, stopping...");
            Ok(())
        }

        result = serve_lines(&channel, tokio::io::stdin(), tokio::io::stdout()) => result,
    }
}

/// Answers every request line from `input` on `output` until EOF.
async fn serve_lines<P, R, W>(
    channel: &NetworkChannel<P>,
    input: R,
    mut output: W,
) -> Result<(), RunError>
where
    P: ConnectivityProbe + 'static,
    R: tokio::io::AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();

    while let Some(line) = lines.next_line().await.map_err(RunError::Input)? {
        if let Some(response) = channel.handle_line(&line).await {
            write_line(&mut output, &response).await?;
        }
    }

    tracing::debug!("Request stream closed");
    Ok(())
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed, that signal is never observed.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
