//! Dispatch of method calls to the advisor.

use super::{ChannelError, INVALID_REQUEST, Method, MethodCall, MethodResponse, PLATFORM_ERROR};
use crate::advisor::{AdvisorError, NetworkAdvisor};
use crate::network::{ConnectivityProbe, NetworkClassification};

/// Answers method calls on the `unifydesk/network` channel.
///
/// Unknown methods yield [`MethodResponse::NotImplemented`], probe failures
/// yield a [`PLATFORM_ERROR`] response. Handling never panics and never
/// substitutes a default answer for a failed probe.
#[derive(Debug, Clone)]
pub struct NetworkChannel<P> {
    advisor: NetworkAdvisor<P>,
}

impl<P> NetworkChannel<P>
where
    P: ConnectivityProbe + 'static,
{
    /// Creates a channel answering from `advisor`.
    #[must_use]
    pub const fn new(advisor: NetworkAdvisor<P>) -> Self {
        Self { advisor }
    }

    /// Returns the advisor backing this channel.
    #[must_use]
    pub const fn advisor(&self) -> &NetworkAdvisor<P> {
        &self.advisor
    }

    /// Handles a call on the current thread.
    #[must_use]
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        match call.method.parse::<Method>() {
            Ok(method) => respond(method, self.advisor.query_metered_status()),
            Err(e) => not_implemented(e),
        }
    }

    /// Handles a call with the probe running on the blocking thread pool.
    pub async fn handle_async(&self, call: &MethodCall) -> MethodResponse {
        match call.method.parse::<Method>() {
            Ok(method) => respond(method, self.advisor.query_metered_status_async().await),
            Err(e) => not_implemented(e),
        }
    }

    /// Decodes one request line, handles it and encodes the response line.
    ///
    /// Returns `None` for blank lines.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match decode(line) {
            Ok(call) => self.handle_async(&call).await,
            Err(e) => {
                tracing::debug!("Rejected request line: {e}");
                MethodResponse::error(INVALID_REQUEST, e.to_string())
            }
        };

        Some(response.to_line())
    }
}

fn decode(line: &str) -> Result<MethodCall, ChannelError> {
    Ok(serde_json::from_str(line)?)
}

fn respond(
    method: Method,
    outcome: Result<NetworkClassification, AdvisorError>,
) -> MethodResponse {
    match outcome {
        Ok(status) => {
            tracing::debug!("{method} -> {status}");
            match method {
                Method::IsActiveNetworkMetered => MethodResponse::success(status.is_metered()),
                Method::GetNetworkStatus => match serde_json::to_value(status) {
                    Ok(value) => MethodResponse::success(value),
                    Err(e) => MethodResponse::error(PLATFORM_ERROR, e.to_string()),
                },
            }
        }
        Err(e) => {
            tracing::warn!("{method} failed: {e}");
            MethodResponse::error(PLATFORM_ERROR, e.to_string())
        }
    }
}

fn not_implemented(error: ChannelError) -> MethodResponse {
    tracing::debug!("{error}");
    match error {
        ChannelError::NotImplemented { method } => MethodResponse::NotImplemented { method },
        ChannelError::InvalidRequest(e) => MethodResponse::error(INVALID_REQUEST, e.to_string()),
    }
}
