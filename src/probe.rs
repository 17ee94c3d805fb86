//! HTTP existence probe.

use std::time::Duration;

use crate::error::Error;

/// Status code a probed URL must return to count as available.
pub const HTTP_OK: u16 = 200;

/// Issues a GET and reports the status code.
pub trait Probe {
    /// Status code of a GET on `url`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProbeFailed` if no response was received.
    fn status(&self, url: &str) -> Result<u16, Error>;
}

/// Blocking probe backed by a `ureq` agent.
pub struct HttpProbe {
    /// Shared agent; non-2xx statuses are returned, not raised.
    agent: ureq::Agent,
}

impl HttpProbe {
    /// Create a probe. `timeout` of `None` leaves the socket defaults in place.
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        return Self {
            agent: ureq::Agent::new_with_config(config),
        };
    }
}

impl Probe for HttpProbe {
    fn status(&self, url: &str) -> Result<u16, Error> {
        let status = match self.agent.get(url).call() {
            Ok(response) => response.status().as_u16(),
            Err(ureq::Error::StatusCode(code)) => code,
            Err(e) => {
                return Err(Error::ProbeFailed {
                    reason: e.to_string(),
                    url: url.to_string(),
                });
            },
        };
        tracing::debug!(url, status, "probed");
        return Ok(status);
    }
}
