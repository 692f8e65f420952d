//! Network reachability probe.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Default host contacted to infer connectivity.
pub const DEFAULT_PROBE_URL: &str = "https://www.google.com";

/// Timeout applied to the probe request.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Decides whether the host can reach the network.
pub trait ConnectivityProbe {
    /// `Ok` if a connection could be made, `Err` describing why not.
    fn probe(&self) -> Result<()>;
}

/// Probes connectivity with a single HTTP GET.
///
/// Any response, including an HTTP error status, proves connectivity;
/// only transport failures (DNS, refused connection, timeout, TLS) count
/// as offline. The HTTP client is built when the probe runs, so a client
/// that cannot be built is reported as a connectivity failure.
pub struct HttpProbe {
    url: String,
    timeout: Duration,
}

impl HttpProbe {
    /// Create a probe for `url` with the default 5-second timeout.
    pub fn new(url: &str) -> Self {
        Self::with_timeout(url, PROBE_TIMEOUT)
    }

    /// Create a probe with a custom timeout.
    pub fn with_timeout(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }

    /// URL this probe contacts.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ConnectivityProbe for HttpProbe {
    fn probe(&self) -> Result<()> {
        let client = Client::builder()
            .user_agent(concat!("devprov/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .context("building HTTP client")?;

        let response = client.get(&self.url).send()?;
        tracing::debug!("Probe {} answered HTTP {}", self.url, response.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_timeout_is_5_seconds() {
        let probe = HttpProbe::new(DEFAULT_PROBE_URL);
        assert_eq!(probe.timeout(), Duration::from_secs(5));
        assert_eq!(probe.url(), "https://www.google.com");
    }

    #[test]
    fn probe_succeeds_against_reachable_server() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).body("ok");
        });

        let probe = HttpProbe::new(&server.url("/"));

        assert!(probe.probe().is_ok());
        mock.assert();
    }

    #[test]
    fn http_error_status_still_counts_as_connected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(503);
        });

        let probe = HttpProbe::new(&server.url("/"));

        assert!(probe.probe().is_ok());
    }

    #[test]
    fn probe_fails_when_nothing_listens() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let probe =
            HttpProbe::with_timeout(&format!("http://127.0.0.1:{}/", port), Duration::from_secs(2));

        assert!(probe.probe().is_err());
    }

    #[test]
    fn malformed_url_fails_at_check_time_not_construction() {
        let probe = HttpProbe::new("not a url");

        assert_eq!(probe.url(), "not a url");
        assert!(probe.probe().is_err());
    }
}
