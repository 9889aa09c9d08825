use crate::shared::Result;
use reqwest::blocking::Client;
use std::time::Duration;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Blocking GET transport used by the JSON API clients
///
/// A transport error means no response was received at all; any received
/// status, including 4xx/5xx, is returned as a response.
pub trait HttpTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// Suspends the caller between retry attempts
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// HttpTransport backed by a blocking reqwest client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    const TIMEOUT_SECONDS: u64 = 30;

    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client(Some(Duration::from_secs(Self::TIMEOUT_SECONDS)))?,
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// Builds the blocking client shared by every network adapter
///
/// `timeout` of `None` leaves whole-request time unbounded (large tarballs);
/// the connect phase is always bounded.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("release-cve-audit/{}", version);
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .user_agent(user_agent);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
