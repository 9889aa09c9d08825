use super::http_transport::{HttpTransport, ReqwestTransport, Sleeper, ThreadSleeper};
use crate::ports::outbound::VulnerabilityDatabase;
use crate::release_audit::domain::{CvssScoring, CvssVersion, EnrichedVulnerability};
use crate::release_audit::policies::CvssPolicy;
use crate::shared::Result;
use serde::Deserialize;
use std::time::Duration;

pub const NVD_API_ENDPOINT: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_SECONDS: u64 = 20;

/// NVD CVE API 2.0 client
///
/// One GET per lookup, asking for exactly one result. HTTP 403 is the NVD
/// rate-limit signal: the client waits a fixed backoff and retries until the
/// attempt budget is spent. Every other failure (other status, transport
/// error, unexpected body) ends the lookup at once with no result.
///
/// The client keeps no cache; repeated ids are queried again.
pub struct NvdClient<T = ReqwestTransport, S = ThreadSleeper> {
    transport: T,
    sleeper: S,
    api_url: String,
    api_key: Option<String>,
    max_attempts: u32,
    backoff: Duration,
    policy: CvssPolicy,
}

impl NvdClient {
    /// Creates a client for the public NVD endpoint with default retry settings
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(
            ReqwestTransport::new()?,
            ThreadSleeper,
            NVD_API_ENDPOINT,
        ))
    }
}

impl<T: HttpTransport, S: Sleeper> NvdClient<T, S> {
    pub fn with_transport(transport: T, sleeper: S, api_url: &str) -> Self {
        Self {
            transport,
            sleeper,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::from_secs(DEFAULT_BACKOFF_SECONDS),
            policy: CvssPolicy::V31Only,
        }
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Sends the key in the `apiKey` header, which raises NVD's rate limit
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Sets the total attempt budget (at least 1) and the wait after each 403
    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff = backoff;
        self
    }

    pub fn with_policy(mut self, policy: CvssPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn query_url(&self, cve_id: &str) -> String {
        format!(
            "{}?cveId={}&resultsPerPage=1",
            self.api_url,
            urlencoding::encode(cve_id)
        )
    }
}

impl<T: HttpTransport, S: Sleeper> VulnerabilityDatabase for NvdClient<T, S> {
    fn lookup(&self, cve_id: &str) -> Option<EnrichedVulnerability> {
        let url = self.query_url(cve_id);
        let headers: Vec<(&str, &str)> = match &self.api_key {
            Some(key) => vec![("apiKey", key.as_str())],
            None => Vec::new(),
        };

        for attempt in 1..=self.max_attempts {
            let response = match self.transport.get(&url, &headers) {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(cve = cve_id, "NVD request failed: {:#}", e);
                    return None;
                }
            };

            match response.status {
                200 => {
                    return match parse_cve(&response.body, self.policy) {
                        Ok(enriched) => Some(enriched),
                        Err(e) => {
                            tracing::warn!(cve = cve_id, "unusable NVD response: {}", e);
                            None
                        }
                    };
                }
                403 => {
                    tracing::warn!(
                        cve = cve_id,
                        "NVD rate limit hit (attempt {}/{})",
                        attempt,
                        self.max_attempts
                    );
                    if attempt < self.max_attempts {
                        self.sleeper.sleep(self.backoff);
                    }
                }
                status => {
                    tracing::debug!(cve = cve_id, status, "NVD lookup returned no result");
                    return None;
                }
            }
        }

        tracing::warn!(
            cve = cve_id,
            "giving up after {} rate-limited attempt(s)",
            self.max_attempts
        );
        None
    }
}

/// Parses the first result of an NVD 2.0 response
fn parse_cve(body: &str, policy: CvssPolicy) -> Result<EnrichedVulnerability> {
    let response: NvdResponse = serde_json::from_str(body)?;
    let Some(first) = response.vulnerabilities.into_iter().next() else {
        anyhow::bail!("response carries no vulnerability entry");
    };
    let cve = first.cve;

    // A metric block without cvssData carries no scoring
    let v31 = cve.metrics.cvss_metric_v31.into_iter().next().and_then(|m| {
        let data = m.cvss_data?;
        Some(CvssScoring {
            version: CvssVersion::V31,
            vector_string: data.vector_string,
            base_score: data.base_score,
            impact_score: m.impact_score,
            exploitability_score: m.exploitability_score,
            severity: data.base_severity,
        })
    });
    let v2 = cve.metrics.cvss_metric_v2.into_iter().next().and_then(|m| {
        let data = m.cvss_data?;
        Some(CvssScoring {
            version: CvssVersion::V2,
            vector_string: data.vector_string,
            base_score: data.base_score,
            impact_score: m.impact_score,
            exploitability_score: m.exploitability_score,
            severity: m.base_severity,
        })
    });

    let cwe_id = cve
        .weaknesses
        .into_iter()
        .flat_map(|w| w.description)
        .map(|d| d.value)
        .next();

    Ok(
        EnrichedVulnerability::new(cve.id, cve.published, policy.select(v31, v2))
            .with_last_modified(cve.last_modified)
            .with_cwe(cwe_id),
    )
}

// NVD API 2.0 response structures

#[derive(Debug, Deserialize)]
struct NvdResponse {
    #[serde(default)]
    vulnerabilities: Vec<NvdVulnerability>,
}

#[derive(Debug, Deserialize)]
struct NvdVulnerability {
    cve: NvdCve,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCve {
    id: String,
    #[serde(default)]
    published: Option<String>,
    #[serde(default)]
    last_modified: Option<String>,
    #[serde(default)]
    metrics: NvdMetrics,
    #[serde(default)]
    weaknesses: Vec<NvdWeakness>,
}

#[derive(Debug, Default, Deserialize)]
struct NvdMetrics {
    #[serde(rename = "cvssMetricV31", default)]
    cvss_metric_v31: Vec<NvdCvssMetricV3>,
    #[serde(rename = "cvssMetricV2", default)]
    cvss_metric_v2: Vec<NvdCvssMetricV2>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCvssMetricV3 {
    #[serde(default)]
    cvss_data: Option<NvdCvssDataV3>,
    #[serde(default)]
    impact_score: Option<f64>,
    #[serde(default)]
    exploitability_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCvssDataV3 {
    #[serde(default)]
    vector_string: Option<String>,
    #[serde(default)]
    base_score: Option<f64>,
    #[serde(default)]
    base_severity: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCvssMetricV2 {
    #[serde(default)]
    cvss_data: Option<NvdCvssDataV2>,
    // v2 keeps severity on the metric, not in cvssData
    #[serde(default)]
    base_severity: Option<String>,
    #[serde(default)]
    impact_score: Option<f64>,
    #[serde(default)]
    exploitability_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCvssDataV2 {
    #[serde(default)]
    vector_string: Option<String>,
    #[serde(default)]
    base_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NvdWeakness {
    #[serde(default)]
    description: Vec<NvdDescription>,
}

#[derive(Debug, Deserialize)]
struct NvdDescription {
    value: String,
}
