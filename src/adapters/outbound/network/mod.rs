/// Network adapters for external API calls and artifact downloads
mod github_release_feed;
mod http_artifact_store;
pub(crate) mod http_transport;
mod nvd_client;

pub use github_release_feed::{GitHubReleaseFeed, DEFAULT_PER_PAGE, GITHUB_API_URL};
pub use http_artifact_store::HttpArtifactStore;
pub use http_transport::{HttpResponse, HttpTransport, ReqwestTransport, Sleeper, ThreadSleeper};
pub use nvd_client::{NvdClient, DEFAULT_BACKOFF_SECONDS, DEFAULT_MAX_ATTEMPTS, NVD_API_ENDPOINT};
