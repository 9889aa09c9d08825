use crate::release_audit::domain::Release;
use crate::shared::Result;

/// ReleaseFeed port supplying the ordered releases of one repository
///
/// The pipeline only consumes the sequence; pagination and caching, if any,
/// belong to the implementation.
pub trait ReleaseFeed {
    /// Human-readable name of the source (repository or snapshot file)
    fn source(&self) -> String;

    /// Fetches the releases to audit, in feed order
    ///
    /// # Errors
    /// Returns an error if the feed cannot be reached or parsed. The batch has
    /// nothing to process in that case.
    fn fetch_releases(&self) -> Result<Vec<Release>>;
}
