use crate::release_audit::domain::EnrichedVulnerability;

/// VulnerabilityDatabase port for authoritative severity data
pub trait VulnerabilityDatabase {
    /// Looks up one vulnerability id
    ///
    /// Never fails: rate-limit exhaustion, transport errors and malformed
    /// responses all degrade to `None`.
    fn lookup(&self, cve_id: &str) -> Option<EnrichedVulnerability>;
}
