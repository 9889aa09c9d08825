pub mod enriched_vulnerability;
pub mod extracted_artifact;
pub mod pipeline_stage;
pub mod release;
pub mod scan_match;
pub mod vulnerability_record;

pub use enriched_vulnerability::{CvssScoring, CvssVersion, EnrichedVulnerability};
pub use extracted_artifact::{ExtractedArtifact, SbomDocument};
pub use pipeline_stage::{PipelineStage, ReleaseOutcome, ReleaseRun, ReleaseStatus};
pub use release::Release;
pub use scan_match::ScanMatch;
pub use vulnerability_record::{Attribution, VulnerabilityRecord};
