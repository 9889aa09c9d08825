use serde::Serialize;

/// Stages of one release's pipeline run, in execution order.
///
/// The derived ordering is the execution order; a run only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    Fetching,
    Extracting,
    GeneratingSbom,
    Scanning,
    Aggregating,
    Enriching,
    Persisting,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Fetching => "fetching",
            PipelineStage::Extracting => "extracting",
            PipelineStage::GeneratingSbom => "generating SBOM",
            PipelineStage::Scanning => "scanning",
            PipelineStage::Aggregating => "aggregating",
            PipelineStage::Enriching => "enriching",
            PipelineStage::Persisting => "persisting",
        };
        write!(f, "{}", name)
    }
}

/// Terminal state of one release's run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ReleaseStatus {
    Done {
        vulnerability_count: usize,
        enriched_count: Option<usize>,
    },
    Aborted {
        stage: PipelineStage,
        reason: String,
    },
}

/// Outcome of one release, in feed order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseOutcome {
    pub tag: String,
    #[serde(flatten)]
    pub status: ReleaseStatus,
}

impl ReleaseOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self.status, ReleaseStatus::Done { .. })
    }
}

/// Tracks the current stage of a release run and enforces forward-only transitions
#[derive(Debug)]
pub struct ReleaseRun {
    tag: String,
    stage: PipelineStage,
}

impl ReleaseRun {
    pub fn start(tag: &str) -> Self {
        tracing::debug!(release = tag, stage = %PipelineStage::Fetching, "release run started");
        Self {
            tag: tag.to_string(),
            stage: PipelineStage::Fetching,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Moves to `next`. Backward or repeated transitions are ignored.
    pub fn advance(&mut self, next: PipelineStage) {
        if next <= self.stage {
            tracing::warn!(
                release = %self.tag,
                "ignoring transition from {} back to {}",
                self.stage,
                next
            );
            return;
        }
        tracing::debug!(release = %self.tag, stage = %next, "stage transition");
        self.stage = next;
    }

    pub fn done(self, vulnerability_count: usize, enriched_count: Option<usize>) -> ReleaseOutcome {
        ReleaseOutcome {
            tag: self.tag,
            status: ReleaseStatus::Done {
                vulnerability_count,
                enriched_count,
            },
        }
    }

    /// Aborts in the current stage. The caller advances the run first when
    /// one adapter call spans two stages (fetch + extract).
    pub fn abort(self, reason: String) -> ReleaseOutcome {
        ReleaseOutcome {
            tag: self.tag,
            status: ReleaseStatus::Aborted {
                stage: self.stage,
                reason,
            },
        }
    }
}
