use crate::application::dto::{AuditRequest, AuditResponse, AuditSummary};
use crate::ports::outbound::{
    ArtifactStore, AuditResultSink, ProgressReporter, ReleaseFeed, SbomGenerator,
    VulnerabilityDatabase, VulnerabilityScanner,
};
use crate::release_audit::domain::{
    EnrichedVulnerability, PipelineStage, Release, ReleaseRun, VulnerabilityRecord,
};
use crate::release_audit::services::MatchAggregator;
use crate::shared::error::AuditError;
use crate::shared::security::ensure_directory;
use crate::shared::Result;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Records and enrichment produced by one completed release
type ReleaseResult = (Vec<VulnerabilityRecord>, Option<Vec<EnrichedVulnerability>>);

/// AuditReleasesUseCase - sequences the release pipeline over a batch
///
/// Releases run one at a time, stages in fixed order:
/// fetching, extracting, generating SBOM, scanning, aggregating,
/// (enriching), persisting. A failed stage aborts that release only; the
/// batch carries on with the next release. Only a failure to obtain the
/// release list itself is fatal.
///
/// # Type Parameters
/// * `RF` - ReleaseFeed implementation
/// * `AS` - ArtifactStore implementation
/// * `SG` - SbomGenerator implementation
/// * `VS` - VulnerabilityScanner implementation
/// * `VDB` - VulnerabilityDatabase implementation (optional)
/// * `RS` - AuditResultSink implementation
/// * `PR` - ProgressReporter implementation
pub struct AuditReleasesUseCase<RF, AS, SG, VS, VDB, RS, PR> {
    release_feed: RF,
    artifact_store: AS,
    sbom_generator: SG,
    vulnerability_scanner: VS,
    vulnerability_database: Option<VDB>,
    result_sink: RS,
    progress_reporter: PR,
}

impl<RF, AS, SG, VS, VDB, RS, PR> AuditReleasesUseCase<RF, AS, SG, VS, VDB, RS, PR>
where
    RF: ReleaseFeed,
    AS: ArtifactStore,
    SG: SbomGenerator,
    VS: VulnerabilityScanner,
    VDB: VulnerabilityDatabase,
    RS: AuditResultSink,
    PR: ProgressReporter,
{
    /// Creates a new AuditReleasesUseCase with injected dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        release_feed: RF,
        artifact_store: AS,
        sbom_generator: SG,
        vulnerability_scanner: VS,
        vulnerability_database: Option<VDB>,
        result_sink: RS,
        progress_reporter: PR,
    ) -> Self {
        Self {
            release_feed,
            artifact_store,
            sbom_generator,
            vulnerability_scanner,
            vulnerability_database,
            result_sink,
            progress_reporter,
        }
    }

    /// Executes the audit over every release of the feed
    ///
    /// # Errors
    /// Returns an error only when the release list cannot be obtained, the
    /// work directory cannot be prepared, or the batch-level documents
    /// (release snapshot, summary) cannot be written.
    pub fn execute(&self, request: AuditRequest) -> Result<AuditResponse> {
        // Step 1: Obtain the release list
        let releases = self.load_releases(&request)?;

        // Step 2: Record the consumed release list and prepare the work dir
        self.result_sink.persist_releases(&releases)?;
        ensure_directory(&request.work_dir)?;

        let enrich = request.enrich && self.vulnerability_database.is_some();
        if request.enrich && !enrich {
            tracing::warn!("enrichment requested but no vulnerability database is configured");
        }

        let aggregator = MatchAggregator::new(request.attribution_mode);
        let mut summary = AuditSummary::new(
            self.release_feed.source(),
            request.attribution_mode.to_string(),
            enrich,
        );
        let mut results = IndexMap::new();
        let mut enriched = IndexMap::new();

        // Step 3: Run every release through the pipeline
        let total = releases.len();
        for (index, release) in releases.iter().enumerate() {
            self.progress_reporter
                .report_progress(index + 1, total, Some(release.tag()));

            let mut run = ReleaseRun::start(release.tag());
            let outcome = match self.run_release(release, &request, &aggregator, enrich, &mut run) {
                Ok((records, enrichment)) => {
                    let enriched_count = enrichment.as_ref().map(Vec::len);
                    let outcome = run.done(records.len(), enriched_count);
                    results.insert(release.tag().to_string(), records);
                    if let Some(enrichment) = enrichment {
                        enriched.insert(release.tag().to_string(), enrichment);
                    }
                    outcome
                }
                Err(err) => {
                    let reason = summarize_error(&err);
                    tracing::warn!(
                        release = release.tag(),
                        stage = %run.stage(),
                        "release aborted: {}",
                        reason
                    );
                    self.progress_reporter.report_error(&format!(
                        "⚠️  {}: aborted while {}: {}",
                        release.tag(),
                        run.stage(),
                        reason
                    ));
                    run.abort(reason)
                }
            };
            summary.record(outcome);
        }

        // Step 4: Persist the run summary
        summary.distinct_vulnerabilities = count_distinct(&results);
        self.result_sink.persist_summary(&summary)?;
        self.report_completion(&summary);

        Ok(AuditResponse {
            summary,
            results,
            enriched,
        })
    }

    /// Fetches the release list, dropping prereleases when requested
    fn load_releases(&self, request: &AuditRequest) -> Result<Vec<Release>> {
        self.progress_reporter.report(&format!(
            "📦 Fetching releases from {}",
            self.release_feed.source()
        ));

        let mut releases = self.release_feed.fetch_releases()?;
        let fetched = releases.len();

        if request.skip_prereleases {
            releases.retain(|release| !release.is_prerelease());
            let skipped = fetched - releases.len();
            if skipped > 0 {
                self.progress_reporter
                    .report(&format!("🚫 Skipped {} prerelease(s)", skipped));
            }
        }

        self.progress_reporter
            .report(&format!("✅ {} release(s) to audit", releases.len()));
        Ok(releases)
    }

    /// Runs one release through every stage, leaving `run` on the stage that failed
    fn run_release(
        &self,
        release: &Release,
        request: &AuditRequest,
        aggregator: &MatchAggregator,
        enrich: bool,
        run: &mut ReleaseRun,
    ) -> Result<ReleaseResult> {
        let workspace = request.work_dir.join(release.file_stem());

        // Fetching + Extracting: one adapter call, the error tells the stage apart
        let artifact = match self.artifact_store.fetch_and_extract(release, &workspace) {
            Ok(artifact) => artifact,
            Err(err) => {
                if matches!(
                    err.downcast_ref::<AuditError>(),
                    Some(AuditError::ExtractionFailed { .. })
                ) {
                    run.advance(PipelineStage::Extracting);
                }
                return Err(err);
            }
        };
        run.advance(PipelineStage::Extracting);

        run.advance(PipelineStage::GeneratingSbom);
        let sbom = self.sbom_generator.generate(&artifact)?;

        run.advance(PipelineStage::Scanning);
        let matches = self.vulnerability_scanner.scan(&sbom)?;
        // The extracted tree has no consumer past the scanner
        drop(artifact);

        run.advance(PipelineStage::Aggregating);
        let records = aggregator.aggregate(&matches);
        tracing::debug!(
            release = release.tag(),
            matches = matches.len(),
            records = records.len(),
            "aggregated scan matches"
        );

        let enrichment = if enrich {
            run.advance(PipelineStage::Enriching);
            Some(self.enrich_records(&records))
        } else {
            None
        };

        run.advance(PipelineStage::Persisting);
        self.result_sink
            .persist_release(release, &records, enrichment.as_deref())?;

        Ok((records, enrichment))
    }

    /// Looks up every aggregated id; ids the database cannot resolve are left out
    fn enrich_records(&self, records: &[VulnerabilityRecord]) -> Vec<EnrichedVulnerability> {
        let Some(database) = &self.vulnerability_database else {
            return Vec::new();
        };

        records
            .iter()
            .filter_map(|record| {
                let found = database.lookup(&record.cve_id);
                if found.is_none() {
                    tracing::debug!(cve = %record.cve_id, "no enrichment available");
                }
                found
            })
            .collect()
    }

    fn report_completion(&self, summary: &AuditSummary) {
        if summary.aborted == 0 {
            self.progress_reporter.report_completion(&format!(
                "Audited {} release(s), {} distinct vulnerability id(s)",
                summary.completed, summary.distinct_vulnerabilities
            ));
        } else {
            self.progress_reporter.report_completion(&format!(
                "Audited {} of {} release(s) ({} aborted), {} distinct vulnerability id(s)",
                summary.completed,
                summary.total_releases,
                summary.aborted,
                summary.distinct_vulnerabilities
            ));
        }
    }
}

/// Condenses an error into a one-line abort reason, dropping hint lines
fn summarize_error(err: &anyhow::Error) -> String {
    let message = format!("{:#}", err);
    message
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("💡"))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn count_distinct(results: &IndexMap<String, Vec<VulnerabilityRecord>>) -> usize {
    results
        .values()
        .flatten()
        .map(|record| record.cve_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}
