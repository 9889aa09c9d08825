mod cli;

use cli::{Args, AuditArgs, Command, ImportNvdArgs};
use release_cve_audit::adapters::outbound::console::StderrProgressReporter;
use release_cve_audit::adapters::outbound::filesystem::{
    JsonFileReleaseFeed, JsonResultWriter, NvdFeedImporter,
};
use release_cve_audit::adapters::outbound::network::{
    GitHubReleaseFeed, HttpArtifactStore, NvdClient, DEFAULT_BACKOFF_SECONDS,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_PER_PAGE, GITHUB_API_URL, NVD_API_ENDPOINT,
};
use release_cve_audit::adapters::outbound::tools::{GrypeScanner, SyftSbomGenerator};
use release_cve_audit::application::dto::{AuditRequest, AuditResponse};
use release_cve_audit::application::use_cases::{AuditReleasesUseCase, ImportNvdFeedUseCase};
use release_cve_audit::config::{self, ConfigFile};
use release_cve_audit::ports::outbound::ReleaseFeed;
use release_cve_audit::release_audit::domain::ReleaseStatus;
use release_cve_audit::release_audit::policies::{AttributionMode, CvssPolicy};
use release_cve_audit::shared::error::{AuditError, ExitCode};
use release_cve_audit::shared::Result;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tempfile::TempDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
const NVD_API_KEY_ENV: &str = "NVD_API_KEY";

fn main() {
    // clap exits with status 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(args.verbose, args.quiet);

    let outcome = match args.command {
        Command::Audit(audit) => run_audit(audit, args.quiet),
        Command::ImportNvd(import) => run_import(import, args.quiet),
    };

    match outcome {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let log_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn progress_reporter(quiet: bool) -> StderrProgressReporter {
    if quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    }
}

/// Where the batch gets its release list from
#[derive(Debug, Clone, PartialEq)]
enum ReleaseSource {
    Repository(String),
    Snapshot(PathBuf),
}

/// Audit settings after merging CLI flags, the config file and defaults
#[derive(Debug)]
struct AuditSettings {
    source: ReleaseSource,
    per_page: u32,
    skip_prereleases: bool,
    output_dir: PathBuf,
    work_dir: Option<PathBuf>,
    keep_artifacts: bool,
    enrich: bool,
    attribution_mode: AttributionMode,
    cvss_policy: CvssPolicy,
    max_attempts: u32,
    backoff: Duration,
    syft: PathBuf,
    grype: PathBuf,
    nvd_api_url: String,
    github_api_url: String,
}

impl AuditSettings {
    fn resolve(args: AuditArgs, config: ConfigFile) -> Result<Self> {
        let source = match (args.repo, args.releases_file) {
            (Some(repo), _) => ReleaseSource::Repository(repo),
            (None, Some(file)) => ReleaseSource::Snapshot(file),
            (None, None) => match (config.repository, config.releases_file) {
                (Some(_), Some(_)) => {
                    return Err(AuditError::Validation {
                        message: "config sets both repository and releases_file; keep one or pass --repo / --releases-file".to_string(),
                    }
                    .into())
                }
                (Some(repo), None) => ReleaseSource::Repository(repo),
                (None, Some(file)) => ReleaseSource::Snapshot(file),
                (None, None) => {
                    return Err(AuditError::Validation {
                        message: "no release source given; pass --repo owner/name or --releases-file FILE".to_string(),
                    }
                    .into())
                }
            },
        };

        if let ReleaseSource::Repository(ref repo) = source {
            if !config::is_owner_name(repo) {
                return Err(AuditError::Validation {
                    message: format!("repository '{}' must be given as owner/name", repo),
                }
                .into());
            }
        }

        Ok(Self {
            source,
            per_page: args
                .per_page
                .or(config.per_page)
                .unwrap_or(DEFAULT_PER_PAGE),
            skip_prereleases: args.skip_prereleases || config.skip_prereleases.unwrap_or(false),
            output_dir: args
                .output_dir
                .or(config.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            work_dir: args.work_dir.or(config.work_dir),
            keep_artifacts: args.keep_artifacts || config.keep_artifacts.unwrap_or(false),
            enrich: args.enrich || config.enrich.unwrap_or(false),
            attribution_mode: args
                .attribution_mode
                .or(config.attribution_mode)
                .unwrap_or_default(),
            cvss_policy: args.cvss_policy.or(config.cvss_policy).unwrap_or_default(),
            max_attempts: args
                .max_attempts
                .or(config.max_attempts)
                .unwrap_or(DEFAULT_MAX_ATTEMPTS),
            backoff: Duration::from_secs(
                args.backoff_seconds
                    .or(config.backoff_seconds)
                    .unwrap_or(DEFAULT_BACKOFF_SECONDS),
            ),
            syft: args
                .syft
                .or(config.syft_path)
                .unwrap_or_else(|| PathBuf::from("syft")),
            grype: args
                .grype
                .or(config.grype_path)
                .unwrap_or_else(|| PathBuf::from("grype")),
            nvd_api_url: args
                .nvd_api_url
                .or(config.nvd_api_url)
                .unwrap_or_else(|| NVD_API_ENDPOINT.to_string()),
            github_api_url: args
                .github_api_url
                .or(config.github_api_url)
                .unwrap_or_else(|| GITHUB_API_URL.to_string()),
        })
    }
}

fn load_config(explicit: Option<&PathBuf>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => config::load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(config::discover_config(&cwd)?.unwrap_or_default())
        }
    }
}

fn secret(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn run_audit(args: AuditArgs, quiet: bool) -> Result<ExitCode> {
    let config = load_config(args.config.as_ref())?;
    let settings = AuditSettings::resolve(args, config)?;
    let token = secret(GITHUB_TOKEN_ENV);

    match settings.source.clone() {
        ReleaseSource::Repository(repo) => {
            let feed = GitHubReleaseFeed::new(&repo)?
                .with_api_url(&settings.github_api_url)
                .with_per_page(settings.per_page)
                .with_token(token.clone());
            audit_with_feed(feed, &settings, token, quiet)
        }
        ReleaseSource::Snapshot(path) => {
            audit_with_feed(JsonFileReleaseFeed::new(path), &settings, token, quiet)
        }
    }
}

fn audit_with_feed<RF: ReleaseFeed>(
    feed: RF,
    settings: &AuditSettings,
    token: Option<String>,
    quiet: bool,
) -> Result<ExitCode> {
    // The temporary work dir must outlive every release of the batch
    let (work_dir, temp_work_dir) = match settings.work_dir {
        Some(ref dir) => (dir.clone(), None::<TempDir>),
        None => {
            let temp = tempfile::Builder::new()
                .prefix("release-cve-audit-")
                .tempdir()?;
            if settings.keep_artifacts {
                let kept = temp.keep();
                tracing::info!(work_dir = %kept.display(), "keeping release workspaces");
                (kept, None)
            } else {
                (temp.path().to_path_buf(), Some(temp))
            }
        }
    };
    tracing::debug!(work_dir = %work_dir.display(), "release workspaces root");

    let artifact_store = HttpArtifactStore::new()?
        .with_token(token)
        .with_keep_artifacts(settings.keep_artifacts);
    let database = if settings.enrich {
        Some(
            NvdClient::new()?
                .with_api_url(&settings.nvd_api_url)
                .with_api_key(secret(NVD_API_KEY_ENV))
                .with_retry(settings.max_attempts, settings.backoff)
                .with_policy(settings.cvss_policy),
        )
    } else {
        None
    };

    let use_case = AuditReleasesUseCase::new(
        feed,
        artifact_store,
        SyftSbomGenerator::new(settings.syft.clone()),
        GrypeScanner::new(settings.grype.clone()),
        database,
        JsonResultWriter::new(settings.output_dir.clone()),
        progress_reporter(quiet),
    );

    let request = AuditRequest::new(work_dir)
        .with_skip_prereleases(settings.skip_prereleases)
        .with_enrichment(settings.enrich)
        .with_attribution_mode(settings.attribution_mode);

    let response = use_case.execute(request)?;
    drop(temp_work_dir);

    print_audit_summary(&response);
    if response.has_aborted_releases() {
        Ok(ExitCode::ReleasesAborted)
    } else {
        Ok(ExitCode::Success)
    }
}

fn print_audit_summary(response: &AuditResponse) {
    let summary = &response.summary;
    println!("Release audit of {} (run {})", summary.source, summary.run_id);
    for outcome in &summary.releases {
        match &outcome.status {
            ReleaseStatus::Done {
                vulnerability_count,
                enriched_count,
            } => match enriched_count {
                Some(enriched) => println!(
                    "  {:<24} done     {} vulnerabilities ({} enriched)",
                    outcome.tag, vulnerability_count, enriched
                ),
                None => println!(
                    "  {:<24} done     {} vulnerabilities",
                    outcome.tag, vulnerability_count
                ),
            },
            ReleaseStatus::Aborted { stage, reason } => println!(
                "  {:<24} aborted  while {}: {}",
                outcome.tag, stage, reason
            ),
        }
    }
    println!(
        "{} releases: {} completed, {} aborted, {} distinct vulnerabilities",
        summary.total_releases,
        summary.completed,
        summary.aborted,
        summary.distinct_vulnerabilities
    );
}

fn run_import(args: ImportNvdArgs, quiet: bool) -> Result<ExitCode> {
    let use_case = ImportNvdFeedUseCase::new(
        NvdFeedImporter::new().with_policy(args.cvss_policy),
        progress_reporter(quiet),
    );
    let response = use_case.execute(&args.dir)?;

    JsonResultWriter::write_document(&args.output, &response.records)?;

    println!(
        "Imported {} records ({} scored) from {} feed files into {}",
        response.records.len(),
        response.scored_count(),
        response.files_read.len(),
        args.output.display()
    );
    for (path, reason) in &response.files_skipped {
        println!("  skipped {}: {}", path.display(), reason);
    }
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_repo(repo: &str) -> AuditArgs {
        AuditArgs {
            repo: Some(repo.to_string()),
            ..AuditArgs::default()
        }
    }

    #[test]
    fn test_defaults_apply_without_config() {
        let settings =
            AuditSettings::resolve(args_with_repo("anchore/syft"), ConfigFile::default()).unwrap();

        assert_eq!(
            settings.source,
            ReleaseSource::Repository("anchore/syft".to_string())
        );
        assert_eq!(settings.per_page, 25);
        assert_eq!(settings.max_attempts, 3);
        assert_eq!(settings.backoff, Duration::from_secs(20));
        assert_eq!(settings.attribution_mode, AttributionMode::LastWriteWins);
        assert_eq!(settings.cvss_policy, CvssPolicy::V31Only);
        assert_eq!(settings.output_dir, PathBuf::from("."));
        assert!(settings.work_dir.is_none());
        assert_eq!(settings.syft, PathBuf::from("syft"));
        assert_eq!(settings.nvd_api_url, NVD_API_ENDPOINT);
        assert!(!settings.enrich);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = ConfigFile {
            per_page: Some(10),
            max_attempts: Some(7),
            attribution_mode: Some(AttributionMode::AllAttributions),
            grype_path: Some(PathBuf::from("/opt/grype")),
            ..ConfigFile::default()
        };
        let args = AuditArgs {
            per_page: Some(50),
            attribution_mode: Some(AttributionMode::LastWriteWins),
            ..args_with_repo("a/b")
        };

        let settings = AuditSettings::resolve(args, config).unwrap();

        assert_eq!(settings.per_page, 50);
        assert_eq!(settings.max_attempts, 7);
        assert_eq!(settings.attribution_mode, AttributionMode::LastWriteWins);
        assert_eq!(settings.grype, PathBuf::from("/opt/grype"));
    }

    #[test]
    fn test_config_supplies_source() {
        let config = ConfigFile {
            releases_file: Some(PathBuf::from("snap.json")),
            enrich: Some(true),
            ..ConfigFile::default()
        };

        let settings = AuditSettings::resolve(AuditArgs::default(), config).unwrap();

        assert_eq!(
            settings.source,
            ReleaseSource::Snapshot(PathBuf::from("snap.json"))
        );
        assert!(settings.enrich);
    }

    #[test]
    fn test_cli_source_replaces_config_source() {
        let config = ConfigFile {
            releases_file: Some(PathBuf::from("snap.json")),
            ..ConfigFile::default()
        };

        let settings = AuditSettings::resolve(args_with_repo("a/b"), config).unwrap();
        assert_eq!(settings.source, ReleaseSource::Repository("a/b".to_string()));
    }

    #[test]
    fn test_missing_source_is_error() {
        let err = AuditSettings::resolve(AuditArgs::default(), ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("no release source given"));
    }

    #[test]
    fn test_ambiguous_config_source_is_error() {
        let config = ConfigFile {
            repository: Some("a/b".to_string()),
            releases_file: Some(PathBuf::from("snap.json")),
            ..ConfigFile::default()
        };
        assert!(AuditSettings::resolve(AuditArgs::default(), config).is_err());
    }

    #[test]
    fn test_malformed_cli_repository_is_error() {
        let err =
            AuditSettings::resolve(args_with_repo("widgets"), ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("owner/name"));
    }
}
