use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use release_cve_audit::release_audit::policies::{AttributionMode, CvssPolicy};

/// Correlate published releases with the vulnerabilities their dependency trees introduce
#[derive(Parser, Debug)]
#[command(name = "release-cve-audit")]
#[command(version)]
#[command(
    about = "Correlate published releases with the vulnerabilities their dependency trees introduce",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Show debug diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors and the final summary
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the release pipeline over every release of a repository or snapshot
    Audit(AuditArgs),
    /// Read offline NVD 1.1 feed files and write the enriched records as JSON
    ImportNvd(ImportNvdArgs),
}

#[derive(ClapArgs, Debug, Default)]
#[command(group(ArgGroup::new("source").args(["repo", "releases_file"])))]
pub struct AuditArgs {
    /// GitHub repository to audit, as owner/name
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Replay a release snapshot (the releases.json of an earlier run)
    #[arg(long, value_name = "FILE")]
    pub releases_file: Option<PathBuf>,

    /// Number of most recent releases to list (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: Option<u32>,

    /// Drop releases flagged as prereleases before the run
    #[arg(long)]
    pub skip_prereleases: bool,

    /// Directory receiving the per-release analysis documents
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory holding release workspaces (defaults to a temporary directory)
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Keep downloaded tarballs, extracted trees and tool outputs
    #[arg(long)]
    pub keep_artifacts: bool,

    /// Look up CVSS scoring for every finding in the NVD
    #[arg(long)]
    pub enrich: bool,

    /// How findings seen in several artifacts are attributed: last-write-wins or all-attributions
    #[arg(long, value_name = "MODE")]
    pub attribution_mode: Option<AttributionMode>,

    /// Which CVSS block the NVD lookup accepts: v31-only or v31-then-v2
    #[arg(long, value_name = "POLICY")]
    pub cvss_policy: Option<CvssPolicy>,

    /// Total NVD requests per lookup when rate limited (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Seconds to wait after an NVD rate-limit response
    #[arg(long, value_name = "SECONDS")]
    pub backoff_seconds: Option<u64>,

    /// Path to the syft executable
    #[arg(long, value_name = "PATH")]
    pub syft: Option<PathBuf>,

    /// Path to the grype executable
    #[arg(long, value_name = "PATH")]
    pub grype: Option<PathBuf>,

    /// NVD CVE API endpoint
    #[arg(long, value_name = "URL")]
    pub nvd_api_url: Option<String>,

    /// GitHub API base URL
    #[arg(long, value_name = "URL")]
    pub github_api_url: Option<String>,

    /// Configuration file (defaults to ./release-cve-audit.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct ImportNvdArgs {
    /// Directory holding *nvdcve*.json feed files
    #[arg(long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Output file for the enriched records
    #[arg(short, long, value_name = "FILE", default_value = "nvd-import.json")]
    pub output: PathBuf,

    /// Which CVSS block is accepted: v31-only or v31-then-v2
    #[arg(long, value_name = "POLICY", default_value = "v31-then-v2")]
    pub cvss_policy: CvssPolicy,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
