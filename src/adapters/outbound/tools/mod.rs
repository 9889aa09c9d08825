/// External tool adapters (SBOM generation and vulnerability scanning)
mod command;
mod grype_scanner;
mod syft_generator;

pub use grype_scanner::GrypeScanner;
pub use syft_generator::SyftSbomGenerator;
