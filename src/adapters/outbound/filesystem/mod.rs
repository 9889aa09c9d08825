/// File system adapters: release snapshots, result documents, offline NVD feeds
mod json_release_file;
mod json_result_writer;
mod nvd_feed_importer;

pub use json_release_file::JsonFileReleaseFeed;
pub use json_result_writer::{JsonResultWriter, RELEASES_FILE, SUMMARY_FILE};
pub use nvd_feed_importer::NvdFeedImporter;
