//! Pipeline stage implementations
//!
//! Library loading, paced catalog search, match selection, cover download,
//! audit files and the HTML report.

pub mod audit_writer;
pub mod catalog_search;
pub mod cover_fetcher;
pub mod library_loader;
pub mod match_selector;
pub mod rate_limiter;
pub mod report_renderer;
pub mod ytmusic_client;
pub mod ytmusic_parser;

pub use audit_writer::AuditWriter;
pub use catalog_search::{AlbumSearch, CatalogSearchClient, SearchError};
pub use cover_fetcher::{cover_filename, sanitize_filename, CoverFetcher, CoverFile, CoverSource, DownloadError, HttpCoverSource};
pub use library_loader::{load_library, parse_library};
pub use match_selector::{largest_thumbnail, select_match};
pub use rate_limiter::{build_rate_limiter, MinIntervalGate, RateLimit, RateLimitStrategy, TokenBucket};
pub use report_renderer::{render_report, ReportRenderer};
pub use ytmusic_client::{YtMusicClient, YtMusicConfig};
