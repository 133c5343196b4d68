use std::path::PathBuf;
use thiserror::Error;

/// Why a single bookmark could not be saved.
///
/// The `Display` text is what ends up in the error report.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Connection failure or a non-2xx status
    #[error("Download Exception: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Non PDF content type {content_type}")]
    ContentType { content_type: String },

    /// The server claimed a PDF but sent an HTML page
    #[error("Appeared to get an HTML file for doc {} url={}", path.display(), url)]
    HtmlBody { path: PathBuf, url: String },

    #[error("Failed to write {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
