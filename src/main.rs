use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod bookmarks;
mod download;
mod error;
mod fetcher;
mod listing;
mod names;
mod options;
mod progress;
mod url_heuristic;

use download::DownloadDriver;
use options::{ListFilter, Mode, RunOptions};

#[derive(Parser)]
#[command(name = "bookmark-pdf-fetch")]
#[command(about = "Downloads bookmarked PDFs", long_about = None)]
#[command(version)]
struct Cli {
    /// Location of the exported bookmarks (HTML)
    bookmarks: PathBuf,

    /// Directory to download the PDFs into, PDFs are saved in subfolders
    /// reflecting the bookmark's folder structure
    output: PathBuf,

    /// Download each link and check whether it is a PDF, otherwise only
    /// links that look like PDFs by their URL are downloaded
    #[arg(short = 'a', long)]
    try_all: bool,

    /// List bookmarks that appear to point to PDFs based on the URL heuristic
    #[arg(short = 's', long)]
    show_pdfs: bool,

    /// List bookmarks that appear not to point to PDFs based on the URL heuristic
    #[arg(short = 'n', long)]
    show_non_pdfs: bool,

    /// Continue when download errors occur, errors are listed when finished
    #[arg(short = 'e', long)]
    ignore_errors: bool,

    /// Don't check TLS certificates, use at your own risk
    #[arg(short = 'v', long)]
    dont_verify: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            try_all: self.try_all,
            ignore_errors: self.ignore_errors,
            verify_tls: !self.dont_verify,
            list: ListFilter {
                show_pdfs: self.show_pdfs,
                show_non_pdfs: self.show_non_pdfs,
            },
        }
    }
}

/// `RUST_LOG`-style directives when given and valid, INFO otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let cli = Cli::parse();
    let options = cli.run_options();
    options.warn_about_risky_flags();

    let index = bookmarks::read_bookmark_file(&cli.bookmarks)?;
    if index.is_empty() {
        warn!("⚠️  No bookmarks found in {}", cli.bookmarks.display());
    } else {
        info!("📖 Parsed {} bookmarks from {}", index.len(), cli.bookmarks.display());
    }

    match options.mode() {
        Mode::List => {
            listing::print_listing(&index, options.list);
        }

        Mode::Download => {
            options::validate_output_dir(&cli.output)?;

            let report = DownloadDriver::new(&cli.output, options)?
                .with_progress_bar()
                .run(&index)
                .await?;

            info!(
                "✅ Download complete: {} saved, {} already present, {} not PDFs, {} failed",
                report.saved,
                report.already_have,
                report.skipped,
                report.failures.len()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honours_directives() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_rejects_garbage() {
        assert_eq!(
            log_filter(Some("bookmark_pdf_fetch=notalevel")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
