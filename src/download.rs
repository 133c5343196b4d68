use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use tracing::{error, info};

use crate::bookmarks::{Bookmark, BookmarkIndex};
use crate::error::DownloadError;
use crate::fetcher::{FetchSettings, PdfFetcher};
use crate::options::RunOptions;
use crate::progress;
use crate::url_heuristic::is_url_pdf;

const HTML_DOCTYPE: &str = "<!DOCTYPE html>";

/// A download error recorded while `ignore_errors` is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDownload {
    pub message: String,
    pub url: String,
    pub title: String,
}

/// What happened to a single bookmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkOutcome {
    /// Not a download candidate
    Skipped,
    /// A file with the destination name is already there
    AlreadyHave,
    Saved,
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    pub saved: usize,
    pub already_have: usize,
    pub skipped: usize,
    pub failures: Vec<FailedDownload>,
}

impl DownloadReport {
    /// The end-of-run error listing, one `title: url` line plus message per failure
    pub fn format_errors(&self) -> String {
        let mut output = progress::title_line("ALL ERRORS");
        output.push('\n');
        for failure in &self.failures {
            output.push_str(&format!(
                "{}: {}\n{}\n",
                failure.title, failure.url, failure.message
            ));
        }
        output
    }
}

/// The response must declare a PDF in at least one `;`-separated part
pub fn check_content_type(content_type: Option<&str>) -> Result<(), DownloadError> {
    let Some(content_type) = content_type else {
        return Err(DownloadError::ContentType {
            content_type: "(missing)".to_string(),
        });
    };

    if content_type.split(';').any(|part| part.trim().ends_with("pdf")) {
        Ok(())
    } else {
        Err(DownloadError::ContentType {
            content_type: content_type.to_string(),
        })
    }
}

/// Catch servers that answer with an HTML page while claiming a PDF.
/// Bodies that are not valid UTF-8 are taken as binary and pass.
pub fn check_not_html(body: &[u8], pdf_path: &Path, url: &str) -> Result<(), DownloadError> {
    match std::str::from_utf8(body) {
        Ok(text) if text.starts_with(HTML_DOCTYPE) => Err(DownloadError::HtmlBody {
            path: pdf_path.to_path_buf(),
            url: url.to_string(),
        }),
        _ => Ok(()),
    }
}

pub struct DownloadDriver {
    fetcher: PdfFetcher,
    options: RunOptions,
    output: PathBuf,
    progress: ProgressBar,
    candidates: usize,
    attempted: usize,
    report: DownloadReport,
}

impl DownloadDriver {
    pub fn new(output: &Path, options: RunOptions) -> Result<Self> {
        let fetcher = PdfFetcher::new(&FetchSettings {
            verify_tls: options.verify_tls,
            ..FetchSettings::default()
        })?;

        Ok(Self {
            fetcher,
            options,
            output: output.to_path_buf(),
            progress: ProgressBar::hidden(),
            candidates: 0,
            attempted: 0,
            report: DownloadReport::default(),
        })
    }

    /// Draw a progress bar while downloading
    pub fn with_progress_bar(mut self) -> Self {
        self.progress = progress::create_download_progress_bar(0);
        self
    }

    /// Directory for a folder key, always inside the output root.
    ///
    /// Empty names (a heading with no text) and `.`/`..` are dropped.
    fn folder_dir(&self, folder: &str) -> PathBuf {
        let mut dir = self.output.clone();
        for name in folder.split(MAIN_SEPARATOR) {
            if matches!(Path::new(name).components().next(), Some(Component::Normal(_))) {
                dir.push(name);
            }
        }
        dir
    }

    fn is_candidate(&self, bookmark: &Bookmark) -> bool {
        self.options.try_all || is_url_pdf(&bookmark.url)
    }

    /// Download every candidate in `index`, folder by folder in sorted order.
    ///
    /// Without `ignore_errors` the first failure ends the run with that error.
    pub async fn run(mut self, index: &BookmarkIndex) -> Result<DownloadReport> {
        self.candidates = index
            .folders()
            .filter_map(|folder| index.get(folder))
            .flatten()
            .filter(|bookmark| self.is_candidate(bookmark))
            .count();
        self.progress.set_length(self.candidates as u64);
        self.progress.suspend(|| {
            info!("📚 {} of {} bookmarks to download", self.candidates, index.len())
        });

        for folder in index.sorted_folders() {
            progress::print_title(&self.progress, &format!("Downloading {}", folder));

            let subfolder = self.folder_dir(folder);
            std::fs::create_dir_all(&subfolder)
                .with_context(|| format!("Failed to create directory {}", subfolder.display()))?;

            for bookmark in index.get(folder).unwrap_or_default() {
                let outcome = self.process_bookmark(&subfolder, bookmark).await;
                self.handle_outcome(bookmark, outcome)?;
            }
        }

        progress::finish_with_summary(
            &self.progress,
            self.report.saved,
            self.report.failures.len(),
        );
        println!("{}", self.report.format_errors());

        Ok(self.report)
    }

    async fn process_bookmark(
        &mut self,
        subfolder: &Path,
        bookmark: &Bookmark,
    ) -> Result<BookmarkOutcome, DownloadError> {
        if !self.is_candidate(bookmark) {
            return Ok(BookmarkOutcome::Skipped);
        }

        self.attempted += 1;
        self.progress.inc(1);

        let pdf_path = subfolder.join(format!("{}.pdf", bookmark.title));
        if pdf_path.is_file() {
            self.progress
                .suspend(|| info!("Already have {}", pdf_path.display()));
            return Ok(BookmarkOutcome::AlreadyHave);
        }

        self.progress.suspend(|| {
            info!(
                "Downloading {} ({} of {})",
                pdf_path.display(),
                self.attempted,
                self.candidates
            )
        });

        let document = self.fetcher.fetch(&bookmark.url).await?;
        check_content_type(document.content_type.as_deref())?;
        check_not_html(&document.body, &pdf_path, &bookmark.url)?;

        std::fs::write(&pdf_path, &document.body).map_err(|source| DownloadError::Io {
            path: pdf_path.clone(),
            source,
        })?;

        Ok(BookmarkOutcome::Saved)
    }

    /// Count the outcome, or apply the error policy to a failure
    fn handle_outcome(
        &mut self,
        bookmark: &Bookmark,
        outcome: Result<BookmarkOutcome, DownloadError>,
    ) -> Result<()> {
        match outcome {
            Ok(BookmarkOutcome::Skipped) => self.report.skipped += 1,
            Ok(BookmarkOutcome::AlreadyHave) => self.report.already_have += 1,
            Ok(BookmarkOutcome::Saved) => self.report.saved += 1,
            Err(err) => {
                if !self.options.ignore_errors {
                    self.progress.abandon();
                    return Err(err).with_context(|| {
                        format!("Failed to download {} from {}", bookmark.title, bookmark.url)
                    });
                }

                self.progress
                    .suspend(|| error!("ERROR on {}: {}", bookmark.title, err));
                self.report.failures.push(FailedDownload {
                    message: err.to_string(),
                    url: bookmark.url.clone(),
                    title: bookmark.title.clone(),
                });
            }
        }
        Ok(())
    }
}
