use anyhow::{bail, Result};
use std::path::Path;
use tracing::warn;

/// Which bookmarks listing mode prints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Bookmarks that look like PDFs
    pub show_pdfs: bool,

    /// Bookmarks that do not look like PDFs
    pub show_non_pdfs: bool,
}

impl ListFilter {
    pub fn is_active(&self) -> bool {
        self.show_pdfs || self.show_non_pdfs
    }

    pub fn accepts(&self, looks_like_pdf: bool) -> bool {
        (self.show_pdfs && looks_like_pdf) || (self.show_non_pdfs && !looks_like_pdf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Download,
}

/// Run configuration, built from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Download every bookmark and let the response decide, instead of
    /// only the ones whose URL looks like a PDF
    pub try_all: bool,

    /// Record download errors and keep going, report them at the end
    pub ignore_errors: bool,

    /// Verify TLS certificates
    pub verify_tls: bool,

    pub list: ListFilter,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            try_all: false,
            ignore_errors: false,
            verify_tls: true,
            list: ListFilter::default(),
        }
    }
}

impl RunOptions {
    /// Listing takes over as soon as either show flag is set
    pub fn mode(&self) -> Mode {
        if self.list.is_active() {
            Mode::List
        } else {
            Mode::Download
        }
    }

    pub fn warn_about_risky_flags(&self) {
        if !self.verify_tls {
            warn!("⚠️  TLS certificate verification is disabled, use at your own risk");
        }
        if self.list.is_active() && (self.try_all || self.ignore_errors) {
            warn!("⚠️  --try-all and --ignore-errors have no effect when listing bookmarks");
        }
    }
}

pub fn validate_output_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("{} is not a directory", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_download() {
        let options = RunOptions::default();
        assert_eq!(options.mode(), Mode::Download);
        assert!(options.verify_tls);
    }

    #[test]
    fn test_any_show_flag_selects_listing() {
        let mut options = RunOptions::default();
        options.list.show_non_pdfs = true;
        assert_eq!(options.mode(), Mode::List);

        options.list = ListFilter {
            show_pdfs: true,
            show_non_pdfs: false,
        };
        assert_eq!(options.mode(), Mode::List);
    }

    #[test]
    fn test_list_filter_accepts() {
        let pdfs = ListFilter {
            show_pdfs: true,
            show_non_pdfs: false,
        };
        assert!(pdfs.accepts(true));
        assert!(!pdfs.accepts(false));

        let both = ListFilter {
            show_pdfs: true,
            show_non_pdfs: true,
        };
        assert!(both.accepts(true));
        assert!(both.accepts(false));

        assert!(!ListFilter::default().accepts(true));
    }

    #[test]
    fn test_output_dir_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_output_dir(dir.path()).is_ok());

        let file = dir.path().join("not-a-dir.txt");
        std::fs::write(&file, b"x").unwrap();
        let err = validate_output_dir(&file).unwrap_err();
        assert!(err.to_string().ends_with("is not a directory"));

        assert!(validate_output_dir(&dir.path().join("missing")).is_err());
    }
}
