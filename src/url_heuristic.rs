//! Guess whether a bookmarked URL points at a PDF, from the URL string alone.

/// Returns a guess as to whether the URL points to a PDF.
///
/// Looks at the last path segment, split on query separators (`?`, `&`):
/// a fragment equal to `type=pdf` or ending in `.pdf` counts. A URL ending
/// in `/pdf` counts as well.
pub fn is_url_pdf(url: &str) -> bool {
    let last_segment = url.rsplit('/').next().unwrap_or(url);
    let fragment_match = last_segment
        .split(['?', '&'])
        .any(|part| part == "type=pdf" || part.ends_with(".pdf"));

    fragment_match || url.ends_with("/pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension() {
        assert!(is_url_pdf("http://x.com/a.pdf"));
        assert!(is_url_pdf("https://arxiv.org/pdf/1706.03762v7.pdf"));
    }

    #[test]
    fn test_pdf_extension_with_query() {
        assert!(is_url_pdf("http://x.com/a.pdf?x=1"));
        assert!(is_url_pdf("http://x.com/get?id=3&file=paper.pdf"));
    }

    #[test]
    fn test_type_argument() {
        assert!(is_url_pdf("http://x.com/view?type=pdf"));
        assert!(is_url_pdf("http://x.com/view?id=9&type=pdf"));
        assert!(!is_url_pdf("http://x.com/view?type=pdfx"));
    }

    #[test]
    fn test_trailing_pdf_segment() {
        assert!(is_url_pdf("http://x.com/view/pdf"));
        assert!(!is_url_pdf("http://x.com/view/pdf/"));
    }

    #[test]
    fn test_non_pdf() {
        assert!(!is_url_pdf("http://x.com/a.html"));
        assert!(!is_url_pdf("http://x.com/"));
        assert!(!is_url_pdf(""));
    }

    #[test]
    fn test_only_last_segment_counts() {
        // `.pdf` earlier in the path does not make the link a PDF
        assert!(!is_url_pdf("http://x.com/a.pdf/index.html"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!is_url_pdf("http://x.com/A.PDF"));
    }
}
