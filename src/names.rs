//! File and directory name normalization
//!
//! Bookmark titles and folder names end up as path components, so anything
//! that looks like a path separator has to go before they touch the disk.

use regex::Regex;
use std::path::MAIN_SEPARATOR;
use std::sync::OnceLock;

/// A separator together with any whitespace or further separators around it
fn separator_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let sep = regex::escape(&MAIN_SEPARATOR.to_string());
        Regex::new(&format!(r"[\s{sep}]*{sep}[\s{sep}]*")).expect("separator pattern is valid")
    })
}

fn blank_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s,]+").expect("blank pattern is valid"))
}

/// Cleans a name so that it can be used as a single file or directory name.
///
/// - surrounding whitespace is trimmed
/// - a path separator and the whitespace around it become `-`
/// - remaining runs of whitespace or commas become `_`
pub fn clean_name(name: &str) -> String {
    let name = name.trim();
    let name = separator_run().replace_all(name, "-");
    blank_run().replace_all(&name, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_becomes_hyphen() {
        let raw = format!("My Docs {} Sub", MAIN_SEPARATOR);
        assert_eq!(clean_name(&raw), "My_Docs-Sub");
    }

    #[test]
    fn test_repeated_separators_collapse() {
        let raw = format!("a {sep} {sep}{sep} b", sep = MAIN_SEPARATOR);
        assert_eq!(clean_name(&raw), "a-b");
    }

    #[test]
    fn test_whitespace_and_commas_become_underscore() {
        assert_eq!(clean_name("  Smith, J.  A Paper\ttitle "), "Smith_J._A_Paper_title");
        assert_eq!(clean_name(",leading"), "_leading");
    }

    #[test]
    fn test_plain_name_untouched() {
        assert_eq!(clean_name("report-2020.v2"), "report-2020.v2");
        assert_eq!(clean_name(""), "");
    }
}
