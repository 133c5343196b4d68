//! Listing mode: show which bookmarks the URL heuristic considers PDFs,
//! without touching the network.

use crate::bookmarks::{Bookmark, BookmarkIndex};
use crate::options::ListFilter;
use crate::progress::title_line;
use crate::url_heuristic::is_url_pdf;

/// Bookmarks of one folder that pass the filter
#[derive(Debug, PartialEq, Eq)]
pub struct ListedFolder<'a> {
    pub folder: &'a str,
    pub bookmarks: Vec<&'a Bookmark>,
}

/// Every folder in sorted order, each with its bookmarks that match `filter`
pub fn select_listed(index: &BookmarkIndex, filter: ListFilter) -> Vec<ListedFolder<'_>> {
    index
        .sorted_folders()
        .into_iter()
        .map(|folder| ListedFolder {
            folder,
            bookmarks: index
                .get(folder)
                .unwrap_or_default()
                .iter()
                .filter(|bookmark| filter.accepts(is_url_pdf(&bookmark.url)))
                .collect(),
        })
        .collect()
}

pub fn print_listing(index: &BookmarkIndex, filter: ListFilter) {
    for listed in select_listed(index, filter) {
        println!("{}", title_line(listed.folder));
        for bookmark in listed.bookmarks {
            println!("{} {}", listed.folder, bookmark.title);
        }
    }
}
