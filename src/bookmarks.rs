use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::path::{Path, MAIN_SEPARATOR_STR};
use tracing::debug;

use crate::names::clean_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Bookmarks grouped by folder path.
///
/// Keys are folder names joined with the platform path separator, the empty
/// key holds bookmarks that are not inside any folder. Folders and the
/// bookmarks inside them keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkIndex {
    folders: Vec<(String, Vec<Bookmark>)>,
    positions: HashMap<String, usize>,
}

impl BookmarkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, folder: &str, bookmark: Bookmark) {
        let position = match self.positions.get(folder) {
            Some(&position) => position,
            None => {
                self.folders.push((folder.to_string(), Vec::new()));
                self.positions.insert(folder.to_string(), self.folders.len() - 1);
                self.folders.len() - 1
            }
        };
        self.folders[position].1.push(bookmark);
    }

    /// Folder keys in the order they were first seen
    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.folders.iter().map(|(folder, _)| folder.as_str())
    }

    pub fn sorted_folders(&self) -> Vec<&str> {
        let mut folders: Vec<&str> = self.folders().collect();
        folders.sort_unstable();
        folders
    }

    pub fn get(&self, folder: &str) -> Option<&[Bookmark]> {
        self.positions
            .get(folder)
            .map(|&position| self.folders[position].1.as_slice())
    }

    /// Total number of bookmarks across all folders
    pub fn len(&self) -> usize {
        self.folders.iter().map(|(_, bookmarks)| bookmarks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

pub fn read_bookmark_file(path: &Path) -> Result<BookmarkIndex> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bookmarks file {}", path.display()))?;
    Ok(parse_bookmark_html(&html))
}

/// Parse a Netscape-style bookmark export (`DL`/`DT`/`H3`/`A`).
pub fn parse_bookmark_html(html: &str) -> BookmarkIndex {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a").unwrap();

    let mut index = BookmarkIndex::new();
    for anchor in document.select(&link_selector) {
        let Some(url) = anchor.value().attr("href") else {
            debug!("Skipping anchor without href");
            continue;
        };
        let title = clean_name(&anchor.text().collect::<String>());
        let folder = folder_chain(anchor).join(MAIN_SEPARATOR_STR);
        index.push(&folder, Bookmark::new(title, url));
    }

    debug!(
        "Parsed {} bookmarks in {} folders",
        index.len(),
        index.folders.len()
    );
    index
}

/// Folder names enclosing `anchor`, outermost first.
///
/// Every `DL` above the anchor is a folder's entry list when the element
/// right before it is that folder's `H3` heading.
fn folder_chain(anchor: ElementRef<'_>) -> Vec<String> {
    let mut folders: Vec<String> = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|ancestor| ancestor.value().name() == "dl")
        .filter_map(heading_before)
        .map(|heading| clean_name(&heading.text().collect::<String>()))
        .collect();
    folders.reverse();
    folders
}

fn heading_before(list: ElementRef<'_>) -> Option<ElementRef<'_>> {
    list.prev_siblings()
        .find_map(ElementRef::wrap)
        .filter(|sibling| sibling.value().name() == "h3")
}
