use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar over the bookmarks that will be downloaded
pub fn create_download_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    );
    pb.set_message("bookmarks");
    pb
}

/// Section banner, e.g. `********** Downloading Papers **********`
pub fn title_line(msg: &str) -> String {
    format!("\n{stars} {msg} {stars}", stars = "*".repeat(10))
}

/// Print a section banner to stdout, with the progress bar cleared meanwhile
pub fn print_title(pb: &ProgressBar, msg: &str) {
    pb.suspend(|| println!("{}", title_line(msg)));
}

/// Finish progress bar with summary message
pub fn finish_with_summary(pb: &ProgressBar, saved: usize, failed: usize) {
    if failed == 0 {
        pb.finish_with_message(format!("✅ {} saved", saved));
    } else {
        pb.finish_with_message(format!("❌ {} saved, {} failed", saved, failed));
    }
}
