//! Progress display for map loading and generation

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_MIN_CELLS};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress bars for one run of the command-line tool
///
/// Loading gets a bar over map files. Generation gets a bar over rows for a
/// single large map, or a bar over maps for a batch.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bars: Vec::new(),
        }
    }

    /// Whether a single map of this size deserves a row progress bar
    pub const fn tracks_rows(width: usize, height: usize) -> bool {
        width.saturating_mul(height) >= PROGRESS_MIN_CELLS
    }

    /// Add a bar over `file_count` map files
    pub fn start_loading(&mut self, file_count: usize) -> ProgressBar {
        self.add_bar("loading", file_count)
    }

    /// Show the file currently being read on a loading bar
    pub fn loading_file(bar: &ProgressBar, path: &Path) {
        bar.set_message(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
    }

    /// Add a bar over the rows of one generated map
    pub fn start_rows(&mut self, rows: usize) -> ProgressBar {
        self.add_bar("rows", rows)
    }

    /// Add a bar over the maps of a batch
    pub fn start_batch(&mut self, maps: usize) -> ProgressBar {
        self.add_bar("maps", maps)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in &self.bars {
            bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }

    fn add_bar(&mut self, prefix: &'static str, length: usize) -> ProgressBar {
        let bar = self
            .multi_progress
            .add(ProgressBar::new(length as u64));
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(prefix);
        self.bars.push(bar.clone());
        bar
    }
}
