use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for the full sweep pass.
///
/// Automatically disabled in quiet mode or when stderr is not a TTY.
#[derive(Clone)]
pub struct SweepProgress {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl SweepProgress {
    /// Creates a new progress bar over `total` candidate files.
    ///
    /// The bar outputs to stderr to avoid interfering with stdout output.
    ///
    /// # Panics
    ///
    /// Panics if the progress bar template is invalid. The template is a
    /// compile-time constant, so this should never happen.
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} Sweeping [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%)",
                    )
                    .expect("valid template")
                    .progress_chars("█▓░"),
            );
            pb
        };

        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Increments the progress counter by 1. Thread-safe.
    pub fn inc(&self) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}
