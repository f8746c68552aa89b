//! Progress bar display for font installation

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a batch of font files
pub struct ProgressDisplay {
    file_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total file count
    pub fn new(total_files: u64) -> Self {
        let file_pb = ProgressBar::new(total_files);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} fonts {msg}")
        {
            file_pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }

        Self { file_pb }
    }

    /// A display that draws nothing
    pub fn hidden() -> Self {
        Self {
            file_pb: ProgressBar::hidden(),
        }
    }

    /// Show the file being processed and advance by one
    pub fn update_file(&self, file_name: &str) {
        // Truncate long names for display
        let display_name = if file_name.chars().count() > 50 {
            let tail: String = file_name
                .chars()
                .rev()
                .take(47)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{tail}")
        } else {
            file_name.to_string()
        };
        self.file_pb.set_message(display_name);
        self.file_pb.inc(1);
    }

    pub fn finish(&self) {
        self.file_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.file_pb.abandon();
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.file_pb.position()
    }
}
