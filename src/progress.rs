//! Progress bar display for manifest builds

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress display for hashing bundle files
pub struct ProgressDisplay {
    entry_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total entry count.
    ///
    /// Draws to stderr, and stays hidden when stderr is not a terminal.
    pub fn new(total_entries: u64) -> Self {
        let entry_pb = ProgressBar::with_draw_target(Some(total_entries), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            entry_pb.set_style(style.progress_chars("#>-"));
        }

        Self { entry_pb }
    }

    /// A display that never draws
    pub fn hidden() -> Self {
        Self {
            entry_pb: ProgressBar::hidden(),
        }
    }

    /// Update to show the entry currently being hashed
    pub fn update_entry(&self, entry_id: &str) {
        let display = if entry_id.len() > 50 {
            let cut = entry_id
                .char_indices()
                .map(|(i, _)| i)
                .find(|&i| entry_id.len() - i <= 47)
                .unwrap_or(0);
            format!("...{}", &entry_id[cut..])
        } else {
            entry_id.to_string()
        };
        self.entry_pb.set_message(display);
    }

    /// Increment entry progress
    pub fn inc_entry(&self) {
        self.entry_pb.inc(1);
    }

    pub fn finish(&self) {
        self.entry_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.entry_pb.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_accepts_updates() {
        let progress = ProgressDisplay::hidden();
        progress.update_entry("remedy");
        progress.update_entry(&"x".repeat(80));
        progress.inc_entry();
        progress.finish();
    }
}
