use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const BAR_TEMPLATE: &str = "{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// A file counter for commands that parse several files.
///
/// Hidden for a single file or when console output is quiet, so summaries
/// printed to stdout are never interleaved with bar redraws.
pub fn file_progress(total: usize, quiet: bool) -> ProgressBar {
    if quiet || total < 2 {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr())
        .with_style(style)
        .with_message("Parsing")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_and_quiet_runs_are_hidden() {
        assert!(file_progress(1, false).is_hidden());
        assert!(file_progress(10, true).is_hidden());
    }

    #[test]
    fn bar_counts_files() {
        let pb = file_progress(3, false);
        pb.inc(2);
        assert_eq!(pb.length(), Some(3));
        assert_eq!(pb.position(), 2);
    }
}
