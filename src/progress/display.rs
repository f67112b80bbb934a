//! Progress bar display management and coordination.

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};

/// Coordinates the main bar, the per-file bars and the line output of a batch.
pub struct ProgressDisplay {
    multi: MultiProgress,
    main: ProgressBar,
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a display for a batch of `total_games` games.
    pub fn new(style_options: StyleOptions, total_games: usize) -> Self {
        let target = match style_options.is_enabled() {
            true => ProgressDrawTarget::stderr(),
            false => ProgressDrawTarget::hidden(),
        };
        Self::with_draw_target(style_options, total_games, target)
    }

    /// Create a display drawing its bars to `target`.
    pub fn with_draw_target(
        style_options: StyleOptions,
        total_games: usize,
        target: ProgressDrawTarget,
    ) -> Self {
        let multi = MultiProgress::with_draw_target(target);

        let main = multi.add(
            style_options
                .main()
                .clone()
                .to_progress_bar(total_games as u64),
        );
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// A display that draws nothing but still prints lines.
    pub fn hidden() -> Self {
        Self::new(StyleOptions::hidden(), 0)
    }

    /// Create a child bar of `size` bytes for one file, labelled with `label`.
    pub fn create_child_progress(&self, size: u64, label: &str) -> ProgressBar {
        let pb = self
            .multi
            .add(self.style_options.child().clone().to_progress_bar(size));
        pb.set_message(label.to_string());
        pb
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }

    /// Count one more game as handled.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Print a user-facing line.
    ///
    /// Goes above the bars while they are drawn, straight to stdout otherwise.
    /// A draw target that is not a terminal counts as not drawn, since
    /// `MultiProgress` drops lines sent to it.
    pub fn println(&self, line: &str) {
        if self.draws_bars() && self.multi.println(line).is_ok() {
            return;
        }
        println!("{line}");
    }

    /// Whether the bars are visible on a terminal.
    pub fn draws_bars(&self) -> bool {
        self.style_options.is_enabled() && !self.multi.is_hidden()
    }

    /// Finish the display, clearing or keeping the main bar based on configuration.
    pub fn finish(self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }
}
