use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rayon::prelude::*;

use crate::corrector::Correct;
use crate::Correction;

/// Drives a correction backend over an ordered token sequence.
///
/// Per-word work is independent, so it fans out across a rayon pool; results
/// are reassembled in input order (one output per input, no drops). Progress
/// is a stderr side channel and never affects the output.
pub struct BatchPipeline {
    threads: usize,
    show_progress: bool,
}

impl Default for BatchPipeline {
    fn default() -> Self {
        Self {
            threads: 0,
            show_progress: false,
        }
    }
}

impl BatchPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// `0` uses the rayon default (one worker per logical CPU).
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn run<C: Correct + ?Sized>(
        &self,
        corrector: &C,
        tokens: &[String],
    ) -> Result<Vec<Correction>> {
        let progress = self.progress_bar(tokens.len());

        let correct_all = || {
            tokens
                .par_iter()
                .map(|token| {
                    let correction = corrector.correct(token);
                    progress.inc(1);
                    correction
                })
                .collect::<Vec<_>>()
        };

        let results = if self.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
                .context("failed to build worker pool")?;
            pool.install(correct_all)
        } else {
            correct_all()
        };

        progress.finish_and_clear();
        Ok(results)
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden());
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} words {msg}")
                .unwrap(),
        );
        pb
    }
}
