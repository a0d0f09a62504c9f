//! Multi-step progress shown while a search is loading.
//!
//! Purely cosmetic: the steps advance on a fixed schedule and say nothing
//! about what the remote service is actually doing.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderStep {
    pub title: &'static str,
    pub description: &'static str,
    pub duration: Duration,
}

pub static LOADER_STEPS: [LoaderStep; 4] = [
    LoaderStep {
        title: "Analysing query",
        description: "Preparing the search",
        duration: Duration::from_millis(1500),
    },
    LoaderStep {
        title: "Searching sources",
        description: "Exploring information sources",
        duration: Duration::from_millis(2000),
    },
    LoaderStep {
        title: "Processing results",
        description: "Analysing and ranking results",
        duration: Duration::from_millis(1500),
    },
    LoaderStep {
        title: "Finalising",
        description: "Preparing the display",
        duration: Duration::from_millis(1000),
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderProgress {
    /// Index into [`LOADER_STEPS`]; equals its length once complete.
    pub step_index: usize,
    /// Share of completed steps, 0 to 100.
    pub percent: f64,
    pub complete: bool,
}

impl LoaderProgress {
    pub fn current_step(&self) -> Option<&'static LoaderStep> {
        LOADER_STEPS.get(self.step_index)
    }
}

/// Progress after `elapsed` time in the loading state.
pub fn progress_at(elapsed: Duration) -> LoaderProgress {
    let mut boundary = Duration::ZERO;
    for (index, step) in LOADER_STEPS.iter().enumerate() {
        boundary += step.duration;
        if elapsed < boundary {
            return LoaderProgress {
                step_index: index,
                percent: index as f64 / LOADER_STEPS.len() as f64 * 100.0,
                complete: false,
            };
        }
    }
    LoaderProgress {
        step_index: LOADER_STEPS.len(),
        percent: 100.0,
        complete: true,
    }
}
