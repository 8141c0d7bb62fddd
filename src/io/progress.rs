//! Progress display while rendering a batch of presets

use std::sync::LazyLock;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;

static PRESET_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>10} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Presets: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Stages a preset passes through, in order
pub const STAGES: [&str; 4] = ["load", "build", "export", "done"];

/// Coordinates progress display for a preset batch
///
/// Small batches get one bar per preset showing its stage; larger batches get
/// a single batch bar plus a rolling window of the most recent presets.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    preset_bars: Vec<ProgressBar>,
    /// `(name, stage)` for every preset started so far
    states: Vec<(String, usize)>,
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
            batch_bar: None,
            preset_bars: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Create bars for `preset_count` presets
    pub fn initialize(&mut self, preset_count: usize) {
        if preset_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(preset_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..preset_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new((STAGES.len() - 1) as u64);
            bar.set_style(PRESET_STYLE.clone());
            self.preset_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register preset `index` under `name`
    pub fn start_preset(&mut self, index: usize, name: &str) {
        if index >= self.states.len() {
            self.states.resize(index + 1, (String::new(), 0));
        }
        if let Some(state) = self.states.get_mut(index) {
            *state = (name.to_string(), 0);
        }
        self.update_bars();
    }

    /// Move preset `index` to stage `stage` (an index into [`STAGES`])
    pub fn advance(&mut self, index: usize, stage: usize) {
        if let Some(state) = self.states.get_mut(index) {
            state.1 = stage.min(STAGES.len() - 1);
        }
        self.update_bars();
    }

    /// Mark preset `index` as finished
    pub fn complete_preset(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.states.get_mut(index) {
            state.0 = format!("✓ {} ({} ms)", state.0, elapsed.as_millis());
            state.1 = STAGES.len() - 1;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All presets rendered");
        }
        let _ = self.multi_progress.clear();
    }

    fn update_bars(&self) {
        let active: Vec<&(String, usize)> = self
            .states
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, (name, stage)) in visible.iter().map(|s| (&s.0, s.1)).enumerate() {
            if let Some(bar) = self.preset_bars.get(bar_index) {
                bar.set_position(stage as u64);
                bar.set_prefix(STAGES.get(stage).copied().unwrap_or_default());
                bar.set_message(name.clone());
            }
        }

        for bar_index in visible.len()..self.preset_bars.len() {
            if let Some(bar) = self.preset_bars.get(bar_index) {
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
