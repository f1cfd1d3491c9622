use crate::constants::{
    DEBOUNCE_FAST_MS, DEBOUNCE_NORMAL_MS, FAST_SCROLL_RATIO_PER_MS, INITIAL_DETECT_MS,
};

/// Normalizes raw scroll offsets to a [0, 1] ratio and emits a debounced
/// "settled" ratio once scrolling pauses.
///
/// The debounce window stretches while the user is flinging so zone audio is
/// not thrashed by fast scrolling. `on_scroll` must stay cheap; it runs on
/// every native scroll notification.
#[derive(Debug, Default)]
pub struct ScrollSampler {
    last_ratio: f64,
    last_ts_ms: f64,
    velocity: f64,
    has_sample: bool,
    pending_ratio: f64,
    settle_deadline_ms: Option<f64>,
}

impl ScrollSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an initial detection pass shortly after startup, before any
    /// scroll input has arrived. `initial_ratio` is the host's current
    /// position, so a session restored mid-page resolves its real zone.
    pub fn prime(&mut self, initial_ratio: f64, now_ms: f64) {
        self.pending_ratio = initial_ratio.clamp(0.0, 1.0);
        self.settle_deadline_ms = Some(now_ms + INITIAL_DETECT_MS);
    }

    /// Feed one raw scroll notification. Returns the normalized ratio, or
    /// `None` for non-scrollable documents (which never produce a zone).
    pub fn on_scroll(
        &mut self,
        offset_px: f64,
        doc_height_px: f64,
        viewport_px: f64,
        now_ms: f64,
    ) -> Option<f64> {
        let scrollable = doc_height_px - viewport_px;
        if scrollable <= 0.0 {
            return None;
        }
        let ratio = (offset_px / scrollable).clamp(0.0, 1.0);
        if self.has_sample {
            let dt = (now_ms - self.last_ts_ms).max(1.0);
            self.velocity = (ratio - self.last_ratio).abs() / dt;
        }
        self.last_ratio = ratio;
        self.last_ts_ms = now_ms;
        self.has_sample = true;

        let debounce = if self.velocity > FAST_SCROLL_RATIO_PER_MS {
            DEBOUNCE_FAST_MS
        } else {
            DEBOUNCE_NORMAL_MS
        };
        self.pending_ratio = ratio;
        self.settle_deadline_ms = Some(now_ms + debounce);
        Some(ratio)
    }

    /// Poll the debounce timer. Yields the settled ratio exactly once per
    /// pause in scroll activity.
    pub fn tick(&mut self, now_ms: f64) -> Option<f64> {
        match self.settle_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.settle_deadline_ms = None;
                Some(self.pending_ratio)
            }
            _ => None,
        }
    }

    /// Ratio-units per millisecond, magnitude of the last observed movement.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Cancel any pending settle notification (teardown path).
    pub fn reset(&mut self) {
        self.settle_deadline_ms = None;
        self.velocity = 0.0;
        self.has_sample = false;
    }
}
