/// A single active gain ramp evaluated once per frame.
///
/// This replaces opaque animation-library timelines with plain data:
/// cancelling a ramp is dropping it, retargeting is replacing it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainRamp {
    pub from: f32,
    pub to: f32,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl GainRamp {
    pub fn new(from: f32, to: f32, start_ms: f64, duration_sec: f32) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: (duration_sec as f64 * 1000.0).max(1.0),
        }
    }

    pub fn value_at(&self, now_ms: f64) -> f32 {
        if now_ms <= self.start_ms {
            return self.from;
        }
        if now_ms >= self.start_ms + self.duration_ms {
            return self.to;
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms) as f32;
        self.from + (self.to - self.from) * ease_in_out_quad(t)
    }

    pub fn finished(&self, now_ms: f64) -> bool {
        now_ms >= self.start_ms + self.duration_ms
    }
}

/// Quadratic ease-in-out shaping for gain ramps.
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}
