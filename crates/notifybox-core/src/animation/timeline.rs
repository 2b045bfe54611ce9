use std::time::Duration;

use super::easing::KeySpline;

/// Target value at an offset from the start of a timeline.
/// The spline shapes the segment that ends at this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyFrame {
    pub time: Duration,
    pub value: f64,
    pub spline: KeySpline,
}

impl KeyFrame {
    pub fn linear(time: Duration, value: f64) -> Self {
        Self {
            time,
            value,
            spline: KeySpline::LINEAR,
        }
    }

    pub fn splined(time: Duration, value: f64, spline: KeySpline) -> Self {
        Self { time, value, spline }
    }
}

/// Keyframe animation of a single value. Holds the first value before the
/// first frame and the last value after the last one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    frames: Vec<KeyFrame>,
}

impl Timeline {
    pub fn new(mut frames: Vec<KeyFrame>) -> Self {
        frames.sort_by_key(|f| f.time);
        Self { frames }
    }

    pub fn frames(&self) -> &[KeyFrame] {
        &self.frames
    }

    pub fn duration(&self) -> Duration {
        self.frames.last().map(|f| f.time).unwrap_or_default()
    }

    pub fn value_at(&self, elapsed: Duration) -> Option<f64> {
        let first = self.frames.first()?;
        if elapsed <= first.time {
            return Some(first.value);
        }

        for pair in self.frames.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            if elapsed < to.time {
                let span = (to.time - from.time).as_secs_f64();
                let progress = (elapsed - from.time).as_secs_f64() / span;
                return Some(from.value + (to.value - from.value) * to.spline.ease(progress));
            }
        }

        self.frames.last().map(|f| f.value)
    }
}
