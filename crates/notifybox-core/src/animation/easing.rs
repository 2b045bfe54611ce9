/// Cubic Bezier easing through (0, 0) and (1, 1) with control points
/// (x1, y1) and (x2, y2). Control point x values must lie in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeySpline {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

const BISECTION_STEPS: usize = 48;

impl KeySpline {
    pub const LINEAR: KeySpline = KeySpline::new(0.0, 0.0, 1.0, 1.0);
    /// Accelerating curve used by exit animations.
    pub const EASE_IN: KeySpline = KeySpline::new(0.5, 0.0, 1.0, 0.75);
    /// Decelerating curve used by the slide entrance.
    pub const EASE_OUT: KeySpline = KeySpline::new(0.0, 0.5, 0.5, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Map linear progress in [0, 1] to eased progress.
    pub fn ease(&self, progress: f64) -> f64 {
        let x = progress.clamp(0.0, 1.0);
        if *self == Self::LINEAR || x == 0.0 || x == 1.0 {
            return x;
        }

        // x(t) is monotonic for control x in [0, 1]
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        for _ in 0..BISECTION_STEPS {
            let mid = (lo + hi) / 2.0;
            if bezier(mid, self.x1, self.x2) < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        bezier((lo + hi) / 2.0, self.y1, self.y2)
    }
}

impl Default for KeySpline {
    fn default() -> Self {
        Self::LINEAR
    }
}

fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}
