//! Entrance and exit animations for toast surfaces.
//!
//! Behaviors build [`Storyboard`]s; an [`Animator`] owned by each surface
//! runs them against a caller-supplied clock and reports each completion
//! exactly once.

mod easing;
mod fade;
mod slide;
mod timeline;

pub use easing::KeySpline;
pub use fade::FadeBehavior;
pub use slide::SlideBehavior;
pub use timeline::{KeyFrame, Timeline};

use std::time::{Duration, Instant};

use crate::surface::Surface;

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    Opacity,
    TranslateX,
    TranslateY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Fade,
    Slide,
}

/// Which automatic events start the entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoTrigger {
    pub on_loaded: bool,
    pub on_visible_changed: bool,
}

impl Default for AutoTrigger {
    fn default() -> Self {
        Self {
            on_loaded: true,
            on_visible_changed: true,
        }
    }
}

/// An entrance/exit effect attachable to any surface.
pub trait Behavior {
    fn enter(&self) -> Storyboard;

    fn exit(&self) -> Storyboard;

    fn triggers(&self) -> AutoTrigger;

    /// Entrance to run when the surface finishes loading, if enabled.
    fn on_loaded(&self) -> Option<Storyboard> {
        self.triggers().on_loaded.then(|| self.enter())
    }

    /// Entrance to run when the surface becomes visible, if enabled.
    fn on_visible_changed(&self, visible: bool) -> Option<Storyboard> {
        (visible && self.triggers().on_visible_changed).then(|| self.enter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Storyboard {
    pub effect: Effect,
    pub phase: Phase,
    pub property: AnimatedProperty,
    pub timeline: Timeline,
    /// Surface ignores the pointer until this storyboard completes.
    pub suspends_hit_test: bool,
    /// Translation goes back to (0, 0) before the first frame applies.
    pub resets_translation: bool,
}

impl Storyboard {
    pub fn new(effect: Effect, phase: Phase, property: AnimatedProperty, timeline: Timeline) -> Self {
        Self {
            effect,
            phase,
            property,
            timeline,
            suspends_hit_test: false,
            resets_translation: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.timeline.duration()
    }
}

/// Reported once when a storyboard runs to its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub effect: Effect,
    pub phase: Phase,
    pub at: Instant,
}

#[derive(Debug, Clone)]
struct Running {
    storyboard: Storyboard,
    started_at: Instant,
}

impl Running {
    fn ends_at(&self) -> Instant {
        self.started_at + self.storyboard.duration()
    }
}

/// Runs storyboards against one surface.
#[derive(Debug, Clone)]
pub struct Animator {
    running: Vec<Running>,
    translation: (f64, f64),
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    pub fn new() -> Self {
        Self {
            running: Vec::new(),
            translation: (0.0, 0.0),
        }
    }

    /// Start `storyboard` at `at`. A storyboard already animating the same
    /// property is dropped without completing.
    pub fn start<S: Surface + ?Sized>(&mut self, storyboard: Storyboard, at: Instant, surface: &mut S) {
        self.running
            .retain(|r| r.storyboard.property != storyboard.property);

        if storyboard.suspends_hit_test {
            surface.set_hit_test_visible(false);
        }
        if storyboard.resets_translation {
            self.translation = (0.0, 0.0);
            surface.set_translation(0.0, 0.0);
        }

        let running = Running {
            storyboard,
            started_at: at,
        };
        self.apply(&running, at, surface);
        self.running.push(running);
    }

    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    pub fn is_running(&self, effect: Effect, phase: Phase) -> bool {
        self.running
            .iter()
            .any(|r| r.storyboard.effect == effect && r.storyboard.phase == phase)
    }

    /// Earliest instant at which a running storyboard ends.
    pub fn next_completion(&self) -> Option<Instant> {
        self.running.iter().map(Running::ends_at).min()
    }

    /// Apply every running storyboard at `at` and return those that ended,
    /// ordered by end time.
    pub fn advance<S: Surface + ?Sized>(&mut self, at: Instant, surface: &mut S) -> Vec<Completion> {
        let running = std::mem::take(&mut self.running);
        let mut completions = Vec::new();

        for r in running {
            self.apply(&r, at, surface);
            let ends_at = r.ends_at();
            if at >= ends_at {
                if r.storyboard.suspends_hit_test {
                    surface.set_hit_test_visible(true);
                }
                completions.push(Completion {
                    effect: r.storyboard.effect,
                    phase: r.storyboard.phase,
                    at: ends_at,
                });
            } else {
                self.running.push(r);
            }
        }

        completions.sort_by_key(|c| c.at);
        completions
    }

    fn apply<S: Surface + ?Sized>(&mut self, running: &Running, at: Instant, surface: &mut S) {
        let elapsed = at.saturating_duration_since(running.started_at);
        let Some(value) = running.storyboard.timeline.value_at(elapsed) else {
            return;
        };
        match running.storyboard.property {
            AnimatedProperty::Opacity => surface.set_opacity(value),
            AnimatedProperty::TranslateX => {
                self.translation.0 = value;
                surface.set_translation(self.translation.0, self.translation.1);
            }
            AnimatedProperty::TranslateY => {
                self.translation.1 = value;
                surface.set_translation(self.translation.0, self.translation.1);
            }
        }
    }
}
