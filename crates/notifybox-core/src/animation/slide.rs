use std::time::Duration;

use super::{
    AnimatedProperty, AutoTrigger, Behavior, Effect, KeyFrame, KeySpline, Phase, Storyboard,
    Timeline, DEFAULT_ANIMATION_DURATION,
};

pub const DEFAULT_SLIDE_OFFSET: f64 = 40.0;

/// Slides in horizontally from `offset` to rest, and out vertically from
/// rest to `offset`. The surface ignores the pointer while sliding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideBehavior {
    pub begin_time: Duration,
    pub duration: Duration,
    pub offset: f64,
    pub triggers: AutoTrigger,
}

impl Default for SlideBehavior {
    fn default() -> Self {
        Self {
            begin_time: Duration::ZERO,
            duration: DEFAULT_ANIMATION_DURATION,
            offset: DEFAULT_SLIDE_OFFSET,
            triggers: AutoTrigger::default(),
        }
    }
}

impl SlideBehavior {
    pub fn slide_in(&self) -> Storyboard {
        let timeline = Timeline::new(vec![
            KeyFrame::linear(self.begin_time, self.offset),
            KeyFrame::splined(
                self.begin_time + self.duration,
                0.0,
                KeySpline::EASE_OUT,
            ),
        ]);
        self.storyboard(Phase::In, AnimatedProperty::TranslateX, timeline)
    }

    pub fn slide_out(&self) -> Storyboard {
        let timeline = Timeline::new(vec![
            KeyFrame::linear(self.begin_time, 0.0),
            KeyFrame::splined(
                self.begin_time + self.duration,
                self.offset,
                KeySpline::EASE_IN,
            ),
        ]);
        self.storyboard(Phase::Out, AnimatedProperty::TranslateY, timeline)
    }

    fn storyboard(&self, phase: Phase, property: AnimatedProperty, timeline: Timeline) -> Storyboard {
        let mut storyboard = Storyboard::new(Effect::Slide, phase, property, timeline);
        storyboard.suspends_hit_test = true;
        storyboard.resets_translation = true;
        storyboard
    }
}

impl Behavior for SlideBehavior {
    fn enter(&self) -> Storyboard {
        self.slide_in()
    }

    fn exit(&self) -> Storyboard {
        self.slide_out()
    }

    fn triggers(&self) -> AutoTrigger {
        self.triggers
    }
}
