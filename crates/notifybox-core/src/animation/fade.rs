use std::time::Duration;

use super::{
    AnimatedProperty, AutoTrigger, Behavior, Effect, KeyFrame, KeySpline, Phase, Storyboard,
    Timeline, DEFAULT_ANIMATION_DURATION,
};

/// Opacity 0 -> 1 on entrance, 1 -> 0 on exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeBehavior {
    /// Delay before the fade starts.
    pub begin_time: Duration,
    pub duration: Duration,
    pub triggers: AutoTrigger,
}

impl Default for FadeBehavior {
    fn default() -> Self {
        Self {
            begin_time: Duration::ZERO,
            duration: DEFAULT_ANIMATION_DURATION,
            triggers: AutoTrigger::default(),
        }
    }
}

impl FadeBehavior {
    pub fn fade_in(&self) -> Storyboard {
        let end = self.begin_time + self.duration;
        let timeline = Timeline::new(vec![
            KeyFrame::linear(Duration::ZERO, 0.0),
            KeyFrame::linear(self.begin_time, 0.0),
            KeyFrame::linear(end, 1.0),
        ]);
        Storyboard::new(Effect::Fade, Phase::In, AnimatedProperty::Opacity, timeline)
    }

    pub fn fade_out(&self) -> Storyboard {
        let end = self.begin_time + self.duration;
        let timeline = Timeline::new(vec![
            KeyFrame::linear(self.begin_time, 1.0),
            KeyFrame::splined(end, 0.0, KeySpline::EASE_IN),
        ]);
        Storyboard::new(Effect::Fade, Phase::Out, AnimatedProperty::Opacity, timeline)
    }
}

impl Behavior for FadeBehavior {
    fn enter(&self) -> Storyboard {
        self.fade_in()
    }

    fn exit(&self) -> Storyboard {
        self.fade_out()
    }

    fn triggers(&self) -> AutoTrigger {
        self.triggers
    }
}
