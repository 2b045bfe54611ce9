//! Queue and lifecycle manager for toast surfaces.
//!
//! At most `capacity` surfaces are visible at once; further requests wait in
//! a FIFO buffer. Each visible surface counts down its display duration,
//! postpones while hovered, then fades and slides out. When the fade-out
//! completes the surface closes and the next buffered request is shown.
//!
//! Everything is driven by the host's UI loop through [`NotifyBox::tick`],
//! with time passed in explicitly.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::animation::{Animator, Behavior, Effect, FadeBehavior, Phase, SlideBehavior};
use crate::config::AppConfig;
use crate::error::NotifyError;
use crate::models::{NotificationConfiguration, WindowId, WindowState};
use crate::placement::{self, Screen};
use crate::surface::{Presenter, Surface};
use crate::template::TemplateRegistry;

struct WindowInfo<S> {
    id: WindowId,
    display_duration: Duration,
    state: WindowState,
    surface: S,
    fade: FadeBehavior,
    slide: SlideBehavior,
    animator: Animator,
    loaded: bool,
}

impl<S: Surface> WindowInfo<S> {
    fn present(&mut self, at: Instant) {
        self.surface.show();

        let mut entrances = Vec::new();
        if !self.loaded {
            self.loaded = true;
            entrances.extend(self.fade.on_loaded());
            entrances.extend(self.slide.on_loaded());
        }
        entrances.extend(self.fade.on_visible_changed(true));
        entrances.extend(self.slide.on_visible_changed(true));

        for storyboard in entrances {
            self.animator.start(storyboard, at, &mut self.surface);
        }
    }

    fn begin_exit(&mut self, at: Instant) {
        self.state = WindowState::FadingOut;
        self.animator.start(self.fade.exit(), at, &mut self.surface);
        self.animator.start(self.slide.exit(), at, &mut self.surface);
    }
}

/// A surface left on screen by [`NotifyBox::clear_all`].
#[derive(Debug)]
pub struct Detached<S> {
    pub id: WindowId,
    pub surface: S,
}

pub struct NotifyBox<P: Presenter> {
    presenter: P,
    templates: TemplateRegistry<P::Template>,
    screen: Screen,
    capacity: usize,
    fade: FadeBehavior,
    slide: SlideBehavior,
    window_count: u64,
    epoch: u64,
    active: VecDeque<WindowInfo<P::Surface>>,
    buffer: VecDeque<WindowInfo<P::Surface>>,
    timers: crate::timer::Timers<WindowId>,
}

impl<P: Presenter> NotifyBox<P> {
    pub fn new(presenter: P, templates: TemplateRegistry<P::Template>, screen: Screen) -> Self {
        Self {
            presenter,
            templates,
            screen,
            capacity: 1,
            fade: FadeBehavior::default(),
            slide: SlideBehavior::default(),
            window_count: 0,
            epoch: 0,
            active: VecDeque::new(),
            buffer: VecDeque::new(),
            timers: crate::timer::Timers::new(),
        }
    }

    /// Capacity, animation tuning and screen metrics from config.toml.
    pub fn from_settings(
        presenter: P,
        templates: TemplateRegistry<P::Template>,
        config: &AppConfig,
    ) -> Self {
        let anim = &config.animation;
        let fade = FadeBehavior {
            begin_time: Duration::from_millis(anim.fade_begin_ms),
            duration: Duration::from_millis(anim.fade_duration_ms),
            triggers: crate::animation::AutoTrigger {
                on_loaded: anim.animate_on_loaded,
                on_visible_changed: anim.animate_on_visible_changed,
            },
        };
        let slide = SlideBehavior {
            begin_time: Duration::from_millis(anim.slide_begin_ms),
            duration: Duration::from_millis(anim.slide_duration_ms),
            offset: anim.slide_offset,
            triggers: fade.triggers,
        };

        Self::new(presenter, templates, Screen::from_settings(&config.screen))
            .with_capacity(config.queue.max_active)
            .with_fade(fade)
            .with_slide(slide)
    }

    /// Maximum number of visible surfaces. Zero is treated as one.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_fade(mut self, fade: FadeBehavior) -> Self {
        self.fade = fade;
        self
    }

    #[must_use]
    pub fn with_slide(mut self, slide: SlideBehavior) -> Self {
        self.slide = slide;
        self
    }

    // --- Public API ---

    /// Queue `content` for display. Shown immediately if a slot is free,
    /// otherwise buffered behind earlier requests.
    pub fn show(
        &mut self,
        content: P::Content,
        configuration: &NotificationConfiguration,
        now: Instant,
    ) -> Result<WindowId, NotifyError> {
        let template = match self.templates.get(configuration.template_name()) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[notify_box] {}", e);
                return Err(e);
            }
        };

        let id = WindowId::in_epoch(self.epoch, self.window_count + 1);
        let size = configuration.size();
        let mut surface = self.presenter.create_surface(id, content, template, size);
        let position = placement::position(
            configuration.flow_direction(),
            &self.screen,
            size,
            surface.outer_margin(),
        );
        surface.set_position(position);
        self.window_count += 1;

        let info = WindowInfo {
            id,
            display_duration: configuration.display_duration(),
            state: WindowState::Pending,
            surface,
            fade: self.fade,
            slide: self.slide,
            animator: Animator::new(),
            loaded: false,
        };

        if self.active.len() >= self.capacity {
            self.buffer.push_back(info);
            log::info!(
                "[notify_box] buffered id={} ({} pending)",
                id,
                self.buffer.len()
            );
        } else {
            self.admit(info, now);
        }
        Ok(id)
    }

    /// Queue `content` with the default configuration.
    pub fn show_default(&mut self, content: P::Content, now: Instant) -> Result<WindowId, NotifyError> {
        self.show(content, &NotificationConfiguration::default(), now)
    }

    /// Process every timer and animation due at or before `now`, then render
    /// running animations at `now`.
    pub fn tick(&mut self, now: Instant) {
        while let Some(at) = self.next_deadline().filter(|at| *at <= now) {
            self.step_animations(at);
            while let Some((deadline, id)) = self.timers.pop_due(at) {
                self.on_timer_elapsed(id, deadline);
            }
        }
        self.step_animations(now);
    }

    /// Host notification that a surface closed outside the timeout path,
    /// e.g. through its close button.
    pub fn on_surface_closed(&mut self, id: WindowId, now: Instant) {
        if let Some(pos) = self.active.iter().position(|w| w.id == id) {
            self.active.remove(pos);
            log::info!("[notify_box] id={} closed externally", id);
            self.promote(now);
        } else if let Some(pos) = self.buffer.iter().position(|w| w.id == id) {
            self.buffer.remove(pos);
            log::info!("[notify_box] pending id={} closed externally", id);
        }
    }

    /// Drop all active and pending notifications and reset the id counter.
    ///
    /// Visible surfaces are not closed; they are detached and returned so the
    /// host decides what happens to them. Use [`NotifyBox::close_all`] to
    /// close them as well. Ids issued afterwards start at 1 in a new epoch, so
    /// a late close report for a detached surface matches nothing here.
    pub fn clear_all(&mut self) -> Vec<Detached<P::Surface>> {
        let pending = self.buffer.len();
        self.buffer.clear();
        let detached: Vec<Detached<P::Surface>> = self
            .active
            .drain(..)
            .map(|w| Detached {
                id: w.id,
                surface: w.surface,
            })
            .collect();
        self.timers.clear();
        self.window_count = 0;
        self.epoch += 1;
        log::info!(
            "[notify_box] cleared {} active and {} pending",
            detached.len(),
            pending
        );
        detached
    }

    /// Close every visible surface, then clear. Returns the number closed.
    pub fn close_all(&mut self) -> usize {
        let mut detached = self.clear_all();
        for d in detached.iter_mut() {
            d.surface.close();
        }
        detached.len()
    }

    // --- Introspection ---

    pub fn active_ids(&self) -> Vec<WindowId> {
        self.active.iter().map(|w| w.id).collect()
    }

    pub fn pending_ids(&self) -> Vec<WindowId> {
        self.buffer.iter().map(|w| w.id).collect()
    }

    pub fn state(&self, id: WindowId) -> Option<WindowState> {
        self.active
            .iter()
            .chain(self.buffer.iter())
            .find(|w| w.id == id)
            .map(|w| w.state)
    }

    pub fn surface(&self, id: WindowId) -> Option<&P::Surface> {
        self.active
            .iter()
            .chain(self.buffer.iter())
            .find(|w| w.id == id)
            .map(|w| &w.surface)
    }

    pub fn surface_mut(&mut self, id: WindowId) -> Option<&mut P::Surface> {
        self.active
            .iter_mut()
            .chain(self.buffer.iter_mut())
            .find(|w| w.id == id)
            .map(|w| &mut w.surface)
    }

    /// Earliest instant at which a timer fires or an animation completes.
    pub fn next_deadline(&self) -> Option<Instant> {
        let animation = self
            .active
            .iter()
            .filter_map(|w| w.animator.next_completion())
            .min();
        match (self.timers.next_deadline(), animation) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.active.iter().any(|w| w.animator.is_animating())
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn templates(&self) -> &TemplateRegistry<P::Template> {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateRegistry<P::Template> {
        &mut self.templates
    }

    // --- Internal ---

    fn admit(&mut self, mut info: WindowInfo<P::Surface>, at: Instant) {
        info.state = WindowState::Active;
        self.timers.schedule(at + info.display_duration, info.id);
        log::info!(
            "[notify_box] showing id={} for {:?}",
            info.id,
            info.display_duration
        );
        self.active.push_back(info);
        if let Some(info) = self.active.back_mut() {
            info.present(at);
        }
    }

    fn on_timer_elapsed(&mut self, id: WindowId, at: Instant) {
        let Some(info) = self.active.iter_mut().find(|w| w.id == id) else {
            log::debug!("[notify_box] timer for id={} ignored, no longer active", id);
            return;
        };
        if info.state != WindowState::Active {
            return;
        }

        if info.surface.is_pointer_over() {
            log::debug!("[notify_box] id={} hovered, postponing dismissal", id);
            self.timers.schedule(at + info.display_duration, id);
            return;
        }

        log::debug!("[notify_box] id={} timed out, animating out", id);
        info.begin_exit(at);
    }

    fn step_animations(&mut self, at: Instant) {
        let mut faded_out = Vec::new();
        for info in self.active.iter_mut() {
            for done in info.animator.advance(at, &mut info.surface) {
                log::debug!(
                    "[notify_box] id={} {:?} {:?} completed",
                    info.id,
                    done.effect,
                    done.phase
                );
                if done.effect == Effect::Fade && done.phase == Phase::Out {
                    faded_out.push((info.id, done.at));
                }
            }
        }
        for (id, done_at) in faded_out {
            self.finish_exit(id, done_at);
        }
    }

    fn finish_exit(&mut self, id: WindowId, at: Instant) {
        let Some(pos) = self.active.iter().position(|w| w.id == id) else {
            return;
        };
        if let Some(mut info) = self.active.remove(pos) {
            info.surface.close();
            log::info!("[notify_box] closed id={}", id);
        }
        self.promote(at);
    }

    fn promote(&mut self, at: Instant) {
        while self.active.len() < self.capacity {
            let Some(next) = self.buffer.pop_front() else {
                break;
            };
            log::info!(
                "[notify_box] promoting id={} ({} still pending)",
                next.id,
                self.buffer.len()
            );
            self.admit(next, at);
        }
    }
}
