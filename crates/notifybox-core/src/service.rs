//! Application-facing facade over [`NotifyBox`].

use std::time::Instant;

use crate::config::AppConfig;
use crate::error::NotifyError;
use crate::models::{NotificationConfiguration, WindowId};
use crate::notify_box::{Detached, NotifyBox};
use crate::surface::{Presenter, Surface};

pub trait NotificationDialogService {
    type Content;

    fn show_notification(&mut self, content: Self::Content) -> Result<WindowId, NotifyError>;

    fn show_notification_with(
        &mut self,
        content: Self::Content,
        configuration: &NotificationConfiguration,
    ) -> Result<WindowId, NotifyError>;

    fn clear_all_notifications(&mut self);
}

/// What clearing does with surfaces that are already on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClearPolicy {
    /// Leave them visible and untracked.
    #[default]
    Detach,
    Close,
}

impl ClearPolicy {
    pub fn from_settings(config: &AppConfig) -> Self {
        if config.queue.close_on_clear {
            ClearPolicy::Close
        } else {
            ClearPolicy::Detach
        }
    }
}

/// Owns the queue for the application's lifetime and stamps requests with
/// the current time.
pub struct DialogService<P: Presenter> {
    notify_box: NotifyBox<P>,
    clear_policy: ClearPolicy,
    clock: Box<dyn Fn() -> Instant>,
    detached: Vec<Detached<P::Surface>>,
}

impl<P: Presenter> DialogService<P> {
    pub fn new(notify_box: NotifyBox<P>) -> Self {
        Self {
            notify_box,
            clear_policy: ClearPolicy::default(),
            clock: Box::new(Instant::now),
            detached: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clear_policy(mut self, clear_policy: ClearPolicy) -> Self {
        self.clear_policy = clear_policy;
        self
    }

    /// Replace the time source, e.g. with a virtual clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> Instant + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn tick(&mut self) {
        let now = (self.clock)();
        self.notify_box.tick(now);
    }

    /// Host report that a surface closed on its own. Detached surfaces are
    /// forgotten; tracked ones go through the queue.
    pub fn on_surface_closed(&mut self, id: WindowId) {
        if let Some(pos) = self.detached.iter().position(|d| d.id == id) {
            self.detached.remove(pos);
            log::debug!("[service] detached id={} closed", id);
            return;
        }
        let now = (self.clock)();
        self.notify_box.on_surface_closed(id, now);
    }

    pub fn notify_box(&self) -> &NotifyBox<P> {
        &self.notify_box
    }

    pub fn notify_box_mut(&mut self) -> &mut NotifyBox<P> {
        &mut self.notify_box
    }

    /// Surfaces left on screen by clearing under [`ClearPolicy::Detach`].
    pub fn detached_surfaces(&self) -> &[Detached<P::Surface>] {
        &self.detached
    }

    /// Close and forget detached surfaces.
    pub fn close_detached(&mut self) -> usize {
        let count = self.detached.len();
        for mut d in self.detached.drain(..) {
            d.surface.close();
        }
        count
    }

    pub fn into_inner(self) -> NotifyBox<P> {
        self.notify_box
    }
}

impl<P: Presenter> NotificationDialogService for DialogService<P> {
    type Content = P::Content;

    fn show_notification(&mut self, content: P::Content) -> Result<WindowId, NotifyError> {
        let now = (self.clock)();
        self.notify_box.show_default(content, now)
    }

    fn show_notification_with(
        &mut self,
        content: P::Content,
        configuration: &NotificationConfiguration,
    ) -> Result<WindowId, NotifyError> {
        let now = (self.clock)();
        self.notify_box.show(content, configuration, now)
    }

    fn clear_all_notifications(&mut self) {
        match self.clear_policy {
            ClearPolicy::Detach => {
                let detached = self.notify_box.clear_all();
                self.detached.extend(detached);
            }
            ClearPolicy::Close => {
                self.notify_box.close_all();
            }
        }
    }
}
