//! Single-threaded UI loop for the terminal host.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use notifybox_core::config::AppConfig;
use notifybox_core::{
    ClearPolicy, DialogService, NotificationConfiguration, NotificationDialogService, NotifyBox,
    NotifyError, WindowId,
};

use crate::terminal::{
    default_templates, EventKind, EventSink, LifecycleEvent, SharedClock, SharedSink, TerminalPresenter, Toast,
};

/// Frame interval while animations are running on the wall clock.
const FRAME: Duration = Duration::from_millis(16);

pub type TerminalService = DialogService<TerminalPresenter>;

/// Wall-clock time, or virtual time that jumps straight to the next deadline.
#[derive(Debug, Clone)]
pub struct Clock {
    virtual_time: bool,
    start: Instant,
    now: SharedClock,
}

impl Clock {
    pub fn new(virtual_time: bool) -> Self {
        let start = Instant::now();
        Self {
            virtual_time,
            start,
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn shared(&self) -> SharedClock {
        self.now.clone()
    }

    pub fn is_virtual(&self) -> bool {
        self.virtual_time
    }

    pub fn now(&self) -> Instant {
        if !self.virtual_time {
            self.now.set(Instant::now());
        }
        self.now.get()
    }

    /// Wait until `target`; a virtual clock just moves there.
    pub fn advance_to(&self, target: Instant) {
        if self.virtual_time {
            if target > self.now.get() {
                self.now.set(target);
            }
            return;
        }
        let now = Instant::now();
        if target > now {
            std::thread::sleep(target - now);
        }
        self.now.set(Instant::now());
    }
}

/// Something the loop does to the queue at a given offset from start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ClearAll,
}

/// Everything the terminal host needs for one run.
pub struct Session {
    clock: Clock,
    sink: SharedSink,
    service: TerminalService,
    actions: Vec<(Instant, Action)>,
}

pub struct SessionOptions {
    pub virtual_time: bool,
    pub json: bool,
    /// Record events without printing them.
    pub quiet: bool,
    /// Keep the pointer over this toast until the offset elapses.
    pub hover: Option<(WindowId, Duration)>,
}

impl Session {
    pub fn new(config: &AppConfig, options: SessionOptions) -> Self {
        let clock = Clock::new(options.virtual_time);
        let sink = if options.quiet {
            EventSink::silent(clock.start())
        } else {
            EventSink::new(clock.start(), options.json)
        };
        let sink = Rc::new(RefCell::new(sink));

        let mut presenter = TerminalPresenter::new(clock.shared(), sink.clone());
        if let Some((id, after)) = options.hover {
            presenter = presenter.with_hover(id, clock.start() + after);
        }

        let notify_box = NotifyBox::from_settings(presenter, default_templates(), config);
        let now = clock.shared();
        let service = DialogService::new(notify_box)
            .with_clear_policy(ClearPolicy::from_settings(config))
            .with_clock(move || now.get());

        Self {
            clock,
            sink,
            service,
            actions: Vec::new(),
        }
    }

    pub fn schedule(&mut self, after: Duration, action: Action) {
        self.actions.push((self.clock.start() + after, action));
        self.actions.sort_by_key(|(at, _)| *at);
    }

    pub fn show(
        &mut self,
        toast: Toast,
        configuration: &NotificationConfiguration,
    ) -> Result<WindowId, NotifyError> {
        self.clock.now();
        let id = self.service.show_notification_with(toast, configuration)?;
        if self.service.notify_box().pending_ids().contains(&id) {
            let now = self.clock.now();
            self.sink
                .borrow_mut()
                .emit(now, EventKind::Pending, id, None, None);
        }
        Ok(id)
    }

    /// Pump the loop until the queue is empty and no actions remain.
    pub fn run_until_idle(&mut self) {
        loop {
            let now = self.clock.now();
            self.run_due_actions(now);
            self.service.tick();

            if self.service.notify_box().is_idle() && self.actions.is_empty() {
                break;
            }

            let mut next = self.service.notify_box().next_deadline();
            if let Some((at, _)) = self.actions.first() {
                next = Some(next.map_or(*at, |n| n.min(*at)));
            }
            if !self.clock.is_virtual() && self.service.notify_box().is_animating() {
                next = next.map(|n| n.min(now + FRAME));
            }

            match next {
                Some(target) => self.clock.advance_to(target),
                None => {
                    log::warn!("[runner] queue not idle but nothing scheduled, stopping");
                    break;
                }
            }
        }

        let left = self.service.close_detached();
        if left > 0 {
            log::info!("[runner] closed {} detached toast(s) on exit", left);
        }
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.sink.borrow().events().to_vec()
    }

    fn run_due_actions(&mut self, now: Instant) {
        while self.actions.first().is_some_and(|(at, _)| *at <= now) {
            let (_, action) = self.actions.remove(0);
            match action {
                Action::ClearAll => self.clear_all(now),
            }
        }
    }

    fn clear_all(&mut self, now: Instant) {
        let mut ids = self.service.notify_box().active_ids();
        ids.extend(self.service.notify_box().pending_ids());
        let already_detached = self.service.detached_surfaces().len();

        self.service.clear_all_notifications();

        let detached: Vec<WindowId> = self.service.detached_surfaces()[already_detached..]
            .iter()
            .map(|d| d.id)
            .collect();
        let mut sink = self.sink.borrow_mut();
        for id in ids {
            let note = detached
                .contains(&id)
                .then(|| "left on screen".to_string());
            sink.emit(now, EventKind::Cleared, id, note, None);
        }
    }
}
