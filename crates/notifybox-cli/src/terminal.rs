//! Presentation layer that renders toasts as lines on stdout.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use notifybox_core::models::{Point, Size, Thickness, DEFAULT_TEMPLATE_NAME};
use notifybox_core::{Presenter, Surface, TemplateRegistry, WindowId};
use serde::Serialize;

pub const MAIL_TEMPLATE_NAME: &str = "mailNotificationTemplate";

/// Content payload shown by the terminal host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub sender: Option<String>,
}

/// Rendering strategy: turns a toast into the text of its surface.
pub type TerminalTemplate = fn(&Toast) -> String;

fn render_notification(toast: &Toast) -> String {
    if toast.message.is_empty() {
        toast.title.clone()
    } else {
        format!("{}: {}", toast.title, toast.message)
    }
}

fn render_mail(toast: &Toast) -> String {
    let sender = toast.sender.as_deref().unwrap_or("unknown sender");
    format!("[mail] {} | {} - {}", sender, toast.title, toast.message)
}

pub fn default_templates() -> TemplateRegistry<TerminalTemplate> {
    TemplateRegistry::new()
        .with(DEFAULT_TEMPLATE_NAME, render_notification as TerminalTemplate)
        .with(MAIL_TEMPLATE_NAME, render_mail as TerminalTemplate)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Shown,
    Pending,
    Closed,
    Cleared,
}

impl EventKind {
    fn label(&self) -> &'static str {
        match self {
            EventKind::Shown => "shown",
            EventKind::Pending => "pending",
            EventKind::Closed => "closed",
            EventKind::Cleared => "cleared",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    pub elapsed_ms: u64,
    pub kind: EventKind,
    pub id: WindowId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Collects lifecycle events and prints each one as it happens.
#[derive(Debug)]
pub struct EventSink {
    start: Instant,
    json: bool,
    quiet: bool,
    events: Vec<LifecycleEvent>,
}

impl EventSink {
    pub fn new(start: Instant, json: bool) -> Self {
        Self {
            start,
            json,
            quiet: false,
            events: Vec::new(),
        }
    }

    /// Record without printing.
    pub fn silent(start: Instant) -> Self {
        Self {
            quiet: true,
            ..Self::new(start, false)
        }
    }

    pub fn emit(
        &mut self,
        at: Instant,
        kind: EventKind,
        id: WindowId,
        text: Option<String>,
        position: Option<Point>,
    ) {
        let event = LifecycleEvent {
            elapsed_ms: millis(at.saturating_duration_since(self.start)),
            kind,
            id,
            text,
            position,
        };
        if !self.quiet {
            println!("{}", self.format(&event));
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    fn format(&self, event: &LifecycleEvent) -> String {
        if self.json {
            return serde_json::to_string(event)
                .unwrap_or_else(|_| r#"{"kind":"error"}"#.to_string());
        }
        let position = event
            .position
            .map(|p| format!(" at ({:.0}, {:.0})", p.x, p.y))
            .unwrap_or_default();
        let text = event
            .text
            .as_deref()
            .map(|t| format!(" {}", t))
            .unwrap_or_default();
        format!(
            "{:>6}ms {:<7} #{}{}{}",
            event.elapsed_ms,
            event.kind.label(),
            event.id,
            position,
            text
        )
    }
}

pub type SharedSink = Rc<RefCell<EventSink>>;
pub type SharedClock = Rc<Cell<Instant>>;

/// A toast "window" in the terminal.
#[derive(Debug)]
pub struct TerminalSurface {
    id: WindowId,
    text: String,
    size: Size,
    position: Point,
    opacity: f64,
    translation: (f64, f64),
    hit_test_visible: bool,
    hover_until: Option<Instant>,
    visible: bool,
    clock: SharedClock,
    sink: SharedSink,
}

impl TerminalSurface {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn translation(&self) -> (f64, f64) {
        self.translation
    }

    pub fn is_hit_test_visible(&self) -> bool {
        self.hit_test_visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Surface for TerminalSurface {
    fn show(&mut self) {
        self.visible = true;
        self.sink.borrow_mut().emit(
            self.clock.get(),
            EventKind::Shown,
            self.id,
            Some(self.text.clone()),
            Some(self.position),
        );
    }

    fn close(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.sink
            .borrow_mut()
            .emit(self.clock.get(), EventKind::Closed, self.id, None, None);
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn is_pointer_over(&self) -> bool {
        self.hover_until
            .is_some_and(|until| self.clock.get() < until)
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_translation(&mut self, x: f64, y: f64) {
        self.translation = (x, y);
    }

    fn set_hit_test_visible(&mut self, visible: bool) {
        self.hit_test_visible = visible;
    }

    fn outer_margin(&self) -> Thickness {
        Thickness::default()
    }
}

/// Builds terminal surfaces. Optionally keeps the pointer over one toast
/// until a given instant.
pub struct TerminalPresenter {
    clock: SharedClock,
    sink: SharedSink,
    hover: Option<(WindowId, Instant)>,
}

impl TerminalPresenter {
    pub fn new(clock: SharedClock, sink: SharedSink) -> Self {
        Self {
            clock,
            sink,
            hover: None,
        }
    }

    #[must_use]
    pub fn with_hover(mut self, id: WindowId, until: Instant) -> Self {
        self.hover = Some((id, until));
        self
    }
}

impl Presenter for TerminalPresenter {
    type Content = Toast;
    type Template = TerminalTemplate;
    type Surface = TerminalSurface;

    fn create_surface(
        &mut self,
        id: WindowId,
        content: Toast,
        template: &TerminalTemplate,
        size: Size,
    ) -> TerminalSurface {
        let hover_until = self
            .hover
            .and_then(|(hover_id, until)| (hover_id == id).then_some(until));
        TerminalSurface {
            id,
            text: template(&content),
            size,
            position: Point::default(),
            opacity: 1.0,
            translation: (0.0, 0.0),
            hit_test_visible: true,
            hover_until,
            visible: false,
            clock: self.clock.clone(),
            sink: self.sink.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter(start: Instant) -> (TerminalPresenter, SharedClock, SharedSink) {
        let clock = Rc::new(Cell::new(start));
        let sink = Rc::new(RefCell::new(EventSink::silent(start)));
        (
            TerminalPresenter::new(clock.clone(), sink.clone()),
            clock,
            sink,
        )
    }

    #[test]
    fn templates_render_content() {
        let templates = default_templates();
        let toast = Toast {
            title: "Vacation Request".to_string(),
            message: "20/12 to 30/12".to_string(),
            sender: Some("Mohamed".to_string()),
        };
        let plain = templates.get(DEFAULT_TEMPLATE_NAME).unwrap();
        let mail = templates.get(MAIL_TEMPLATE_NAME).unwrap();
        assert_eq!(plain(&toast), "Vacation Request: 20/12 to 30/12");
        assert_eq!(mail(&toast), "[mail] Mohamed | Vacation Request - 20/12 to 30/12");
    }

    #[test]
    fn surface_reports_show_and_close_once() {
        let start = Instant::now();
        let (mut presenter, clock, sink) = presenter(start);
        let template = render_notification as TerminalTemplate;
        let mut surface = presenter.create_surface(
            WindowId::new(1),
            Toast {
                title: "Build".to_string(),
                ..Toast::default()
            },
            &template,
            Size::new(300.0, 150.0),
        );
        surface.set_position(Point::new(10.0, 20.0));
        surface.show();
        clock.set(start + Duration::from_millis(40));
        surface.close();
        surface.close();

        let sink = sink.borrow();
        let kinds: Vec<EventKind> = sink.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Shown, EventKind::Closed]);
        assert_eq!(sink.events()[0].position, Some(Point::new(10.0, 20.0)));
        assert_eq!(sink.events()[0].text.as_deref(), Some("Build"));
        assert_eq!(sink.events()[1].elapsed_ms, 40);
    }

    #[test]
    fn hover_ends_at_deadline() {
        let start = Instant::now();
        let (presenter, clock, _sink) = presenter(start);
        let mut presenter = presenter.with_hover(WindowId::new(2), start + Duration::from_secs(1));
        let template = render_notification as TerminalTemplate;
        let size = Size::new(1.0, 1.0);
        let first = presenter.create_surface(WindowId::new(1), Toast::default(), &template, size);
        let second = presenter.create_surface(WindowId::new(2), Toast::default(), &template, size);

        assert!(!first.is_pointer_over());
        assert!(second.is_pointer_over());
        clock.set(start + Duration::from_secs(1));
        assert!(!second.is_pointer_over());
    }

    #[test]
    fn elapsed_millis_saturate() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn json_lines_use_camel_case() {
        let start = Instant::now();
        let sink = EventSink::new(start, true);
        let event = LifecycleEvent {
            elapsed_ms: 5,
            kind: EventKind::Pending,
            id: WindowId::new(3),
            text: None,
            position: None,
        };
        let line = sink.format(&event);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["elapsedMs"], 5);
        assert_eq!(value["kind"], "pending");
        assert_eq!(value["id"], 3);
        assert!(value.get("text").is_none());
    }
}
