//! Toast notifications for desktop hosts: a bounded display queue with a
//! FIFO overflow buffer, hover-aware timeouts, and fade/slide animations.

pub mod animation;
pub mod config;
pub mod error;
pub mod models;
pub mod notify_box;
pub mod placement;
pub mod service;
pub mod surface;
pub mod template;
pub mod timer;

pub use error::NotifyError;
pub use models::{FlowDirection, NotificationConfiguration, WindowId, WindowState};
pub use notify_box::{Detached, NotifyBox};
pub use placement::Screen;
pub use service::{ClearPolicy, DialogService, NotificationDialogService};
pub use surface::{Presenter, Surface};
pub use template::TemplateRegistry;
