/// Errors surfaced by the notification queue.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
}
