use serde::Deserialize;
use std::io;
use std::path::PathBuf;
use toml_edit::DocumentMut;

use crate::models::FlowDirection;

/// Return XDG_DATA_HOME/notifybox.
/// Constructs ~/.local/share directly instead of the platform data dir.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("notifybox")
    } else {
        home_dir().join(".local").join("share").join("notifybox")
    }
}

/// Return XDG_CONFIG_HOME/notifybox.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("notifybox")
    } else {
        home_dir().join(".config").join("notifybox")
    }
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Return the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("notifybox.log")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub editor: Option<String>,
    #[serde(default)]
    pub toast: ToastConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_toast_duration")]
    pub duration_ms: i64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub template: Option<String>,
    pub flow_direction: Option<String>,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration(),
            width: None,
            height: None,
            template: None,
            flow_direction: None,
        }
    }
}

fn default_toast_duration() -> i64 {
    2000
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_max_active")]
    pub max_active: usize,
    #[serde(default)]
    pub close_on_clear: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_active: default_max_active(),
            close_on_clear: false,
        }
    }
}

fn default_max_active() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    #[serde(default)]
    pub fade_begin_ms: u64,
    #[serde(default = "default_animation_duration")]
    pub fade_duration_ms: u64,
    #[serde(default)]
    pub slide_begin_ms: u64,
    #[serde(default = "default_animation_duration")]
    pub slide_duration_ms: u64,
    #[serde(default = "default_slide_offset")]
    pub slide_offset: f64,
    #[serde(default = "default_true")]
    pub animate_on_loaded: bool,
    #[serde(default = "default_true")]
    pub animate_on_visible_changed: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fade_begin_ms: 0,
            fade_duration_ms: default_animation_duration(),
            slide_begin_ms: 0,
            slide_duration_ms: default_animation_duration(),
            slide_offset: default_slide_offset(),
            animate_on_loaded: true,
            animate_on_visible_changed: true,
        }
    }
}

fn default_animation_duration() -> u64 {
    300
}

fn default_slide_offset() -> f64 {
    40.0
}

fn default_true() -> bool {
    true
}

/// Primary display metrics, in device pixels.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenConfig {
    #[serde(default = "default_screen_width")]
    pub width: u32,
    #[serde(default = "default_screen_height")]
    pub height: u32,
    #[serde(default = "default_taskbar_height")]
    pub taskbar_height: u32,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: default_screen_width(),
            height: default_screen_height(),
            taskbar_height: default_taskbar_height(),
            scale_factor: default_scale_factor(),
        }
    }
}

fn default_screen_width() -> u32 {
    1920
}

fn default_screen_height() -> u32 {
    1080
}

fn default_taskbar_height() -> u32 {
    40
}

fn default_scale_factor() -> f64 {
    1.0
}

/// Return the path to config.toml.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load config.toml. Return defaults if the file is missing or fails to parse.
pub fn load_config() -> AppConfig {
    let path = config_path();
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content),
        Err(_) => AppConfig::default(),
    }
}

fn parse_config(content: &str) -> AppConfig {
    toml::from_str(content).unwrap_or_else(|e| {
        log::warn!("Failed to parse config.toml: {}, using defaults", e);
        AppConfig::default()
    })
}

/// Update [toast] flow_direction in config.toml, preserving existing comments and formatting.
pub fn save_default_direction(direction: FlowDirection) -> io::Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = std::fs::read_to_string(&path).unwrap_or_default();
    let mut doc: DocumentMut = content.parse().unwrap_or_default();
    doc["toast"]["flow_direction"] = toml_edit::value(direction.as_str());
    std::fs::write(&path, doc.to_string())
}

/// Default config.toml template.
fn default_config_template() -> &'static str {
    r#"# notifybox configuration

# Editor to open when running `notifybox config`
# Falls back to $EDITOR environment variable, then vim
# editor = "vim"

# Defaults for every toast
[toast]
# Display duration in milliseconds; 0 or negative means 2000 (default: 2000)
# duration_ms = 2000

# Surface size (default: 300 x 150)
# width = 300
# height = 150

# Template used to render content (default: notificationTemplate)
# template = "notificationTemplate"

# Screen corner: right-bottom, left-bottom, left-up, right-up (default: right-bottom)
# flow_direction = "right-bottom"

[queue]
# Number of toasts visible at once; the rest wait in order (default: 1)
# max_active = 1

# Close visible toasts when clearing; otherwise they are left on screen (default: false)
# close_on_clear = false

[animation]
# fade_begin_ms = 0
# fade_duration_ms = 300
# slide_begin_ms = 0
# slide_duration_ms = 300
# slide_offset = 40.0
# animate_on_loaded = true
# animate_on_visible_changed = true

# Primary display used by the terminal host, in device pixels
[screen]
# width = 1920
# height = 1080
# taskbar_height = 40
# scale_factor = 1.0
"#
}

/// Create config.toml with the default template if it does not exist. Return its path.
pub fn ensure_config_file() -> io::Result<PathBuf> {
    let path = config_path();
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, default_config_template())?;
    }
    Ok(path)
}

/// Resolve the editor to use.
/// Priority: config.toml `editor` -> $EDITOR env var -> vim.
pub fn resolve_editor() -> String {
    let config = load_config();
    if let Some(ref editor) = config.editor {
        if !editor.is_empty() {
            return editor.clone();
        }
    }
    if let Ok(editor) = std::env::var("EDITOR") {
        if !editor.is_empty() {
            return editor;
        }
    }
    "vim".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.toast.duration_ms, 2000);
        assert!(config.toast.template.is_none());
        assert_eq!(config.queue.max_active, 1);
        assert!(!config.queue.close_on_clear);
        assert_eq!(config.animation.fade_duration_ms, 300);
        assert_eq!(config.animation.slide_offset, 40.0);
        assert!(config.animation.animate_on_loaded);
        assert_eq!(config.screen.width, 1920);
    }

    #[test]
    fn parse_partial_toast_section() {
        let toml_str = r#"
[toast]
duration_ms = 5000
flow_direction = "left-up"
"#;
        let config = parse_config(toml_str);
        assert_eq!(config.toast.duration_ms, 5000);
        assert_eq!(config.toast.flow_direction.as_deref(), Some("left-up"));
        // Untouched sections keep their defaults
        assert_eq!(config.queue.max_active, 1);
        assert_eq!(config.animation.slide_duration_ms, 300);
    }

    #[test]
    fn parse_queue_and_animation() {
        let toml_str = r#"
[queue]
max_active = 3
close_on_clear = true

[animation]
slide_offset = 12.5
animate_on_visible_changed = false
"#;
        let config = parse_config(toml_str);
        assert_eq!(config.queue.max_active, 3);
        assert!(config.queue.close_on_clear);
        assert_eq!(config.animation.slide_offset, 12.5);
        assert!(!config.animation.animate_on_visible_changed);
        assert!(config.animation.animate_on_loaded);
    }

    #[test]
    fn broken_file_yields_defaults() {
        let config = parse_config("[toast\nduration_ms = ");
        assert_eq!(config.toast.duration_ms, 2000);
    }

    #[test]
    fn default_template_parses() {
        let config = parse_config(default_config_template());
        assert_eq!(config.toast.duration_ms, 2000);
        assert_eq!(config.screen.scale_factor, 1.0);
    }

    // Sole test in this crate that sets XDG_CONFIG_HOME.
    #[test]
    fn config_file_round_trip_in_config_home() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", dir.path());

        let path = ensure_config_file().unwrap();
        assert_eq!(path, dir.path().join("notifybox").join("config.toml"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, default_config_template());
        assert_eq!(load_config().queue.max_active, 1);

        std::fs::write(&path, "# mine\n[toast]\n# keep\nduration_ms = 900\n").unwrap();
        // An existing file is left untouched
        ensure_config_file().unwrap();
        save_default_direction(FlowDirection::LeftUp).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# mine"));
        assert!(content.contains("# keep"));
        let config = load_config();
        assert_eq!(config.toast.duration_ms, 900);
        assert_eq!(config.toast.flow_direction.as_deref(), Some("left-up"));

        std::env::remove_var("XDG_CONFIG_HOME");
    }
}
