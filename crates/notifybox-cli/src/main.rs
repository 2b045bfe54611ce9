use std::time::Duration;

use clap::{Parser, Subcommand};
use notifybox_core::config::{self, AppConfig};
use notifybox_core::{FlowDirection, NotificationConfiguration, WindowId};

use notifybox_cli::logging;
use notifybox_cli::runner::{Action, Session, SessionOptions};
use notifybox_cli::terminal::{Toast, MAIL_TEMPLATE_NAME};

#[derive(Parser)]
#[command(name = "notifybox", about = "notifybox - queued toast notifications")]
struct Cli {
    /// Print lifecycle events as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one toast and wait until it is gone
    Send {
        /// Toast title
        #[arg(short = 't', long)]
        title: String,

        /// Toast body text
        #[arg(short = 'm', long, default_value = "")]
        message: String,

        /// Sender shown by the mail template
        #[arg(short = 's', long)]
        sender: Option<String>,

        /// Display duration in milliseconds; 0 or negative means 2000
        #[arg(short = 'd', long)]
        duration_ms: Option<i64>,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,

        /// Template name: notificationTemplate or mailNotificationTemplate
        #[arg(long)]
        template: Option<String>,

        /// Screen corner: right-bottom, left-bottom, left-up, right-up
        #[arg(long)]
        direction: Option<String>,

        /// Jump between deadlines instead of waiting in real time
        #[arg(long)]
        virtual_time: bool,
    },

    /// Queue a burst of toasts to watch buffering and promotion
    Demo {
        /// Number of toasts to queue
        #[arg(short = 'n', long, default_value_t = 3)]
        count: u32,

        /// Keep the pointer over the first toast for this many milliseconds
        #[arg(long)]
        hover_ms: Option<u64>,

        /// Clear every toast after this many milliseconds
        #[arg(long)]
        clear_after_ms: Option<u64>,

        /// Jump between deadlines instead of waiting in real time
        #[arg(long)]
        virtual_time: bool,
    },

    /// Open config file in editor
    Config,

    /// Save the default screen corner to config.toml
    Direction {
        /// right-bottom, left-bottom, left-up or right-up
        direction: String,
    },
}

fn parse_direction(value: &str) -> FlowDirection {
    value.parse().unwrap_or_else(|e: String| {
        eprintln!("{}", e);
        std::process::exit(1);
    })
}

fn demo_toast(index: u32) -> (Toast, Option<&'static str>) {
    if index % 2 == 0 {
        (
            Toast {
                title: "Test Fail".to_string(),
                message: format!("{} tests failed on main", index + 1),
                sender: None,
            },
            None,
        )
    } else {
        (
            Toast {
                title: "Vacation Request".to_string(),
                message: "20/12 to 30/12".to_string(),
                sender: Some("Mohamed".to_string()),
            },
            Some(MAIL_TEMPLATE_NAME),
        )
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match cli.command {
        Commands::Send {
            title,
            message,
            sender,
            duration_ms,
            width,
            height,
            template,
            direction,
            virtual_time,
        } => {
            let app_config = config::load_config();
            let mut toast_config = app_config.toast.clone();
            if let Some(ms) = duration_ms {
                toast_config.duration_ms = ms;
            }
            toast_config.width = width.or(toast_config.width);
            toast_config.height = height.or(toast_config.height);
            toast_config.template = template.or(toast_config.template);
            if let Some(ref d) = direction {
                toast_config.flow_direction = Some(parse_direction(d).as_str().to_string());
            }
            let configuration = NotificationConfiguration::from_settings(&toast_config);

            let mut session = Session::new(
                &app_config,
                SessionOptions {
                    virtual_time,
                    json: cli.json,
                    quiet: false,
                    hover: None,
                },
            );
            let toast = Toast {
                title,
                message,
                sender,
            };
            if let Err(e) = session.show(toast, &configuration) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            session.run_until_idle();
        }
        Commands::Demo {
            count,
            hover_ms,
            clear_after_ms,
            virtual_time,
        } => {
            let app_config: AppConfig = config::load_config();
            let defaults = NotificationConfiguration::from_settings(&app_config.toast);

            let mut session = Session::new(
                &app_config,
                SessionOptions {
                    virtual_time,
                    json: cli.json,
                    quiet: false,
                    hover: hover_ms.map(|ms| (WindowId::new(1), Duration::from_millis(ms))),
                },
            );
            if let Some(ms) = clear_after_ms {
                session.schedule(Duration::from_millis(ms), Action::ClearAll);
            }

            for index in 0..count {
                let (toast, template) = demo_toast(index);
                let configuration = match template {
                    Some(name) => NotificationConfiguration::new(
                        defaults.display_duration(),
                        Some(defaults.width()),
                        Some(defaults.height()),
                        Some(name),
                        Some(defaults.flow_direction()),
                    ),
                    None => defaults.clone(),
                };
                if let Err(e) = session.show(toast, &configuration) {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
            session.run_until_idle();
        }
        Commands::Config => {
            let config_path = config::ensure_config_file().unwrap_or_else(|e| {
                eprintln!("Failed to create config file: {}", e);
                std::process::exit(1);
            });

            let editor = config::resolve_editor();

            let status = std::process::Command::new("sh")
                .arg("-c")
                .arg(format!("{} \"{}\"", editor, config_path.display()))
                .status()
                .unwrap_or_else(|e| {
                    eprintln!("Failed to launch editor '{}': {}", editor, e);
                    std::process::exit(1);
                });

            if !status.success() {
                std::process::exit(status.code().unwrap_or(1));
            }
        }
        Commands::Direction { direction } => {
            let direction = parse_direction(&direction);
            if let Err(e) = config::save_default_direction(direction) {
                eprintln!("Failed to save config: {}", e);
                std::process::exit(1);
            }
            println!("Default direction set to {}", direction);
        }
    }
}
