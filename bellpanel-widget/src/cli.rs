use std::path::PathBuf;

use crate::render::Align;
use clap::{Parser, Subcommand};

const HELP_EPILOG: &str = r#"Config resolution order:
  1) --config/-c PATH
  2) $BELLPANEL_CONFIG
  3) XDG default: ~/.config/bellpanel/widget.yaml (optional)
"#;

#[derive(Debug, Parser)]
#[command(
    name = "bellpanel",
    version,
    about = "Notification bell dropdown widget",
    long_about = None,
    after_long_help = HELP_EPILOG,
)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mount the widget, load the feed once and print its HTML
    Render {
        /// Feed URL (http://host/notifications.json) or local JSON file.
        /// Falls back to config.
        #[arg(long)]
        source: Option<String>,
        /// Render with the panel open
        #[arg(long)]
        open: bool,
        /// Panel alignment; overrides config
        #[arg(long, value_enum)]
        align: Option<Align>,
    },
    /// Serve a feed file at /notifications.json and the rendered widget at /
    Serve {
        /// JSON file with the notification feed
        #[arg(long, default_value = "notifications.json")]
        file: PathBuf,
        /// Listen port (env PORT overrides)
        #[arg(long, default_value_t = 5173)]
        port: u16,
    },
}
