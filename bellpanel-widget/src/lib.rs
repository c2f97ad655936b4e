use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

pub mod cli;
pub mod config;
pub mod document;
pub mod dropdown;
pub mod loader;
pub mod navigation;
pub mod render;
pub mod serve;
pub mod transition;
pub mod widget;

pub use cli::{Cli, Command};
pub use config::{WidgetConfig, load_config, resolve_config_path};
pub use document::{Document, DocumentEvent, EventKind, Key, NodeId};
pub use dropdown::{DropdownInput, DropdownState};
pub use loader::{LoadFailure, NotificationSource};
pub use widget::{DropdownNotifications, MountedWidget};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Render(#[from] render::RenderError),
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    // Logs go to stderr so `render` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Build the feed source for `location`, validating URLs up front.
pub fn build_source(
    location: &str,
    cfg: &WidgetConfig,
) -> Result<Arc<dyn NotificationSource>, AppError> {
    let location = config::normalize_source(location);
    if location.starts_with("http://") || location.starts_with("https://") {
        url::Url::parse(&location)
            .map_err(|e| AppError::Config(format!("invalid source url {location}: {e}")))?;
    }
    Ok(loader::source_from_location(
        &location,
        Some(cfg.endpoint_path.as_str()),
    ))
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing();

    let (cfg_path, cfg) = WidgetConfig::find_and_load(cli.config)?;
    match &cfg_path {
        Some(p) => info!(path = ?p, "loaded config"),
        None => info!("no config file; using defaults"),
    }

    match cli.command {
        Command::Render {
            source,
            open,
            align,
        } => render_once(&cfg, source, open, align).await,
        Command::Serve { file, port } => run_server(cfg, file, port).await,
    }
}

async fn render_once(
    cfg: &WidgetConfig,
    source: Option<String>,
    open: bool,
    align: Option<render::Align>,
) -> Result<(), AppError> {
    let location = source
        .or_else(|| cfg.source.clone())
        .ok_or_else(|| AppError::Config("no notification source; pass --source or set `source`".into()))?;
    let source = build_source(&location, cfg)?;

    let doc = Document::new();
    let mut widget = DropdownNotifications::new(source, Arc::new(navigation::LogNavigator))
        .align(align.unwrap_or(cfg.align))
        .empty_message(cfg.empty_message.clone())
        .mount(&doc, None);
    widget.wait_loaded().await;
    if open {
        widget.click_trigger();
    }
    let html = widget.render()?;
    println!("{html}");
    widget.unmount();
    Ok(())
}

async fn run_server(cfg: WidgetConfig, file: std::path::PathBuf, port: u16) -> Result<(), AppError> {
    // env PORT overrides the CLI default
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(port);
    if !file.exists() {
        warn!(path = %file.display(), "feed file does not exist yet; feed requests will 404");
    }

    let app = serve::router(serve::ServeState::new(file, cfg))?;
    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "serving widget");

    let shutdown = tokio_util::sync::CancellationToken::new();
    let shutdown_for_server = shutdown.clone();
    let mut server_task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_for_server.cancelled_owned())
            .await
    });

    tokio::select! {
        _ = shutdown_signal() => {
            info!("shutdown: initiating graceful stop");
            shutdown.cancel();
        }
        res = &mut server_task => {
            return match res {
                Ok(r) => r.map_err(AppError::Io),
                Err(e) => Err(AppError::Http(format!("server task failed: {e}"))),
            };
        }
    }

    match tokio::time::timeout(Duration::from_secs(3), &mut server_task).await {
        Ok(Ok(Ok(()))) => Ok(()),
        Ok(Ok(Err(e))) => Err(AppError::Io(e)),
        Ok(Err(e)) => Err(AppError::Http(format!("server task failed: {e}"))),
        Err(_) => {
            warn!("shutdown: forcing server abort due to timeout");
            server_task.abort();
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let (Ok(mut sigint), Ok(mut sigterm)) = (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) else {
            warn!("shutdown: failed to install signal handlers; falling back to Ctrl+C");
            let _ = tokio::signal::ctrl_c().await;
            return;
        };
        tokio::select! {
            _ = sigint.recv() => {
                info!("shutdown: received SIGINT");
            }
            _ = sigterm.recv() => {
                info!("shutdown: received SIGTERM");
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown: received Ctrl+C");
    }
}
