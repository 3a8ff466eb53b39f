use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use amal_chat::app::App;
use amal_chat::config::Config;
use amal_chat::responder::ResponderClient;
use amal_chat::{handler, tui, ui};

/// Log to a daily-rolling file so tracing output never lands on the
/// alternate screen. Returns the guard that flushes the writer on drop.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::data_local_dir()?.join("amal").join("logs");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "amal.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logging();

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let responder = ResponderClient::new(&config.api_base_url());
    tracing::info!("using backend at {}", responder.base_url());

    // Liveness probe, log only. A dead backend still opens the chat;
    // failures surface per-exchange.
    let probe = responder.clone();
    tokio::spawn(async move {
        match probe.health().await {
            Ok(status) => tracing::info!("backend health: {status}"),
            Err(error) => tracing::warn!("backend health check failed: {error:#}"),
        }
    });

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(responder);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        // Resolve a completed exchange before waiting on the next event,
        // so the reply shows up on the frame after it arrives.
        if app.exchange_finished() {
            app.finish_exchange().await;
            continue;
        }

        match events.next().await {
            Some(event) => handler::handle_event(&mut app, event),
            None => break,
        }
    }

    tui::restore()?;
    Ok(())
}
