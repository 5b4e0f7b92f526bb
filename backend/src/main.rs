//! Demo entry-point: loads generated users into the directory screen and
//! logs the first rendered page.

use std::process::ExitCode;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::DirectorySettings;
use backend::inbound::presentation::row_labels;
use backend::inbound::{ScreenCommand, ScreenEffect};
use backend::outbound::TokioSleeper;
use backend::startup::directory_screen;

/// Application bootstrap.
#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = match DirectorySettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "failed to load directory settings");
            return ExitCode::FAILURE;
        }
    };
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let mut screen = match directory_screen(&settings, Arc::clone(&clock), Arc::new(TokioSleeper)) {
        Ok(screen) => screen,
        Err(e) => {
            error!(error = %e, "invalid page size");
            return ExitCode::FAILURE;
        }
    };

    if let ScreenEffect::Failed(message) = screen.dispatch(ScreenCommand::Reload).await {
        error!(%message, "initial load failed");
        return ExitCode::FAILURE;
    }
    if !settings.search().is_empty() {
        let _ = screen
            .dispatch(ScreenCommand::SetSearch(settings.search().to_owned()))
            .await;
    }

    let view = screen.view();
    let now = clock.utc();
    let offset = screen.filter().offset();
    for row in &view.rows {
        let labels = row_labels(&row.user, now, offset);
        info!(
            user_id = %row.user.id(),
            name = row.user.name(),
            role = labels.role,
            registered = %labels.registered,
            last_seen = %labels.last_seen,
            activity = labels.activity_class,
            "row rendered"
        );
    }
    match serde_json::to_string(&view) {
        Ok(rendered) => info!(
            total = view.total_count,
            filtered = view.filtered_count,
            page = view.page.current_page,
            pages = view.page.total_pages,
            view = %rendered,
            "directory rendered"
        ),
        Err(e) => warn!(error = %e, "failed to serialise directory view"),
    }
    ExitCode::SUCCESS
}
