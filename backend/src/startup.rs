//! Wiring of the demo directory from [`DirectorySettings`].

use std::sync::Arc;

use mockable::Clock;
use pagination::PageSizeError;

use crate::DirectorySettings;
use crate::domain::UserStore;
use crate::domain::ports::{AlwaysConfirm, ConfirmationGate, NeverConfirm, Sleeper};
use crate::inbound::DirectoryScreen;
use crate::outbound::{ExampleUserSource, SimulatedBackend};

/// Screen over generated users with the configured latency and prompts.
///
/// The store is empty until the screen handles a reload.
///
/// # Errors
/// [`PageSizeError`] when the configured page size is invalid.
pub fn directory_screen(
    settings: &DirectorySettings,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn Sleeper>,
) -> Result<DirectoryScreen, PageSizeError> {
    let page_size = settings.page_size()?;
    let store = Arc::new(UserStore::new(
        Arc::new(SimulatedBackend::with_latency(
            sleeper,
            settings.latency_profile(),
        )),
        Arc::new(ExampleUserSource::new(
            settings.seed(),
            settings.user_count(),
            Arc::clone(&clock),
        )),
        clock,
    ));
    let gate: Arc<dyn ConfirmationGate> = if settings.auto_confirm {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(NeverConfirm)
    };
    Ok(DirectoryScreen::new(store, gate, page_size))
}

#[cfg(test)]
mod tests {
    //! Covers settings-driven wiring.

    use std::ffi::OsString;

    use chrono::{DateTime, TimeZone, Utc};
    use env_lock::lock_env;
    use ortho_config::OrthoConfig;
    use rstest::rstest;

    use super::*;
    use crate::domain::UserId;
    use crate::inbound::{ScreenCommand, ScreenEffect};
    use crate::outbound::ImmediateSleeper;
    use crate::test_support::FixtureClock;

    fn fixture_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .single()
            .expect("valid instant")
    }

    fn settings_from_env(vars: [(&str, Option<String>); 4]) -> DirectorySettings {
        let _guard = lock_env(vars);
        DirectorySettings::load_from_iter([OsString::from("backend")])
            .expect("config should load")
    }

    fn screen_for(settings: &DirectorySettings) -> DirectoryScreen {
        directory_screen(
            settings,
            Arc::new(FixtureClock::new(fixture_now())),
            Arc::new(ImmediateSleeper),
        )
        .expect("valid page size")
    }

    #[rstest]
    #[tokio::test]
    async fn configured_directory_loads_generated_users() {
        let settings = settings_from_env([
            ("DIRECTORY_USER_COUNT", Some("12".to_owned())),
            ("DIRECTORY_PAGE_SIZE", Some("5".to_owned())),
            ("DIRECTORY_AUTO_CONFIRM", Some("true".to_owned())),
            ("DIRECTORY_LOAD_LATENCY_MS", Some("0".to_owned())),
        ]);
        let mut screen = screen_for(&settings);

        assert_eq!(screen.dispatch(ScreenCommand::Reload).await, ScreenEffect::None);

        let view = screen.view();
        assert_eq!(view.total_count, 12);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.page.total_pages, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn auto_confirm_controls_deletion() {
        let settings = settings_from_env([
            ("DIRECTORY_USER_COUNT", Some("3".to_owned())),
            ("DIRECTORY_PAGE_SIZE", None),
            ("DIRECTORY_AUTO_CONFIRM", Some("false".to_owned())),
            ("DIRECTORY_DELETE_LATENCY_MS", Some("0".to_owned())),
        ]);
        let mut screen = screen_for(&settings);
        let _ = screen.dispatch(ScreenCommand::Reload).await;

        let _ = screen.dispatch(ScreenCommand::DeleteUser(UserId::new(1))).await;

        assert_eq!(screen.view().total_count, 3);
    }

    #[rstest]
    fn zero_page_size_is_reported() {
        let settings = settings_from_env([
            ("DIRECTORY_USER_COUNT", None),
            ("DIRECTORY_PAGE_SIZE", Some("0".to_owned())),
            ("DIRECTORY_AUTO_CONFIRM", None),
            ("DIRECTORY_LOAD_LATENCY_MS", None),
        ]);

        let result = directory_screen(
            &settings,
            Arc::new(FixtureClock::new(fixture_now())),
            Arc::new(ImmediateSleeper),
        );

        assert!(matches!(result, Err(PageSizeError::Zero)));
    }
}
