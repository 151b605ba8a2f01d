use crate::page::{Page, SharedPage};
use crate::storage::LocalStore;
use crate::supervise::ErrorReporter;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;

pub const DARK_THEME_CLASS: &str = "dark-theme";
pub const THEME_KEY: &str = "color_scheme_dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

pub fn apply_theme(page: &mut Page, scheme: ColorScheme) {
    match scheme {
        ColorScheme::Dark => page.add_body_class(DARK_THEME_CLASS),
        ColorScheme::Light => page.remove_body_class(DARK_THEME_CLASS),
    }
}

/// The scheme last remembered in the store, light when nothing was saved.
pub fn stored_scheme(store: &LocalStore) -> ColorScheme {
    if store.load(THEME_KEY, false) {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    }
}

pub async fn remember_scheme(store: &mut LocalStore, page: &Page) -> bool {
    store.save(THEME_KEY, &page.has_body_class(DARK_THEME_CLASS)).await
}

/// Keeps the page theme in step with the platform's color-scheme preference.
pub struct ThemeSync {
    task: AbortHandle,
}

impl ThemeSync {
    /// Applies the current preference, then follows every change until the
    /// sender is dropped or the sync is stopped.
    pub async fn start(
        page: SharedPage,
        mut preference: watch::Receiver<ColorScheme>,
        reporter: &ErrorReporter,
    ) -> Self {
        let initial = *preference.borrow_and_update();
        apply_theme(&mut *page.lock().await, initial);

        let task = reporter.spawn("theme-sync", async move {
            while preference.changed().await.is_ok() {
                let scheme = *preference.borrow_and_update();
                debug!(?scheme, "color scheme changed");
                apply_theme(&mut *page.lock().await, scheme);
            }
        });
        Self { task }
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ThemeSync {
    fn drop(&mut self) {
        self.task.abort();
    }
}
