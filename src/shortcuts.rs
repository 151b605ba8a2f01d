use crate::page::Page;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    PcLogging,
    ServiceLogging,
    Expenses,
    Services,
    History,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::PcLogging => "/pc-logging",
            Route::ServiceLogging => "/service-logging",
            Route::Expenses => "/expenses",
            Route::Services => "/services",
            Route::History => "/history",
        }
    }

    fn from_digit(key: &str) -> Option<Self> {
        let route = match key {
            "1" => Route::Dashboard,
            "2" => Route::PcLogging,
            "3" => Route::ServiceLogging,
            "4" => Route::Expenses,
            "5" => Route::Services,
            "6" => Route::History,
            _ => return None,
        };
        Some(route)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn meta(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            meta: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Navigate(Route),
    CloseOverlays,
}

pub fn dispatch(press: &KeyPress) -> Option<ShortcutAction> {
    if press.ctrl || press.meta {
        if let Some(route) = Route::from_digit(&press.key) {
            return Some(ShortcutAction::Navigate(route));
        }
    }
    if press.key == "Escape" {
        return Some(ShortcutAction::CloseOverlays);
    }
    None
}

/// Handles a key press against the page. Returns the action taken, if any.
pub fn handle_key(page: &mut Page, press: &KeyPress) -> Option<ShortcutAction> {
    let action = dispatch(press)?;
    match action {
        ShortcutAction::Navigate(route) => page.navigate(route.path()),
        ShortcutAction::CloseOverlays => {
            let closed = page.close_overlays();
            debug!(closed, "closed open overlays");
        }
    }
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::OverlayKind;

    #[test]
    fn modifier_digits_map_to_routes() {
        let expected = [
            ("1", "/"),
            ("2", "/pc-logging"),
            ("3", "/service-logging"),
            ("4", "/expenses"),
            ("5", "/services"),
            ("6", "/history"),
        ];
        for (key, path) in expected {
            let Some(ShortcutAction::Navigate(route)) = dispatch(&KeyPress::ctrl(key)) else {
                panic!("ctrl+{key} should navigate");
            };
            assert_eq!(route.path(), path);
        }
        assert_eq!(
            dispatch(&KeyPress::meta("6")),
            Some(ShortcutAction::Navigate(Route::History))
        );
    }

    #[test]
    fn unmodified_and_unknown_keys_do_nothing() {
        assert_eq!(dispatch(&KeyPress::plain("1")), None);
        assert_eq!(dispatch(&KeyPress::ctrl("7")), None);
        assert_eq!(dispatch(&KeyPress::ctrl("s")), None);
    }

    #[test]
    fn escape_closes_overlays() {
        let mut page = Page::new("/services");
        page.add_overlay("edit-service", OverlayKind::Modal, true);
        page.add_overlay("filters", OverlayKind::Collapse, true);

        assert_eq!(
            handle_key(&mut page, &KeyPress::plain("Escape")),
            Some(ShortcutAction::CloseOverlays)
        );
        assert_eq!(page.open_overlay_count(), 0);
    }

    #[test]
    fn navigation_updates_page_path() {
        let mut page = Page::dashboard();
        handle_key(&mut page, &KeyPress::ctrl("4"));
        assert_eq!(page.path(), "/expenses");
    }
}
