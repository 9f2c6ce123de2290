use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::domain::accessibility::MediaPreference;
use crate::event_utils::{EventListenerHandle, EventOptions, listen};

/// Environment preferences reported by the user agent.
pub trait EnvironmentPreferences {
    fn matches(&self, preference: MediaPreference) -> bool;
}

/// `window.matchMedia` backed preferences.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserMediaQueries;

impl BrowserMediaQueries {
    fn query(preference: MediaPreference) -> Option<MediaQueryList> {
        web_sys::window()?.match_media(preference.media_query()).ok().flatten()
    }

    /// Calls `on_change` with the new match state until the handle is dropped.
    pub fn watch(
        &self,
        preference: MediaPreference,
        mut on_change: impl FnMut(MediaPreference, bool) + 'static,
    ) -> Option<EventListenerHandle> {
        let list = Self::query(preference)?;
        Some(listen::<MediaQueryListEvent>(
            list.as_ref(),
            "change",
            &EventOptions::default(),
            move |event| on_change(preference, event.matches()),
        ))
    }
}

impl EnvironmentPreferences for BrowserMediaQueries {
    fn matches(&self, preference: MediaPreference) -> bool {
        Self::query(preference).is_some_and(|list| list.matches())
    }
}
