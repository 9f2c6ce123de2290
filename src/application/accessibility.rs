use serde_json::Value;
use web_sys::HtmlElement;

use crate::domain::{
    Clock,
    accessibility::{
        AccessibilityPreferences, AnnouncementEvent, AnnouncementPriority, AnnouncementQueue,
        FontSize, MediaPreference, PreferenceKey,
    },
    logging::{LogComponent, get_logger},
};
use crate::log_debug;
use crate::infrastructure::{
    document::{DocumentAdapter, MAIN_CONTENT_ID},
    focus_trap::FocusTrap,
    media::EnvironmentPreferences,
    speech::SpeechOutput,
    storage::PreferenceStorage,
};

pub const FONT_SCALE_PROPERTY: &str = "--accessibility-font-scale";
pub const FONT_FAMILY_PROPERTY: &str = "--accessibility-font-family";

/// Accessibility preferences, their persistence and document mirroring, and
/// the screen-reader announcement queue.
pub struct AccessibilityStore {
    prefs: AccessibilityPreferences,
    announcements: AnnouncementQueue,
    storage: Box<dyn PreferenceStorage>,
    document: Box<dyn DocumentAdapter>,
    speech: Box<dyn SpeechOutput>,
    clock: Box<dyn Clock>,
}

fn stored_flag(storage: &dyn PreferenceStorage, key: PreferenceKey) -> Option<bool> {
    storage.load(key.storage_key())?.as_bool()
}

fn stored_font_size(storage: &dyn PreferenceStorage) -> Option<FontSize> {
    let value = storage.load(PreferenceKey::FontSize.storage_key())?;
    serde_json::from_value(value).ok()
}

/// Stored values first, then the environment, then defaults.
pub fn initial_preferences(
    storage: &dyn PreferenceStorage,
    environment: &dyn EnvironmentPreferences,
) -> AccessibilityPreferences {
    let mut prefs = AccessibilityPreferences::default();
    for key in PreferenceKey::toggles() {
        let value = stored_flag(storage, key)
            .or_else(|| key.media_preference().map(|media| environment.matches(media)));
        if let Some(value) = value {
            prefs.set_flag(key, value);
        }
    }
    if let Some(size) = stored_font_size(storage) {
        prefs.font_size = size;
    }
    prefs
}

impl AccessibilityStore {
    pub fn new(
        storage: impl PreferenceStorage + 'static,
        environment: &dyn EnvironmentPreferences,
        document: impl DocumentAdapter + 'static,
        speech: impl SpeechOutput + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let prefs = initial_preferences(&storage, environment);
        let store = Self {
            prefs,
            announcements: AnnouncementQueue::new(),
            storage: Box::new(storage),
            document: Box::new(document),
            speech: Box::new(speech),
            clock: Box::new(clock),
        };
        store.apply_all();
        log_debug!(LogComponent::Application("Accessibility"), "Preferences loaded: {:?}", store.prefs);
        store
    }

    pub fn with_announcement_ttl(mut self, ttl_ms: u64) -> Self {
        self.announcements = AnnouncementQueue::with_ttl(ttl_ms);
        self
    }

    pub fn preferences(&self) -> AccessibilityPreferences {
        self.prefs
    }

    /// Mirrors every preference onto the document.
    pub fn apply_all(&self) {
        self.apply_font();
        for key in PreferenceKey::toggles() {
            self.apply_class(key);
        }
    }

    fn apply_font(&self) {
        self.document.set_property(FONT_SCALE_PROPERTY, &self.prefs.font_size.scale().to_string());
        self.document.set_property(FONT_FAMILY_PROPERTY, self.prefs.font_family());
    }

    fn apply_class(&self, key: PreferenceKey) {
        if let (Some(class), Some(enabled)) = (key.document_class(), self.prefs.flag(key)) {
            self.document.set_class(class, enabled);
        }
    }

    fn persist(&self, key: PreferenceKey, value: Value) {
        if let Err(e) = self.storage.save(key.storage_key(), &value) {
            get_logger().warn(LogComponent::Application("Accessibility"), &e.to_string());
        }
    }

    /// Sets a boolean preference, persists it and mirrors it.
    pub fn set_flag(&mut self, key: PreferenceKey, value: bool) {
        if !self.prefs.set_flag(key, value) {
            return;
        }
        self.persist(key, Value::Bool(value));
        match key {
            PreferenceKey::DyslexiaFont => self.apply_font(),
            _ => self.apply_class(key),
        }
        if key == PreferenceKey::SpeechEnabled && !value {
            self.speech.cancel();
        }
    }

    pub fn toggle(&mut self, key: PreferenceKey) -> bool {
        let value = !self.prefs.flag(key).unwrap_or(false);
        self.set_flag(key, value);
        value
    }

    pub fn set_font_size(&mut self, size: FontSize) {
        self.prefs.font_size = size;
        self.persist(PreferenceKey::FontSize, Value::from(size.value()));
        self.apply_font();
    }

    /// A `prefers-*` media query changed while the page is open.
    pub fn apply_environment_change(&mut self, media: MediaPreference, matches: bool) {
        log_debug!(
            LogComponent::Application("Accessibility"),
            "Environment change: {} = {matches}",
            media.media_query()
        );
        self.set_flag(media.preference(), matches);
    }

    /// Tab switches the UI into keyboard-navigation mode.
    pub fn on_key_down(&mut self, key: &str) {
        if key == "Tab" && !self.prefs.keyboard_navigation {
            self.set_flag(PreferenceKey::KeyboardNavigation, true);
        }
    }

    pub fn on_mouse_down(&mut self) {
        if self.prefs.keyboard_navigation {
            self.set_flag(PreferenceKey::KeyboardNavigation, false);
        }
    }

    /// Queues a live-region message and speaks it when speech is enabled.
    pub fn announce(&mut self, message: &str, priority: AnnouncementPriority) -> u64 {
        let id = self.announcements.push(message, priority, self.clock.now_ms());
        if self.prefs.speech_enabled {
            self.speech.speak(message);
        }
        id
    }

    /// Drops announcements whose lifetime has elapsed.
    pub fn expire_due(&mut self) -> usize {
        self.announcements.expire(self.clock.now_ms())
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        self.announcements.dismiss(id)
    }

    pub fn announcements(&self) -> Vec<AnnouncementEvent> {
        self.announcements.events()
    }

    pub fn live_messages(&self, priority: AnnouncementPriority) -> Vec<String> {
        self.announcements.messages(priority)
    }

    pub fn announcement_ttl_ms(&self) -> u64 {
        self.announcements.ttl_ms()
    }

    pub fn stop_speech(&self) {
        self.speech.cancel();
    }

    pub fn trap_focus(&self, container: &HtmlElement) -> FocusTrap {
        FocusTrap::acquire(container)
    }

    pub fn skip_to_content(&mut self) -> bool {
        let found = self.document.focus_element(MAIN_CONTENT_ID);
        if found {
            self.announce("Skipped to main content", AnnouncementPriority::Polite);
        }
        found
    }
}
