mod common;

use intel_dashboard_wasm::application::{
    AccessibilityStore,
    accessibility::{FONT_FAMILY_PROPERTY, FONT_SCALE_PROPERTY},
};
use intel_dashboard_wasm::domain::accessibility::{
    ANNOUNCEMENT_TTL_MS, AnnouncementPriority, DYSLEXIA_FONT_STACK, FontSize, MediaPreference, PreferenceKey,
};
use intel_dashboard_wasm::infrastructure::{document::MAIN_CONTENT_ID, storage::MemoryStorage};
use serde_json::json;

use common::{FixedEnvironment, ManualClock, RecordingDocument, RecordingSpeech};

struct Harness {
    store: AccessibilityStore,
    storage: MemoryStorage,
    document: RecordingDocument,
    speech: RecordingSpeech,
    clock: ManualClock,
}

fn harness(storage: MemoryStorage, environment: FixedEnvironment) -> Harness {
    let document = RecordingDocument::default();
    let speech = RecordingSpeech::default();
    let clock = ManualClock::default();
    let store = AccessibilityStore::new(
        storage.clone(),
        &environment,
        document.clone(),
        speech.clone(),
        clock.clone(),
    );
    Harness { store, storage, document, speech, clock }
}

fn plain() -> Harness {
    harness(MemoryStorage::new(), FixedEnvironment::default())
}

#[test]
fn announcement_without_speech_is_only_queued() {
    let mut h = plain();

    h.store.announce("Dashboard data refreshed", AnnouncementPriority::Polite);

    assert!(h.speech.spoken.borrow().is_empty());
    assert_eq!(h.store.live_messages(AnnouncementPriority::Polite), vec!["Dashboard data refreshed"]);
    assert!(h.store.live_messages(AnnouncementPriority::Assertive).is_empty());
}

#[test]
fn announcement_is_spoken_when_enabled() {
    let mut h = harness(
        MemoryStorage::with_entries([("speechEnabled", json!(true))]),
        FixedEnvironment::default(),
    );

    h.store.announce("Connection timeout", AnnouncementPriority::Assertive);

    assert_eq!(*h.speech.spoken.borrow(), vec!["Connection timeout".to_string()]);
}

#[test]
fn disabling_speech_cancels_utterances() {
    let mut h = harness(
        MemoryStorage::with_entries([("speechEnabled", json!(true))]),
        FixedEnvironment::default(),
    );

    h.store.set_flag(PreferenceKey::SpeechEnabled, false);

    assert_eq!(h.speech.cancels.get(), 1);
    assert_eq!(h.storage.get("speechEnabled"), Some(json!(false)));
}

#[test]
fn high_contrast_toggles_class_and_persists() {
    let mut h = plain();
    assert!(!h.document.has_class("high-contrast"));

    h.store.set_flag(PreferenceKey::HighContrast, true);
    assert!(h.document.has_class("high-contrast"));
    assert_eq!(h.storage.get("highContrast"), Some(json!(true)));

    assert!(!h.store.toggle(PreferenceKey::HighContrast));
    assert!(!h.document.has_class("high-contrast"));
    assert_eq!(h.storage.get("highContrast"), Some(json!(false)));
}

#[test]
fn stored_values_beat_environment_beat_defaults() {
    let h = harness(
        MemoryStorage::with_entries([("darkMode", json!(false)), ("fontSize", json!(150))]),
        FixedEnvironment(vec![MediaPreference::DarkScheme, MediaPreference::ReducedMotion]),
    );
    let prefs = h.store.preferences();

    assert!(!prefs.dark_mode);
    assert!(prefs.reduced_motion);
    assert!(!prefs.high_contrast);
    assert_eq!(prefs.font_size, FontSize::new(150));
    assert!(!h.document.has_class("dark-mode"));
    assert!(h.document.has_class("reduced-motion"));
    assert_eq!(h.document.property(FONT_SCALE_PROPERTY).as_deref(), Some("1.5"));
}

#[test]
fn corrupt_stored_values_fall_back() {
    let h = harness(
        MemoryStorage::with_entries([("highContrast", json!("yes")), ("fontSize", json!("huge"))]),
        FixedEnvironment(vec![MediaPreference::HighContrast]),
    );
    let prefs = h.store.preferences();

    assert!(prefs.high_contrast);
    assert_eq!(prefs.font_size, FontSize::DEFAULT);
}

#[test]
fn environment_change_applies_live() {
    let mut h = plain();

    h.store.apply_environment_change(MediaPreference::DarkScheme, true);

    assert!(h.store.preferences().dark_mode);
    assert!(h.document.has_class("dark-mode"));
}

#[test]
fn tab_enters_keyboard_mode_and_mouse_leaves_it() {
    let mut h = plain();

    h.store.on_key_down("Enter");
    assert!(!h.store.preferences().keyboard_navigation);

    h.store.on_key_down("Tab");
    assert!(h.store.preferences().keyboard_navigation);
    assert!(h.document.has_class("keyboard-navigation"));

    h.store.on_mouse_down();
    assert!(!h.store.preferences().keyboard_navigation);
    assert!(!h.document.has_class("keyboard-navigation"));
}

#[test]
fn announcements_expire_after_ttl() {
    let mut h = plain();
    h.store.announce("Navigated to Reports", AnnouncementPriority::Polite);

    h.clock.advance(ANNOUNCEMENT_TTL_MS - 1);
    assert_eq!(h.store.expire_due(), 0);
    assert_eq!(h.store.announcements().len(), 1);

    h.clock.advance(1);
    assert_eq!(h.store.expire_due(), 1);
    assert!(h.store.announcements().is_empty());
}

#[test]
fn dismiss_removes_one_announcement() {
    let mut h = plain();
    let first = h.store.announce("first", AnnouncementPriority::Polite);
    h.store.announce("second", AnnouncementPriority::Assertive);

    assert!(h.store.dismiss(first));
    assert!(!h.store.dismiss(first));
    let remaining: Vec<String> = h.store.announcements().into_iter().map(|a| a.message).collect();
    assert_eq!(remaining, vec!["second"]);
}

#[test]
fn font_changes_are_mirrored() {
    let mut h = plain();

    h.store.set_font_size(FontSize::from_slider(127));
    assert_eq!(h.storage.get("fontSize"), Some(json!(125)));
    assert_eq!(h.document.property(FONT_SCALE_PROPERTY).as_deref(), Some("1.25"));

    h.store.set_flag(PreferenceKey::DyslexiaFont, true);
    assert_eq!(h.document.property(FONT_FAMILY_PROPERTY).as_deref(), Some(DYSLEXIA_FONT_STACK));
}

#[test]
fn skip_to_content_focuses_main_and_announces() {
    let mut h = plain();

    assert!(h.store.skip_to_content());

    assert_eq!(*h.document.focused.borrow(), vec![MAIN_CONTENT_ID.to_string()]);
    assert_eq!(h.store.live_messages(AnnouncementPriority::Polite), vec!["Skipped to main content"]);
}
