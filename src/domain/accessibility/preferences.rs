use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Text scale as a percentage of the base font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize)]
#[display(fmt = "{}%", _0)]
pub struct FontSize(u16);

impl FontSize {
    pub const MIN: u16 = 75;
    pub const MAX: u16 = 180;
    pub const STEP: u16 = 5;
    pub const DEFAULT: FontSize = FontSize(110);

    /// Programmatic path: keeps the raw value, bounded to `MIN..=MAX`.
    pub fn new(raw: u16) -> Self {
        Self(raw.clamp(Self::MIN, Self::MAX))
    }

    /// Slider path: bounded, then snapped to the nearest `STEP`.
    pub fn from_slider(raw: u16) -> Self {
        let bounded = raw.clamp(Self::MIN, Self::MAX);
        let snapped = (bounded + Self::STEP / 2) / Self::STEP * Self::STEP;
        Self(snapped.min(Self::MAX))
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Multiplier written to the `--accessibility-font-scale` property.
    pub fn scale(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn label(&self) -> &'static str {
        TEXT_SIZE_PRESETS
            .iter()
            .find(|(value, _)| *value == self.0)
            .map(|(_, label)| *label)
            .unwrap_or("Custom")
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Ok(FontSize::new(raw.round().clamp(0.0, f64::from(u16::MAX)) as u16))
    }
}

/// Named sizes offered by the text-size selector.
pub const TEXT_SIZE_PRESETS: [(u16, &str); 5] =
    [(90, "Small"), (110, "Normal"), (125, "Medium"), (140, "Large"), (160, "Extra Large")];

/// One persisted preference; the string form is its local-storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumIter, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum PreferenceKey {
    DarkMode,
    HighContrast,
    ReducedMotion,
    FontSize,
    DyslexiaFont,
    LargeText,
    ScreenReaderMode,
    KeyboardNavigation,
    SpeechEnabled,
}

impl PreferenceKey {
    pub fn storage_key(&self) -> &'static str {
        (*self).into()
    }

    /// Document class mirrored for boolean preferences that have one.
    pub fn document_class(&self) -> Option<&'static str> {
        match self {
            PreferenceKey::DarkMode => Some("dark-mode"),
            PreferenceKey::HighContrast => Some("high-contrast"),
            PreferenceKey::ReducedMotion => Some("reduced-motion"),
            PreferenceKey::LargeText => Some("large-text"),
            PreferenceKey::ScreenReaderMode => Some("screen-reader-mode"),
            PreferenceKey::KeyboardNavigation => Some("keyboard-navigation"),
            PreferenceKey::FontSize | PreferenceKey::DyslexiaFont | PreferenceKey::SpeechEnabled => {
                None
            }
        }
    }

    /// Environment media query seeding this preference when nothing is stored.
    pub fn media_preference(&self) -> Option<MediaPreference> {
        match self {
            PreferenceKey::DarkMode => Some(MediaPreference::DarkScheme),
            PreferenceKey::HighContrast => Some(MediaPreference::HighContrast),
            PreferenceKey::ReducedMotion => Some(MediaPreference::ReducedMotion),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PreferenceKey::DarkMode => "Dark mode",
            PreferenceKey::HighContrast => "High contrast",
            PreferenceKey::ReducedMotion => "Reduced motion",
            PreferenceKey::FontSize => "Text size",
            PreferenceKey::DyslexiaFont => "Dyslexia-friendly font",
            PreferenceKey::LargeText => "Large text",
            PreferenceKey::ScreenReaderMode => "Screen reader mode",
            PreferenceKey::KeyboardNavigation => "Keyboard navigation",
            PreferenceKey::SpeechEnabled => "Speech announcements",
        }
    }

    pub fn toggles() -> impl Iterator<Item = PreferenceKey> {
        PreferenceKey::iter().filter(|k| *k != PreferenceKey::FontSize)
    }
}

/// Operating-environment preferences exposed through CSS media queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MediaPreference {
    DarkScheme,
    HighContrast,
    ReducedMotion,
}

impl MediaPreference {
    pub fn media_query(&self) -> &'static str {
        match self {
            MediaPreference::DarkScheme => "(prefers-color-scheme: dark)",
            MediaPreference::HighContrast => "(prefers-contrast: high)",
            MediaPreference::ReducedMotion => "(prefers-reduced-motion: reduce)",
        }
    }

    pub fn preference(&self) -> PreferenceKey {
        match self {
            MediaPreference::DarkScheme => PreferenceKey::DarkMode,
            MediaPreference::HighContrast => PreferenceKey::HighContrast,
            MediaPreference::ReducedMotion => PreferenceKey::ReducedMotion,
        }
    }
}

pub const DYSLEXIA_FONT_STACK: &str = "\"OpenDyslexic\", \"Comic Sans MS\", cursive";
pub const SYSTEM_FONT_STACK: &str =
    "\"Segoe UI\", -apple-system, BlinkMacSystemFont, Roboto, sans-serif";

/// User display, text and navigation preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessibilityPreferences {
    pub dark_mode: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub font_size: FontSize,
    pub dyslexia_font: bool,
    pub large_text: bool,
    pub screen_reader_mode: bool,
    pub keyboard_navigation: bool,
    pub speech_enabled: bool,
}

impl AccessibilityPreferences {
    /// Boolean value for `key`; `None` for the font size.
    pub fn flag(&self, key: PreferenceKey) -> Option<bool> {
        Some(match key {
            PreferenceKey::DarkMode => self.dark_mode,
            PreferenceKey::HighContrast => self.high_contrast,
            PreferenceKey::ReducedMotion => self.reduced_motion,
            PreferenceKey::DyslexiaFont => self.dyslexia_font,
            PreferenceKey::LargeText => self.large_text,
            PreferenceKey::ScreenReaderMode => self.screen_reader_mode,
            PreferenceKey::KeyboardNavigation => self.keyboard_navigation,
            PreferenceKey::SpeechEnabled => self.speech_enabled,
            PreferenceKey::FontSize => return None,
        })
    }

    /// Sets a boolean preference. Returns `false` for the font size key.
    pub fn set_flag(&mut self, key: PreferenceKey, value: bool) -> bool {
        let slot = match key {
            PreferenceKey::DarkMode => &mut self.dark_mode,
            PreferenceKey::HighContrast => &mut self.high_contrast,
            PreferenceKey::ReducedMotion => &mut self.reduced_motion,
            PreferenceKey::DyslexiaFont => &mut self.dyslexia_font,
            PreferenceKey::LargeText => &mut self.large_text,
            PreferenceKey::ScreenReaderMode => &mut self.screen_reader_mode,
            PreferenceKey::KeyboardNavigation => &mut self.keyboard_navigation,
            PreferenceKey::SpeechEnabled => &mut self.speech_enabled,
            PreferenceKey::FontSize => return false,
        };
        *slot = value;
        true
    }

    pub fn font_family(&self) -> &'static str {
        if self.dyslexia_font { DYSLEXIA_FONT_STACK } else { SYSTEM_FONT_STACK }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_are_camel_case() {
        let keys: Vec<&str> = PreferenceKey::iter().map(|k| k.storage_key()).collect();
        assert_eq!(
            keys,
            vec![
                "darkMode",
                "highContrast",
                "reducedMotion",
                "fontSize",
                "dyslexiaFont",
                "largeText",
                "screenReaderMode",
                "keyboardNavigation",
                "speechEnabled",
            ]
        );
        assert_eq!(PreferenceKey::SpeechEnabled.to_string(), "speechEnabled");
    }

    #[test]
    fn slider_snaps_to_step() {
        assert_eq!(FontSize::from_slider(112).value(), 110);
        assert_eq!(FontSize::from_slider(113).value(), 115);
        assert_eq!(FontSize::from_slider(20).value(), 75);
        assert_eq!(FontSize::from_slider(400).value(), 180);
    }

    #[test]
    fn programmatic_keeps_raw_in_range() {
        assert_eq!(FontSize::new(113).value(), 113);
        assert_eq!(FontSize::new(10).value(), 75);
        assert_eq!(FontSize::new(999).value(), 180);
    }

    #[test]
    fn font_size_deserializes_from_stored_number() {
        let size: FontSize = serde_json::from_str("140").unwrap();
        assert_eq!(size.value(), 140);
        assert_eq!(size.label(), "Large");
        let clamped: FontSize = serde_json::from_str("500").unwrap();
        assert_eq!(clamped.value(), 180);
    }

    #[test]
    fn defaults() {
        let prefs = AccessibilityPreferences::default();
        assert_eq!(prefs.font_size.value(), 110);
        assert!(!prefs.dark_mode && !prefs.speech_enabled);
        assert_eq!(prefs.font_family(), SYSTEM_FONT_STACK);
    }

    #[test]
    fn flag_roundtrip() {
        let mut prefs = AccessibilityPreferences::default();
        for key in PreferenceKey::toggles() {
            assert!(prefs.set_flag(key, true));
            assert_eq!(prefs.flag(key), Some(true));
        }
        assert!(!prefs.set_flag(PreferenceKey::FontSize, true));
        assert_eq!(prefs.flag(PreferenceKey::FontSize), None);
    }
}
