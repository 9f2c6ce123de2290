use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

use crate::domain::logging::{LogComponent, get_logger};
use crate::log_warn;

pub const SPEECH_RATE: f32 = 0.8;
pub const SPEECH_VOLUME: f32 = 0.7;
pub const SPEECH_PITCH: f32 = 1.0;
pub const PREFERRED_VOICE_PREFIX: &str = "en-";

/// Text-to-speech output for announcements.
pub trait SpeechOutput {
    fn speak(&self, text: &str);
    /// Drop queued and in-progress utterances.
    fn cancel(&self);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSpeech;

impl BrowserSpeech {
    fn synthesis() -> Option<SpeechSynthesis> {
        web_sys::window()?.speech_synthesis().ok()
    }

    fn preferred_voice(synthesis: &SpeechSynthesis) -> Option<SpeechSynthesisVoice> {
        synthesis
            .get_voices()
            .iter()
            .filter_map(|voice| voice.dyn_into::<SpeechSynthesisVoice>().ok())
            .find(|voice| voice.lang().starts_with(PREFERRED_VOICE_PREFIX))
    }
}

impl SpeechOutput for BrowserSpeech {
    fn speak(&self, text: &str) {
        let Some(synthesis) = Self::synthesis() else {
            get_logger().debug(LogComponent::Infrastructure("Speech"), "Speech synthesis unavailable");
            return;
        };
        let utterance = match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => utterance,
            Err(e) => {
                log_warn!(
                    LogComponent::Infrastructure("Speech"),
                    "Failed to create utterance: {e:?}"
                );
                return;
            }
        };
        utterance.set_rate(SPEECH_RATE);
        utterance.set_volume(SPEECH_VOLUME);
        utterance.set_pitch(SPEECH_PITCH);
        if let Some(voice) = Self::preferred_voice(&synthesis) {
            utterance.set_voice(Some(&voice));
        }
        synthesis.speak(&utterance);
    }

    fn cancel(&self) {
        if let Some(synthesis) = Self::synthesis() {
            synthesis.cancel();
        }
    }
}
