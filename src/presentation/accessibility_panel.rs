use leptos::*;

use crate::domain::accessibility::{FontSize, PreferenceKey, TEXT_SIZE_PRESETS};
use crate::global_state::preferences;
use crate::presentation::context::use_services;

#[component]
fn PreferenceToggle(preference: PreferenceKey) -> impl IntoView {
    let services = use_services();
    let key = preference;
    let checked = move || preferences().with(|p| p.flag(key).unwrap_or(false));
    let id = format!("pref-{}", key.storage_key());

    view! {
        <div class="toggle-row">
            <input
                id=id.clone()
                type="checkbox"
                role="switch"
                prop:checked=checked
                aria-checked=move || checked().to_string()
                on:change=move |ev| services.set_preference(key, event_target_checked(&ev))
            />
            <label for=id>{key.label()}</label>
        </div>
    }
}

#[component]
fn TextSizeSlider() -> impl IntoView {
    let services = use_services();
    let size = move || preferences().with(|p| p.font_size);
    let presets = services.clone();

    view! {
        <div class="slider-row">
            <label for="font-size-slider">
                "Text size: " {move || format!("{}% ({})", size().value(), size().label())}
            </label>
            <input
                id="font-size-slider"
                type="range"
                min=FontSize::MIN.to_string()
                max=FontSize::MAX.to_string()
                step=FontSize::STEP.to_string()
                prop:value=move || size().value().to_string()
                aria-valuetext=move || format!("{}%", size().value())
                on:input=move |ev| {
                    if let Ok(raw) = event_target_value(&ev).parse::<f64>() {
                        services.set_font_size(FontSize::from_slider(raw.round() as u16));
                    }
                }
            />
            <div class="preset-row" role="group" aria-label="Text size presets">
                {TEXT_SIZE_PRESETS
                    .iter()
                    .map(|&(value, label)| {
                        let services = presets.clone();
                        view! {
                            <button
                                class="btn btn-chip"
                                aria-pressed=move || (size().value() == value).to_string()
                                on:click=move |_| services.set_font_size(FontSize::new(value))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn AccessibilityPanel() -> impl IntoView {
    let services = use_services();
    view! {
        <div class="card accessibility-panel">
            <h2>"Display & Navigation"</h2>
            <TextSizeSlider/>
            {PreferenceKey::toggles().map(|key| view! { <PreferenceToggle preference=key/> }).collect_view()}
            <button class="btn btn-secondary" on:click=move |_| services.stop_speech()>
                "Stop speech"
            </button>
        </div>
    }
}

#[component]
pub fn AccessibilityPage() -> impl IntoView {
    view! {
        <section class="page" aria-labelledby="page-title">
            <div class="page-header">
                <h1 id="page-title">"Accessibility"</h1>
            </div>
            <p class="muted">
                "Preferences are saved in this browser. Display preferences follow your system settings until changed here."
            </p>
            <AccessibilityPanel/>
        </section>
    }
}
