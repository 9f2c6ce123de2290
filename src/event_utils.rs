use leptos::ev::EventDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

impl EventOptions {
    /// Listeners that call `prevent_default` must not be passive.
    pub fn active() -> Self {
        Self { passive: false, ..Self::default() }
    }
}

/// Registered DOM listener; removed from its target on drop.
pub struct EventListenerHandle {
    target: EventTarget,
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
}

impl Drop for EventListenerHandle {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

pub fn listen<E>(
    target: &EventTarget,
    event_name: &str,
    options: &EventOptions,
    mut cb: impl FnMut(E) + 'static,
) -> EventListenerHandle
where
    E: JsCast + 'static,
{
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let callback = Closure::wrap(Box::new(move |ev: Event| {
        cb(ev.unchecked_into::<E>());
    }) as Box<dyn FnMut(Event)>);

    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event_name,
        callback.as_ref().unchecked_ref(),
        &opts,
    );

    EventListenerHandle {
        target: target.clone(),
        event_name: event_name.to_string(),
        callback,
        capture: options.capture,
    }
}

/// Typed window listener. `None` outside a browsing context.
pub fn window_event_listener_with_options<E>(
    event: E,
    options: &EventOptions,
    cb: impl FnMut(E::EventType) + 'static,
) -> Option<EventListenerHandle>
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast + 'static,
{
    let window = web_sys::window()?;
    Some(listen::<E::EventType>(window.as_ref(), &event.name(), options, cb))
}
