#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage};
use intel_dashboard_wasm::domain::{cancellation::CancellationToken, errors::AppError};
use intel_dashboard_wasm::event_utils::{EventOptions, listen};
use intel_dashboard_wasm::infrastructure::{
    document::{BrowserDocument, DocumentAdapter},
    focus_trap::{ESCAPE_EVENT, FocusTrap},
    http::ApiClient,
    storage::{BrowserLocalStorage, PreferenceStorage},
};
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn container_with_buttons(count: usize) -> HtmlElement {
    let doc = document();
    let container = doc.create_element("div").unwrap().dyn_into::<HtmlElement>().unwrap();
    for i in 0..count {
        let button = doc.create_element("button").unwrap();
        button.set_id(&format!("trap-button-{i}"));
        container.append_child(&button).unwrap();
    }
    doc.body().unwrap().append_child(&container).unwrap();
    container
}

fn active_id() -> String {
    document().active_element().map(|e| e.id()).unwrap_or_default()
}

fn press_key(target: &HtmlElement, key: &str, shift: bool) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_shift_key(shift);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    target.dispatch_event(&event).unwrap();
}

fn press_tab(target: &HtmlElement, shift: bool) {
    press_key(target, "Tab", shift);
}

fn button(index: usize) -> HtmlElement {
    document()
        .get_element_by_id(&format!("trap-button-{index}"))
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

#[wasm_bindgen_test]
fn focus_trap_wraps_both_directions() {
    let container = container_with_buttons(3);
    let trap = FocusTrap::acquire(&container);
    assert!(trap.is_active());
    assert_eq!(active_id(), "trap-button-0");

    press_tab(&container, true);
    assert_eq!(active_id(), "trap-button-2");

    press_tab(&container, false);
    assert_eq!(active_id(), "trap-button-0");

    trap.release();
    container.remove();
}

#[wasm_bindgen_test]
fn escape_fires_event_and_release_stops_wrapping() {
    let container = container_with_buttons(2);
    let escaped = Rc::new(Cell::new(0));
    let seen = escaped.clone();
    let _escape = listen::<web_sys::CustomEvent>(
        container.as_ref(),
        ESCAPE_EVENT,
        &EventOptions::default(),
        move |_| seen.set(seen.get() + 1),
    );
    let trap = FocusTrap::acquire(&container);

    press_key(&button(0), "Escape", false);
    assert_eq!(escaped.get(), 1);

    let last = button(1);
    last.focus().unwrap();
    press_tab(&last, false);
    assert_eq!(active_id(), "trap-button-0");

    trap.release();
    last.focus().unwrap();
    press_tab(&last, false);
    assert_eq!(active_id(), "trap-button-1");
    press_key(&last, "Escape", false);
    assert_eq!(escaped.get(), 1);

    container.remove();
}

#[wasm_bindgen_test]
async fn request_times_out_against_unreachable_host() {
    let client = ApiClient::new("http://10.255.255.1").with_timeout(1);
    let token = CancellationToken::new();

    let result = client.get_json::<serde_json::Value>("/api/competitive-metrics/", &token).await;

    assert_eq!(result, Err(AppError::NetworkTimeout { after_ms: 1 }));
}

#[wasm_bindgen_test]
async fn cancelled_token_short_circuits_request() {
    let client = ApiClient::new("http://10.255.255.1");
    let token = CancellationToken::new();
    token.cancel();

    let result = client.get_json::<serde_json::Value>("/api/market-trends/", &token).await;

    assert_eq!(result, Err(AppError::Cancelled));
}

#[wasm_bindgen_test]
fn local_storage_round_trips_preferences() {
    let storage = BrowserLocalStorage;
    storage.save("highContrast", &json!(true)).unwrap();
    assert_eq!(storage.load("highContrast"), Some(json!(true)));
    LocalStorage::delete("highContrast");
    assert_eq!(storage.load("highContrast"), None);
}

#[wasm_bindgen_test]
fn document_adapter_writes_root_element() {
    let adapter = BrowserDocument;
    adapter.set_class("high-contrast", true);
    adapter.set_property("--accessibility-font-scale", "1.25");

    let root = document().document_element().unwrap();
    assert!(root.class_list().contains("high-contrast"));
    let style = root.dyn_into::<HtmlElement>().unwrap().style();
    assert_eq!(style.get_property_value("--accessibility-font-scale").unwrap(), "1.25");

    adapter.set_class("high-contrast", false);
    assert!(!document().document_element().unwrap().class_list().contains("high-contrast"));
}

#[wasm_bindgen_test]
fn focus_missing_element_reports_false() {
    assert!(!BrowserDocument.focus_element("no-such-element"));
}
