use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, HtmlElement, KeyboardEvent, Node};

use crate::domain::logging::{LogComponent, get_logger};
use crate::event_utils::{EventListenerHandle, EventOptions, listen};

pub const FOCUSABLE_SELECTOR: &str =
    "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";
pub const ESCAPE_EVENT: &str = "escape-focus-trap";

/// Index focus must jump to for a Tab press, when it has to wrap.
///
/// `None` leaves the browser's own tab order in charge.
pub fn wrap_target(len: usize, current: Option<usize>, backwards: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    match current {
        None => Some(if backwards { last } else { 0 }),
        Some(0) if backwards => Some(last),
        Some(i) if !backwards && i >= last => Some(0),
        Some(_) => None,
    }
}

fn focusable_within(container: &HtmlElement) -> Vec<HtmlElement> {
    let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn active_index(elements: &[HtmlElement]) -> Option<usize> {
    let active = web_sys::window()?.document()?.active_element()?;
    let active: &Node = active.as_ref();
    elements.iter().position(|el| el.is_same_node(Some(active)))
}

fn dispatch_escape(container: &HtmlElement) {
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    match CustomEvent::new_with_event_init_dict(ESCAPE_EVENT, &init) {
        Ok(event) => {
            let _ = container.dispatch_event(&event);
        }
        Err(e) => get_logger().warn(
            LogComponent::Infrastructure("FocusTrap"),
            &format!("Failed to create {ESCAPE_EVENT}: {e:?}"),
        ),
    }
}

/// Keeps keyboard focus inside a container while alive.
pub struct FocusTrap {
    listener: Option<EventListenerHandle>,
}

impl FocusTrap {
    /// Focuses the first focusable descendant and starts trapping Tab.
    pub fn acquire(container: &HtmlElement) -> Self {
        if let Some(first) = focusable_within(container).first() {
            let _ = first.focus();
        }

        let target = container.clone();
        let listener = listen::<KeyboardEvent>(
            container.as_ref(),
            "keydown",
            &EventOptions::active(),
            move |event| match event.key().as_str() {
                "Tab" => {
                    let elements = focusable_within(&target);
                    let current = active_index(&elements);
                    if let Some(next) = wrap_target(elements.len(), current, event.shift_key()) {
                        event.prevent_default();
                        let _ = elements[next].focus();
                    }
                }
                "Escape" => dispatch_escape(&target),
                _ => {}
            },
        );

        get_logger().trace(LogComponent::Infrastructure("FocusTrap"), "Focus trap acquired");
        Self { listener: Some(listener) }
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    pub fn release(mut self) {
        self.listener.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_both_ends() {
        assert_eq!(wrap_target(3, Some(2), false), Some(0));
        assert_eq!(wrap_target(3, Some(0), true), Some(2));
    }

    #[test]
    fn inner_moves_use_native_order() {
        assert_eq!(wrap_target(3, Some(1), false), None);
        assert_eq!(wrap_target(3, Some(1), true), None);
    }

    #[test]
    fn outside_focus_enters_container() {
        assert_eq!(wrap_target(4, None, false), Some(0));
        assert_eq!(wrap_target(4, None, true), Some(3));
        assert_eq!(wrap_target(0, None, false), None);
    }
}
