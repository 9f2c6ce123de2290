use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollIntoViewOptions};

use crate::domain::logging::{LogComponent, get_logger};
use crate::log_warn;

pub const MAIN_CONTENT_ID: &str = "main-content";

/// The parts of the document the accessibility store writes to.
pub trait DocumentAdapter {
    /// CSS custom property on the root element.
    fn set_property(&self, name: &str, value: &str);
    fn set_class(&self, class: &str, enabled: bool);
    /// Focuses and scrolls to the element. `false` when it does not exist.
    fn focus_element(&self, id: &str) -> bool;
}

/// `<html>` of the current document. Missing DOM is logged and ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDocument;

impl BrowserDocument {
    fn root() -> Option<HtmlElement> {
        web_sys::window()?.document()?.document_element()?.dyn_into::<HtmlElement>().ok()
    }

    fn element(id: &str) -> Option<HtmlElement> {
        web_sys::window()?.document()?.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }
}

impl DocumentAdapter for BrowserDocument {
    fn set_property(&self, name: &str, value: &str) {
        let Some(root) = Self::root() else {
            get_logger().warn(LogComponent::Infrastructure("Document"), "Document root not available");
            return;
        };
        if let Err(e) = root.style().set_property(name, value) {
            log_warn!(LogComponent::Infrastructure("Document"), "Failed to set {name}: {e:?}");
        }
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let Some(root) = Self::root() else {
            return;
        };
        if let Err(e) = root.class_list().toggle_with_force(class, enabled) {
            log_warn!(LogComponent::Infrastructure("Document"), "Failed to toggle .{class}: {e:?}");
        }
    }

    fn focus_element(&self, id: &str) -> bool {
        let Some(element) = Self::element(id) else {
            log_warn!(LogComponent::Infrastructure("Document"), "#{id} not found");
            return false;
        };
        // Landmarks are not focusable by default.
        if !element.has_attribute("tabindex") {
            let _ = element.set_attribute("tabindex", "-1");
        }
        let _ = element.focus();
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}
