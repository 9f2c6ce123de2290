use leptos::*;

use crate::event_utils::{EventListenerHandle, EventOptions, listen};
use crate::infrastructure::focus_trap::{ESCAPE_EVENT, FocusTrap};
use crate::presentation::context::use_services;

/// Modal confirmation with focus trapped inside while open.
#[component]
pub fn ConfirmDialog(
    open: RwSignal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] confirm_label: String,
    on_confirm: Callback<()>,
) -> impl IntoView {
    let services = use_services();
    let dialog_ref = create_node_ref::<html::Div>();
    let trap = store_value(None::<(FocusTrap, EventListenerHandle)>);

    create_effect(move |_| {
        if !open.get() {
            trap.set_value(None);
            return;
        }
        let Some(dialog) = dialog_ref.get() else {
            return;
        };
        let services = services.clone();
        // Wait for `hidden` to clear so the first control can take focus.
        request_animation_frame(move || {
            if !open.get_untracked() {
                return;
            }
            let element: &web_sys::HtmlElement = &dialog;
            let escape = listen::<web_sys::CustomEvent>(
                element.as_ref(),
                ESCAPE_EVENT,
                &EventOptions::default(),
                move |_| open.set(false),
            );
            trap.set_value(Some((services.trap_focus(element), escape)));
        });
    });

    view! {
        <div class="dialog-backdrop" hidden=move || !open.get()>
            <div
                class="dialog"
                role="dialog"
                aria-modal="true"
                aria-labelledby="dialog-title"
                aria-describedby="dialog-message"
                node_ref=dialog_ref
            >
                <h2 id="dialog-title">{title}</h2>
                <p id="dialog-message">{move || message.get()}</p>
                <div class="dialog-actions">
                    <button class="btn btn-secondary" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button
                        class="btn btn-danger"
                        on:click=move |_| {
                            open.set(false);
                            on_confirm.call(());
                        }
                    >
                        {confirm_label}
                    </button>
                </div>
            </div>
        </div>
    }
}
