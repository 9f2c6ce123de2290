use std::str::FromStr;

use leptos::*;
use strum::IntoEnumIterator;

use crate::domain::{
    errors::AppResult,
    notifications::ToastKind,
    subscription::{AgentType, DeliveryFormat, Frequency, Subscription, SubscriptionForm, SubscriptionUpdate},
};
use crate::application::Notice;
use crate::infrastructure::api::subscriptions::SubscriptionList;
use crate::presentation::context::use_services;
use crate::presentation::dialog::ConfirmDialog;

fn parse_or<T: FromStr>(raw: &str, fallback: T) -> T {
    raw.parse().unwrap_or(fallback)
}

#[component]
pub fn SubscriptionFormView(#[prop(optional)] on_created: Option<Callback<String>>) -> impl IntoView {
    let services = use_services();
    let form = create_rw_signal(SubscriptionForm::default());
    let (submitting, set_submitting) = create_signal(false);
    let (field_error, set_field_error) = create_signal(None::<(&'static str, String)>);

    let error_for = move |field: &'static str| {
        move || field_error.with(|e| e.as_ref().filter(|(f, _)| *f == field).map(|(_, m)| m.clone()))
    };

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if let Err(err) = current.validate() {
            set_field_error.set(Some((err.field, err.message.clone())));
            services.toast(err.message, ToastKind::Warning);
            return;
        }
        set_field_error.set(None);
        set_submitting.set(true);
        let worker = services.clone();
        let email = current.user_email.trim().to_string();
        services.perform(
            async move { worker.subscriptions().subscribe(&current, worker.token()).await },
            |message| message.clone(),
            move |result: &AppResult<String>| {
                set_submitting.set(false);
                if result.is_ok() {
                    form.set(SubscriptionForm::default());
                    if let Some(callback) = on_created {
                        callback.call(email);
                    }
                }
            },
        );
    };

    view! {
        <form class="card subscription-form" on:submit=submit aria-labelledby="subscribe-title">
            <h2 id="subscribe-title">"Subscribe to Reports"</h2>

            <label for="sub-email">"Email address"</label>
            <input
                id="sub-email"
                type="email"
                aria-invalid=move || error_for("email")().is_some().to_string()
                prop:value=move || form.with(|f| f.user_email.clone())
                on:input=move |ev| form.update(|f| f.user_email = event_target_value(&ev))
            />
            <p class="field-error" role="alert">{error_for("email")}</p>

            <label for="sub-name">"Name"</label>
            <input
                id="sub-name"
                type="text"
                aria-invalid=move || error_for("name")().is_some().to_string()
                prop:value=move || form.with(|f| f.user_name.clone())
                on:input=move |ev| form.update(|f| f.user_name = event_target_value(&ev))
            />
            <p class="field-error" role="alert">{error_for("name")}</p>

            <label for="sub-frequency">"Frequency"</label>
            <select
                id="sub-frequency"
                on:change=move |ev| form.update(|f| f.frequency = parse_or(&event_target_value(&ev), f.frequency))
            >
                {Frequency::iter()
                    .map(|freq| view! {
                        <option value=freq.to_string() selected=move || form.with(|f| f.frequency == freq)>
                            {freq.label()}
                        </option>
                    })
                    .collect_view()}
            </select>

            <label for="sub-agent">"Report type"</label>
            <select
                id="sub-agent"
                on:change=move |ev| form.update(|f| f.agent_type = parse_or(&event_target_value(&ev), f.agent_type))
            >
                {AgentType::iter()
                    .map(|agent| view! {
                        <option value=agent.to_string() selected=move || form.with(|f| f.agent_type == agent)>
                            {agent.label()}
                        </option>
                    })
                    .collect_view()}
            </select>

            <label for="sub-format">"Delivery format"</label>
            <select
                id="sub-format"
                on:change=move |ev| {
                    form.update(|f| f.delivery_format = parse_or(&event_target_value(&ev), f.delivery_format))
                }
            >
                {DeliveryFormat::iter()
                    .map(|format| view! {
                        <option value=format.to_string() selected=move || form.with(|f| f.delivery_format == format)>
                            {format.label()}
                        </option>
                    })
                    .collect_view()}
            </select>

            <label for="sub-time">"Preferred time"</label>
            <input
                id="sub-time"
                type="time"
                prop:value=move || form.with(|f| f.preferred_time.clone())
                on:input=move |ev| form.update(|f| f.preferred_time = event_target_value(&ev))
            />

            <label for="sub-zone">"Time zone"</label>
            <input
                id="sub-zone"
                type="text"
                prop:value=move || form.with(|f| f.time_zone.clone())
                on:input=move |ev| form.update(|f| f.time_zone = event_target_value(&ev))
            />

            <label for="sub-query">"Custom query (optional)"</label>
            <textarea
                id="sub-query"
                placeholder=move || form.with(|f| f.agent_type.default_query())
                prop:value=move || form.with(|f| f.query_template.clone())
                on:input=move |ev| form.update(|f| f.query_template = event_target_value(&ev))
            ></textarea>

            <button class="btn btn-primary" type="submit" disabled=submitting>
                {move || if submitting.get() { "Subscribing…" } else { "Subscribe" }}
            </button>
        </form>
    }
}

#[component]
fn SubscriptionRow(subscription: Subscription, on_changed: Callback<()>) -> impl IntoView {
    let services = use_services();
    let id = subscription.id;
    let draft = create_rw_signal(SubscriptionUpdate::from_subscription(&subscription));
    let active = subscription.is_active;

    let save = {
        let services = services.clone();
        move |_| {
            let update = draft.get_untracked();
            let worker = services.clone();
            services.perform(
                async move { worker.subscriptions().update(id, &update, worker.token()).await },
                |message| message.clone(),
                move |_| on_changed.call(()),
            );
        }
    };

    let toggle_active = move |_| {
        let worker = services.clone();
        services.perform(
            async move {
                if active {
                    worker.subscriptions().unsubscribe(id, worker.token()).await
                } else {
                    worker.subscriptions().reactivate(id, worker.token()).await
                }
            },
            |message| message.clone(),
            move |_| on_changed.call(()),
        );
    };

    view! {
        <li class="subscription-row" class:inactive=!active>
            <div class="subscription-summary">
                <strong>{subscription.agent_type.clone()}</strong>
                <span>{if active { "Active" } else { "Paused" }}</span>
            </div>
            <label for=format!("freq-{id}")>"Frequency"</label>
            <select
                id=format!("freq-{id}")
                on:change=move |ev| draft.update(|d| d.frequency = parse_or(&event_target_value(&ev), d.frequency))
            >
                {Frequency::iter()
                    .map(|freq| view! {
                        <option value=freq.to_string() selected=move || draft.with(|d| d.frequency == freq)>
                            {freq.label()}
                        </option>
                    })
                    .collect_view()}
            </select>
            <label for=format!("time-{id}")>"Preferred time"</label>
            <input
                id=format!("time-{id}")
                type="text"
                placeholder="09:00"
                prop:value=move || draft.with(|d| d.preferred_time.clone())
                on:input=move |ev| draft.update(|d| d.preferred_time = event_target_value(&ev))
            />
            <label for=format!("zone-{id}")>"Time zone"</label>
            <input
                id=format!("zone-{id}")
                type="text"
                placeholder="UTC"
                prop:value=move || draft.with(|d| d.time_zone.clone())
                on:input=move |ev| draft.update(|d| d.time_zone = event_target_value(&ev))
            />
            <div class="row-actions">
                <button class="btn btn-primary" on:click=save>"Save"</button>
                <button class="btn btn-secondary" on:click=toggle_active>
                    {if active { "Unsubscribe" } else { "Reactivate" }}
                </button>
            </div>
        </li>
    }
}

#[component]
pub fn SubscriptionManager(email: RwSignal<String>) -> impl IntoView {
    let services = use_services();
    let listing = create_rw_signal(None::<SubscriptionList>);
    let (loading, set_loading) = create_signal(false);
    let confirm_all = create_rw_signal(false);

    let load = {
        let services = services.clone();
        Callback::new(move |_: ()| {
            let address = email.get_untracked();
            set_loading.set(true);
            let worker = services.clone();
            let services = services.clone();
            spawn_local(async move {
                let result = worker.subscriptions().list(&address, worker.token()).await;
                set_loading.set(false);
                match result {
                    Ok(list) => listing.set(Some(list)),
                    Err(err) => services.notify(Notice::from_result(&Err::<(), _>(err), |_| String::new())),
                }
            });
        })
    };

    let unsubscribe_all = {
        let services = services.clone();
        Callback::new(move |_: ()| {
            let address = email.get_untracked();
            let worker = services.clone();
            services.perform(
                async move { worker.subscriptions().unsubscribe_all(&address, worker.token()).await },
                |message| message.clone(),
                move |_| load.call(()),
            );
        })
    };

    view! {
        <div class="card subscription-manager">
            <h2>"Manage Subscriptions"</h2>
            <form on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                load.call(());
            }>
                <label for="manage-email">"Email address"</label>
                <input
                    id="manage-email"
                    type="email"
                    prop:value=email
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <button class="btn btn-secondary" type="submit" disabled=loading>
                    {move || if loading.get() { "Loading…" } else { "Find subscriptions" }}
                </button>
            </form>
            {move || listing.get().map(|list| {
                if list.subscriptions.is_empty() {
                    return view! { <p class="muted">"No subscriptions found for this address."</p> }.into_view();
                }
                view! {
                    <p>{format!("{} subscription(s)", list.total)}</p>
                    <ul class="subscription-list">
                        {list
                            .subscriptions
                            .into_iter()
                            .map(|s| view! { <SubscriptionRow subscription=s on_changed=load/> })
                            .collect_view()}
                    </ul>
                    <button class="btn btn-danger" on:click=move |_| confirm_all.set(true)>
                        "Unsubscribe from all"
                    </button>
                }
                .into_view()
            })}
            <ConfirmDialog
                open=confirm_all
                title="Unsubscribe from all reports?"
                message=Signal::derive(move || format!("Every subscription for {} will stop.", email.get()))
                confirm_label="Unsubscribe all"
                on_confirm=unsubscribe_all
            />
        </div>
    }
}

#[component]
pub fn SubscriptionsPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let created = Callback::new(move |address: String| email.set(address));
    view! {
        <section class="page" aria-labelledby="page-title">
            <div class="page-header">
                <h1 id="page-title">"Subscriptions"</h1>
            </div>
            <div class="two-column">
                <SubscriptionFormView on_created=created/>
                <SubscriptionManager email=email/>
            </div>
        </section>
    }
}
