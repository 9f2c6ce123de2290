use leptos::*;
use strum::IntoEnumIterator;

use crate::domain::{
    notifications::ToastKind,
    subscription::{AgentType, DeliveryFormat, DeliverySchedule, ReportRequestForm},
};
use crate::infrastructure::api::subscriptions::PipelineAck;
use crate::presentation::context::use_services;

fn acknowledgement(ack: &PipelineAck, emailed: bool) -> String {
    match (&ack.message, emailed) {
        (Some(message), _) => message.clone(),
        (None, true) => "Report generation started. It will be emailed when ready.".to_string(),
        (None, false) => "Report generation started.".to_string(),
    }
}

#[component]
fn FocusAreas(form: RwSignal<ReportRequestForm>) -> impl IntoView {
    let (draft, set_draft) = create_signal(String::new());
    let add = move || {
        let area = draft.get_untracked();
        let mut added = false;
        form.update(|f| added = f.add_focus_area(&area));
        if added {
            set_draft.set(String::new());
        }
    };

    view! {
        <fieldset class="focus-areas">
            <legend>"Focus areas"</legend>
            <div class="inline-row">
                <input
                    id="focus-area-input"
                    type="text"
                    aria-label="New focus area"
                    placeholder="e.g. Business email compromise"
                    prop:value=draft
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add();
                        }
                    }
                />
                <button class="btn btn-secondary" type="button" on:click=move |_| add()>"Add"</button>
            </div>
            <ul class="chip-list">
                {move || {
                    form.with(|f| f.focus_areas.clone())
                        .into_iter()
                        .map(|area| {
                            let label = format!("Remove {area}");
                            let target = area.clone();
                            view! {
                                <li class="chip">
                                    {area}
                                    <button
                                        class="btn btn-link"
                                        type="button"
                                        aria-label=label
                                        on:click=move |_| form.update(|f| f.remove_focus_area(&target))
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </fieldset>
    }
}

/// On-demand research report through the pipeline endpoint.
#[component]
pub fn ReportRequestView() -> impl IntoView {
    let services = use_services();
    let form = create_rw_signal(ReportRequestForm::default());
    let (submitting, set_submitting) = create_signal(false);
    let (field_error, set_field_error) = create_signal(None::<(&'static str, String)>);
    let emailed = move || form.with(|f| f.email_delivery);

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
        let delivered = current.email_delivery;
        services.perform(
            async move { worker.subscriptions().request_report(&current, worker.token()).await },
            move |ack| acknowledgement(ack, delivered),
            move |result| {
                set_submitting.set(false);
                if result.is_ok() {
                    form.update(|f| {
                        f.query.clear();
                        f.focus_areas.clear();
                    });
                }
            },
        );
    };

    view! {
        <form class="card report-request" on:submit=submit aria-labelledby="report-request-title">
            <h2 id="report-request-title">"Request a Research Report"</h2>

            <label for="report-query">"Research question"</label>
            <textarea
                id="report-query"
                rows="3"
                aria-invalid=move || error_for("query")().is_some().to_string()
                placeholder=move || form.with(|f| f.agent_type.default_query())
                prop:value=move || form.with(|f| f.query.clone())
                on:input=move |ev| form.update(|f| f.query = event_target_value(&ev))
            ></textarea>
            <p class="field-error" role="alert">{error_for("query")}</p>

            <label for="report-agent">"Report type"</label>
            <select
                id="report-agent"
                on:change=move |ev| {
                    form.update(|f| f.agent_type = event_target_value(&ev).parse().unwrap_or(f.agent_type))
                }
            >
                {AgentType::iter()
                    .map(|agent| view! {
                        <option value=agent.to_string() selected=move || form.with(|f| f.agent_type == agent)>
                            {agent.label()}
                        </option>
                    })
                    .collect_view()}
            </select>

            <FocusAreas form=form/>

            <div class="toggle-row">
                <input
                    id="report-email-delivery"
                    type="checkbox"
                    prop:checked=emailed
                    on:change=move |ev| form.update(|f| f.email_delivery = event_target_checked(&ev))
                />
                <label for="report-email-delivery">"Email the finished report"</label>
            </div>

            <fieldset class="delivery" hidden=move || !emailed()>
                <legend>"Delivery"</legend>
                <label for="report-email">"Email address"</label>
                <input
                    id="report-email"
                    type="email"
                    aria-invalid=move || error_for("email")().is_some().to_string()
                    prop:value=move || form.with(|f| f.user_email.clone())
                    on:input=move |ev| form.update(|f| f.user_email = event_target_value(&ev))
                />
                <p class="field-error" role="alert">{error_for("email")}</p>

                <label for="report-name">"Name (optional)"</label>
                <input
                    id="report-name"
                    type="text"
                    prop:value=move || form.with(|f| f.user_name.clone())
                    on:input=move |ev| form.update(|f| f.user_name = event_target_value(&ev))
                />

                <label for="report-format">"Format"</label>
                <select
                    id="report-format"
                    on:change=move |ev| {
                        form.update(|f| {
                            f.delivery_format = event_target_value(&ev).parse().unwrap_or(f.delivery_format)
                        })
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

                <label for="report-schedule">"Schedule"</label>
                <select
                    id="report-schedule"
                    on:change=move |ev| {
                        form.update(|f| f.schedule = event_target_value(&ev).parse().unwrap_or(f.schedule))
                    }
                >
                    {DeliverySchedule::iter()
                        .map(|schedule| view! {
                            <option value=schedule.to_string() selected=move || form.with(|f| f.schedule == schedule)>
                                {schedule.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </fieldset>

            <button class="btn btn-primary" type="submit" disabled=submitting>
                {move || if submitting.get() { "Generating…" } else { "Generate report" }}
            </button>
        </form>
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    view! {
        <section class="page" aria-labelledby="page-title">
            <div class="page-header">
                <h1 id="page-title">"Reports"</h1>
            </div>
            <ReportRequestView/>
        </section>
    }
}
