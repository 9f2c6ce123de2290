mod common;

use futures::executor::block_on;
use insta::assert_json_snapshot;
use intel_dashboard_wasm::application::SubscriptionService;
use intel_dashboard_wasm::domain::{
    cancellation::CancellationToken,
    errors::AppError,
    subscription::{
        AgentType, DeliveryFormat, DeliverySchedule, Frequency, OneTimeReportForm, ReportRequestForm,
        SubscriptionForm, SubscriptionUpdate,
    },
};

use common::CountingSubscriptionApi;

fn service() -> SubscriptionService<CountingSubscriptionApi> {
    SubscriptionService::new(CountingSubscriptionApi::default())
}

fn field(err: AppError) -> &'static str {
    match err {
        AppError::Validation(v) => v.field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn empty_email_never_reaches_the_network() {
    let service = service();
    let token = CancellationToken::new();
    let form = SubscriptionForm { user_name: "Ada".into(), ..SubscriptionForm::default() };

    let err = block_on(service.subscribe(&form, &token)).unwrap_err();

    assert_eq!(field(err), "email");
    assert_eq!(service.api().calls.get(), 0);
}

#[test]
fn every_email_keyed_action_validates_first() {
    let service = service();
    let token = CancellationToken::new();

    assert_eq!(field(block_on(service.list("  ", &token)).unwrap_err()), "email");
    assert_eq!(field(block_on(service.unsubscribe_all("", &token)).unwrap_err()), "email");
    assert_eq!(
        field(block_on(service.email_dashboard(&OneTimeReportForm::default(), &token)).unwrap_err()),
        "email"
    );
    let report = ReportRequestForm { email_delivery: true, query: "BEC".into(), ..Default::default() };
    assert_eq!(field(block_on(service.request_report(&report, &token)).unwrap_err()), "email");
    assert_eq!(service.api().calls.get(), 0);
}

#[test]
fn update_requires_preferred_time() {
    let service = service();
    let update = SubscriptionUpdate {
        frequency: Frequency::Daily,
        preferred_time: " ".into(),
        time_zone: "UTC".into(),
        focus_areas: Vec::new(),
    };

    let err = block_on(service.update(7, &update, &CancellationToken::new())).unwrap_err();

    assert_eq!(field(err), "preferred_time");
    assert_eq!(service.api().calls.get(), 0);
}

#[test]
fn valid_subscription_is_sent_once() {
    let service = service();
    let form = SubscriptionForm {
        user_email: "ada@example.com".into(),
        user_name: "Ada".into(),
        ..SubscriptionForm::default()
    };

    let message = block_on(service.subscribe(&form, &CancellationToken::new())).unwrap();

    assert_eq!(message, "Subscription created successfully");
    assert_eq!(service.api().calls.get(), 1);
}

#[test]
fn report_request_body() {
    let service = service();
    let mut form = ReportRequestForm {
        query: "Phishing kit pricing".into(),
        agent_type: AgentType::MarketTrends,
        email_delivery: true,
        user_email: "ada@example.com".into(),
        delivery_format: DeliveryFormat::Pdf,
        schedule: DeliverySchedule::Weekly,
        ..Default::default()
    };
    form.add_focus_area("BEC");

    block_on(service.request_report(&form, &CancellationToken::new())).unwrap();

    let sent = service.api().last_pipeline.borrow().clone().unwrap();
    assert_json_snapshot!(sent, @r###"
    {
      "input": "Phishing kit pricing",
      "agent_type": "market_trends_agent",
      "user_email": "ada@example.com",
      "user_name": "Research User",
      "focus_areas": [
        "BEC"
      ],
      "delivery": {
        "format": "pdf",
        "schedule": "weekly"
      }
    }
    "###);
}

#[test]
fn dashboard_email_uses_fixed_query() {
    let service = service();
    let form = OneTimeReportForm { user_email: "ada@example.com".into(), user_name: String::new() };

    block_on(service.email_dashboard(&form, &CancellationToken::new())).unwrap();

    let sent = service.api().last_pipeline.borrow().clone().unwrap();
    assert_eq!(sent.input, OneTimeReportForm::DASHBOARD_QUERY);
    assert_eq!(sent.agent_type, AgentType::ComprehensiveResearch);
    assert_eq!(sent.user_name, "Dashboard Subscriber");
    assert_eq!(sent.delivery.schedule, DeliverySchedule::Immediate);
}
