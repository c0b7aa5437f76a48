use super::*;
use async_trait::async_trait;
use shared::error::{ApiException, ErrorCode};
use std::{collections::VecDeque, io::Write};
use tokio::sync::Notify;

struct ScriptedOrderService {
    responses: Mutex<VecDeque<Result<OrderId, ApiException>>>,
    requests: Mutex<Vec<CreateCakeRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedOrderService {
    fn replying(responses: Vec<Result<OrderId, ApiException>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    fn gated(self, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..self
        }
    }

    async fn requests(&self) -> Vec<CreateCakeRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl OrderService for ScriptedOrderService {
    async fn create_order(&self, request: CreateCakeRequest) -> Result<OrderId, ApiException> {
        self.requests.lock().await.push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(ApiException::new(ErrorCode::Transport, "no scripted reply")))
    }
}

fn ok(id: &str) -> Result<OrderId, ApiException> {
    Ok(OrderId(id.to_string()))
}

fn rejected(message: &str) -> Result<OrderId, ApiException> {
    Err(ApiException::new(ErrorCode::Rejected, message))
}

fn image_file(name: &str, bytes: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create");
    file.write_all(bytes).expect("write");
    (dir, path)
}

async fn ready_form(service: Arc<ScriptedOrderService>) -> (Arc<OrderForm>, tempfile::TempDir) {
    let form = OrderForm::new(CakeSize::Small1Layer, service);
    let (dir, path) = image_file("cake.png", b"png-bytes");
    form.acquire_image(Some(path.as_path())).await.expect("acquire");
    form.set_description("lemon drizzle").await;
    (form, dir)
}

#[tokio::test]
async fn new_form_starts_editing_with_empty_draft() {
    let service = Arc::new(ScriptedOrderService::replying(Vec::new()));
    let form = OrderForm::new(CakeSize::Big1Layer, service);

    let draft = form.snapshot().await;
    assert_eq!(draft.category, CakeSize::Big1Layer);
    assert_eq!(draft.status, DraftStatus::Editing);
    assert!(draft.image_payload.is_none());
    assert!(draft.description.is_empty());
    assert!(draft.customer_name.is_none() && draft.contact.is_none());
    assert!(draft.result_id().is_none());
    assert!(!draft.can_submit());
    assert_eq!(draft.submit_label(), "Place order");
}

#[tokio::test]
async fn submit_without_image_sends_nothing() {
    let service = Arc::new(ScriptedOrderService::replying(vec![ok("1")]));
    let form = OrderForm::new(CakeSize::Small1Layer, service.clone());
    form.set_description("vanilla").await;
    let before = form.snapshot().await;

    let outcome = form.submit().await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::Skipped(SkipReason::MissingImage));
    assert!(service.requests().await.is_empty());
    assert_eq!(form.snapshot().await, before);
}

#[tokio::test]
async fn submit_with_blank_description_sends_nothing() {
    let service = Arc::new(ScriptedOrderService::replying(vec![ok("1")]));
    let (form, _dir) = ready_form(service.clone()).await;
    form.set_description(" \n\t ").await;

    let outcome = form.submit().await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::Skipped(SkipReason::BlankDescription));
    assert!(service.requests().await.is_empty());
    assert_eq!(form.snapshot().await.status, DraftStatus::Editing);
}

#[tokio::test]
async fn successful_submit_records_result_and_keeps_fields() {
    let service = Arc::new(ScriptedOrderService::replying(vec![ok("42")]));
    let (form, _dir) = ready_form(service.clone()).await;

    let outcome = form.submit().await.expect("submit");
    assert_eq!(outcome, SubmitOutcome::Submitted(OrderId("42".into())));

    let draft = form.snapshot().await;
    assert_eq!(draft.status, DraftStatus::Submitted { id: OrderId("42".into()) });
    assert_eq!(draft.result_id(), Some(&OrderId("42".into())));
    assert_eq!(draft.confirmation().as_deref(), Some("Saved! #42"));
    assert_eq!(draft.description, "lemon drizzle");
    assert!(draft.image_payload.is_some());
    assert_eq!(service.requests().await.len(), 1);
}

#[tokio::test]
async fn failed_submit_reverts_to_editing_and_surfaces_detail() {
    let service = Arc::new(ScriptedOrderService::replying(vec![rejected("bad image")]));
    let (form, _dir) = ready_form(service.clone()).await;
    let mut events = form.subscribe_events();

    let err = form.submit().await.expect_err("must fail");
    assert_eq!(err.user_message(), "bad image");

    let draft = form.snapshot().await;
    assert_eq!(draft.status, DraftStatus::Editing);
    assert!(draft.result_id().is_none());
    assert_eq!(draft.description, "lemon drizzle");
    assert!(draft.can_submit());

    assert!(matches!(events.recv().await.expect("event"), FormEvent::Submitting));
    match events.recv().await.expect("event") {
        FormEvent::SubmitFailed(message) => assert_eq!(message, "bad image"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn retry_after_failure_sends_a_second_request() {
    let service = Arc::new(ScriptedOrderService::replying(vec![
        rejected("try again"),
        ok("9"),
    ]));
    let (form, _dir) = ready_form(service.clone()).await;

    form.submit().await.expect_err("first attempt fails");
    let outcome = form.submit().await.expect("retry");

    assert_eq!(outcome, SubmitOutcome::Submitted(OrderId("9".into())));
    assert_eq!(service.requests().await.len(), 2);
}

#[tokio::test]
async fn submitted_draft_does_not_resubmit() {
    let service = Arc::new(ScriptedOrderService::replying(vec![ok("5"), ok("6")]));
    let (form, _dir) = ready_form(service.clone()).await;

    form.submit().await.expect("submit");
    let outcome = form.submit().await.expect("second submit");

    assert_eq!(outcome, SubmitOutcome::Skipped(SkipReason::AlreadySubmitted));
    assert_eq!(service.requests().await.len(), 1);
    assert_eq!(form.snapshot().await.result_id(), Some(&OrderId("5".into())));
}

#[tokio::test]
async fn in_flight_submit_blocks_reentry_but_not_edits() {
    let gate = Arc::new(Notify::new());
    let service = Arc::new(ScriptedOrderService::replying(vec![ok("11")]).gated(gate.clone()));
    let (form, _dir) = ready_form(service.clone()).await;
    let mut events = form.subscribe_events();

    let first = {
        let form = Arc::clone(&form);
        tokio::spawn(async move { form.submit().await })
    };
    assert!(matches!(events.recv().await.expect("event"), FormEvent::Submitting));

    let draft = form.snapshot().await;
    assert_eq!(draft.status, DraftStatus::Submitting);
    assert_eq!(draft.submit_label(), "Saving...");
    assert!(!draft.can_submit());

    let second = form.submit().await.expect("second submit");
    assert_eq!(second, SubmitOutcome::Skipped(SkipReason::InFlight));

    form.set_description("changed mid-flight").await;
    gate.notify_one();

    let outcome = first.await.expect("join").expect("submit");
    assert_eq!(outcome, SubmitOutcome::Submitted(OrderId("11".into())));

    let requests = service.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].description, "lemon drizzle");
    assert_eq!(form.snapshot().await.description, "changed mid-flight");
}

#[tokio::test]
async fn empty_optional_fields_are_omitted_from_request() {
    let service = Arc::new(ScriptedOrderService::replying(vec![ok("3")]));
    let (form, _dir) = ready_form(service.clone()).await;
    form.set_customer_name("").await;
    form.set_contact("ada@example.com").await;

    form.submit().await.expect("submit");

    let request = &service.requests().await[0];
    assert_eq!(request.customer_name, None);
    assert_eq!(request.contact.as_deref(), Some("ada@example.com"));
    assert_eq!(request.size, CakeSize::Small1Layer);
}

#[tokio::test]
async fn later_image_replaces_earlier_one() {
    let service = Arc::new(ScriptedOrderService::replying(vec![ok("8")]));
    let form = OrderForm::new(CakeSize::MultiLayer, service.clone());
    let (_first_dir, first) = image_file("first.png", b"first");
    let (_second_dir, second) = image_file("second.jpg", b"second");

    form.acquire_image(Some(first.as_path())).await.expect("first");
    form.acquire_image(Some(second.as_path())).await.expect("second");
    form.set_description("two tiers").await;
    form.submit().await.expect("submit");

    let expected = crate::image::encode_data_uri("image/jpeg", b"second");
    assert_eq!(form.snapshot().await.preview(), Some(expected.as_str()));
    assert_eq!(service.requests().await[0].image_base64, expected);
}

#[tokio::test]
async fn dismissed_picker_is_a_no_op() {
    let service = Arc::new(ScriptedOrderService::replying(Vec::new()));
    let form = OrderForm::new(CakeSize::Small1Layer, service);

    form.acquire_image(None).await.expect("no-op");
    assert!(form.snapshot().await.image_payload.is_none());
}

#[tokio::test]
async fn unreadable_file_keeps_previous_image() {
    let service = Arc::new(ScriptedOrderService::replying(Vec::new()));
    let (form, dir) = ready_form(service).await;
    let before = form.snapshot().await.image_payload;
    let mut events = form.subscribe_events();

    let err = form
        .acquire_image(Some(dir.path().join("missing.png").as_path()))
        .await
        .expect_err("must fail");
    assert!(matches!(err, OrderError::ImageRead { .. }));
    assert_eq!(form.snapshot().await.image_payload, before);
    assert!(matches!(
        events.recv().await.expect("event"),
        FormEvent::ImageFailed(_)
    ));
}

#[test]
fn skip_reasons_read_as_plain_text() {
    assert_eq!(
        SkipReason::MissingImage.to_string(),
        "a reference photo is required"
    );
    assert_eq!(
        SkipReason::BlankDescription.to_string(),
        "a description is required"
    );
    assert!(!SkipReason::InFlight.to_string().contains("InFlight"));
    assert!(!SkipReason::AlreadySubmitted.to_string().contains("AlreadySubmitted"));
}
