//! Unit tests for the interaction dispatcher.

use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::support::{MockHandler, TIMESTAMP, command_body, ping_body, sign, verifier};
use crate::command::adapters::{deferred_handler, immediate_handler};
use crate::command::domain::{
    Command, CommandRegistry, Group, HandlerSignature, ParameterDeclaration,
};
use crate::command::ports::{HandlerError, HandlerResult};
use crate::interaction::adapters::RecordingRestClient;
use crate::interaction::domain::{InteractionReply, User, WebhookEditBody};
use crate::interaction::ports::RestError;
use crate::interaction::services::{DispatchError, InboundRequest, InteractionDispatcher};

const EDIT_WAIT: Duration = Duration::from_secs(2);

struct Harness {
    dispatcher: InteractionDispatcher,
    rest: Arc<RecordingRestClient>,
}

impl Harness {
    async fn send(&self, body: &[u8]) -> Result<InteractionReply, DispatchError> {
        let signature = sign(body);
        self.dispatcher
            .dispatch(InboundRequest::signed(&signature, TIMESTAMP, body))
            .await
    }

    async fn send_json(&self, body: &[u8]) -> Value {
        self.send(body)
            .await
            .expect("dispatch should succeed")
            .to_json()
            .expect("reply should render")
    }
}

fn echo() -> Command {
    let handler = immediate_handler(
        [ParameterDeclaration::of::<String>("message")],
        |ctx, args| async move { Ok(ctx.reply(args.string("message")?)) },
    );
    Command::new("echo", "Echo a message", handler).expect("echo compiles")
}

fn boo() -> Command {
    let handler = deferred_handler([], |ctx, _args| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        ctx.update_content("Boo!").await?;
        Ok(())
    });
    Command::new("boo", "Surprise", handler).expect("boo compiles")
}

fn explode() -> Command {
    let handler = immediate_handler([], |_ctx, _args| async {
        HandlerResult::Err(HandlerError::failed("boom"))
    });
    Command::new("explode", "Always fails", handler).expect("explode compiles")
}

fn whois() -> Command {
    let handler = immediate_handler(
        [ParameterDeclaration::of::<User>("who")],
        |ctx, args| async move { Ok(ctx.reply(args.user("who")?.mention())) },
    );
    Command::new("whois", "Mention a user", handler).expect("whois compiles")
}

fn hoggit() -> Group {
    let status = deferred_handler(
        [ParameterDeclaration::of::<String>("server")],
        |ctx, args| async move {
            let server = args.string("server")?.to_owned();
            ctx.update_content(format!("{server} is up")).await?;
            Ok(())
        },
    );
    Group::new("hoggit", "Hoggit servers")
        .expect("valid group")
        .with_command(Command::new("status", "Server status", status).expect("status compiles"))
        .expect("unique name")
}

fn harness_with(extra: Vec<Command>) -> Harness {
    let builder = CommandRegistry::builder()
        .command(echo())
        .command(boo())
        .command(explode())
        .command(whois())
        .group(hoggit());
    let registry = extra
        .into_iter()
        .fold(builder, |builder, command| builder.command(command))
        .build()
        .expect("registry should build");
    let rest = Arc::new(RecordingRestClient::new());
    let dispatcher = InteractionDispatcher::new(Arc::new(registry), verifier(), rest.clone());
    Harness { dispatcher, rest }
}

#[fixture]
fn harness() -> Harness {
    harness_with(Vec::new())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ping_is_answered_with_pong(harness: Harness) {
    assert_eq!(harness.send_json(&ping_body()).await, json!({"type": 1}));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn immediate_command_replies_inline(harness: Harness) {
    let body = command_body(
        "echo",
        json!([{"name": "message", "type": 3, "value": "hello"}]),
        json!({}),
    );

    assert_eq!(
        harness.send_json(&body).await,
        json!({"type": 4, "data": {"content": "hello"}})
    );
    assert!(harness.rest.edits().expect("edits").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deferred_command_is_acknowledged_then_edited(harness: Harness) {
    let body = command_body("boo", json!([]), json!({}));

    let reply = harness.send_json(&body).await;

    assert_eq!(reply, json!({"type": 5}));
    assert!(harness.rest.edits().expect("edits").is_empty());

    let edits = harness
        .rest
        .wait_for_edits(1, EDIT_WAIT)
        .await
        .expect("edits");
    let [edit] = edits.as_slice() else {
        panic!("expected one edit, got {edits:?}");
    };
    assert_eq!(edit.application_id, "app");
    assert_eq!(edit.token, "tok");
    assert_eq!(edit.body, WebhookEditBody::text("Boo!"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn group_command_receives_its_nested_options(harness: Harness) {
    let body = command_body(
        "hoggit",
        json!([{"name": "status", "type": 1, "options": [
            {"name": "server", "type": 3, "value": "dcs"}
        ]}]),
        json!({}),
    );

    assert_eq!(harness.send_json(&body).await, json!({"type": 5}));

    let edits = harness
        .rest
        .wait_for_edits(1, EDIT_WAIT)
        .await
        .expect("edits");
    assert_eq!(
        edits.first().map(|edit| &edit.body),
        Some(&WebhookEditBody::text("dcs is up"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tampered_signature_never_reaches_a_handler() {
    let mut guarded = MockHandler::new();
    guarded
        .expect_signature()
        .returning(HandlerSignature::immediate);
    guarded.expect_handle().never();
    let command = Command::new("guarded", "Guarded command", Arc::new(guarded))
        .expect("guarded compiles");
    let harness = harness_with(vec![command]);
    let body = command_body("guarded", json!([]), json!({}));
    let mut tampered = body.clone();
    tampered.push(b' ');
    let signature = sign(&body);

    let error = harness
        .dispatcher
        .dispatch(InboundRequest::signed(&signature, TIMESTAMP, &tampered))
        .await
        .expect_err("tampered body must be rejected");

    assert!(matches!(error, DispatchError::AuthenticationFailure));
    assert_eq!(error.status(), 400);
    assert_eq!(error.public_reason(), "bad signature");
}

#[rstest]
#[case::no_signature(None, Some(TIMESTAMP))]
#[case::no_timestamp(Some("00"), None)]
#[case::neither(None, None)]
#[tokio::test(flavor = "multi_thread")]
async fn missing_headers_are_rejected(
    harness: Harness,
    #[case] signature: Option<&str>,
    #[case] timestamp: Option<&str>,
) {
    let body = ping_body();
    let request = InboundRequest {
        signature,
        timestamp,
        body: &body,
    };

    let error = harness
        .dispatcher
        .dispatch(request)
        .await
        .expect_err("unsigned requests are rejected");

    assert!(matches!(error, DispatchError::AuthenticationFailure));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undecodable_body_is_malformed(harness: Harness) {
    let error = harness
        .send(b"not json")
        .await
        .expect_err("body is not an interaction");

    assert!(matches!(error, DispatchError::MalformedRequest(_)));
    assert_eq!(error.status(), 400);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn command_without_data_is_malformed(harness: Harness) {
    let body = json!({"id": "1", "type": 2, "application_id": "app", "token": "tok"})
        .to_string()
        .into_bytes();

    let error = harness.send(&body).await.expect_err("data is required");

    assert!(matches!(error, DispatchError::MalformedRequest(_)));
}

#[rstest]
#[case::unknown_root("nope", json!([]))]
#[case::unknown_sub_command("hoggit", json!([{"name": "restart", "type": 1}]))]
#[case::no_sub_command("hoggit", json!([]))]
#[tokio::test(flavor = "multi_thread")]
async fn unmatched_invocation_is_unknown_target(
    harness: Harness,
    #[case] name: &str,
    #[case] options: Value,
) {
    let body = command_body(name, options, json!({}));

    let error = harness.send(&body).await.expect_err("no command matches");

    assert!(matches!(&error, DispatchError::UnknownTarget(target) if target == name));
    assert_eq!(error.public_reason(), "unknown command");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolved_user_reaches_the_handler(harness: Harness) {
    let body = command_body(
        "whois",
        json!([{"name": "who", "type": 6, "value": "5"}]),
        json!({"users": {"5": {"id": "5", "username": "zed"}}}),
    );

    assert_eq!(
        harness.send_json(&body).await,
        json!({"type": 4, "data": {"content": "<@5>"}})
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unresolved_user_is_rejected_before_the_handler(harness: Harness) {
    let body = command_body(
        "whois",
        json!([{"name": "who", "type": 6, "value": "5"}]),
        json!({}),
    );

    let error = harness.send(&body).await.expect_err("user 5 is unresolved");

    assert!(matches!(error, DispatchError::ResolutionInconsistency(_)));
    assert_eq!(error.public_reason(), "unresolvable options");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_handler_is_a_server_error(harness: Harness) {
    let body = command_body("explode", json!([]), json!({}));

    let error = harness.send(&body).await.expect_err("handler fails");

    assert!(matches!(
        &error,
        DispatchError::HandlerFailure { command, .. } if command == "explode"
    ));
    assert_eq!(error.status(), 500);
    assert_eq!(error.public_reason(), "command failed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn immediate_handler_without_reply_fails() {
    let mut silent = MockHandler::new();
    silent
        .expect_signature()
        .returning(HandlerSignature::immediate);
    silent.expect_handle().times(1).returning(|_, _| Ok(None));
    let command =
        Command::new("silent", "Never replies", Arc::new(silent)).expect("silent compiles");
    let harness = harness_with(vec![command]);
    let body = command_body("silent", json!([]), json!({}));

    let error = harness.send(&body).await.expect_err("no reply was produced");

    assert!(matches!(
        error,
        DispatchError::HandlerFailure {
            source: HandlerError::MissingReply,
            ..
        }
    ));
}

#[rstest]
#[case::component(3)]
#[case::unknown(42)]
#[case::beyond_byte_range(300)]
#[tokio::test(flavor = "multi_thread")]
async fn unhandled_types_get_an_empty_object(harness: Harness, #[case] code: u64) {
    let body = json!({"id": "1", "type": code, "application_id": "app", "token": "tok"})
        .to_string()
        .into_bytes();

    assert_eq!(harness.send_json(&body).await, json!({}));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_deferred_edit_does_not_affect_the_acknowledgement(harness: Harness) {
    harness
        .rest
        .fail_edits_with(RestError::Status {
            status: 404,
            body: "unknown webhook".to_owned(),
        })
        .expect("configure failure");
    let body = command_body("boo", json!([]), json!({}));

    assert_eq!(harness.send_json(&body).await, json!({"type": 5}));

    let edits = harness
        .rest
        .wait_for_edits(1, Duration::from_millis(200))
        .await
        .expect("edits");
    assert!(edits.is_empty());
}
