use std::sync::Mutex;

use front_error::{
    CRITICAL_USER_ACTION, ErrorCode, ErrorHandler, ErrorRecord, RawFailure, Reporter, Severity,
    api_error, critical_error, wrap,
};
use serde_json::json;

#[derive(Default)]
struct Recorder(Mutex<Vec<String>>);

impl Reporter for Recorder {
    fn report(&self, record: &ErrorRecord) {
        self.0.lock().unwrap().push(record.log_message().to_string());
    }
}

fn assert_well_formed(rec: &ErrorRecord) {
    assert!(!rec.user_message().is_empty());
    assert!(!rec.user_action().is_empty());
    assert!(!rec.log_message().is_empty());
    assert!(!rec.context().timestamp_iso().is_empty());
}

#[test]
fn wrap_is_total_over_input_shapes() {
    let inputs: Vec<RawFailure> = vec![
        json!(null).into(),
        json!(42).into(),
        json!({}).into(),
        json!({"message": null, "nested": [1, 2]}).into(),
        "".into(),
        std::io::Error::other("plain error").into(),
        critical_error("already normalized", "storage", None, None).into(),
    ];
    for raw in inputs {
        let rec = wrap(raw, "C");
        assert_well_formed(&rec);
        assert!(rec.component().is_some());
    }
}

#[test]
fn non_error_values_are_stringified() {
    assert_eq!(wrap(json!(null), "C").log_message(), "null");
    assert_eq!(wrap(json!(42), "C").log_message(), "42");
    assert_eq!(wrap(json!({}), "C").log_message(), "{}");
    let rec = wrap(json!(42), "C");
    assert_eq!(rec.data().unwrap()["originalError"], "42");
}

#[test]
fn first_component_wins() {
    let rec = wrap(wrap(json!("x"), "A"), "B");
    assert_eq!(rec.component(), Some("A"));
}

#[test]
fn api_error_classification() {
    let rec = api_error(401, "auth", None);
    assert_eq!(rec.user_message(), "You need to log in to continue");
    assert_eq!(rec.severity(), Severity::Medium);
    assert_eq!(rec.error_code(), Some(ErrorCode::Api));
    assert_eq!(rec.status_code(), Some(401));

    let rec = api_error(500, "api", None);
    assert_eq!(rec.severity(), Severity::High);
    assert_eq!(rec.user_message(), "Server error - we're looking into it");

    let rec = api_error(999, "api", Some("upstream said no"));
    assert_eq!(rec.user_message(), "Something went wrong with the request");
    assert_eq!(rec.log_message(), "upstream said no");
}

#[test]
fn critical_error_shape() {
    let rec = critical_error("disk full", "storage", None, None);
    assert_eq!(rec.error_code(), Some(ErrorCode::Critical));
    assert_eq!(rec.severity(), Severity::Critical);
    assert_eq!(rec.user_action(), CRITICAL_USER_ACTION);
    assert_eq!(rec.user_message(), "A critical error occurred");
    assert_eq!(rec.log_message(), "disk full");
    assert!(rec.cause().is_none());
}

#[tokio::test]
async fn handle_async_rejection_carries_record() {
    let handler = ErrorHandler::new(Recorder::default());
    let out: Result<u32, ErrorRecord> = handler
        .handle_async(|| async { Err::<u32, _>("boom") }, "X", None)
        .await;
    let rec = out.unwrap_err();
    assert_eq!(rec.component(), Some("X"));
    assert_eq!(rec.log_message(), "boom");
    assert_eq!(*handler.reporter().0.lock().unwrap(), vec!["boom"]);
}

#[tokio::test]
async fn handle_async_success_passes_through() {
    let handler = ErrorHandler::new(Recorder::default());
    let out = handler
        .handle_async(|| async { Ok::<_, std::io::Error>(5) }, "X", Some("unused"))
        .await;
    assert_eq!(out.unwrap(), 5);
    assert!(handler.reporter().0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn nested_handle_async_keeps_inner_component() {
    let handler = ErrorHandler::new(Recorder::default());
    let inner = &handler;
    let out: Result<(), ErrorRecord> = handler
        .handle_async(
            || async move {
                inner
                    .handle_async(|| async { Err::<(), _>("deep") }, "inner", None)
                    .await
            },
            "outer",
            None,
        )
        .await;
    let rec = out.unwrap_err();
    assert_eq!(rec.component(), Some("inner"));
    // Reported once per boundary it crossed.
    assert_eq!(handler.reporter().0.lock().unwrap().len(), 2);
}
