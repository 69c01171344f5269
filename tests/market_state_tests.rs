use std::io::Write;
use std::sync::{Arc, Mutex};

use crypto_heatmap::error::AppError;
use crypto_heatmap::feed::{decode_payload, Applied, MarketState, Payload};

fn payload(body: &str) -> Result<Payload, AppError> {
    decode_payload(body)
}

fn transport_error() -> Result<Payload, AppError> {
    Err(AppError::HttpStatus {
        status: 502,
        body: "bad gateway".to_string(),
    })
}

const TWO_COINS: &str = r#"[
    {"symbol":"ETH","open":"10","close":"11","volume":"5"},
    {"symbol":"BTC","open":"100","close":"110","volume":"10"}
]"#;

#[test]
fn records_replace_latest_and_publish_sorted_series() {
    let mut state = MarketState::new();
    match state.apply(1, payload(TWO_COINS)) {
        Applied::Published(series) => {
            assert_eq!(series.symbols(), &["BTC", "ETH"]);
            assert_eq!(series.sizes(), &[1100.0, 55.0]);
        }
        other => panic!("expected publish, got {:?}", other),
    }
    assert_eq!(state.latest().len(), 2);
    assert_eq!(state.last_applied_seq(), Some(1));

    // Full replacement, no merge with the previous list.
    let one = r#"[{"symbol":"SOL","open":"1","close":"1","volume":"1"}]"#;
    state.apply(2, payload(one));
    assert_eq!(state.latest().len(), 1);
    assert_eq!(state.latest()[0].symbol, "SOL");
}

/// An empty array clears the latest data and still publishes (empty) sequences.
#[test]
fn empty_array_clears_and_publishes_empty_series() {
    let mut state = MarketState::new();
    state.apply(1, payload(TWO_COINS));

    match state.apply(2, payload("[]")) {
        Applied::Published(series) => {
            assert!(series.is_empty());
            assert!(series.sizes().is_empty());
            assert!(series.colors().is_empty());
        }
        other => panic!("expected publish, got {:?}", other),
    }
    assert!(state.latest().is_empty());
}

#[test]
fn non_array_body_is_treated_like_empty() {
    let mut state = MarketState::new();
    state.apply(1, payload(TWO_COINS));
    let applied = state.apply(2, payload(r#"{"message":"maintenance"}"#));
    assert!(matches!(applied, Applied::Published(ref s) if s.is_empty()));
    assert!(state.latest().is_empty());
}

#[test]
fn transport_failure_keeps_stale_data() {
    let mut state = MarketState::new();
    state.apply(1, payload(TWO_COINS));

    assert_eq!(state.apply(2, transport_error()), Applied::Retained);
    assert_eq!(state.latest().len(), 2);
    assert_eq!(state.last_applied_seq(), Some(1));

    assert_eq!(state.apply(3, payload("{not json")), Applied::Retained);
    assert_eq!(state.latest().len(), 2);
}

#[test]
fn out_of_order_responses_are_discarded() {
    let mut state = MarketState::new();
    let newer = r#"[{"symbol":"NEW","open":"1","close":"2","volume":"1"}]"#;
    let older = r#"[{"symbol":"OLD","open":"1","close":"2","volume":"1"}]"#;

    assert!(matches!(state.apply(5, payload(newer)), Applied::Published(_)));
    assert_eq!(state.apply(4, payload(older)), Applied::Stale);
    assert_eq!(state.apply(5, payload(older)), Applied::Stale);
    assert_eq!(state.latest()[0].symbol, "NEW");
}

#[test]
fn failures_do_not_advance_sequence() {
    let mut state = MarketState::new();
    state.apply(1, payload(TWO_COINS));
    assert_eq!(state.apply(3, transport_error()), Applied::Retained);

    // Fetch 2 finished after fetch 3 failed; it is still newer than what is shown.
    let late = r#"[{"symbol":"LATE","open":"1","close":"2","volume":"1"}]"#;
    assert!(matches!(state.apply(2, payload(late)), Applied::Published(_)));
    assert_eq!(state.last_applied_seq(), Some(2));
}

#[test]
fn records_with_zero_open_are_dropped() {
    let mut state = MarketState::new();
    let body = r#"[
        {"symbol":"ZERO","open":"0","close":"1","volume":"1"},
        {"symbol":"OK","open":"1","close":"1","volume":"1"}
    ]"#;
    match state.apply(1, payload(body)) {
        Applied::Published(series) => assert_eq!(series.symbols(), &["OK"]),
        other => panic!("expected publish, got {:?}", other),
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn empty_array_emits_warning() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let mut state = MarketState::new();
    tracing::subscriber::with_default(subscriber, || {
        state.apply(1, payload(TWO_COINS));
        state.apply(2, payload("[]"));
    });

    let text = logs.text();
    assert!(text.contains("WARN"), "{}", text);
    assert!(text.contains("API returned empty or invalid data"), "{}", text);
    assert_eq!(text.lines().count(), 1, "{}", text);
}
