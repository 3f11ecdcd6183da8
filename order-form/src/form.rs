//! Form state and submission controller
//!
//! A [`FormSnapshot`] is an immutable view of the form: raw values plus the
//! set of fields the user has left (blurred). Every edit produces a new
//! snapshot. [`OrderForm`] turns a snapshot into one submission.

use crate::FormError;
use order_client::OrderSubmitter;
use shared::{DishType, Field, OrderDraft, OrderValidator, ValidationReport};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

// ============================================================================
// Snapshot
// ============================================================================

/// Raw form values and touched fields at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    draft: OrderDraft,
    touched: BTreeSet<Field>,
}

impl FormSnapshot {
    pub fn new(draft: OrderDraft) -> Self {
        Self {
            draft,
            touched: BTreeSet::new(),
        }
    }

    /// Fresh form: every input present and empty, nothing touched
    pub fn initial() -> Self {
        let draft = Field::DISH_SPECIFIC
            .into_iter()
            .fold(OrderDraft::default(), |draft, field| draft.with(field, ""));
        Self::new(draft)
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn touched(&self) -> &BTreeSet<Field> {
        &self.touched
    }

    pub fn dish_type(&self) -> Option<DishType> {
        self.draft.dish_type()
    }

    /// Change event: new value, touched set unchanged
    pub fn with_value(mut self, field: Field, value: impl Into<String>) -> Self {
        self.draft.set(field, value);
        self
    }

    /// Blur event
    pub fn with_touched(mut self, field: Field) -> Self {
        self.touched.insert(field);
        self
    }

    /// Submit marks every field as touched so all errors become visible
    pub fn touch_all(mut self) -> Self {
        self.touched.extend(Field::ALL);
        self
    }

    /// Inputs to render for the current dish type
    pub fn visible_fields(&self) -> Vec<Field> {
        OrderValidator::visible_fields(self.dish_type())
    }

    pub fn report(&self) -> ValidationReport {
        OrderValidator::validate(&self.draft)
    }

    /// Errors to display: only for fields that are touched and rendered
    pub fn visible_errors(&self) -> BTreeMap<Field, String> {
        let visible = self.visible_fields();
        self.report()
            .into_field_errors()
            .into_iter()
            .filter(|(field, _)| self.touched.contains(field) && visible.contains(field))
            .collect()
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        self.report().is_valid()
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Result of one submit attempt and the form state that follows it
#[derive(Debug)]
pub struct SubmitOutcome {
    /// Initial snapshot once the order was sent (whatever the server did),
    /// the caller's snapshot when nothing was sent
    pub snapshot: FormSnapshot,
    pub result: Result<serde_json::Value, FormError>,
}

impl SubmitOutcome {
    fn kept(snapshot: FormSnapshot, error: FormError) -> Self {
        Self {
            snapshot,
            result: Err(error),
        }
    }

    fn sent(result: Result<serde_json::Value, FormError>) -> Self {
        Self {
            snapshot: FormSnapshot::initial(),
            result,
        }
    }
}

/// Submits form snapshots through an [`OrderSubmitter`]
///
/// At most one submission is in flight; a second call while one is pending
/// fails with [`FormError::AlreadySending`] without touching the network.
pub struct OrderForm<S> {
    submitter: S,
    sending: AtomicBool,
}

impl<S: OrderSubmitter> OrderForm<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            submitter,
            sending: AtomicBool::new(false),
        }
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::Acquire)
    }

    /// Submit button caption
    pub fn submit_label(&self) -> &'static str {
        if self.is_sending() { "sending..." } else { "Submit" }
    }

    /// Validate, prune and send the snapshot's order.
    ///
    /// Invalid input yields [`FormError::Validation`], nothing is sent and
    /// the snapshot comes back unchanged. Once the order passes validation
    /// the form resets, whether or not the submission succeeds.
    pub async fn submit(&self, snapshot: FormSnapshot) -> SubmitOutcome {
        let Some(_guard) = SendingGuard::acquire(&self.sending) else {
            return SubmitOutcome::kept(snapshot, FormError::AlreadySending);
        };

        let order = match OrderValidator::finalize(snapshot.draft()) {
            Ok(order) => order,
            Err(report) => {
                info!(fields = %report, "Order rejected by validation");
                return SubmitOutcome::kept(snapshot, report.into());
            }
        };

        info!(dish_type = %order.dish_type(), name = %order.name, "Submitting order");

        let result = self.submitter.submit(&order).await.map_err(|e| {
            warn!(error = %e, "Order not sent");
            FormError::Submission(e)
        });
        SubmitOutcome::sent(result)
    }
}

/// Clears the in-flight flag when the submission ends, however it ends
struct SendingGuard<'a>(&'a AtomicBool);

impl<'a> SendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use order_client::{ClientConfig, ClientError, ClientResult, HttpClient};
    use serde_json::json;
    use shared::{Dish, Order};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Records every order and answers with a fixed reply
    #[derive(Default)]
    struct RecordingSubmitter {
        sent: Mutex<Vec<Order>>,
    }

    #[async_trait]
    impl OrderSubmitter for RecordingSubmitter {
        async fn submit(&self, order: &Order) -> ClientResult<serde_json::Value> {
            self.sent.lock().unwrap().push(order.clone());
            Ok(json!({ "id": 42 }))
        }
    }

    struct FailingSubmitter;

    #[async_trait]
    impl OrderSubmitter for FailingSubmitter {
        async fn submit(&self, _order: &Order) -> ClientResult<serde_json::Value> {
            Err(ClientError::InvalidResponse("expected value".to_string()))
        }
    }

    /// Blocks until released
    #[derive(Default)]
    struct GatedSubmitter {
        gate: Notify,
    }

    #[async_trait]
    impl OrderSubmitter for GatedSubmitter {
        async fn submit(&self, _order: &Order) -> ClientResult<serde_json::Value> {
            self.gate.notified().await;
            Ok(json!({}))
        }
    }

    fn margherita() -> FormSnapshot {
        FormSnapshot::initial()
            .with_value(Field::Name, "Margherita")
            .with_value(Field::PreparationTime, "00:20:00")
            .with_value(Field::DishType, "pizza")
            .with_value(Field::NoOfSlices, "8")
            .with_value(Field::Diameter, "30")
    }

    // ========== FormSnapshot ==========

    #[test]
    fn test_initial_snapshot() {
        let snapshot = FormSnapshot::initial();
        assert!(snapshot.touched().is_empty());
        assert_eq!(snapshot.draft().no_of_slices.as_deref(), Some(""));
        assert_eq!(snapshot.visible_fields(), Field::COMMON.to_vec());
        assert!(!snapshot.can_submit());
        assert!(snapshot.visible_errors().is_empty());
    }

    #[test]
    fn test_errors_only_for_touched_fields() {
        let snapshot = FormSnapshot::initial()
            .with_value(Field::Name, "a".repeat(51))
            .with_touched(Field::Name);

        let errors = snapshot.visible_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&Field::Name], "Name is too long!");

        let all = snapshot.touch_all().visible_errors();
        assert!(all.contains_key(&Field::PreparationTime));
        assert!(all.contains_key(&Field::DishType));
    }

    #[test]
    fn test_hidden_fields_have_no_visible_errors() {
        let snapshot = FormSnapshot::initial()
            .with_value(Field::Name, "Tomato")
            .with_value(Field::PreparationTime, "00:15:00")
            .with_value(Field::DishType, "soup")
            .with_value(Field::NoOfSlices, "99")
            .touch_all();

        let errors = snapshot.visible_errors();
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![Field::SpicinessScale]);
    }

    #[test]
    fn test_can_submit_matches_validation() {
        let snapshot = margherita();
        assert!(snapshot.can_submit());
        assert!(!snapshot.clone().with_value(Field::Diameter, "46").can_submit());
    }

    // ========== OrderForm ==========

    #[tokio::test]
    async fn test_submit_sends_pruned_order() {
        let form = OrderForm::new(RecordingSubmitter::default());
        let snapshot = margherita().with_value(Field::SlicesOfBread, "3");

        let outcome = form.submit(snapshot).await;
        assert_eq!(outcome.result.unwrap()["id"], 42);
        assert_eq!(outcome.snapshot, FormSnapshot::initial());

        let sent = form.submitter().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].dish,
            Dish::Pizza {
                no_of_slices: 8,
                diameter: 30.0
            }
        );
        assert!(!form.is_sending());
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_sent() {
        let form = OrderForm::new(RecordingSubmitter::default());
        let snapshot = FormSnapshot::initial()
            .with_value(Field::Name, "Tomato")
            .with_value(Field::PreparationTime, "00:15:00")
            .with_value(Field::DishType, "soup")
            .with_value(Field::SpicinessScale, "15")
            .touch_all();

        let outcome = form.submit(snapshot.clone()).await;
        match outcome.result {
            Err(FormError::Validation(report)) => assert!(report.contains(Field::SpicinessScale)),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(form.submitter().sent.lock().unwrap().is_empty());

        // the user keeps their input and sees the errors
        assert_eq!(outcome.snapshot, snapshot);
        assert!(outcome.snapshot.visible_errors().contains_key(&Field::SpicinessScale));
    }

    #[tokio::test]
    async fn test_submitter_failure_is_submission_error() {
        let form = OrderForm::new(FailingSubmitter);
        let outcome = form.submit(margherita().touch_all()).await;
        let err = outcome.result.unwrap_err();

        assert_eq!(outcome.snapshot, FormSnapshot::initial());
        assert!(err.is_submission());
        assert!(!err.is_validation());
        assert!(!form.is_sending());
    }

    #[tokio::test]
    async fn test_transport_error_is_submission_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new(&ClientConfig::new(format!("http://{addr}/dishes"))).unwrap();
        let form = OrderForm::new(client);

        let outcome = form.submit(margherita()).await;
        assert!(
            matches!(outcome.result, Err(FormError::Submission(ClientError::Http(_)))),
            "{:?}",
            outcome.result
        );
        assert_eq!(outcome.snapshot, FormSnapshot::initial());
    }

    #[tokio::test]
    async fn test_second_submit_while_sending_is_rejected() {
        let form = OrderForm::new(GatedSubmitter::default());
        let snapshot = margherita();

        let first = form.submit(snapshot.clone());
        let second = async {
            while !form.is_sending() {
                tokio::task::yield_now().await;
            }
            assert_eq!(form.submit_label(), "sending...");
            let outcome = form.submit(snapshot.clone()).await;
            form.submitter().gate.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);
        assert!(first.result.is_ok());
        assert!(matches!(second.result, Err(FormError::AlreadySending)));
        assert_eq!(second.snapshot, snapshot);
        assert!(!form.is_sending());
        assert_eq!(form.submit_label(), "Submit");
    }
}
