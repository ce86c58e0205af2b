//! Anomaly event publication
//!
//! The cumulative aggregator publishes trend-shift events to every registered
//! subscriber. Delivery is best effort: a failing subscriber is logged and
//! reported, and the remaining subscribers still receive the event.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;

/// Kind of anomaly detected on a cumulative parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyKind {
    /// Batch mean moved more than the sigma threshold away from the stored mean
    TrendShift,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::TrendShift => write!(f, "Trend Shift"),
        }
    }
}

/// Severity attached to an anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// A detected anomaly ready for fan-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    pub parameter_name: String,
    pub dataset_type: String,
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub message: String,
    pub triggering_upload_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Stored mean before the batch was merged
    pub prior_mean: f64,
    /// Mean of the triggering batch
    pub batch_mean: f64,
    /// |batch_mean − prior_mean| in stored standard deviations
    pub sigma_distance: f64,
}

impl fmt::Display for AnomalyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} on {}/{}: {}",
            self.severity, self.kind, self.dataset_type, self.parameter_name, self.message
        )
    }
}

/// Recipient of anomaly events
///
/// Implementations wrap the external notification collaborator (persisted
/// notifications, mail, chat). They must not block for long: publication is
/// synchronous with the merge that raised the event.
pub trait AnomalySubscriber: Send + Sync {
    /// Deliver an event
    fn deliver(&self, event: &AnomalyEvent) -> Result<()>;

    /// Get the name of this subscriber for logging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Outcome of publishing one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryReport {
    /// Subscribers that accepted the event
    pub delivered: usize,
    /// (subscriber name, error message) for each failed delivery
    pub failures: Vec<(String, String)>,
}

impl DeliveryReport {
    /// Check if every subscriber accepted the event
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fan-out bus for anomaly events
pub struct AnomalyBus {
    subscribers: Arc<Mutex<Vec<Arc<dyn AnomalySubscriber>>>>,
}

impl AnomalyBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a subscriber
    pub fn register<S>(&self, subscriber: S)
    where
        S: AnomalySubscriber + 'static,
    {
        self.subscribers.lock().push(Arc::new(subscriber));
    }

    /// Register a subscriber that the caller keeps a handle to
    pub fn register_shared(&self, subscriber: Arc<dyn AnomalySubscriber>) {
        self.subscribers.lock().push(subscriber);
    }

    /// Get the number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Publish an event to every subscriber
    ///
    /// Failures are logged and collected; they never stop delivery to the
    /// remaining subscribers.
    pub fn publish(&self, event: &AnomalyEvent) -> DeliveryReport {
        // Snapshot so subscribers may register others without deadlocking
        let subscribers: Vec<Arc<dyn AnomalySubscriber>> = self.subscribers.lock().clone();
        let mut report = DeliveryReport::default();

        for subscriber in subscribers {
            match subscriber.deliver(event) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::error!(
                        subscriber = subscriber.name(),
                        parameter = %event.parameter_name,
                        error = %e,
                        "Anomaly notification failed"
                    );
                    report.failures.push((subscriber.name().to_string(), e.to_string()));
                }
            }
        }

        report
    }
}

impl Default for AnomalyBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AnomalyBus {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

/// Subscriber that writes each event to the tracing log
#[derive(Debug, Default, Clone)]
pub struct LoggingSubscriber;

impl AnomalySubscriber for LoggingSubscriber {
    fn deliver(&self, event: &AnomalyEvent) -> Result<()> {
        tracing::warn!(
            parameter = %event.parameter_name,
            dataset_type = %event.dataset_type,
            severity = %event.severity,
            upload = %event.triggering_upload_id,
            "{}",
            event.message
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "logging"
    }
}

/// Subscriber that keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSubscriber {
    events: Arc<Mutex<Vec<AnomalyEvent>>>,
}

impl RecordingSubscriber {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<AnomalyEvent> {
        self.events.lock().clone()
    }
}

impl AnomalySubscriber for RecordingSubscriber {
    fn deliver(&self, event: &AnomalyEvent) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
