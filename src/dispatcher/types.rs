// ABOUTME: Send tracker and delivery-state types shared between the dispatcher and its callers
// ABOUTME: A tracker owns one message's PDU, retry count and reference, and publishes its outcome

use crate::dispatcher::error::{DispatchError, DispatchResult, FailureReason};
use crate::pdu;
use bytes::{Bytes, BytesMut};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::watch;

/// Delivery state of a tracked message as seen by its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    /// Submitted, no terminal outcome yet
    Pending,
    /// Accepted by the network
    Sent,
    /// Will not be delivered
    Failed(FailureReason),
    /// Handed to the circuit-switched transport
    FellBack,
    /// Final status report received
    Delivered { success: bool },
}

impl DeliveryState {
    pub fn is_pending(&self) -> bool {
        matches!(self, DeliveryState::Pending)
    }
}

/// Decoded status report, as returned by a `StatusReportDecoder`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReportOutcome {
    /// Report was processed and should be acknowledged positively
    pub success: bool,
    /// No further status reports are expected for this message
    pub complete: bool,
}

impl StatusReportOutcome {
    pub fn new(success: bool, complete: bool) -> Self {
        Self { success, complete }
    }
}

/// One outbound message and its attempt history
///
/// Shared as `Arc<SmsTracker>` between the caller, the tracker store and
/// whichever callback currently handles it. Mutable parts are individually
/// synchronised so callbacks never need an engine-wide lock.
#[derive(Debug)]
pub struct SmsTracker {
    message_ref: u32,
    retry_count: AtomicU32,
    pdu: Mutex<BytesMut>,
    smsc: Option<Bytes>,
    status_report_requested: bool,
    state: watch::Sender<DeliveryState>,
}

impl SmsTracker {
    /// Create a tracker for an encoded PDU with default options
    pub fn new(message_ref: u32, pdu: impl Into<Bytes>) -> DispatchResult<Self> {
        Self::builder().message_ref(message_ref).pdu(pdu).build()
    }

    /// Create a builder for constructing trackers
    pub fn builder() -> SmsTrackerBuilder {
        SmsTrackerBuilder::default()
    }

    /// Transport message reference (TP-MR)
    pub fn message_ref(&self) -> u32 {
        self.message_ref
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count.load(Ordering::Acquire)
    }

    /// Increment the retry count, returning the new value
    pub(crate) fn increment_retry(&self) -> u32 {
        self.retry_count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Snapshot of the encoded PDU
    pub fn pdu(&self) -> Bytes {
        Bytes::copy_from_slice(&self.lock_pdu())
    }

    /// Service-center address bytes, if one was supplied
    pub fn smsc(&self) -> Option<&[u8]> {
        self.smsc.as_deref()
    }

    /// Service-center address as the string form the transport expects
    pub fn smsc_address(&self) -> Option<String> {
        self.smsc
            .as_ref()
            .map(|smsc| String::from_utf8_lossy(smsc).into_owned())
    }

    pub fn status_report_requested(&self) -> bool {
        self.status_report_requested
    }

    /// Set TP-RD and TP-MR in the PDU to mark this attempt as a resend
    pub(crate) fn mark_as_retry(&self) -> bool {
        let mut octets = self.lock_pdu();
        pdu::mark_as_retry(&mut octets, self.message_ref)
    }

    /// Current delivery state
    pub fn state(&self) -> DeliveryState {
        *self.state.borrow()
    }

    /// Subscribe to delivery-state changes
    pub fn subscribe(&self) -> DeliveryHandle {
        DeliveryHandle {
            rx: self.state.subscribe(),
        }
    }

    pub(crate) fn on_sent(&self) {
        self.state.send_replace(DeliveryState::Sent);
    }

    pub(crate) fn on_failed(&self, reason: FailureReason) {
        self.state.send_replace(DeliveryState::Failed(reason));
    }

    pub(crate) fn on_fallback(&self) {
        self.state.send_replace(DeliveryState::FellBack);
    }

    pub(crate) fn on_delivered(&self, success: bool) {
        self.state.send_replace(DeliveryState::Delivered { success });
    }

    fn lock_pdu(&self) -> std::sync::MutexGuard<'_, BytesMut> {
        // A poisoned lock only means a panic elsewhere; the bytes are still valid
        self.pdu.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Builder for constructing trackers with a fluent API
#[derive(Debug, Default)]
pub struct SmsTrackerBuilder {
    message_ref: u32,
    pdu: Option<Bytes>,
    smsc: Option<Bytes>,
    retry_count: u32,
    status_report_requested: bool,
}

impl SmsTrackerBuilder {
    /// Set the transport message reference
    pub fn message_ref(mut self, message_ref: u32) -> Self {
        self.message_ref = message_ref;
        self
    }

    /// Set the encoded PDU
    pub fn pdu(mut self, pdu: impl Into<Bytes>) -> Self {
        self.pdu = Some(pdu.into());
        self
    }

    /// Set the service-center address
    pub fn smsc(mut self, smsc: impl Into<Bytes>) -> Self {
        self.smsc = Some(smsc.into());
        self
    }

    /// Start from a non-zero retry count, e.g. when resuming a failed send
    pub fn retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Expect a status report after the message has been sent
    pub fn with_status_report(mut self) -> Self {
        self.status_report_requested = true;
        self
    }

    /// Build the tracker
    pub fn build(self) -> DispatchResult<SmsTracker> {
        let pdu = match self.pdu {
            Some(pdu) if !pdu.is_empty() => pdu,
            _ => return Err(DispatchError::InvalidPayload("PDU is empty".to_string())),
        };

        let (state, _) = watch::channel(DeliveryState::Pending);

        Ok(SmsTracker {
            message_ref: self.message_ref,
            retry_count: AtomicU32::new(self.retry_count),
            pdu: Mutex::new(BytesMut::from(&pdu[..])),
            smsc: self.smsc,
            status_report_requested: self.status_report_requested,
            state,
        })
    }
}

/// Caller-side view of a tracker's delivery state
#[derive(Debug, Clone)]
pub struct DeliveryHandle {
    rx: watch::Receiver<DeliveryState>,
}

impl DeliveryHandle {
    /// Current state without waiting
    pub fn current(&self) -> DeliveryState {
        *self.rx.borrow()
    }

    /// Wait until the message leaves the pending state
    ///
    /// Returns the last known state if the tracker is dropped first.
    pub async fn outcome(&mut self) -> DeliveryState {
        let outcome = self
            .rx
            .wait_for(|state| !state.is_pending())
            .await
            .map(|state| *state);
        outcome.unwrap_or_else(|_| *self.rx.borrow())
    }
}
