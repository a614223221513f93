// ABOUTME: Collaborator traits at the dispatcher's boundary, using native async functions
// ABOUTME: Covers the IMS transport, its listener contract, fallback, status-report decoding and inbound injection

use crate::datatypes::{DeliverStatus, InjectResult, ReportStatus, SmsFormat};
use crate::dispatcher::error::{DispatchResult, TransportError};
use crate::dispatcher::token::Token;
use crate::dispatcher::types::{SmsTracker, StatusReportOutcome};
use std::sync::Arc;

/// IMS send and acknowledge primitives
///
/// Thin adapter over the IMS service. Implementations must tolerate being
/// called from several callbacks at once.
pub trait TransportGateway {
    /// Submit an encoded PDU over IMS
    ///
    /// An error means the request never reached the IMS service; the
    /// dispatcher responds by falling back to the circuit-switched transport.
    async fn send_message(
        &self,
        token: Token,
        message_ref: u32,
        format: SmsFormat,
        smsc: Option<&str>,
        is_retry: bool,
        pdu: &[u8],
    ) -> Result<(), TransportError>;

    /// Acknowledge a status report previously delivered to `on_status_report`
    async fn acknowledge_status_report(
        &self,
        token: Token,
        message_ref: u32,
        status: ReportStatus,
    ) -> Result<(), TransportError>;

    /// Acknowledge a mobile-terminated message delivered to `on_sms_received`
    async fn acknowledge_inbound_message(
        &self,
        token: Token,
        message_ref: u32,
        status: DeliverStatus,
    ) -> Result<(), TransportError>;

    /// SMS format currently expected by the IMS service
    fn current_format(&self) -> Result<SmsFormat, TransportError>;
}

/// Callback contract the IMS transport drives
///
/// Callbacks may arrive concurrently and re-entrantly. Errors returned here
/// go back to the transport, not to the message's original caller.
pub trait SmsListener {
    /// Result of a send attempt
    ///
    /// `status` is the raw send-status code; codes outside `SendStatus` are
    /// ignored. `reason` is carried into a terminal failure.
    async fn on_send_result(
        &self,
        token: Token,
        message_ref: u32,
        status: i32,
        reason: i32,
    ) -> DispatchResult<()>;

    /// Status report for a tracked message
    async fn on_status_report(
        &self,
        token: Token,
        message_ref: u32,
        format: &str,
        pdu: &[u8],
    ) -> DispatchResult<()>;

    /// Mobile-terminated message, unrelated to any tracked send
    async fn on_sms_received(&self, token: Token, format: &str, pdu: &[u8]) -> DispatchResult<()>;
}

/// Alternate (circuit-switched) transport
pub trait FallbackSink {
    /// Hand a message over for delivery on the alternate transport
    async fn retry_send(&self, tracker: Arc<SmsTracker>);
}

/// Interprets status-report PDUs
pub trait StatusReportDecoder {
    fn decode_status_report(
        &self,
        tracker: &SmsTracker,
        format: SmsFormat,
        pdu: &[u8],
    ) -> StatusReportOutcome;
}

/// Mobile-terminated message processing
pub trait InboundPipeline {
    /// Inject a received PDU and wait for the pipeline's verdict
    async fn inject_pdu(&self, pdu: &[u8], format: SmsFormat) -> InjectResult;
}
