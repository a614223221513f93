pub mod datatypes;
pub mod dispatcher;
pub mod pdu;


// Re-export the wire datatypes for direct access
pub use datatypes::{DeliverStatus, InjectResult, ReportStatus, SendStatus, SmsFormat};

// Re-export the main dispatcher API for easy access
pub use dispatcher::{
    DeliveryHandle, DeliveryState, DispatchConfig, DispatchEngine, DispatchError, DispatchResult,
    FailureReason, SmsListener, SmsTracker, Token, TransportError,
};

/// A specialized `Result` type for dispatcher operations.
///
/// This is defined as a convenience.
///
/// # Examples
///
/// ## Sending over IMS
///
/// The engine is generic over its four collaborators. A gateway that reports
/// every send as accepted looks like this:
///
/// ```rust
/// use ims_sms::dispatcher::{
///     FallbackSink, InboundPipeline, SmsListener, StatusReportDecoder, StatusReportOutcome,
///     TransportGateway,
/// };
/// use ims_sms::{
///     DeliverStatus, DeliveryState, DispatchEngine, InjectResult, ReportStatus, SendStatus,
///     SmsFormat, SmsTracker, Token, TransportError,
/// };
/// use std::sync::Arc;
///
/// struct Ims;
///
/// impl TransportGateway for Ims {
///     async fn send_message(
///         &self,
///         _token: Token,
///         _message_ref: u32,
///         _format: SmsFormat,
///         _smsc: Option<&str>,
///         _is_retry: bool,
///         _pdu: &[u8],
///     ) -> Result<(), TransportError> {
///         Ok(())
///     }
///
///     async fn acknowledge_status_report(
///         &self,
///         _token: Token,
///         _message_ref: u32,
///         _status: ReportStatus,
///     ) -> Result<(), TransportError> {
///         Ok(())
///     }
///
///     async fn acknowledge_inbound_message(
///         &self,
///         _token: Token,
///         _message_ref: u32,
///         _status: DeliverStatus,
///     ) -> Result<(), TransportError> {
///         Ok(())
///     }
///
///     fn current_format(&self) -> Result<SmsFormat, TransportError> {
///         Ok(SmsFormat::ThreeGpp)
///     }
/// }
///
/// struct Pstn;
///
/// impl FallbackSink for Pstn {
///     async fn retry_send(&self, _tracker: Arc<SmsTracker>) {}
/// }
///
/// struct Reports;
///
/// impl StatusReportDecoder for Reports {
///     fn decode_status_report(
///         &self,
///         _tracker: &SmsTracker,
///         _format: SmsFormat,
///         _pdu: &[u8],
///     ) -> StatusReportOutcome {
///         StatusReportOutcome::new(true, true)
///     }
/// }
///
/// struct Inbox;
///
/// impl InboundPipeline for Inbox {
///     async fn inject_pdu(&self, _pdu: &[u8], _format: SmsFormat) -> InjectResult {
///         InjectResult::Handled
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let engine = DispatchEngine::new(Ims, Pstn, Reports, Inbox);
///
///     let tracker = Arc::new(SmsTracker::new(7, vec![0x01, 0x00, 0x0B, 0x91])?);
///     let mut delivery = tracker.subscribe();
///
///     let token = engine.send(tracker).await?;
///     engine
///         .on_send_result(token, 7, SendStatus::Ok.into(), 0)
///         .await?;
///
///     assert_eq!(delivery.outcome().await, DeliveryState::Sent);
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, DispatchError>;
