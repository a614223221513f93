// ABOUTME: Defines the send-result status codes reported by the IMS transport for an outbound SMS
// ABOUTME: Each code selects one disposition in the dispatcher: sent, failed, retry or fallback

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Outcome of an IMS send attempt, as delivered to `on_send_result`
///
/// The transport decides which disposition applies; the dispatcher only
/// interprets it. Codes outside this set are ignored by the dispatcher.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SendStatus {
    /// Message accepted by the network
    Ok = 1,

    /// Permanent failure, the message will not be delivered
    Error = 2,

    /// Transient failure, resend over IMS with TP-RD set
    ErrorRetry = 3,

    /// IMS cannot deliver this message, resend over the circuit-switched path
    ErrorFallback = 4,
}
