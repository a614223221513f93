// ABOUTME: Result codes produced by the inbound SMS pipeline after a PDU has been injected
// ABOUTME: Only Handled is acknowledged positively to the IMS transport

use crate::datatypes::DeliverStatus;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Result of handing a mobile-terminated PDU to the inbound pipeline
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InjectResult {
    /// Message was stored and dispatched
    Handled = 1,

    /// Pipeline failed for an unspecified reason
    GenericError = 2,

    /// No storage left for the message
    OutOfMemory = 3,

    /// Message type is not supported
    Unsupported = 4,

    /// Message was already received
    Duplicated = 5,
}

impl InjectResult {
    /// Acknowledgement code to send back for this result
    pub fn deliver_status(&self) -> DeliverStatus {
        match self {
            InjectResult::Handled => DeliverStatus::Ok,
            _ => DeliverStatus::Error,
        }
    }
}
