// ABOUTME: Acknowledgement codes returned to the IMS transport for status reports and inbound messages
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Acknowledgement for a received status report
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReportStatus {
    Ok = 1,
    Error = 2,
}

impl ReportStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            ReportStatus::Ok
        } else {
            ReportStatus::Error
        }
    }
}

/// Acknowledgement for a mobile-terminated message
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeliverStatus {
    Ok = 1,
    Error = 2,
}
