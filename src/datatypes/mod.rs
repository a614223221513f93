mod ack_status;
mod inject_result;
mod send_status;
mod sms_format;

pub use ack_status::{DeliverStatus, ReportStatus};
pub use inject_result::InjectResult;
pub use send_status::SendStatus;
pub use sms_format::SmsFormat;
