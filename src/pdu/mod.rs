// Raw PDU manipulation that the dispatcher performs itself.
//
// Encoding and decoding of full PDUs is the codec's job; the dispatcher only
// touches the handful of header octets it needs to mark a retry.

pub mod submit;

pub use submit::{is_submit, mark_as_retry};
