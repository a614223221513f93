// ABOUTME: Defines the SMS format tag reported by the IMS transport and carried on every callback
// ABOUTME: Parses the wire strings "3gpp" and "3gpp2" and maps anything else to Unknown

use std::fmt;
use std::str::FromStr;

/// SMS encoding family in use on the IMS link
///
/// The IMS service reports the format it expects for outbound PDUs and tags
/// every inbound PDU and status report with the format it was encoded in.
/// Only the 3GPP (GSM/UMTS/LTE) family carries the TP-RD/TP-MR fields that
/// the dispatcher rewrites when retrying a submission.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SmsFormat {
    /// 3GPP TS 23.040 PDUs
    ThreeGpp,
    /// 3GPP2 C.S0015 PDUs (CDMA family)
    ThreeGpp2,
    /// Format could not be determined
    #[default]
    Unknown,
}

impl SmsFormat {
    /// Wire tag for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            SmsFormat::ThreeGpp => "3gpp",
            SmsFormat::ThreeGpp2 => "3gpp2",
            SmsFormat::Unknown => "unknown",
        }
    }

    /// Parse a wire tag, falling back to `Unknown` for anything unrecognised
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "3gpp" => SmsFormat::ThreeGpp,
            "3gpp2" => SmsFormat::ThreeGpp2,
            _ => SmsFormat::Unknown,
        }
    }

    /// True for the CDMA family, which originates messages in 3GPP2 format
    pub fn is_cdma(&self) -> bool {
        *self == SmsFormat::ThreeGpp2
    }
}

impl FromStr for SmsFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SmsFormat::from_tag(s))
    }
}

impl fmt::Display for SmsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
