// ABOUTME: Dispatch counters updated from concurrent callbacks and their point-in-time snapshot
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for dispatcher monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStatistics {
    /// IMS send attempts, including resends
    pub send_attempts: u64,
    /// Resends requested by the transport
    pub retries: u64,
    /// Messages accepted by the network
    pub sent: u64,
    /// Messages that ended in failure
    pub failed: u64,
    /// Messages handed to the circuit-switched transport
    pub fallbacks: u64,
    /// Status reports processed
    pub status_reports: u64,
    /// Mobile-terminated messages processed
    pub inbound_messages: u64,
    /// Acknowledgements the transport refused
    pub ack_failures: u64,
}

#[derive(Debug, Default)]
pub(crate) struct DispatchCounters {
    pub(crate) send_attempts: AtomicU64,
    pub(crate) retries: AtomicU64,
    pub(crate) sent: AtomicU64,
    pub(crate) failed: AtomicU64,
    pub(crate) fallbacks: AtomicU64,
    pub(crate) status_reports: AtomicU64,
    pub(crate) inbound_messages: AtomicU64,
    pub(crate) ack_failures: AtomicU64,
}

impl DispatchCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> DispatchStatistics {
        DispatchStatistics {
            send_attempts: self.send_attempts.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            sent: self.sent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            status_reports: self.status_reports.load(Ordering::Relaxed),
            inbound_messages: self.inbound_messages.load(Ordering::Relaxed),
            ack_failures: self.ack_failures.load(Ordering::Relaxed),
        }
    }
}
