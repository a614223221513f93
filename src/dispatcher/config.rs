// ABOUTME: Dispatcher configuration for retry bounds and stale tracker handling
// ABOUTME: Follows the Default-plus-builder style used for the other client configuration types

/// Configuration for the dispatch engine's retry and bookkeeping policy
///
/// # Example
///
/// ```rust
/// use ims_sms::dispatcher::DispatchConfig;
///
/// // Default configuration (3 retries, stale entries reaped)
/// let config = DispatchConfig::default();
///
/// // Unbounded retries, keep entries the way legacy transports expect
/// let config = DispatchConfig::default()
///     .with_unbounded_retries()
///     .retain_stale_entries();
/// assert_eq!(config.max_retries, None);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum number of IMS resends for one message (default: 3)
    ///
    /// Once a transient failure would push the retry count past this bound
    /// the message fails with `RetriesExhausted`. `None` retries for as long
    /// as the transport keeps asking.
    pub max_retries: Option<u32>,

    /// Remove entries that no callback will ever reference again (default: true)
    ///
    /// Covers the token of an attempt that is being retried under a new
    /// token, and the token of a successful send that expects no status
    /// report. When false those entries are left in the store.
    pub reap_stale_entries: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_retries: Some(3),
            reap_stale_entries: true,
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of resends
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Resend for as long as the transport requests it
    pub fn with_unbounded_retries(mut self) -> Self {
        self.max_retries = None;
        self
    }

    /// Leave retried and successfully sent entries in the store
    pub fn retain_stale_entries(mut self) -> Self {
        self.reap_stale_entries = false;
        self
    }

    /// Whether a message that has been retried `retry_count` times may be sent again
    pub fn allows_retry(&self, retry_count: u32) -> bool {
        self.max_retries.is_none_or(|max| retry_count <= max)
    }
}
