// ABOUTME: Dispatch engine that sends SMS over IMS and interprets the transport's asynchronous callbacks
// ABOUTME: Applies the retry and circuit-switched fallback policy while keeping the tracker store consistent

use crate::datatypes::{ReportStatus, SendStatus, SmsFormat};
use crate::dispatcher::config::DispatchConfig;
use crate::dispatcher::error::{DispatchResult, FailureReason};
use crate::dispatcher::stats::{DispatchCounters, DispatchStatistics};
use crate::dispatcher::store::{ConcurrentTrackerStore, TrackerStore};
use crate::dispatcher::token::{Token, TokenAllocator};
use crate::dispatcher::traits::{
    FallbackSink, InboundPipeline, SmsListener, StatusReportDecoder, TransportGateway,
};
use crate::dispatcher::types::SmsTracker;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Sends messages over IMS and drives them to a terminal outcome
///
/// The engine owns its token allocator and (by default) its tracker store;
/// there is no process-wide state. It implements [`SmsListener`], so the IMS
/// transport delivers its callbacks straight to it. Callbacks for different
/// tokens may run concurrently; the only shared mutable state is the tracker
/// store.
///
/// # Example
///
/// ```rust,ignore
/// let engine = DispatchEngine::new(gateway, fallback, decoder, pipeline)
///     .with_config(DispatchConfig::default().with_max_retries(5));
///
/// let tracker = Arc::new(SmsTracker::new(message_ref, pdu)?);
/// let mut delivery = tracker.subscribe();
/// let token = engine.send(tracker).await?;
///
/// // ... the transport calls engine.on_send_result(token, ..) later
/// let state = delivery.outcome().await;
/// ```
pub struct DispatchEngine<G, F, D, P> {
    config: DispatchConfig,
    gateway: G,
    fallback: F,
    decoder: D,
    pipeline: P,
    tokens: TokenAllocator,
    trackers: Arc<dyn TrackerStore>,
    counters: DispatchCounters,
}

impl<G, F, D, P> DispatchEngine<G, F, D, P>
where
    G: TransportGateway,
    F: FallbackSink,
    D: StatusReportDecoder,
    P: InboundPipeline,
{
    /// Create an engine with the default configuration and an empty store
    pub fn new(gateway: G, fallback: F, decoder: D, pipeline: P) -> Self {
        Self {
            config: DispatchConfig::default(),
            gateway,
            fallback,
            decoder,
            pipeline,
            tokens: TokenAllocator::new(),
            trackers: Arc::new(ConcurrentTrackerStore::new()),
            counters: DispatchCounters::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an externally provided tracker store
    pub fn with_store(mut self, store: Arc<dyn TrackerStore>) -> Self {
        self.trackers = store;
        self
    }

    /// Use a specific token allocator
    pub fn with_tokens(mut self, tokens: TokenAllocator) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Tracker store used by this engine
    pub fn trackers(&self) -> &dyn TrackerStore {
        self.trackers.as_ref()
    }

    /// Snapshot of the dispatch counters
    pub fn statistics(&self) -> DispatchStatistics {
        self.counters.snapshot()
    }

    /// Format the IMS service currently expects, `Unknown` if it cannot say
    pub fn current_format(&self) -> SmsFormat {
        self.gateway.current_format().unwrap_or_else(|e| {
            error!("Failed to get SMS format: {}", e);
            SmsFormat::Unknown
        })
    }

    /// Send a message over IMS
    ///
    /// Marks 3GPP resends with TP-RD/TP-MR, allocates a fresh token and
    /// tracks the message under it before the transport is invoked, so a
    /// racing callback always finds it. If the transport cannot be reached
    /// the message falls back to the circuit-switched path under the same
    /// token. Returns the token the attempt is tracked under.
    pub async fn send(&self, tracker: Arc<SmsTracker>) -> DispatchResult<Token> {
        let format = self.current_format();
        let retry_count = tracker.retry_count();
        let is_retry = retry_count > 0;

        debug!(
            "send: retry_count={} message_ref={} format={}",
            retry_count,
            tracker.message_ref(),
            format
        );

        if format == SmsFormat::ThreeGpp && is_retry && tracker.mark_as_retry() {
            debug!("Marked PDU as resend of message_ref {}", tracker.message_ref());
        }

        let token = self.tokens.next()?;
        self.trackers.insert(token, Arc::clone(&tracker))?;
        DispatchCounters::bump(&self.counters.send_attempts);

        let pdu = tracker.pdu();
        let smsc = tracker.smsc_address();
        let result = self
            .gateway
            .send_message(
                token,
                tracker.message_ref(),
                format,
                smsc.as_deref(),
                is_retry,
                &pdu,
            )
            .await;

        if let Err(e) = result {
            error!("send failed for token {}, falling back: {}", token, e);
            self.fallback_to_pstn(token, tracker).await;
        }

        Ok(token)
    }

    /// Hand a message to the circuit-switched transport and stop tracking `token`
    ///
    /// Always calls the fallback sink exactly once, whatever state the
    /// tracker is in. No further IMS acknowledgement happens for `token`.
    pub async fn fallback_to_pstn(&self, token: Token, tracker: Arc<SmsTracker>) {
        warn!("Falling back to circuit-switched transport for token {}", token);
        self.hand_off(tracker).await;
        self.release(token);
    }

    async fn hand_off(&self, tracker: Arc<SmsTracker>) {
        tracker.on_fallback();
        DispatchCounters::bump(&self.counters.fallbacks);
        self.fallback.retry_send(tracker).await;
    }

    async fn resend(&self, token: Token, tracker: Arc<SmsTracker>) {
        let retries = tracker.increment_retry();
        DispatchCounters::bump(&self.counters.retries);

        if !self.config.allows_retry(retries) {
            warn!(
                "Giving up on message_ref {} after {} retries",
                tracker.message_ref(),
                retries
            );
            tracker.on_failed(FailureReason::RetriesExhausted { retries });
            DispatchCounters::bump(&self.counters.failed);
            self.release(token);
            return;
        }

        if self.config.reap_stale_entries {
            self.release(token);
        }

        if let Err(e) = self.send(Arc::clone(&tracker)).await {
            error!("Resend of token {} failed: {}", token, e);
            self.hand_off(tracker).await;
        }
    }

    fn release(&self, token: Token) {
        if let Err(e) = self.trackers.remove(token) {
            debug!("Release skipped: {}", e);
        }
    }
}

impl<G, F, D, P> SmsListener for DispatchEngine<G, F, D, P>
where
    G: TransportGateway,
    F: FallbackSink,
    D: StatusReportDecoder,
    P: InboundPipeline,
{
    async fn on_send_result(
        &self,
        token: Token,
        message_ref: u32,
        status: i32,
        reason: i32,
    ) -> DispatchResult<()> {
        let tracker = self
            .trackers
            .get(token)
            .inspect_err(|e| error!("Send result for message_ref {}: {}", message_ref, e))?;

        let Ok(status) = SendStatus::try_from(status) else {
            debug!("Ignoring unrecognised send status {} for token {}", status, token);
            return Ok(());
        };
        debug!("Send result for token {}: {:?} (reason {})", token, status, reason);

        match status {
            SendStatus::Ok => {
                tracker.on_sent();
                DispatchCounters::bump(&self.counters.sent);
                if self.config.reap_stale_entries && !tracker.status_report_requested() {
                    self.release(token);
                }
            }
            SendStatus::Error => {
                warn!("Send failed for token {} with reason {}", token, reason);
                tracker.on_failed(FailureReason::Transport {
                    reason,
                    error_code: 0,
                });
                DispatchCounters::bump(&self.counters.failed);
                self.release(token);
            }
            SendStatus::ErrorRetry => self.resend(token, tracker).await,
            SendStatus::ErrorFallback => self.fallback_to_pstn(token, tracker).await,
        }

        Ok(())
    }

    async fn on_status_report(
        &self,
        token: Token,
        message_ref: u32,
        format: &str,
        pdu: &[u8],
    ) -> DispatchResult<()> {
        debug!("Status report received for token {}", token);
        let tracker = self
            .trackers
            .get(token)
            .inspect_err(|e| error!("Status report for message_ref {}: {}", message_ref, e))?;

        let outcome =
            self.decoder
                .decode_status_report(&tracker, SmsFormat::from_tag(format), pdu);
        debug!(
            "Status report handled, success: {} complete: {}",
            outcome.success, outcome.complete
        );
        DispatchCounters::bump(&self.counters.status_reports);

        let status = ReportStatus::from_success(outcome.success);
        if let Err(e) = self
            .gateway
            .acknowledge_status_report(token, message_ref, status)
            .await
        {
            error!("Failed to acknowledge status report: {}", e);
            DispatchCounters::bump(&self.counters.ack_failures);
        }

        if outcome.complete {
            tracker.on_delivered(outcome.success);
            self.release(token);
        }

        Ok(())
    }

    async fn on_sms_received(&self, token: Token, format: &str, pdu: &[u8]) -> DispatchResult<()> {
        info!("SMS received on token {}", token);
        let result = self
            .pipeline
            .inject_pdu(pdu, SmsFormat::from_tag(format))
            .await;
        debug!("SMS handled result: {:?}", result);
        DispatchCounters::bump(&self.counters.inbound_messages);

        if let Err(e) = self
            .gateway
            .acknowledge_inbound_message(token, 0, result.deliver_status())
            .await
        {
            error!("Failed to acknowledge SMS: {}", e);
            DispatchCounters::bump(&self.counters.ack_failures);
        }

        Ok(())
    }
}
