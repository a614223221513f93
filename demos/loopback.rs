// ABOUTME: Demo application driving the dispatch engine against an in-process simulated IMS service
// ABOUTME: Shows retry marking, circuit-switched fallback, status reports and inbound acknowledgement

use argh::FromArgs;
use ims_sms::dispatcher::{
    DispatchConfig, DispatchEngine, FallbackSink, InboundPipeline, SmsListener,
    StatusReportDecoder, StatusReportOutcome, SmsTracker, Token, TransportGateway,
};
use ims_sms::{DeliverStatus, InjectResult, ReportStatus, SendStatus, SmsFormat, TransportError};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::timeout;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Send a batch of messages through a simulated IMS service
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// number of messages to send (default: 4)
    #[argh(option, short = 'n')]
    messages: Option<u32>,

    /// how many transient failures the simulated service reports per message (default: 1)
    #[argh(option)]
    transient_failures: Option<u32>,

    /// maximum resends per message; omit for the dispatcher default
    #[argh(option)]
    max_retries: Option<u32>,

    /// allow unlimited resends
    #[argh(switch)]
    unbounded: bool,
}

/// Requests the simulated IMS service has to answer
#[derive(Debug)]
enum ImsEvent {
    Sent {
        token: Token,
        message_ref: u32,
        is_retry: bool,
        pdu: Vec<u8>,
    },
    ReportAcked(Token, ReportStatus),
    InboundAcked(Token, DeliverStatus),
}

struct LoopbackGateway {
    events: UnboundedSender<ImsEvent>,
}

impl TransportGateway for LoopbackGateway {
    async fn send_message(
        &self,
        token: Token,
        message_ref: u32,
        _format: SmsFormat,
        _smsc: Option<&str>,
        is_retry: bool,
        pdu: &[u8],
    ) -> Result<(), TransportError> {
        self.events
            .send(ImsEvent::Sent {
                token,
                message_ref,
                is_retry,
                pdu: pdu.to_vec(),
            })
            .map_err(|_| TransportError::Unavailable("IMS service stopped".to_string()))
    }

    async fn acknowledge_status_report(
        &self,
        token: Token,
        _message_ref: u32,
        status: ReportStatus,
    ) -> Result<(), TransportError> {
        self.events
            .send(ImsEvent::ReportAcked(token, status))
            .map_err(|_| TransportError::Unavailable("IMS service stopped".to_string()))
    }

    async fn acknowledge_inbound_message(
        &self,
        token: Token,
        _message_ref: u32,
        status: DeliverStatus,
    ) -> Result<(), TransportError> {
        self.events
            .send(ImsEvent::InboundAcked(token, status))
            .map_err(|_| TransportError::Unavailable("IMS service stopped".to_string()))
    }

    fn current_format(&self) -> Result<SmsFormat, TransportError> {
        Ok(SmsFormat::ThreeGpp)
    }
}

struct CircuitSwitched;

impl FallbackSink for CircuitSwitched {
    async fn retry_send(&self, tracker: Arc<SmsTracker>) {
        info!(
            "Circuit-switched transport took over message_ref {}",
            tracker.message_ref()
        );
    }
}

struct AcceptAllReports;

impl StatusReportDecoder for AcceptAllReports {
    fn decode_status_report(
        &self,
        _tracker: &SmsTracker,
        _format: SmsFormat,
        pdu: &[u8],
    ) -> StatusReportOutcome {
        // TP-ST 0x00: short message received by the SME
        StatusReportOutcome::new(pdu.last() == Some(&0x00), true)
    }
}

struct Inbox;

impl InboundPipeline for Inbox {
    async fn inject_pdu(&self, pdu: &[u8], format: SmsFormat) -> InjectResult {
        info!("Inbox stored {} byte {} PDU", pdu.len(), format);
        InjectResult::Handled
    }
}

/// Decide how the simulated service answers a send, by message reference
fn verdict(message_ref: u32, is_retry: bool, transient_failures: u32, attempt: u32) -> SendStatus {
    match message_ref % 4 {
        0 => SendStatus::Ok,
        1 if attempt < transient_failures => SendStatus::ErrorRetry,
        1 => SendStatus::Ok,
        2 if !is_retry => SendStatus::ErrorFallback,
        _ => SendStatus::Error,
    }
}

async fn run_ims<L: SmsListener>(
    listener: &L,
    events: &mut UnboundedReceiver<ImsEvent>,
    transient_failures: u32,
) {
    let mut attempts = std::collections::HashMap::<u32, u32>::new();

    while let Ok(Some(event)) = timeout(Duration::from_millis(200), events.recv()).await {
        match event {
            ImsEvent::Sent {
                token,
                message_ref,
                is_retry,
                pdu,
            } => {
                let attempt = attempts.entry(message_ref).or_default();
                info!(
                    "IMS <- token {} ref {} retry={} first octet {:#04x}",
                    token, message_ref, is_retry, pdu[0]
                );
                let status = verdict(message_ref, is_retry, transient_failures, *attempt);
                *attempt += 1;

                if let Err(e) = listener
                    .on_send_result(token, message_ref, status.into(), 0)
                    .await
                {
                    warn!("Listener rejected send result: {}", e);
                    continue;
                }

                if status == SendStatus::Ok && pdu[0] & 0x20 != 0 {
                    // TP-SRR was set, deliver a status report
                    if let Err(e) = listener
                        .on_status_report(token, message_ref, "3gpp", &[0x06, 0x00])
                        .await
                    {
                        warn!("Listener rejected status report: {}", e);
                    }
                }
            }
            ImsEvent::ReportAcked(token, status) => {
                info!("IMS <- status report ack token {} {:?}", token, status)
            }
            ImsEvent::InboundAcked(token, status) => {
                info!("IMS <- inbound ack token {} {:?}", token, status)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let messages = cli_args.messages.unwrap_or(4);
    let transient_failures = cli_args.transient_failures.unwrap_or(1);

    let mut config = DispatchConfig::default();
    if let Some(max_retries) = cli_args.max_retries {
        config = config.with_max_retries(max_retries);
    }
    if cli_args.unbounded {
        config = config.with_unbounded_retries();
    }

    let (events_tx, mut events_rx) = unbounded_channel();
    let engine = DispatchEngine::new(
        LoopbackGateway { events: events_tx },
        CircuitSwitched,
        AcceptAllReports,
        Inbox,
    )
    .with_config(config);

    let mut deliveries = Vec::new();
    for message_ref in 0..messages {
        // SMS-SUBMIT, TP-SRR on every other message
        let first_octet = if message_ref % 2 == 0 { 0x21 } else { 0x01 };
        let mut builder = SmsTracker::builder()
            .message_ref(message_ref)
            .pdu(vec![first_octet, 0x00, 0x0B, 0x91, 0x44, 0x77])
            .smsc(b"+447785016005".to_vec());
        if first_octet & 0x20 != 0 {
            builder = builder.with_status_report();
        }

        let tracker = Arc::new(builder.build()?);
        deliveries.push((message_ref, tracker.subscribe()));
        let token = engine.send(tracker).await?;
        info!("Message {} submitted as token {}", message_ref, token);
    }

    engine
        .on_sms_received(Token::new(9000), "3gpp", &[0x04, 0x0B, 0x91])
        .await?;

    run_ims(&engine, &mut events_rx, transient_failures).await;

    for (message_ref, delivery) in &deliveries {
        info!("Message {} final state: {:?}", message_ref, delivery.current());
    }

    let stats = engine.statistics();
    info!("Final dispatch statistics:");
    info!("  Send attempts: {}", stats.send_attempts);
    info!("  Retries: {}", stats.retries);
    info!("  Sent: {}", stats.sent);
    info!("  Failed: {}", stats.failed);
    info!("  Fallbacks: {}", stats.fallbacks);
    info!("  Status reports: {}", stats.status_reports);
    info!("  Inbound messages: {}", stats.inbound_messages);
    info!("  Still tracked: {}", engine.trackers().len());

    Ok(())
}
