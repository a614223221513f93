// ABOUTME: IMS SMS dispatcher module tying together tokens, trackers, the store and the engine
// ABOUTME: Re-exports the engine, its collaborator traits, configuration and error types

//! IMS SMS Dispatcher
//!
//! Sends short messages over an IMS transport and follows each one to a
//! terminal outcome:
//!
//! * **Token-correlated tracking** - every send attempt is tracked under a
//!   fresh, strictly increasing token until a callback settles it
//! * **Retry marking** - 3GPP resends carry TP-RD and the original TP-MR
//! * **Circuit-switched fallback** - anything IMS cannot deliver is handed to
//!   the alternate transport exactly once
//! * **Concurrent callbacks** - no engine-wide lock, only a concurrent store
//!
//! ## Architecture
//!
//! * `TokenAllocator` - per-engine atomic counter, fails instead of wrapping
//! * `TrackerStore` - token to tracker table (`ConcurrentTrackerStore` default)
//! * `SmsTracker` - payload, retry count, message reference, delivery state
//! * `TransportGateway` - IMS send/acknowledge primitives
//! * `DispatchEngine` - send path plus the `SmsListener` callback contract
//! * `FallbackSink` - circuit-switched handoff
//!
//! ## Dispositions
//!
//! | send status    | effect                                            |
//! |----------------|---------------------------------------------------|
//! | OK             | `Sent`; entry kept only if a status report is due |
//! | ERROR          | `Failed`; entry removed                           |
//! | ERROR_RETRY    | retry count + 1, resent under a new token         |
//! | ERROR_FALLBACK | handed to the fallback sink; entry removed        |

pub mod config;
pub mod engine;
pub mod error;
pub mod stats;
pub mod store;
pub mod token;
pub mod traits;
pub mod types;

pub use config::DispatchConfig;
pub use engine::DispatchEngine;
pub use error::{DispatchError, DispatchResult, FailureReason, TransportError};
pub use stats::DispatchStatistics;
pub use store::{ConcurrentTrackerStore, TrackerStore};
pub use token::{Token, TokenAllocator};
pub use traits::{
    FallbackSink, InboundPipeline, SmsListener, StatusReportDecoder, TransportGateway,
};
pub use types::{
    DeliveryHandle, DeliveryState, SmsTracker, SmsTrackerBuilder, StatusReportOutcome,
};
