//! Domain events module.
//!
//! Provides domain event types, the sink trait for emitting events after
//! successful domain mutations, and a bounded feed for consumers that append
//! realtime events to a local list. Runtime adapters implement the sink to
//! translate domain events into platform-specific delivery.

mod domain_event;
mod feed;
mod sink;

pub use domain_event::*;
pub use feed::*;
pub use sink::*;
