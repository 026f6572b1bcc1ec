//! Capabilities module - named features whose backend may be unavailable.
//!
//! Call sites go through a trait per feature. A feature without a backend is
//! served by an adapter that fails with [`crate::Error::FeatureUnavailable`],
//! so a real implementation can be swapped in at wiring time.

mod capabilities_model;
mod letters_of_intent;

pub use capabilities_model::{Capability, CapabilitySet, CapabilityStatus};
pub use letters_of_intent::{
    LetterOfIntent, LetterOfIntentServiceTrait, NewLetterOfIntent, UnavailableLetterOfIntentService,
};
