//! Intent classification at the boundary to the external classifier.

mod classification;

pub use classification::{Confidence, IntentClassification};
