//! Entity detection and reversible placeholder protection

pub mod detector;
pub mod protector;

pub use detector::{EntityDetector, EntitySpan};
pub use protector::{placeholder_token, post_correction, protect, restore};
