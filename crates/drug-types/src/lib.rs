//! # drug-types
//!
//! Type definitions for the drug lookup datasets.
//!
//! This crate provides Rust types for the three read-only datasets served by
//! the drug lookup service: pairwise drug interactions, drug details grouped
//! by drug type, and per-drug contraindications.
//!
//! ## Features
//!
//! - `serde` (default): Enables deserialization from the JSON dataset files.
//!   Field names follow the source CSV headers (`"Drug 1"`, `"Brand-Name"`, ...).
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use drug_types::{text, InteractionRecord};
//!
//! let record = InteractionRecord {
//!     drug_a: "Warfarin".to_string(),
//!     drug_b: "Aspirin".to_string(),
//!     description: "Increased bleeding risk".to_string(),
//! };
//!
//! assert!(record.involves_pair(&text::fold("aspirin"), &text::fold(" WARFARIN ")));
//! ```

#![warn(missing_docs)]

mod contraindication;
mod detail;
mod interaction;
pub mod text;

// Re-export all public types at crate root
pub use contraindication::ContraindicationRecord;
pub use detail::DrugDetailRecord;
pub use interaction::InteractionRecord;
