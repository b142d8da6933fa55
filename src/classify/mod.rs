//! Street classification subsystem.
//!
//! # Data Flow
//! ```text
//! Street name (feature "name" attribute)
//!     → classifier.rs (scan rules in priority order)
//!     → rule.rs (regex search against the name)
//!     → Return: color of first matching rule, or the default color
//!
//! Rule Compilation (at startup / on reload):
//!     RuleConfig[] or built-in rules
//!     → Compile regex + parse color
//!     → Freeze as immutable StreetClassifier
//! ```
//!
//! # Design Decisions
//! - Rules compiled once, immutable at runtime
//! - Ordered list, not a map: position is priority
//! - Deterministic: same name always yields the same color
//! - First match wins; unmatched names get the default color

pub mod classifier;
pub mod color;
pub mod rule;

pub use classifier::StreetClassifier;
pub use color::Color;
pub use rule::{builtin_rules, Rule, RuleError};
