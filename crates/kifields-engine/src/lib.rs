//! Core engine for editing KiCad Eeschema's default field order.
//!
//! Eeschema stores its default fields as an S-expression string inside
//! `eeschema.json` under `drawing.field_names`:
//!
//! ```text
//! (templatefields
//!   (field (name "MANUFACTURER") visible)
//!   (field (name "COMPONENT_LINK_URL") url)
//!   (field (name "ZZZ") visible url))
//! ```
//!
//! This crate converts between that notation and an ordered, editable
//! list of fields, and back. Flag text after a field's name is kept as
//! an opaque string so tokens this crate has never heard of survive the
//! round trip unchanged. The crate does no I/O; callers hand it the raw
//! string and persist whatever it produces.

pub mod editing;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use editing::{Direction, FieldList};
pub use models::Field;
pub use parsing::parse_field_names;
