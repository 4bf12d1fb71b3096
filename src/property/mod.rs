//! Property records: the data model, its display formatting and validation.

mod format;
mod types;
mod validate;

pub use format::{format_number, format_price};
pub use types::{Property, PropertyDraft, PropertyPatch, PropertyStatus};
pub use validate::{ImageLimits, ValidationError};
