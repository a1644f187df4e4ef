//! Declarative description of term meta fields
//!
//! A [`FieldSet`] drives both the admin form renderer and the persister in
//! the backend. Field kinds carry their own options, so rendering and
//! validation are exhaustive matches over [`FieldKind`].
//!
//! ```rust,ignore
//! use contracts::shared::meta_fields::{FieldSchema, FieldSet};
//!
//! let fields = FieldSet::new(vec![
//!     FieldSchema::image("wcs_slider_image", "Slider Image")
//!         .description("Slider image for the category"),
//! ])?;
//! ```

mod field_kind;
mod types;
mod validation;

pub use field_kind::{is_truthy, FieldKind, MetaValue, SelectOption};
pub use types::{FieldSchema, FieldSet, FieldSetError};
pub use validation::normalize_submission;
