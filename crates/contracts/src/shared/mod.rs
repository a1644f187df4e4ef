pub mod meta_fields;
pub mod slider;
