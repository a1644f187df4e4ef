pub mod config;
pub mod data;
pub mod html;
pub mod slider;
pub mod term_meta;
