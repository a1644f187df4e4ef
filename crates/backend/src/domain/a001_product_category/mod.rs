pub mod meta_binding;
pub mod repository;
pub mod service;
