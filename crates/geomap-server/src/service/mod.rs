//! Business services

pub mod object;

pub use object::ObjectService;
