//! HTTP surface of the object service

pub mod object;
pub mod openapi;
pub mod route;
