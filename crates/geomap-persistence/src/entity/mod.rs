//! `SeaORM` entities

pub mod prelude;

pub mod objects;
pub mod spatial;
