//! `SeaORM` entity prelude

pub use super::objects::Entity as Objects;
