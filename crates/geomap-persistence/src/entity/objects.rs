//! `SeaORM` Entity for objects table

use sea_orm::entity::prelude::*;

use super::spatial::SpatialValue;
use crate::model::ObjectRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "objects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(40))")]
    pub name: String,
    /// Read back as text (hex EWKB), written as EWKT cast to `geometry`
    #[sea_orm(select_as = "text", save_as = "geometry")]
    pub geometry: SpatialValue,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ObjectRecord {
    fn from(model: Model) -> Self {
        ObjectRecord {
            id: model.id,
            name: model.name,
            geometry: model.geometry.into_inner(),
        }
    }
}
