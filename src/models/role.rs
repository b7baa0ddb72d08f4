//! Role entity model
//!
//! This module contains the SeaORM entity model for the roles table.
//! Roles are keyed by their unique name.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Role entity granting a named set of privileges
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    /// Unique identifier for the role (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Unique role name, e.g. `admin`
    #[sea_orm(unique)]
    pub name: String,

    /// Optional human readable description
    pub description: Option<String>,

    /// Timestamp when the role was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the role was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_mapping::Entity")]
    Principals,
}

impl Related<super::role_mapping::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Principals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
