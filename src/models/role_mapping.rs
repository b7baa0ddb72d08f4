//! Role mapping entity model
//!
//! This module contains the SeaORM entity model for the role_mappings table,
//! which grants a role to a principal. The principal is identified by a
//! type tag and an id stored as text.

use std::fmt;
use std::str::FromStr;

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Association of a principal with a role
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "role_mappings")]
pub struct Model {
    /// Unique identifier for the mapping (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Kind of principal (USER|APP|ROLE)
    pub principal_type: String,

    /// Identifier of the principal, e.g. the user's id
    pub principal_id: String,

    /// Role granted to the principal
    pub role_id: Uuid,

    /// Timestamp when the mapping was created
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Parsed principal type, if the stored tag is known.
    pub fn principal_kind(&self) -> Option<PrincipalType> {
        self.principal_type.parse().ok()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Kinds of principal a role can be granted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalType {
    User,
    App,
    Role,
}

impl PrincipalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::User => "USER",
            PrincipalType::App => "APP",
            PrincipalType::Role => "ROLE",
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrincipalType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USER" => Ok(PrincipalType::User),
            "APP" => Ok(PrincipalType::App),
            "ROLE" => Ok(PrincipalType::Role),
            other => Err(format!("unknown principal type '{other}'")),
        }
    }
}
