//! Role mapping repository for database operations
//!
//! Role mappings are append-only from the seeder's point of view: they are
//! created under an existing role and never updated here.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::PrincipalStore;
use crate::models::PrincipalType;
use crate::models::role;
use crate::models::role_mapping::{self, Entity as RoleMapping};

/// Repository for role mapping database operations
#[derive(Debug, Clone)]
pub struct RoleMappingRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl RoleMappingRepository {
    /// Creates a new RoleMappingRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Grants the role with `role_id` to a principal
    pub async fn create(
        &self,
        role_id: Uuid,
        principal_type: PrincipalType,
        principal_id: &str,
    ) -> Result<role_mapping::Model, DbErr> {
        let mapping = role_mapping::ActiveModel {
            id: Set(Uuid::new_v4()),
            principal_type: Set(principal_type.as_str().to_string()),
            principal_id: Set(principal_id.to_string()),
            role_id: Set(role_id),
            created_at: Set(Utc::now().into()),
        };
        mapping.insert(&*self.db).await
    }

    /// Lists the principals holding the role with `role_id`
    pub async fn find_by_role(&self, role_id: Uuid) -> Result<Vec<role_mapping::Model>, DbErr> {
        RoleMapping::find()
            .filter(role_mapping::Column::RoleId.eq(role_id))
            .order_by_asc(role_mapping::Column::CreatedAt)
            .all(&*self.db)
            .await
    }

    /// Lists the role mappings granted to one principal
    pub async fn find_by_principal(
        &self,
        principal_type: PrincipalType,
        principal_id: &str,
    ) -> Result<Vec<role_mapping::Model>, DbErr> {
        RoleMapping::find()
            .filter(role_mapping::Column::PrincipalType.eq(principal_type.as_str()))
            .filter(role_mapping::Column::PrincipalId.eq(principal_id))
            .all(&*self.db)
            .await
    }

    /// Lists all role mappings
    pub async fn find_all(&self) -> Result<Vec<role_mapping::Model>, DbErr> {
        RoleMapping::find().all(&*self.db).await
    }
}

#[async_trait]
impl PrincipalStore for RoleMappingRepository {
    async fn create_principal(
        &self,
        role: &role::Model,
        principal_type: PrincipalType,
        principal_id: &str,
    ) -> Result<role_mapping::Model, DbErr> {
        self.create(role.id, principal_type, principal_id).await
    }
}
