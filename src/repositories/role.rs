//! Role repository for database operations
//!
//! This module provides the RoleRepository struct which encapsulates
//! SeaORM operations for the roles table.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::SeedStore;
use crate::error::is_unique_violation;
use crate::models::role::{self, Entity as Role};
use crate::seeds::config::RoleSeed;

/// Repository for role database operations
#[derive(Debug, Clone)]
pub struct RoleRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl RoleRepository {
    /// Creates a new RoleRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a role by its unique name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<role::Model>, DbErr> {
        Role::find()
            .filter(role::Column::Name.eq(name))
            .one(&*self.db)
            .await
    }

    /// Lists all roles ordered by name
    pub async fn find_all(&self) -> Result<Vec<role::Model>, DbErr> {
        Role::find()
            .order_by_asc(role::Column::Name)
            .all(&*self.db)
            .await
    }

    /// Inserts a new role built from `seed`
    pub async fn create(&self, seed: &RoleSeed) -> Result<role::Model, DbErr> {
        let now = Utc::now();
        let role = role::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(seed.name.clone()),
            description: Set(seed.description.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        role.insert(&*self.db).await
    }

    /// Returns the role named `seed.name`, creating it when absent
    ///
    /// A concurrent insert of the same name is resolved by re-reading the
    /// winner's row.
    pub async fn find_or_create(&self, seed: &RoleSeed) -> Result<(role::Model, bool), DbErr> {
        if let Some(existing) = self.find_by_name(&seed.name).await? {
            return Ok((existing, false));
        }

        match self.create(seed).await {
            Ok(created) => Ok((created, true)),
            Err(err) if is_unique_violation(&err) => self
                .find_by_name(&seed.name)
                .await?
                .map(|existing| (existing, false))
                .ok_or(err),
            Err(err) => Err(err),
        }
    }

    /// Creates the role or replaces the content of the one with the same name
    pub async fn upsert(&self, seed: &RoleSeed) -> Result<role::Model, DbErr> {
        let existing = match self.find_by_name(&seed.name).await? {
            Some(existing) => existing,
            None => match self.create(seed).await {
                Ok(created) => return Ok(created),
                Err(err) if is_unique_violation(&err) => {
                    self.find_by_name(&seed.name).await?.ok_or(err)?
                }
                Err(err) => return Err(err),
            },
        };

        let mut active: role::ActiveModel = existing.into();
        active.description = Set(seed.description.clone());
        active.updated_at = Set(Utc::now().into());
        active.update(&*self.db).await
    }
}

#[async_trait]
impl SeedStore for RoleRepository {
    type Seed = RoleSeed;
    type Record = role::Model;

    async fn find_or_create(&self, seed: &RoleSeed) -> Result<(role::Model, bool), DbErr> {
        RoleRepository::find_or_create(self, seed).await
    }

    async fn upsert(&self, seed: &RoleSeed) -> Result<role::Model, DbErr> {
        RoleRepository::upsert(self, seed).await
    }
}
