//! User repository for database operations

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
use crate::models::user::{self, Entity as User};
use crate::seeds::config::UserSeed;

/// Repository for user database operations
#[derive(Debug, Clone)]
pub struct UserRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await
    }

    /// Lists all users ordered by username
    pub async fn find_all(&self) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .order_by_asc(user::Column::Username)
            .all(&*self.db)
            .await
    }

    /// Inserts a new user built from `seed`
    pub async fn create(&self, seed: &UserSeed) -> Result<user::Model, DbErr> {
        let now = Utc::now();
        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(seed.username.clone()),
            email: Set(seed.email.clone()),
            description: Set(seed.description.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        user.insert(&*self.db).await
    }

    /// Returns the user with `seed.username`, creating it when absent
    pub async fn find_or_create(&self, seed: &UserSeed) -> Result<(user::Model, bool), DbErr> {
        if let Some(existing) = self.find_by_username(&seed.username).await? {
            return Ok((existing, false));
        }

        match self.create(seed).await {
            Ok(created) => Ok((created, true)),
            // Lost an insert race for the same username
            Err(err) if is_unique_violation(&err) => self
                .find_by_username(&seed.username)
                .await?
                .map(|existing| (existing, false))
                .ok_or(err),
            Err(err) => Err(err),
        }
    }

    /// Creates the user or replaces the content of the one with the same username
    pub async fn upsert(&self, seed: &UserSeed) -> Result<user::Model, DbErr> {
        let existing = match self.find_by_username(&seed.username).await? {
            Some(existing) => existing,
            None => match self.create(seed).await {
                Ok(created) => return Ok(created),
                Err(err) if is_unique_violation(&err) => {
                    self.find_by_username(&seed.username).await?.ok_or(err)?
                }
                Err(err) => return Err(err),
            },
        };

        let mut active: user::ActiveModel = existing.into();
        active.email = Set(seed.email.clone());
        active.description = Set(seed.description.clone());
        active.updated_at = Set(Utc::now().into());
        active.update(&*self.db).await
    }
}

#[async_trait]
impl SeedStore for UserRepository {
    type Seed = UserSeed;
    type Record = user::Model;

    async fn find_or_create(&self, seed: &UserSeed) -> Result<(user::Model, bool), DbErr> {
        UserRepository::find_or_create(self, seed).await
    }

    async fn upsert(&self, seed: &UserSeed) -> Result<user::Model, DbErr> {
        UserRepository::upsert(self, seed).await
    }
}
