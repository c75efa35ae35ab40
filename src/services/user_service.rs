//! User service - account management for the access-control directory.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{Password, Role, User};
use crate::errors::{AppError, AppResult};
use crate::infra::entities::user;
use crate::types::{ListParams, Page, PageMeta, SortOrder};

const SORTABLE_FIELDS: &[&str] = &["username", "role", "created_at"];
const DEFAULT_SORT_FIELD: &str = "username";

#[async_trait]
pub trait UserService: Send + Sync {
    /// Register an account. The password is stored only as a one-way hash.
    async fn create(&self, username: String, password: String, role: Role) -> AppResult<User>;

    async fn get_by_id(&self, id: i32) -> AppResult<User>;

    /// Update password and/or role; absent fields are left untouched.
    async fn update(
        &self,
        id: i32,
        password: Option<String>,
        role: Option<Role>,
    ) -> AppResult<User>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self, params: ListParams) -> AppResult<Page<User>>;
}

pub struct UserManager {
    db: DatabaseConnection,
}

impl UserManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn sort_column(field: &str) -> Option<user::Column> {
        match field {
            "username" => Some(user::Column::Username),
            "role" => Some(user::Column::Role),
            "created_at" => Some(user::Column::CreatedAt),
            _ => None,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create(&self, username: String, password: String, role: Role) -> AppResult<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "Both username and password are required.",
            ));
        }

        let txn = self.db.begin().await?;

        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username.clone()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict("Username already exists."));
        }

        let password_hash = Password::new(&password)?.into_string();

        let now = Utc::now();
        let model = user::ActiveModel {
            username: Set(username),
            password: Set(password_hash),
            role: Set(role.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(User::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<User> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found("User not found."))
    }

    async fn update(
        &self,
        id: i32,
        password: Option<String>,
        role: Option<Role>,
    ) -> AppResult<User> {
        let txn = self.db.begin().await?;

        let existing = user::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("User not found."))?;

        if password.is_none() && role.is_none() {
            return Ok(User::from(existing));
        }

        let mut active: user::ActiveModel = existing.into();
        if let Some(password) = password {
            active.password = Set(Password::new(&password)?.into_string());
        }
        if let Some(role) = role {
            active.role = Set(role.to_string());
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = user::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("User not found."));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(&self, params: ListParams) -> AppResult<Page<User>> {
        let sort_by = params.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
        let column = Self::sort_column(sort_by).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid sort_by field. Allowed: {:?}",
                SORTABLE_FIELDS
            ))
        })?;

        let mut query = user::Entity::find();
        query = match params.sort_order {
            SortOrder::Asc => query.order_by_asc(column),
            SortOrder::Desc => query.order_by_desc(column),
        };

        let paginator = query.paginate(&self.db, params.per_page);
        let items = paginator.fetch_page(params.page.saturating_sub(1)).await?;
        let meta = if params.include_meta {
            let total = paginator.num_items().await?;
            Some(PageMeta::new(total, params.page, params.per_page))
        } else {
            None
        };

        Ok(Page {
            items: items.into_iter().map(User::from).collect(),
            meta,
        })
    }
}
