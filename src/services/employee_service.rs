//! Employee service - CRUD and paginated listing for employees.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::Employee;
use crate::errors::{AppError, AppResult};
use crate::infra::entities::employee;
use crate::types::{ListParams, Page, PageMeta, SortOrder};

/// Allowed sortable fields
const SORTABLE_FIELDS: &[&str] = &["name", "position", "email", "phone"];
const DEFAULT_SORT_FIELD: &str = "name";

/// Partial update payload; only present fields are applied.
#[derive(Debug, Default, Clone)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateEmployee {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn create(
        &self,
        name: String,
        position: String,
        email: String,
        phone: String,
    ) -> AppResult<Employee>;

    async fn get_by_id(&self, id: i32) -> AppResult<Employee>;

    async fn update(&self, id: i32, changes: UpdateEmployee) -> AppResult<Employee>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self, params: ListParams) -> AppResult<Page<Employee>>;
}

/// Concrete implementation of EmployeeService.
pub struct EmployeeManager {
    db: DatabaseConnection,
}

impl EmployeeManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn sort_column(field: &str) -> Option<employee::Column> {
        match field {
            "name" => Some(employee::Column::Name),
            "position" => Some(employee::Column::Position),
            "email" => Some(employee::Column::Email),
            "phone" => Some(employee::Column::Phone),
            _ => None,
        }
    }
}

#[async_trait]
impl EmployeeService for EmployeeManager {
    async fn create(
        &self,
        name: String,
        position: String,
        email: String,
        phone: String,
    ) -> AppResult<Employee> {
        if name.trim().is_empty()
            || position.trim().is_empty()
            || email.trim().is_empty()
            || phone.trim().is_empty()
        {
            return Err(AppError::validation(
                "All fields (name, position, email, phone) are required.",
            ));
        }

        // Dropped transactions roll back, so any early return discards the write
        let txn = self.db.begin().await?;

        let existing = employee::Entity::find()
            .filter(
                Condition::any()
                    .add(employee::Column::Email.eq(email.clone()))
                    .add(employee::Column::Phone.eq(phone.clone())),
            )
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict(
                "Employee with this email or phone already exists.",
            ));
        }

        let now = Utc::now();
        let model = employee::ActiveModel {
            name: Set(name),
            position: Set(position),
            email: Set(email),
            phone: Set(phone),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(Employee::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        employee::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Employee::from)
            .ok_or_else(|| AppError::not_found("Employee not found."))
    }

    async fn update(&self, id: i32, changes: UpdateEmployee) -> AppResult<Employee> {
        let txn = self.db.begin().await?;

        let existing = employee::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found."))?;

        // Uniqueness re-checks exclude the row being updated
        if let Some(ref email) = changes.email {
            let duplicate = employee::Entity::find()
                .filter(employee::Column::Email.eq(email.clone()))
                .filter(employee::Column::Id.ne(id))
                .one(&txn)
                .await?;
            if duplicate.is_some() {
                return Err(AppError::conflict(
                    "Another employee with this email already exists.",
                ));
            }
        }
        if let Some(ref phone) = changes.phone {
            let duplicate = employee::Entity::find()
                .filter(employee::Column::Phone.eq(phone.clone()))
                .filter(employee::Column::Id.ne(id))
                .one(&txn)
                .await?;
            if duplicate.is_some() {
                return Err(AppError::conflict(
                    "Another employee with this phone number already exists.",
                ));
            }
        }

        if changes.is_empty() {
            return Ok(Employee::from(existing));
        }

        let mut active: employee::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(position) = changes.position {
            active.position = Set(position);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(Employee::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = employee::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Employee not found."));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(&self, params: ListParams) -> AppResult<Page<Employee>> {
        let sort_by = params.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
        let column = Self::sort_column(sort_by).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid sort_by field. Allowed: {:?}",
                SORTABLE_FIELDS
            ))
        })?;

        let mut query = employee::Entity::find();
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
            items: items.into_iter().map(Employee::from).collect(),
            meta,
        })
    }
}
