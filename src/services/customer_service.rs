//! Customer service - CRUD and paginated listing for customers.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::Customer;
use crate::errors::{AppError, AppResult};
use crate::infra::entities::customer;
use crate::types::{ListParams, Page, PageMeta, SortOrder};

const SORTABLE_FIELDS: &[&str] = &["name", "email", "phone"];
const DEFAULT_SORT_FIELD: &str = "name";

/// Partial update payload; only present fields are applied.
#[derive(Debug, Default, Clone)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateCustomer {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn create(&self, name: String, email: String, phone: String) -> AppResult<Customer>;

    async fn get_by_id(&self, id: i32) -> AppResult<Customer>;

    async fn update(&self, id: i32, changes: UpdateCustomer) -> AppResult<Customer>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self, params: ListParams) -> AppResult<Page<Customer>>;
}

pub struct CustomerManager {
    db: DatabaseConnection,
}

impl CustomerManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn sort_column(field: &str) -> Option<customer::Column> {
        match field {
            "name" => Some(customer::Column::Name),
            "email" => Some(customer::Column::Email),
            "phone" => Some(customer::Column::Phone),
            _ => None,
        }
    }
}

#[async_trait]
impl CustomerService for CustomerManager {
    async fn create(&self, name: String, email: String, phone: String) -> AppResult<Customer> {
        if name.trim().is_empty() || email.trim().is_empty() || phone.trim().is_empty() {
            return Err(AppError::validation(
                "All fields (name, email, phone) are required.",
            ));
        }

        let txn = self.db.begin().await?;

        let existing = customer::Entity::find()
            .filter(
                Condition::any()
                    .add(customer::Column::Email.eq(email.clone()))
                    .add(customer::Column::Phone.eq(phone.clone())),
            )
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict(
                "Customer with this email or phone already exists.",
            ));
        }

        let now = Utc::now();
        let model = customer::ActiveModel {
            name: Set(name),
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
        Ok(Customer::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        customer::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Customer::from)
            .ok_or_else(|| AppError::not_found("Customer not found."))
    }

    async fn update(&self, id: i32, changes: UpdateCustomer) -> AppResult<Customer> {
        let txn = self.db.begin().await?;

        let existing = customer::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found."))?;

        if let Some(ref email) = changes.email {
            let duplicate = customer::Entity::find()
                .filter(customer::Column::Email.eq(email.clone()))
                .filter(customer::Column::Id.ne(id))
                .one(&txn)
                .await?;
            if duplicate.is_some() {
                return Err(AppError::conflict(
                    "Another customer with this email already exists.",
                ));
            }
        }
        if let Some(ref phone) = changes.phone {
            let duplicate = customer::Entity::find()
                .filter(customer::Column::Phone.eq(phone.clone()))
                .filter(customer::Column::Id.ne(id))
                .one(&txn)
                .await?;
            if duplicate.is_some() {
                return Err(AppError::conflict(
                    "Another customer with this phone number already exists.",
                ));
            }
        }

        if changes.is_empty() {
            return Ok(Customer::from(existing));
        }

        let mut active: customer::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
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
        Ok(Customer::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = customer::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Customer not found."));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(&self, params: ListParams) -> AppResult<Page<Customer>> {
        let sort_by = params.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
        let column = Self::sort_column(sort_by).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid sort_by field. Allowed: {:?}",
                SORTABLE_FIELDS
            ))
        })?;

        let mut query = customer::Entity::find();
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
            items: items.into_iter().map(Customer::from).collect(),
            meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_allow_list() {
        for field in SORTABLE_FIELDS {
            assert!(CustomerManager::sort_column(field).is_some());
        }
        assert!(CustomerManager::sort_column("id").is_none());
    }
}
