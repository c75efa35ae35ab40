//! Order service - order creation with derived totals, CRUD, listing.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::Order;
use crate::errors::{AppError, AppResult};
use crate::infra::entities::{customer, order, product};
use crate::types::{ListParams, Page, PageMeta, SortOrder};

const SORTABLE_FIELDS: &[&str] = &["created_at", "quantity", "total_price"];
const DEFAULT_SORT_FIELD: &str = "created_at";

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order; `total_price` is derived from the product's price
    /// at this moment and stored as-is.
    async fn create(&self, customer_id: i32, product_id: i32, quantity: i32) -> AppResult<Order>;

    async fn get_by_id(&self, id: i32) -> AppResult<Order>;

    /// Update the quantity. The stored total is not recomputed.
    async fn update(&self, id: i32, quantity: Option<i32>) -> AppResult<Order>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self, params: ListParams) -> AppResult<Page<Order>>;
}

pub struct OrderManager {
    db: DatabaseConnection,
}

impl OrderManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn sort_column(field: &str) -> Option<order::Column> {
        match field {
            "created_at" => Some(order::Column::CreatedAt),
            "quantity" => Some(order::Column::Quantity),
            "total_price" => Some(order::Column::TotalPrice),
            _ => None,
        }
    }
}

#[async_trait]
impl OrderService for OrderManager {
    async fn create(&self, customer_id: i32, product_id: i32, quantity: i32) -> AppResult<Order> {
        let txn = self.db.begin().await?;

        let customer = customer::Entity::find_by_id(customer_id).one(&txn).await?;
        if customer.is_none() {
            return Err(AppError::validation("Customer not found."));
        }

        let product = product::Entity::find_by_id(product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::validation("Product not found."))?;

        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be greater than zero."));
        }

        let total_price = product.price * quantity as f64;

        let now = Utc::now();
        let model = order::ActiveModel {
            customer_id: Set(customer_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            total_price: Set(total_price),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(Order::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Order> {
        order::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Order::from)
            .ok_or_else(|| AppError::not_found("Order not found."))
    }

    async fn update(&self, id: i32, quantity: Option<i32>) -> AppResult<Order> {
        let txn = self.db.begin().await?;

        let existing = order::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found."))?;

        let Some(quantity) = quantity else {
            return Ok(Order::from(existing));
        };

        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be greater than zero."));
        }

        let mut active: order::ActiveModel = existing.into();
        active.quantity = Set(quantity);
        // total_price stays at the value derived when the order was created
        active.updated_at = Set(Utc::now());

        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(Order::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = order::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Order not found."));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(&self, params: ListParams) -> AppResult<Page<Order>> {
        let sort_by = params.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
        let column = Self::sort_column(sort_by).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid sort_by field. Allowed: {:?}",
                SORTABLE_FIELDS
            ))
        })?;

        let mut query = order::Entity::find();
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
            items: items.into_iter().map(Order::from).collect(),
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
            assert!(OrderManager::sort_column(field).is_some());
        }
        assert!(OrderManager::sort_column("customer_id").is_none());
        assert!(OrderManager::sort_column("id").is_none());
    }
}
