//! Product service - CRUD and paginated listing for products.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::Product;
use crate::errors::{AppError, AppResult};
use crate::infra::entities::product;
use crate::types::{ListParams, Page, PageMeta, SortOrder};

const SORTABLE_FIELDS: &[&str] = &["name", "price"];
const DEFAULT_SORT_FIELD: &str = "name";

/// Partial update payload; only present fields are applied.
#[derive(Debug, Default, Clone)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i32>,
}

impl UpdateProduct {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock_quantity.is_none()
    }
}

#[async_trait]
pub trait ProductService: Send + Sync {
    async fn create(&self, name: String, price: f64, stock_quantity: i32) -> AppResult<Product>;

    async fn get_by_id(&self, id: i32) -> AppResult<Product>;

    async fn update(&self, id: i32, changes: UpdateProduct) -> AppResult<Product>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self, params: ListParams) -> AppResult<Page<Product>>;
}

pub struct ProductManager {
    db: DatabaseConnection,
}

impl ProductManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn sort_column(field: &str) -> Option<product::Column> {
        match field {
            "name" => Some(product::Column::Name),
            "price" => Some(product::Column::Price),
            _ => None,
        }
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn create(&self, name: String, price: f64, stock_quantity: i32) -> AppResult<Product> {
        if name.trim().is_empty() || !price.is_finite() || price < 0.0 {
            return Err(AppError::validation(
                "Invalid product data. Name and valid price are required.",
            ));
        }
        if stock_quantity < 0 {
            return Err(AppError::validation(
                "Stock quantity must be zero or a positive integer.",
            ));
        }

        let txn = self.db.begin().await?;

        let now = Utc::now();
        let model = product::ActiveModel {
            name: Set(name),
            price: Set(price),
            stock_quantity: Set(stock_quantity),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(Product::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Product> {
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Product::from)
            .ok_or_else(|| AppError::not_found("Product not found."))
    }

    async fn update(&self, id: i32, changes: UpdateProduct) -> AppResult<Product> {
        let txn = self.db.begin().await?;

        let existing = product::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found."))?;

        if let Some(price) = changes.price {
            if !price.is_finite() || price < 0.0 {
                return Err(AppError::validation("Price must be a positive number."));
            }
        }
        if let Some(stock) = changes.stock_quantity {
            if stock < 0 {
                return Err(AppError::validation(
                    "Stock quantity must be zero or a positive integer.",
                ));
            }
        }

        if changes.is_empty() {
            return Ok(Product::from(existing));
        }

        let mut active: product::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(stock) = changes.stock_quantity {
            active.stock_quantity = Set(stock);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(Product::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = product::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Product not found."));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(&self, params: ListParams) -> AppResult<Page<Product>> {
        let sort_by = params.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
        let column = Self::sort_column(sort_by).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid sort_by field. Allowed: {:?}",
                SORTABLE_FIELDS
            ))
        })?;

        let mut query = product::Entity::find();
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
            items: items.into_iter().map(Product::from).collect(),
            meta,
        })
    }
}
