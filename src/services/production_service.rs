//! Production service - production records keyed to a calendar date.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};

use crate::config::DATE_FORMAT;
use crate::domain::Production;
use crate::errors::{AppError, AppResult};
use crate::infra::entities::{product, production};
use crate::types::{ListParams, Page, PageMeta, SortOrder};

const SORTABLE_FIELDS: &[&str] = &["date_produced", "quantity_produced"];
const DEFAULT_SORT_FIELD: &str = "date_produced";

/// Parse a `YYYY-MM-DD` date string; any other shape is a validation failure.
pub fn parse_date(input: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| AppError::validation("Invalid date format. Use YYYY-MM-DD."))
}

#[async_trait]
pub trait ProductionService: Send + Sync {
    async fn create(
        &self,
        product_id: i32,
        quantity_produced: i32,
        date_produced: String,
    ) -> AppResult<Production>;

    async fn get_by_id(&self, id: i32) -> AppResult<Production>;

    async fn update(
        &self,
        id: i32,
        quantity_produced: Option<i32>,
        date_produced: Option<String>,
    ) -> AppResult<Production>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self, params: ListParams) -> AppResult<Page<Production>>;
}

pub struct ProductionManager {
    db: DatabaseConnection,
}

impl ProductionManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn sort_column(field: &str) -> Option<production::Column> {
        match field {
            "date_produced" => Some(production::Column::DateProduced),
            "quantity_produced" => Some(production::Column::QuantityProduced),
            _ => None,
        }
    }
}

#[async_trait]
impl ProductionService for ProductionManager {
    async fn create(
        &self,
        product_id: i32,
        quantity_produced: i32,
        date_produced: String,
    ) -> AppResult<Production> {
        let txn = self.db.begin().await?;

        let product = product::Entity::find_by_id(product_id).one(&txn).await?;
        if product.is_none() {
            return Err(AppError::validation("Product not found."));
        }

        if quantity_produced <= 0 {
            return Err(AppError::validation(
                "Quantity produced must be greater than zero.",
            ));
        }

        let date_produced = parse_date(&date_produced)?;

        let now = Utc::now();
        let model = production::ActiveModel {
            product_id: Set(product_id),
            quantity_produced: Set(quantity_produced),
            date_produced: Set(date_produced),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(Production::from(model))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Production> {
        production::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Production::from)
            .ok_or_else(|| AppError::not_found("Production record not found."))
    }

    async fn update(
        &self,
        id: i32,
        quantity_produced: Option<i32>,
        date_produced: Option<String>,
    ) -> AppResult<Production> {
        let txn = self.db.begin().await?;

        let existing = production::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Production record not found."))?;

        if quantity_produced.is_none() && date_produced.is_none() {
            return Ok(Production::from(existing));
        }

        let mut active: production::ActiveModel = existing.into();
        if let Some(quantity) = quantity_produced {
            if quantity <= 0 {
                return Err(AppError::validation(
                    "Quantity produced must be greater than zero.",
                ));
            }
            active.quantity_produced = Set(quantity);
        }
        if let Some(ref date) = date_produced {
            active.date_produced = Set(parse_date(date)?);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(Production::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let result = production::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Production record not found."));
        }

        txn.commit().await?;
        Ok(())
    }

    async fn list(&self, params: ListParams) -> AppResult<Page<Production>> {
        let sort_by = params.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD);
        let column = Self::sort_column(sort_by).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid sort_by field. Allowed: {:?}",
                SORTABLE_FIELDS
            ))
        })?;

        let mut query = production::Entity::find();
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
            items: items.into_iter().map(Production::from).collect(),
            meta,
        })
    }
}
