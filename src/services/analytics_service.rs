//! Analytics service - read-only aggregate queries over the factory data.
//!
//! Each query is a join + group-by + sum recomputed on every call; nothing
//! here is cached or persisted.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::AppResult;
use crate::infra::entities::{customer, employee, order, product, production};

/// Total quantity produced attributed to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct EmployeePerformance {
    pub employee: String,
    pub total_quantity: i64,
}

/// Total units sold per product.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct ProductSales {
    pub product: String,
    pub total_sold: i64,
}

/// Summed order value per customer.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct CustomerValue {
    pub customer: String,
    pub lifetime_value: f64,
}

/// Total quantity produced per product on a single date.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct ProductionTotal {
    pub product: String,
    pub total_produced: i64,
}

/// Analytics service trait for dependency injection.
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Quantity produced grouped by employee name.
    async fn employee_performance(&self) -> AppResult<Vec<EmployeePerformance>>;

    /// Units sold grouped by product name, best sellers first.
    async fn top_selling_products(&self) -> AppResult<Vec<ProductSales>>;

    /// Order totals per customer, keeping groups at or above `threshold`.
    async fn customer_lifetime_value(&self, threshold: f64) -> AppResult<Vec<CustomerValue>>;

    /// Quantity produced per product on exactly `date`.
    async fn production_efficiency(&self, date: NaiveDate) -> AppResult<Vec<ProductionTotal>>;
}

/// Concrete implementation of AnalyticsService.
pub struct Analytics {
    db: DatabaseConnection,
}

impl Analytics {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnalyticsService for Analytics {
    async fn employee_performance(&self) -> AppResult<Vec<EmployeePerformance>> {
        // NOTE: joins employees.id to production.product_id, which conflates
        // two identifier spaces. Kept byte-for-byte compatible with the
        // upstream report pending product-owner review.
        let rows = employee::Entity::find()
            .select_only()
            .column_as(employee::Column::Name, "employee")
            .column_as(production::Column::QuantityProduced.sum(), "total_quantity")
            .join_rev(
                JoinType::InnerJoin,
                production::Entity::belongs_to(employee::Entity)
                    .from(production::Column::ProductId)
                    .to(employee::Column::Id)
                    .into(),
            )
            .group_by(employee::Column::Name)
            .into_model::<EmployeePerformance>()
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn top_selling_products(&self) -> AppResult<Vec<ProductSales>> {
        let rows = product::Entity::find()
            .select_only()
            .column_as(product::Column::Name, "product")
            .column_as(order::Column::Quantity.sum(), "total_sold")
            .join(JoinType::InnerJoin, product::Relation::Orders.def())
            .group_by(product::Column::Name)
            .order_by_desc(Expr::col(Alias::new("total_sold")))
            .into_model::<ProductSales>()
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn customer_lifetime_value(&self, threshold: f64) -> AppResult<Vec<CustomerValue>> {
        let rows = customer::Entity::find()
            .select_only()
            .column_as(customer::Column::Name, "customer")
            .column_as(order::Column::TotalPrice.sum(), "lifetime_value")
            .join(JoinType::InnerJoin, customer::Relation::Orders.def())
            .group_by(customer::Column::Name)
            .having(Expr::expr(order::Column::TotalPrice.sum()).gte(threshold))
            .into_model::<CustomerValue>()
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn production_efficiency(&self, date: NaiveDate) -> AppResult<Vec<ProductionTotal>> {
        let rows = product::Entity::find()
            .select_only()
            .column_as(product::Column::Name, "product")
            .column_as(production::Column::QuantityProduced.sum(), "total_produced")
            .join(JoinType::InnerJoin, product::Relation::Productions.def())
            .filter(production::Column::DateProduced.eq(date))
            .group_by(product::Column::Name)
            .into_model::<ProductionTotal>()
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}
