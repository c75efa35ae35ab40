//! Order and production service unit tests on a mock database backend.

use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use factory_api::errors::AppError;
use factory_api::infra::entities::{customer, order, product, production};
use factory_api::services::{
    OrderManager, OrderService, ProductionManager, ProductionService,
};

fn customer_model(id: i32) -> customer::Model {
    let now = Utc::now();
    customer::Model {
        id,
        name: "Acme Corp".to_string(),
        email: "purchasing@acme.test".to_string(),
        phone: "+15551230000".to_string(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn product_model(id: i32, price: f64) -> product::Model {
    let now = Utc::now();
    product::Model {
        id,
        name: "Widget".to_string(),
        price,
        stock_quantity: 50,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn order_model(id: i32, quantity: i32, total_price: f64) -> order::Model {
    let now = Utc::now();
    order::Model {
        id,
        customer_id: 1,
        product_id: 2,
        quantity,
        total_price,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn production_model(id: i32) -> production::Model {
    let now = Utc::now();
    production::Model {
        id,
        product_id: 2,
        quantity_produced: 40,
        date_produced: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

#[tokio::test]
async fn test_order_create_derives_total_from_product_price() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![customer_model(1)]])
        .append_query_results([vec![product_model(2, 19.99)]])
        .append_query_results([vec![order_model(1, 3, 19.99 * 3.0)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 1,
            rows_affected: 1,
        }])
        .into_connection();

    let service = OrderManager::new(db);
    let order = service.create(1, 2, 3).await.unwrap();

    assert_eq!(order.quantity, 3);
    assert!((order.total_price - 59.97).abs() < 1e-9);
}

#[tokio::test]
async fn test_order_create_rejects_unknown_customer() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<customer::Model>::new()])
        .into_connection();

    let service = OrderManager::new(db);
    let err = service.create(99, 2, 3).await.unwrap_err();

    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Customer not found."),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_order_create_rejects_unknown_product() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![customer_model(1)]])
        .append_query_results([Vec::<product::Model>::new()])
        .into_connection();

    let service = OrderManager::new(db);
    let err = service.create(1, 99, 3).await.unwrap_err();

    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Product not found."),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_order_create_rejects_non_positive_quantity() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![customer_model(1)]])
        .append_query_results([vec![product_model(2, 19.99)]])
        .into_connection();

    let service = OrderManager::new(db);
    let err = service.create(1, 2, 0).await.unwrap_err();

    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Quantity must be greater than zero."),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_order_update_without_quantity_leaves_row_unchanged() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![order_model(1, 3, 59.97)]])
        .into_connection();

    let service = OrderManager::new(db);
    let order = service.update(1, None).await.unwrap();

    assert_eq!(order.quantity, 3);
    assert!((order.total_price - 59.97).abs() < 1e-9);
}

#[tokio::test]
async fn test_order_update_keeps_original_total() {
    // The stored total is never recomputed from the new quantity
    let updated = order::Model {
        quantity: 5,
        ..order_model(1, 3, 59.97)
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![order_model(1, 3, 59.97)]])
        .append_query_results([vec![updated]])
        .into_connection();

    let service = OrderManager::new(db);
    let order = service.update(1, Some(5)).await.unwrap();

    assert_eq!(order.quantity, 5);
    assert!((order.total_price - 59.97).abs() < 1e-9);
}

#[tokio::test]
async fn test_order_get_by_id_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<order::Model>::new()])
        .into_connection();

    let service = OrderManager::new(db);
    let err = service.get_by_id(42).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_order_delete_twice_second_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let service = OrderManager::new(db);

    assert!(service.delete(1).await.is_ok());
    assert!(matches!(
        service.delete(1).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_production_create_rejects_invalid_month() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_model(2, 19.99)]])
        .into_connection();

    let service = ProductionManager::new(db);
    let err = service
        .create(2, 40, "2025-13-01".to_string())
        .await
        .unwrap_err();

    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Invalid date format. Use YYYY-MM-DD."),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_production_create_rejects_unknown_product() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<product::Model>::new()])
        .into_connection();

    let service = ProductionManager::new(db);
    let err = service
        .create(99, 40, "2025-06-01".to_string())
        .await
        .unwrap_err();

    match err {
        AppError::Validation(msg) => assert_eq!(msg, "Product not found."),
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_production_create_rejects_non_positive_quantity() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_model(2, 19.99)]])
        .into_connection();

    let service = ProductionManager::new(db);
    let err = service
        .create(2, 0, "2025-06-01".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_production_create_parses_calendar_date() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_model(2, 19.99)]])
        .append_query_results([vec![production_model(1)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 1,
            rows_affected: 1,
        }])
        .into_connection();

    let service = ProductionManager::new(db);
    let record = service.create(2, 40, "2025-06-01".to_string()).await.unwrap();

    assert_eq!(record.quantity_produced, 40);
    assert_eq!(
        record.date_produced,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    );
}
