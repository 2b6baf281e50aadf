//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## Date Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ordered_at is stored as the POS sent it:                               │
//! │                                                                         │
//! │    "2026-10-19T08:30:00Z"        date() → 2026-10-19                   │
//! │    "2026-10-19 08:30:00"         date() → 2026-10-19                   │
//! │    "2026-10-19T06:30:00+07:00"   date() → 2026-10-18  (UTC day)        │
//! │    "yesterday"                   date() → NULL        (never matches)  │
//! │                                                                         │
//! │  WHERE date(ordered_at) BETWEEN start AND end                          │
//! │                                                                         │
//! │  SQLite's date() reads the same formats titan-core's parse_timestamp   │
//! │  accepts, so the store and the engine agree on which day an order      │
//! │  belongs to.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::order_item::insert_item_row;
use titan_core::date_range::DATE_FORMAT;
use titan_core::validation::{validate_raw_order, validate_raw_order_item};
use titan_core::{DateRange, RawOrder, RawOrderItem, TenantContext};

const ORDER_COLUMNS: &str = r#"
    id,
    order_number,
    status,
    total,
    subtotal,
    tax,
    discount,
    price_include_tax,
    payment_method,
    ordered_at,
    customer_count,
    table_id
"#;

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = OrderRepository::new(pool);
///
/// // Orders placed in October
/// let range = DateRange::parse("2026-10-01", "2026-10-31")?;
/// let orders = repo.fetch_by_date_range(&tenant, &range).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Fetches the tenant's orders placed inside `range` (inclusive, UTC days).
    ///
    /// Orders without a readable `ordered_at` are never returned here.
    pub async fn fetch_by_date_range(
        &self,
        tenant: &TenantContext,
        range: &DateRange,
    ) -> DbResult<Vec<RawOrder>> {
        let start = range.start().format(DATE_FORMAT).to_string();
        let end = range.end().format(DATE_FORMAT).to_string();

        debug!(tenant = %tenant.domain(), %start, %end, "Fetching orders by date range");

        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE tenant_domain = ?1
              AND date(ordered_at) BETWEEN ?2 AND ?3
            ORDER BY ordered_at, id
            "#
        );

        let orders = sqlx::query_as::<_, RawOrder>(&sql)
            .bind(tenant.domain())
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = orders.len(), "Fetched orders in range");
        Ok(orders)
    }

    /// Fetches every order of the tenant, oldest first.
    pub async fn fetch_all(&self, tenant: &TenantContext) -> DbResult<Vec<RawOrder>> {
        debug!(tenant = %tenant.domain(), "Fetching all orders");

        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE tenant_domain = ?1
            ORDER BY id
            "#
        );

        let orders = sqlx::query_as::<_, RawOrder>(&sql)
            .bind(tenant.domain())
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Counts the tenant's orders.
    pub async fn count(&self, tenant: &TenantContext) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE tenant_domain = ?1")
            .bind(tenant.domain())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Validates and inserts an order. Returns the new order id.
    ///
    /// `order.id` is ignored; the database assigns one.
    pub async fn insert(&self, tenant: &TenantContext, order: &RawOrder) -> DbResult<i64> {
        validate_raw_order(order)?;

        let mut conn = self.pool.acquire().await?;
        insert_order_row(&mut *conn, tenant, order).await
    }

    /// Validates and inserts an order together with its items, atomically.
    ///
    /// The items' `order_id` is replaced with the new order's id.
    pub async fn insert_with_items(
        &self,
        tenant: &TenantContext,
        order: &RawOrder,
        items: &[RawOrderItem],
    ) -> DbResult<i64> {
        validate_raw_order(order)?;
        for item in items {
            validate_raw_order_item(item)?;
        }

        let mut tx = self.pool.begin().await?;

        let order_id = insert_order_row(&mut *tx, tenant, order).await?;
        for item in items {
            insert_item_row(&mut *tx, tenant, item, order_id).await?;
        }

        tx.commit().await?;

        debug!(order_id, items = items.len(), "Inserted order with items");
        Ok(order_id)
    }
}

async fn insert_order_row(
    conn: &mut SqliteConnection,
    tenant: &TenantContext,
    order: &RawOrder,
) -> DbResult<i64> {
    debug!(
        tenant = %tenant.domain(),
        order_number = ?order.order_number,
        status = ?order.status,
        "Inserting order"
    );

    let result = sqlx::query(
        r#"
        INSERT INTO orders (
            tenant_domain, order_number, status,
            total, subtotal, tax, discount, price_include_tax,
            payment_method, ordered_at, customer_count, table_id
        ) VALUES (
            ?1, ?2, ?3,
            ?4, ?5, ?6, ?7, ?8,
            ?9, ?10, ?11, ?12
        )
        "#,
    )
    .bind(tenant.domain())
    .bind(&order.order_number)
    .bind(&order.status)
    .bind(&order.total)
    .bind(&order.subtotal)
    .bind(&order.tax)
    .bind(&order.discount)
    .bind(order.price_include_tax)
    .bind(&order.payment_method)
    .bind(&order.ordered_at)
    .bind(order.customer_count)
    .bind(order.table_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use titan_core::normalize::normalize_orders;
    use titan_core::{Money, OrderStatus};

    fn order(number: &str, status: &str, total: &str, ordered_at: &str) -> RawOrder {
        RawOrder {
            order_number: Some(number.to_string()),
            status: Some(status.to_string()),
            total: Some(total.to_string()),
            tax: Some("0".to_string()),
            payment_method: Some("cash".to_string()),
            ordered_at: Some(ordered_at.to_string()),
            customer_count: Some(2),
            ..RawOrder::default()
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_fetch_all() {
        let db = db().await;
        let tenant = TenantContext::new("pho-24.example.vn");

        let id = db
            .orders()
            .insert(&tenant, &order("ORD-1", "paid", "1000.00", "2026-10-19T08:30:00Z"))
            .await
            .unwrap();

        let orders = db.orders().fetch_all(&tenant).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, id);
        assert_eq!(orders[0].total.as_deref(), Some("1000.00"));
        assert_eq!(orders[0].customer_count, Some(2));
        assert_eq!(db.orders().count(&tenant).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fetch_by_date_range_is_inclusive_and_tenant_scoped() {
        let db = db().await;
        let ours = TenantContext::new("pho-24.example.vn");
        let theirs = TenantContext::new("bun-cha.example.vn");
        let repo = db.orders();

        repo.insert(&ours, &order("A", "paid", "100", "2026-09-30T23:59:59Z")).await.unwrap();
        repo.insert(&ours, &order("B", "paid", "200", "2026-10-01 00:00:00")).await.unwrap();
        repo.insert(&ours, &order("C", "served", "300", "2026-10-19T12:00:00Z")).await.unwrap();
        repo.insert(&ours, &order("D", "paid", "400", "2026-10-20T00:00:00Z")).await.unwrap();
        repo.insert(&theirs, &order("E", "paid", "500", "2026-10-05T10:00:00Z")).await.unwrap();

        let range = DateRange::parse("2026-10-01", "2026-10-19").unwrap();
        let orders = repo.fetch_by_date_range(&ours, &range).await.unwrap();
        let numbers: Vec<&str> = orders.iter().filter_map(|o| o.order_number.as_deref()).collect();
        assert_eq!(numbers, vec!["B", "C"]);

        let theirs_orders = repo.fetch_by_date_range(&theirs, &range).await.unwrap();
        assert_eq!(theirs_orders.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_order() {
        let db = db().await;
        let tenant = TenantContext::default();

        let mut bad = order("X", "paid", "100", "2026-10-19T08:30:00Z");
        bad.total = Some("a lot".to_string());
        let err = db.orders().insert(&tenant, &bad).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert_eq!(db.orders().count(&tenant).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dirty_rows_decode_and_normalise() {
        let db = db().await;
        let tenant = TenantContext::default();

        // Written by an older POS build, bypassing validation.
        sqlx::query(
            r#"
            INSERT INTO orders (tenant_domain, status, total, tax, discount, payment_method, ordered_at)
            VALUES (?1, 'refunded', 'n/a', '10', '-5', 'bitcoin', '2026-10-19 09:00:00')
            "#,
        )
        .bind(tenant.domain())
        .execute(db.pool())
        .await
        .unwrap();

        let raw = db.orders().fetch_all(&tenant).await.unwrap();
        let orders = normalize_orders(&raw);
        assert_eq!(orders[0].status, OrderStatus::Other);
        assert_eq!(orders[0].total, Money::zero());
        assert_eq!(orders[0].tax, Money::from_units(10));
        assert_eq!(orders[0].discount, Money::zero());
        assert_eq!(orders[0].customer_count, 1);
        assert!(orders[0].ordered_at.is_some());
    }

    #[tokio::test]
    async fn test_insert_with_items_assigns_order_id() {
        let db = db().await;
        let tenant = TenantContext::default();

        let items = vec![
            RawOrderItem {
                product_name: Some("Phở bò".to_string()),
                quantity: Some(2),
                unit_price: Some("45000".to_string()),
                ..RawOrderItem::default()
            },
            RawOrderItem {
                product_name: Some("Trà đá".to_string()),
                quantity: Some(2),
                unit_price: Some("5000".to_string()),
                ..RawOrderItem::default()
            },
        ];

        let order_id = db
            .orders()
            .insert_with_items(&tenant, &order("ORD-9", "paid", "100000", "2026-10-19T08:30:00Z"), &items)
            .await
            .unwrap();

        let stored = db.order_items().fetch_all(&tenant).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|item| item.order_id == order_id));
    }

    #[tokio::test]
    async fn test_insert_with_items_is_all_or_nothing() {
        let db = db().await;
        let tenant = TenantContext::default();

        let items = vec![RawOrderItem {
            product_name: Some("Bánh mì".to_string()),
            quantity: Some(0),
            unit_price: Some("20000".to_string()),
            ..RawOrderItem::default()
        }];

        let result = db
            .orders()
            .insert_with_items(&tenant, &order("ORD-1", "paid", "20000", "2026-10-19T08:30:00Z"), &items)
            .await;
        assert!(result.is_err());
        assert_eq!(db.orders().count(&tenant).await.unwrap(), 0);
    }
}
