//! # Order Item Repository
//!
//! Database operations for order line items.
//!
//! Items are fetched either wholesale for a tenant or for a set of order
//! ids. The id list is sent in chunks to stay under SQLite's bound
//! parameter limit.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use titan_core::validation::validate_raw_order_item;
use titan_core::{RawOrderItem, TenantContext};

/// Order ids per `IN (...)` query.
const ORDER_ID_CHUNK: usize = 500;

const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, quantity, unit_price";

/// Repository for order item database operations.
#[derive(Debug, Clone)]
pub struct OrderItemRepository {
    pool: SqlitePool,
}

impl OrderItemRepository {
    /// Creates a new OrderItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderItemRepository { pool }
    }

    /// Fetches every item of the tenant, in insertion order.
    pub async fn fetch_all(&self, tenant: &TenantContext) -> DbResult<Vec<RawOrderItem>> {
        debug!(tenant = %tenant.domain(), "Fetching all order items");

        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE tenant_domain = ?1 ORDER BY id"
        );

        let items = sqlx::query_as::<_, RawOrderItem>(&sql)
            .bind(tenant.domain())
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Fetches the tenant's items belonging to any of `order_ids`, in
    /// insertion order.
    pub async fn fetch_for_orders(
        &self,
        tenant: &TenantContext,
        order_ids: &[i64],
    ) -> DbResult<Vec<RawOrderItem>> {
        debug!(tenant = %tenant.domain(), orders = order_ids.len(), "Fetching order items");

        let mut items = Vec::new();

        for chunk in order_ids.chunks(ORDER_ID_CHUNK) {
            let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                "SELECT {ITEM_COLUMNS} FROM order_items WHERE tenant_domain = "
            ));
            query.push_bind(tenant.domain());
            query.push(" AND order_id IN (");

            let mut ids = query.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");

            let rows = query
                .build_query_as::<RawOrderItem>()
                .fetch_all(&self.pool)
                .await?;
            items.extend(rows);
        }

        items.sort_by_key(|item| item.id);

        debug!(count = items.len(), "Fetched order items");
        Ok(items)
    }

    /// Validates and inserts an item for an existing order. Returns the new
    /// item id.
    pub async fn insert(
        &self,
        tenant: &TenantContext,
        item: &RawOrderItem,
    ) -> DbResult<i64> {
        validate_raw_order_item(item)?;

        let mut conn = self.pool.acquire().await?;
        insert_item_row(&mut *conn, tenant, item, item.order_id).await
    }
}

pub(crate) async fn insert_item_row(
    conn: &mut SqliteConnection,
    tenant: &TenantContext,
    item: &RawOrderItem,
    order_id: i64,
) -> DbResult<i64> {
    debug!(order_id, product_name = ?item.product_name, "Inserting order item");

    let result = sqlx::query(
        r#"
        INSERT INTO order_items (
            tenant_domain, order_id, product_id, product_name, quantity, unit_price
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(tenant.domain())
    .bind(order_id)
    .bind(item.product_id)
    .bind(&item.product_name)
    .bind(item.quantity)
    .bind(&item.unit_price)
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

    fn item(order_id: i64, name: &str, qty: i64) -> RawOrderItem {
        RawOrderItem {
            order_id,
            product_name: Some(name.to_string()),
            quantity: Some(qty),
            unit_price: Some("10000".to_string()),
            ..RawOrderItem::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_for_orders() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tenant = TenantContext::default();
        let other = TenantContext::new("other.example.vn");
        let repo = db.order_items();

        repo.insert(&tenant, &item(1, "A", 1)).await.unwrap();
        repo.insert(&tenant, &item(2, "B", 1)).await.unwrap();
        repo.insert(&tenant, &item(1, "C", 2)).await.unwrap();
        repo.insert(&tenant, &item(3, "D", 1)).await.unwrap();
        repo.insert(&other, &item(1, "E", 1)).await.unwrap();

        let items = repo.fetch_for_orders(&tenant, &[1, 3]).await.unwrap();
        let names: Vec<&str> = items.iter().filter_map(|i| i.product_name.as_deref()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);

        assert!(repo.fetch_for_orders(&tenant, &[]).await.unwrap().is_empty());
        assert_eq!(repo.fetch_all(&tenant).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_fetch_for_many_orders_spans_chunks() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tenant = TenantContext::default();
        let repo = db.order_items();

        repo.insert(&tenant, &item(1, "first", 1)).await.unwrap();
        repo.insert(&tenant, &item(1_200, "last", 1)).await.unwrap();

        let ids: Vec<i64> = (1..=1_200).collect();
        let items = repo.fetch_for_orders(&tenant, &ids).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_quantity() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .order_items()
            .insert(&TenantContext::default(), &item(1, "A", 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
