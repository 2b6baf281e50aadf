//! # Store Settings Repository
//!
//! One row per tenant holding the store name and business type. Reports
//! fall back to [`StoreSettings::default`] when a tenant has no row.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use titan_core::{BusinessType, StoreSettings, TenantContext, ValidationError};

#[derive(Debug, sqlx::FromRow)]
struct StoreSettingsRow {
    store_name: String,
    business_type: String,
}

impl From<StoreSettingsRow> for StoreSettings {
    fn from(row: StoreSettingsRow) -> Self {
        StoreSettings {
            store_name: row.store_name,
            business_type: BusinessType::from_code(&row.business_type),
        }
    }
}

/// Repository for per-tenant store settings.
#[derive(Debug, Clone)]
pub struct StoreSettingsRepository {
    pool: SqlitePool,
}

impl StoreSettingsRepository {
    /// Creates a new StoreSettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreSettingsRepository { pool }
    }

    /// Gets the settings for a tenant, if any were saved.
    pub async fn get(&self, tenant: &TenantContext) -> DbResult<Option<StoreSettings>> {
        debug!(tenant = %tenant.domain(), "Loading store settings");

        let row = sqlx::query_as::<_, StoreSettingsRow>(
            "SELECT store_name, business_type FROM store_settings WHERE tenant_domain = ?1",
        )
        .bind(tenant.domain())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoreSettings::from))
    }

    /// Creates or replaces the settings for a tenant.
    pub async fn upsert(&self, tenant: &TenantContext, settings: &StoreSettings) -> DbResult<()> {
        if settings.store_name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "store_name".to_string(),
            }
            .into());
        }

        debug!(
            tenant = %tenant.domain(),
            business_type = settings.business_type.code(),
            "Saving store settings"
        );

        sqlx::query(
            r#"
            INSERT INTO store_settings (tenant_domain, store_name, business_type, updated_at)
            VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)
            ON CONFLICT(tenant_domain) DO UPDATE SET
                store_name = excluded.store_name,
                business_type = excluded.business_type,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(tenant.domain())
        .bind(settings.store_name.trim())
        .bind(settings.business_type.code())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db
            .store_settings()
            .get(&TenantContext::default())
            .await
            .unwrap();
        assert!(settings.is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_update() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let tenant = TenantContext::new("giat-ui-sach.example.vn");
        let repo = db.store_settings();

        repo.upsert(
            &tenant,
            &StoreSettings {
                store_name: "Giặt Ủi Sạch".to_string(),
                business_type: BusinessType::Laundry,
            },
        )
        .await
        .unwrap();

        let loaded = repo.get(&tenant).await.unwrap().unwrap();
        assert_eq!(loaded.store_name, "Giặt Ủi Sạch");
        assert_eq!(loaded.business_type, BusinessType::Laundry);

        repo.upsert(
            &tenant,
            &StoreSettings {
                store_name: "Giặt Ủi Sạch 2".to_string(),
                business_type: BusinessType::Retail,
            },
        )
        .await
        .unwrap();

        let loaded = repo.get(&tenant).await.unwrap().unwrap();
        assert_eq!(loaded.store_name, "Giặt Ủi Sạch 2");
        assert_eq!(loaded.business_type, BusinessType::Retail);

        assert!(repo.get(&TenantContext::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_business_type_reads_as_other() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query(
            "INSERT INTO store_settings (tenant_domain, store_name, business_type) VALUES (?1, ?2, ?3)",
        )
        .bind("spa.example.vn")
        .bind("Spa")
        .bind("spa")
        .execute(db.pool())
        .await
        .unwrap();

        let loaded = db
            .store_settings()
            .get(&TenantContext::new("spa.example.vn"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.business_type, BusinessType::Other);
    }

    #[tokio::test]
    async fn test_upsert_rejects_blank_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .store_settings()
            .upsert(
                &TenantContext::default(),
                &StoreSettings {
                    store_name: "  ".to_string(),
                    business_type: BusinessType::Restaurant,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
