use crate::domain::{models::payment_method::PaymentMethod, ports::PaymentMethodRepository};
use crate::error::AppError;
use crate::infra::repositories::records::{convert_all, PaymentMethodRecord};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePaymentMethodRepo {
    pool: SqlitePool,
}

impl SqlitePaymentMethodRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentMethodRepository for SqlitePaymentMethodRepo {
    async fn create(&self, method: &PaymentMethod) -> Result<PaymentMethod, AppError> {
        let record = sqlx::query_as::<_, PaymentMethodRecord>(
            "INSERT INTO payment_methods (id, name, method_type, account_number, account_name, instructions, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&method.id).bind(&method.name).bind(method.method_type.as_str())
            .bind(&method.account_number).bind(&method.account_name).bind(&method.instructions)
            .bind(method.is_active).bind(method.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        record.try_into()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PaymentMethod>, AppError> {
        sqlx::query_as::<_, PaymentMethodRecord>("SELECT * FROM payment_methods WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .map(PaymentMethod::try_from)
            .transpose()
    }

    async fn list(&self, active_only: bool) -> Result<Vec<PaymentMethod>, AppError> {
        let rows = if active_only {
            sqlx::query_as::<_, PaymentMethodRecord>("SELECT * FROM payment_methods WHERE is_active = ? ORDER BY name ASC")
                .bind(true)
                .fetch_all(&self.pool).await
        } else {
            sqlx::query_as::<_, PaymentMethodRecord>("SELECT * FROM payment_methods ORDER BY name ASC")
                .fetch_all(&self.pool).await
        }.map_err(AppError::Database)?;
        convert_all(rows)
    }

    async fn update(&self, method: &PaymentMethod) -> Result<PaymentMethod, AppError> {
        sqlx::query_as::<_, PaymentMethodRecord>(
            "UPDATE payment_methods SET name = ?, method_type = ?, account_number = ?, account_name = ?, instructions = ?, is_active = ?
             WHERE id = ?
             RETURNING *"
        )
            .bind(&method.name).bind(method.method_type.as_str()).bind(&method.account_number)
            .bind(&method.account_name).bind(&method.instructions).bind(method.is_active)
            .bind(&method.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Payment method not found".into()))?
            .try_into()
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<PaymentMethod, AppError> {
        sqlx::query_as::<_, PaymentMethodRecord>("UPDATE payment_methods SET is_active = ? WHERE id = ? RETURNING *")
            .bind(is_active).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Payment method not found".into()))?
            .try_into()
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM payment_methods WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Payment method not found".into())); }
        Ok(())
    }
}
