use crate::models::Component;
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ComponentRepository {
    pool: PgPool,
}

impl ComponentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        new_price: Decimal,
        repair_price: Decimal,
    ) -> Result<Component, AppError> {
        let component = sqlx::query_as::<_, Component>(
            r#"
            INSERT INTO components (id, name, description, new_price, repair_price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(new_price)
        .bind(repair_price)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(component)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Component>, AppError> {
        let component = sqlx::query_as::<_, Component>("SELECT * FROM components WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(component)
    }

    pub async fn list(&self) -> Result<Vec<Component>, AppError> {
        let components = sqlx::query_as::<_, Component>("SELECT * FROM components ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(components)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
        new_price: Option<Decimal>,
        repair_price: Option<Decimal>,
    ) -> Result<Option<Component>, AppError> {
        let component = sqlx::query_as::<_, Component>(
            r#"
            UPDATE components
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                new_price = COALESCE($4, new_price),
                repair_price = COALESCE($5, repair_price)
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(new_price)
        .bind(repair_price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(component)
    }

    /// Borra el componente; los issues que lo referencian quedan con component_id NULL
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
