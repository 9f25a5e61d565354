use crate::models::Vehicle;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use chrono::Utc;

/// Campos editables de un vehículo
#[derive(Debug, Default)]
pub struct VehicleChanges {
    pub owner_id: Option<Uuid>,
    pub make: Option<String>,
    pub license_plate: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

/// Todas las consultas aceptan `owner_scope`: `Some(owner)` limita a los
/// vehículos de ese propietario, `None` no filtra.
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        make: Option<String>,
        license_plate: String,
        model: String,
        year: Option<i32>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, owner_id, make, license_plate, model, year, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(make)
        .bind(license_plate)
        .bind(model)
        .bind(year)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid, owner_scope: Option<Uuid>) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND ($2::uuid IS NULL OR owner_id = $2)"
        )
        .bind(id)
        .bind(owner_scope)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn list(&self, owner_scope: Option<Uuid>) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE ($1::uuid IS NULL OR owner_id = $1) ORDER BY created_at DESC"
        )
        .bind(owner_scope)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner_scope: Option<Uuid>,
        changes: VehicleChanges,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET owner_id = COALESCE($3, owner_id),
                make = COALESCE($4, make),
                license_plate = COALESCE($5, license_plate),
                model = COALESCE($6, model),
                year = COALESCE($7, year)
            WHERE id = $1 AND ($2::uuid IS NULL OR owner_id = $2)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(owner_scope)
        .bind(changes.owner_id)
        .bind(changes.make)
        .bind(changes.license_plate)
        .bind(changes.model)
        .bind(changes.year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid, owner_scope: Option<Uuid>) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM vehicles WHERE id = $1 AND ($2::uuid IS NULL OR owner_id = $2)"
        )
        .bind(id)
        .bind(owner_scope)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
