use crate::models::Issue;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Campos editables de un issue. `component_id: Some(None)` desvincula el componente.
#[derive(Debug, Default)]
pub struct IssueChanges {
    pub component_id: Option<Option<Uuid>>,
    pub description: Option<String>,
    pub is_repair: Option<bool>,
}

pub struct IssueRepository {
    pool: PgPool,
}

impl IssueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        component_id: Option<Uuid>,
        description: Option<String>,
        is_repair: bool,
    ) -> Result<Issue, AppError> {
        let issue = sqlx::query_as::<_, Issue>(
            r#"
            INSERT INTO issues (id, vehicle_id, component_id, description, is_repair, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(component_id)
        .bind(description)
        .bind(is_repair)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(issue)
    }

    pub async fn find_in_vehicle(&self, id: Uuid, vehicle_id: Uuid) -> Result<Option<Issue>, AppError> {
        let issue = sqlx::query_as::<_, Issue>(
            "SELECT * FROM issues WHERE id = $1 AND vehicle_id = $2"
        )
        .bind(id)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(issue)
    }

    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Issue>, AppError> {
        let issues = sqlx::query_as::<_, Issue>(
            "SELECT * FROM issues WHERE vehicle_id = $1 ORDER BY created_at DESC"
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(issues)
    }

    /// Issues de todos los vehículos visibles para `owner_scope`
    pub async fn list_all(&self, owner_scope: Option<Uuid>) -> Result<Vec<Issue>, AppError> {
        let issues = sqlx::query_as::<_, Issue>(
            r#"
            SELECT i.*
            FROM issues i
            JOIN vehicles v ON v.id = i.vehicle_id
            WHERE ($1::uuid IS NULL OR v.owner_id = $1)
            ORDER BY i.created_at DESC
            "#
        )
        .bind(owner_scope)
        .fetch_all(&self.pool)
        .await?;

        Ok(issues)
    }

    pub async fn update(
        &self,
        id: Uuid,
        vehicle_id: Uuid,
        changes: IssueChanges,
    ) -> Result<Option<Issue>, AppError> {
        let (set_component, component_id) = match changes.component_id {
            Some(component_id) => (true, component_id),
            None => (false, None),
        };

        let issue = sqlx::query_as::<_, Issue>(
            r#"
            UPDATE issues
            SET component_id = CASE WHEN $3 THEN $4 ELSE component_id END,
                description = COALESCE($5, description),
                is_repair = COALESCE($6, is_repair)
            WHERE id = $1 AND vehicle_id = $2
            RETURNING *
            "#
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(set_component)
        .bind(component_id)
        .bind(changes.description)
        .bind(changes.is_repair)
        .fetch_optional(&self.pool)
        .await?;

        Ok(issue)
    }

    pub async fn delete(&self, id: Uuid, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1 AND vehicle_id = $2")
            .bind(id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
