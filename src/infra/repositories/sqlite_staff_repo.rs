use crate::domain::models::staff::Staff;
use crate::domain::ports::StaffRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteStaffRepo {
    pool: SqlitePool,
}

impl SqliteStaffRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for SqliteStaffRepo {
    async fn create(&self, staff: &Staff) -> Result<Staff, AppError> {
        sqlx::query_as::<_, Staff>(
            "INSERT INTO staff (id, name, title, email, phone, working_hours_json, service_ids_json, is_active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&staff.id)
        .bind(&staff.name)
        .bind(&staff.title)
        .bind(&staff.email)
        .bind(&staff.phone)
        .bind(&staff.working_hours_json)
        .bind(&staff.service_ids_json)
        .bind(staff.is_active)
        .bind(staff.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Staff>, AppError> {
        sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<Staff>, AppError> {
        let sql = if include_inactive {
            "SELECT * FROM staff ORDER BY name ASC"
        } else {
            "SELECT * FROM staff WHERE is_active = 1 ORDER BY name ASC"
        };
        sqlx::query_as::<_, Staff>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, staff: &Staff) -> Result<Staff, AppError> {
        sqlx::query_as::<_, Staff>(
            "UPDATE staff SET name = ?, title = ?, email = ?, phone = ?, working_hours_json = ?, service_ids_json = ?, is_active = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&staff.name)
        .bind(&staff.title)
        .bind(&staff.email)
        .bind(&staff.phone)
        .bind(&staff.working_hours_json)
        .bind(&staff.service_ids_json)
        .bind(staff.is_active)
        .bind(&staff.id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
