//! PostgreSQL implementation of CourseCatalog.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::Course;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CourseCatalog;

pub struct PostgresCourseCatalog {
    pool: PgPool,
}

impl PostgresCourseCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    slug: String,
    description: Option<String>,
    category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn db_err(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{context}: {e}"))
}

const SELECT_COLUMNS: &str =
    "id, title, slug, description, category, created_at, updated_at";

#[async_trait]
impl CourseCatalog for PostgresCourseCatalog {
    async fn list(&self) -> Result<Vec<Course>, DomainError> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM courses ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list courses", e))?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Course>, DomainError> {
        let rows: Vec<CourseRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM courses WHERE category = $1 ORDER BY created_at DESC"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to list courses by category", e))?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Course>, DomainError> {
        let row: Option<CourseRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch course", e))?;
        Ok(row.map(Course::from))
    }

    async fn insert(&self, course: &Course) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO courses (id, title, slug, description, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(&course.slug)
        .bind(&course.description)
        .bind(&course.category)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to insert course", e))?;
        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET title = $1, slug = $2, description = $3, category = $4, updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(&course.title)
        .bind(&course.slug)
        .bind(&course.description)
        .bind(&course.category)
        .bind(course.updated_at)
        .bind(course.id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("Failed to update course", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete course", e))?;
        Ok(result.rows_affected() == 1)
    }
}
