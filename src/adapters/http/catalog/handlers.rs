//! HTTP handlers for catalog endpoints.
//!
//! Catalog writes have no separate flow logic, so these handlers talk to
//! the `CourseCatalog` port directly.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::catalog::{slugify, Course};
use crate::domain::foundation::ErrorCode;
use crate::ports::CourseCatalog;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::dto::{CourseListResponse, CourseRequest, CourseResponse, ListCoursesQuery};

/// Shared state for catalog endpoints.
#[derive(Clone)]
pub struct CatalogAppState {
    pub catalog: Arc<dyn CourseCatalog>,
}

fn parse_course_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::new(ErrorCode::ValidationFailed, "Invalid course id"))
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::new(ErrorCode::ValidationFailed, "Title is required"));
    }
    Ok(())
}

pub async fn list_courses(
    State(state): State<CatalogAppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = match query.category.as_deref() {
        Some(category) => state.catalog.list_by_category(category).await?,
        None => state.catalog.list().await?,
    };
    Ok(Json(CourseListResponse {
        courses: courses.into_iter().map(CourseResponse::from).collect(),
    }))
}

pub async fn get_course(
    State(state): State<CatalogAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_course_id(&id)?;
    let course = state
        .catalog
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Course not found"))?;
    Ok(Json(CourseResponse::from(course)))
}

pub async fn create_course(
    State(state): State<CatalogAppState>,
    RequireAuth(_caller): RequireAuth,
    Json(body): Json<CourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_title(&body.title)?;
    let now = Utc::now();
    let course = Course {
        id: Uuid::new_v4(),
        slug: slugify(&body.title),
        title: body.title,
        description: body.description,
        category: body.category,
        created_at: now,
        updated_at: now,
    };
    state.catalog.insert(&course).await?;
    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

pub async fn update_course(
    State(state): State<CatalogAppState>,
    RequireAuth(_caller): RequireAuth,
    Path(id): Path<String>,
    Json(body): Json<CourseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_course_id(&id)?;
    validate_title(&body.title)?;

    let existing = state
        .catalog
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Course not found"))?;

    let course = Course {
        id,
        slug: slugify(&body.title),
        title: body.title,
        description: body.description,
        category: body.category,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };
    if !state.catalog.update(&course).await? {
        return Err(ApiError::new(ErrorCode::NotFound, "Course not found"));
    }
    Ok(Json(CourseResponse::from(course)))
}

pub async fn delete_course(
    State(state): State<CatalogAppState>,
    RequireAuth(_caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_course_id(&id)?;
    if !state.catalog.delete(&id).await? {
        return Err(ApiError::new(ErrorCode::NotFound, "Course not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
