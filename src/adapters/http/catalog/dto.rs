//! Request/response bodies for catalog endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::Course;

#[derive(Debug, Deserialize)]
pub struct CourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title,
            slug: course.slug,
            description: course.description,
            category: course.category,
            created_at: course.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}
