//! Course catalog persistence port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::Course;
use crate::domain::foundation::DomainError;

/// Store for published courses.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<Course>, DomainError>;

    async fn list_by_category(&self, category: &str) -> Result<Vec<Course>, DomainError>;

    async fn get(&self, id: &Uuid) -> Result<Option<Course>, DomainError>;

    async fn insert(&self, course: &Course) -> Result<(), DomainError>;

    /// Replace mutable fields on an existing course. Returns `false` when no
    /// course with this id exists.
    async fn update(&self, course: &Course) -> Result<bool, DomainError>;

    /// Delete a course. Returns `false` when no course with this id exists.
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}
