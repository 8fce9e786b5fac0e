//! Access to the Purdue.io OData catalog API.

mod client;
mod error;
mod odata;
mod types;

pub use client::{CatalogClient, CatalogConfig};
pub use error::CatalogError;
pub use types::{Course, ODataCollection, Subject};

/// The two catalog queries the scrape pipeline needs.
///
/// `CatalogClient` is the production implementation; tests substitute an
/// in-memory source with canned responses.
#[allow(async_fn_in_trait)]
pub trait CourseSource {
    /// Fetches the full list of subjects (department codes).
    async fn fetch_subjects(&self) -> Result<Vec<Subject>, CatalogError>;

    /// Fetches the courses for one subject, with classes restricted to the
    /// given term and their sections/meetings/instructors/rooms inlined.
    async fn fetch_courses(
        &self,
        subject_id: &str,
        term: &str,
    ) -> Result<Vec<Course>, CatalogError>;
}
