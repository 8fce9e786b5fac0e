//! Builders for the OData `$filter` and `$expand` query parameters.

/// Restricts a `/Courses` query to a single subject.
///
/// Subject ids are GUIDs; OData takes them unquoted.
pub fn subject_filter(subject_id: &str) -> String {
    format!("SubjectId eq {subject_id}")
}

/// Expands a course's classes for one term, and each class's sections,
/// meetings, instructors, and room/building chain.
pub fn classes_expansion(term: &str) -> String {
    format!(
        "Classes($filter=Term/Code eq '{term}';\
         $expand=Sections($expand=Meetings($expand=Instructors,Room($expand=Building))))"
    )
}
