//! Orchestration of the scrape: subject listing, per-subject course
//! fetches, aggregation, filtering, and output.

pub mod output;

use crate::catalog::{Course, CourseSource};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Options for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Pause inserted between consecutive subject fetches to bound the
    /// request rate.
    pub pause: Duration,
    /// Directory the output file is written to.
    pub output_dir: PathBuf,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            pause: Duration::from_millis(100),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Errors that abort a scrape run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The subject list could not be fetched or came back empty. Without
    /// subjects there is nothing to iterate, so the run aborts with no
    /// output file.
    #[error("no subjects available, aborting")]
    NoSubjects,

    /// Writing the output file failed
    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a completed run ended.
#[derive(Debug)]
pub enum ScrapeOutcome {
    /// The aggregate was non-empty and was written to `path`.
    Written { path: PathBuf, course_count: usize },
    /// Every subject yielded nothing (or only courses without classes);
    /// no file was written.
    NoCourses,
}

/// Runs the full pipeline for one term.
///
/// Subjects are fetched once; failure there is fatal. Each subject's course
/// fetch failure is logged and skipped, and the run continues. Courses whose
/// `Classes` array is empty after the term filter are dropped before output.
pub async fn run<S: CourseSource>(
    source: &S,
    term: &str,
    options: &ScrapeOptions,
) -> Result<ScrapeOutcome, ScrapeError> {
    info!("fetching all subjects");
    let subjects = match source.fetch_subjects().await {
        Ok(subjects) => subjects,
        Err(e) => {
            error!(error = %e, "subject fetch failed");
            Vec::new()
        }
    };

    if subjects.is_empty() {
        return Err(ScrapeError::NoSubjects);
    }

    let total = subjects.len();
    info!(subjects = total, term, "starting course scrape");

    let mut all_courses: Vec<Course> = Vec::new();
    for (i, subject) in subjects.iter().enumerate() {
        info!(
            subject = %subject.abbreviation,
            progress = %format!("{}/{total}", i + 1),
            "fetching courses"
        );

        match source.fetch_courses(&subject.id, term).await {
            Ok(courses) => all_courses.extend(courses),
            Err(e) => {
                warn!(
                    subject = %subject.abbreviation,
                    error = %e,
                    "course fetch failed, skipping subject"
                );
            }
        }

        if i + 1 < total {
            tokio::time::sleep(options.pause).await;
        }
    }

    // The term-scoped expansion can leave courses with no classes at all.
    let courses: Vec<Course> = all_courses
        .into_iter()
        .filter(Course::has_classes)
        .collect();

    if courses.is_empty() {
        warn!(term, "no courses with classes found");
        return Ok(ScrapeOutcome::NoCourses);
    }

    let path = output::output_path(&options.output_dir, term);
    output::write_courses(&path, &courses).map_err(|source| ScrapeError::Output {
        path: path.clone(),
        source,
    })?;

    info!(
        courses = courses.len(),
        file = %path.display(),
        "scrape complete"
    );

    Ok(ScrapeOutcome::Written {
        path,
        course_count: courses.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, Subject};
    use serde_json::{json, Value};
    use std::collections::{HashMap, HashSet};
    use std::fs;
    use std::path::Path;

    /// In-memory source with canned responses, keyed by subject id.
    #[derive(Default)]
    struct FakeSource {
        subjects: Vec<Subject>,
        subjects_unreachable: bool,
        courses: HashMap<String, Vec<Course>>,
        failing_subjects: HashSet<String>,
    }

    impl CourseSource for FakeSource {
        async fn fetch_subjects(&self) -> Result<Vec<Subject>, CatalogError> {
            if self.subjects_unreachable {
                return Err(CatalogError::Network {
                    message: "connection refused".to_string(),
                });
            }
            Ok(self.subjects.clone())
        }

        async fn fetch_courses(
            &self,
            subject_id: &str,
            _term: &str,
        ) -> Result<Vec<Course>, CatalogError> {
            if self.failing_subjects.contains(subject_id) {
                return Err(CatalogError::Network {
                    message: "connection reset by peer".to_string(),
                });
            }
            Ok(self.courses.get(subject_id).cloned().unwrap_or_default())
        }
    }

    fn subject(id: &str, abbreviation: &str) -> Subject {
        Subject {
            id: id.to_string(),
            abbreviation: abbreviation.to_string(),
        }
    }

    fn course(id: &str, classes: Value) -> Course {
        Course(json!({"Id": id, "Title": "Test Course", "Classes": classes}))
    }

    fn options_in(name: &str) -> ScrapeOptions {
        let dir = std::env::temp_dir().join(format!(
            "purdue_catalog_scrape_{name}_{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        ScrapeOptions {
            pause: Duration::ZERO,
            output_dir: dir,
        }
    }

    fn read_courses(path: &Path) -> Vec<Value> {
        let parsed: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        parsed.as_array().unwrap().clone()
    }

    #[tokio::test]
    async fn test_single_subject_single_course() {
        let mut source = FakeSource {
            subjects: vec![subject("1", "CS")],
            ..FakeSource::default()
        };
        source
            .courses
            .insert("1".to_string(), vec![course("cs-101", json!([{"Id": "c1"}]))]);

        let options = options_in("single");
        let outcome = run(&source, "202510", &options).await.unwrap();

        let ScrapeOutcome::Written { path, course_count } = outcome else {
            panic!("expected a written file");
        };
        assert_eq!(course_count, 1);
        let written = read_courses(&path);
        assert_eq!(written.len(), 1);
        assert_eq!(written[0]["Id"], "cs-101");
    }

    #[tokio::test]
    async fn test_empty_subject_list_aborts_without_file() {
        let source = FakeSource::default();
        let options = options_in("empty_subjects");

        let result = run(&source, "202510", &options).await;
        assert!(matches!(result, Err(ScrapeError::NoSubjects)));
        assert!(!output::output_path(&options.output_dir, "202510").exists());
    }

    #[tokio::test]
    async fn test_subject_fetch_error_aborts_without_file() {
        let source = FakeSource {
            subjects_unreachable: true,
            ..FakeSource::default()
        };
        let options = options_in("subjects_unreachable");

        let result = run(&source, "202510", &options).await;
        assert!(matches!(result, Err(ScrapeError::NoSubjects)));
        assert!(!output::output_path(&options.output_dir, "202510").exists());
    }

    #[tokio::test]
    async fn test_courses_without_classes_are_dropped() {
        let mut source = FakeSource {
            subjects: vec![subject("1", "CS"), subject("2", "MA")],
            ..FakeSource::default()
        };
        source
            .courses
            .insert("1".to_string(), vec![course("cs-empty", json!([]))]);
        source
            .courses
            .insert("2".to_string(), vec![course("ma-101", json!([{"Id": "c1"}]))]);

        let options = options_in("filtering");
        let outcome = run(&source, "202510", &options).await.unwrap();

        let ScrapeOutcome::Written { path, course_count } = outcome else {
            panic!("expected a written file");
        };
        assert_eq!(course_count, 1);
        let written = read_courses(&path);
        assert_eq!(written.len(), 1);
        assert_eq!(written[0]["Id"], "ma-101");
        for entry in &written {
            assert!(!entry["Classes"].as_array().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_per_subject_failure_is_non_fatal() {
        let mut source = FakeSource {
            subjects: vec![subject("1", "CS"), subject("2", "MA")],
            ..FakeSource::default()
        };
        source
            .courses
            .insert("1".to_string(), vec![course("cs-101", json!([{"Id": "c1"}]))]);
        source.failing_subjects.insert("2".to_string());

        let options = options_in("partial_failure");
        let outcome = run(&source, "202510", &options).await.unwrap();

        let ScrapeOutcome::Written { path, course_count } = outcome else {
            panic!("expected a written file");
        };
        assert_eq!(course_count, 1);
        assert_eq!(read_courses(&path)[0]["Id"], "cs-101");
    }

    #[tokio::test]
    async fn test_all_courses_filtered_means_no_file() {
        let mut source = FakeSource {
            subjects: vec![subject("1", "CS")],
            ..FakeSource::default()
        };
        source
            .courses
            .insert("1".to_string(), vec![course("cs-empty", json!([]))]);

        let options = options_in("all_filtered");
        let outcome = run(&source, "202510", &options).await.unwrap();

        assert!(matches!(outcome, ScrapeOutcome::NoCourses));
        assert!(!output::output_path(&options.output_dir, "202510").exists());
    }

    #[tokio::test]
    async fn test_rerun_is_byte_identical() {
        let mut source = FakeSource {
            subjects: vec![subject("1", "CS")],
            ..FakeSource::default()
        };
        source.courses.insert(
            "1".to_string(),
            vec![course(
                "cs-101",
                json!([{"Id": "c1", "Sections": [{"Crn": "12345"}]}]),
            )],
        );

        let options = options_in("idempotent");
        run(&source, "202510", &options).await.unwrap();
        let first = fs::read(output::output_path(&options.output_dir, "202510")).unwrap();

        run(&source, "202510", &options).await.unwrap();
        let second = fs::read(output::output_path(&options.output_dir, "202510")).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_insertion_order_follows_subject_order() {
        let mut source = FakeSource {
            subjects: vec![subject("2", "MA"), subject("1", "CS")],
            ..FakeSource::default()
        };
        source
            .courses
            .insert("1".to_string(), vec![course("cs-101", json!([{"Id": "a"}]))]);
        source
            .courses
            .insert("2".to_string(), vec![course("ma-201", json!([{"Id": "b"}]))]);

        let options = options_in("ordering");
        let ScrapeOutcome::Written { path, .. } =
            run(&source, "202510", &options).await.unwrap()
        else {
            panic!("expected a written file");
        };

        let written = read_courses(&path);
        assert_eq!(written[0]["Id"], "ma-201");
        assert_eq!(written[1]["Id"], "cs-101");
    }
}
