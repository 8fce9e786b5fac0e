//! Writing the aggregated course list to disk.

use crate::catalog::Course;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output file name for a term, placed under `dir`.
pub fn output_path(dir: &Path, term: &str) -> PathBuf {
    dir.join(format!("purdue_courses_{term}.json"))
}

/// Writes the courses as a pretty-printed JSON array with a 4-space indent,
/// truncating any existing file. Key order is deterministic (`serde_json`
/// maps are sorted), so identical input produces byte-identical files.
pub fn write_courses(path: &Path, courses: &[Course]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    courses.serialize(&mut serializer)?;

    writer.flush()
}
