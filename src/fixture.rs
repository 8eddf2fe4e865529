//! Temporary file fixtures.
//!
//! # Example
//!
//! ```rust
//! use std::io::Read;
//! use strslice_testkit::fixture::create_temp_file;
//! use strslice_testkit::report::PanicSink;
//!
//! let mut fixture = create_temp_file(&PanicSink, "[]", "db");
//! let mut content = String::new();
//! fixture.file_mut().read_to_string(&mut content).unwrap();
//! assert_eq!(content, "[]");
//!
//! let path = fixture.path().to_path_buf();
//! fixture.release();
//! assert!(!path.exists());
//! ```

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};

use crate::error::HelperError;
use crate::report::{Failure, FailureSink, Severity};

/// A uniquely named file in a temp directory, removed on release.
///
/// Call [`TempFile::release`] to remove the file explicitly. A fixture that goes out of
/// scope unreleased is released on drop, which also covers panicking tests.
#[derive(Debug)]
pub struct TempFile<'s, S>
where
    S: FailureSink + ?Sized,
{
    file: File,
    path: PathBuf,
    sink: &'s S,
    created_at: &'static Location<'static>,
    released: bool,
}

impl<S> TempFile<'_, S>
where
    S: FailureSink + ?Sized,
{
    /// Open handle, positioned at the start of the file.
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Mutable open handle.
    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /// Location of the file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file, reporting a non-fatal failure if removal fails.
    #[track_caller]
    pub fn release(mut self) {
        self.remove(Location::caller());
    }

    fn remove(&mut self, location: &Location<'_>) {
        if std::mem::replace(&mut self.released, true) {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "temp file removed"),
            Err(source) => {
                let err = HelperError::RemoveTempFile {
                    path: self.path.clone(),
                    source,
                };
                self.sink
                    .report(Failure::at(Severity::Error, err.to_string(), location));
            }
        }
    }
}

impl<S> Drop for TempFile<'_, S>
where
    S: FailureSink + ?Sized,
{
    fn drop(&mut self) {
        if !self.released && std::thread::panicking() {
            // Reporting here could panic again and abort the process.
            self.released = true;
            let _ = std::fs::remove_file(&self.path);
            return;
        }
        // Unreleased fixtures blame the test line that created them.
        self.remove(self.created_at);
    }
}

/// Create a temp file in the system temp directory holding `initial`.
///
/// `name_hint` prefixes the generated file name. Creation or write failures abort
/// the test.
#[track_caller]
pub fn create_temp_file<'s, S>(
    sink: &'s S,
    initial: impl AsRef<[u8]>,
    name_hint: &str,
) -> TempFile<'s, S>
where
    S: FailureSink + ?Sized,
{
    create_temp_file_in(sink, std::env::temp_dir(), initial, name_hint)
}

/// Create a temp file inside `dir` holding `initial`.
#[track_caller]
pub fn create_temp_file_in<'s, S>(
    sink: &'s S,
    dir: impl AsRef<Path>,
    initial: impl AsRef<[u8]>,
    name_hint: &str,
) -> TempFile<'s, S>
where
    S: FailureSink + ?Sized,
{
    match create(dir.as_ref(), initial.as_ref(), name_hint) {
        Ok((file, path)) => {
            tracing::debug!(path = %path.display(), "temp file created");
            TempFile {
                file,
                path,
                sink,
                created_at: Location::caller(),
                released: false,
            }
        }
        Err(err) => sink.report_fatal(Failure::fatal(err.to_string())),
    }
}

fn create(dir: &Path, initial: &[u8], name_hint: &str) -> Result<(File, PathBuf), HelperError> {
    let (mut file, path) = tempfile::Builder::new()
        .prefix(name_hint)
        .tempfile_in(dir)
        .map_err(HelperError::CreateTempFile)?
        .keep()
        .map_err(|err| HelperError::CreateTempFile(err.error))?;

    if let Err(err) = fill(&mut file, initial) {
        let _ = std::fs::remove_file(&path);
        return Err(HelperError::WriteTempFile(err));
    }
    Ok((file, path))
}

fn fill(file: &mut File, initial: &[u8]) -> std::io::Result<()> {
    file.write_all(initial)?;
    file.flush()?;
    file.seek(SeekFrom::Start(0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::report::TestReport;

    #[test]
    fn file_exists_with_initial_content_until_released() {
        let report = TestReport::new();
        let mut fixture = create_temp_file(&report, "hello, 世界", "strslice-");
        let path = fixture.path().to_path_buf();

        assert!(path.exists());
        assert!(path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("strslice-")));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello, 世界");

        let mut via_handle = String::new();
        fixture.file_mut().read_to_string(&mut via_handle).unwrap();
        assert_eq!(via_handle, "hello, 世界");

        fixture.release();
        assert!(!path.exists());
        assert!(report.is_empty());
    }

    #[test]
    fn names_are_unique() {
        let report = TestReport::new();
        let a = create_temp_file(&report, "", "same");
        let b = create_temp_file(&report, "", "same");
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn drop_releases_unreleased_fixture() {
        let report = TestReport::new();
        let path = {
            let fixture = create_temp_file(&report, "x", "dropped");
            fixture.path().to_path_buf()
        };
        assert!(!path.exists());
        assert!(report.is_empty());
    }

    #[test]
    fn failed_removal_is_reported_not_fatal() {
        let report = TestReport::new();
        let fixture = create_temp_file(&report, "x", "gone");
        std::fs::remove_file(fixture.path()).unwrap();
        let released_line = line!() + 1;
        fixture.release();

        let failures = report.take();
        assert_eq!(failures.len(), 1);
        assert!(!failures[0].is_fatal());
        assert!(failures[0].message.starts_with("could not remove temp file"));
        assert!(failures[0].location.contains(&format!("fixture.rs:{released_line}:")));
    }

    #[test]
    fn failed_removal_on_drop_points_at_creation() {
        let report = TestReport::new();
        {
            let fixture = create_temp_file(&report, "x", "dropped-gone");
            let created_line = line!() - 1;
            std::fs::remove_file(fixture.path()).unwrap();
            drop(fixture);

            let failures = report.take();
            assert_eq!(failures.len(), 1);
            assert!(
                failures[0]
                    .location
                    .contains(&format!("fixture.rs:{created_line}:")),
                "{}",
                failures[0].location
            );
        }
    }

    #[test]
    #[should_panic(expected = "could not create temp file")]
    fn missing_directory_is_fatal() {
        let report = TestReport::new();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let _ = create_temp_file_in(&report, missing, "x", "never");
    }
}
