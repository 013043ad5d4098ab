//! Integration tests for bracket resource management with real file I/O.
//!
//! These tests verify that the bracket pattern correctly handles real-world
//! resources, ensuring they are always cleaned up.

use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use brago::testing::CallLog;
use brago::{
    assert_bracket_err, bracket, bracket_infallible, fs, with_resource, BracketError, Close,
};

// ============================================================================
// File I/O Integration Tests
// ============================================================================

/// Helper to create a unique temp file path
fn temp_file_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "brago_bracket_test_{}_{}.txt",
        name,
        std::process::id()
    ))
}

#[test]
fn bracket_cleans_up_temp_file_on_success() {
    let path = temp_file_path("success");

    let result = bracket(
        // Acquire: create temp file
        || {
            std::fs::write(&path, "test content")?;
            Ok::<_, io::Error>(path.clone())
        },
        // Release: delete temp file
        |p: PathBuf| std::fs::remove_file(p),
        // Use: read the file
        |p| std::fs::read_to_string(p),
    );

    assert_eq!(result.unwrap(), "test content");
    assert!(!path.exists(), "temp file should be deleted");
}

#[test]
fn bracket_cleans_up_temp_file_on_use_failure() {
    let path = temp_file_path("use_failure");

    let result = bracket(
        || {
            std::fs::write(&path, "test content")?;
            Ok::<_, io::Error>(path.clone())
        },
        |p: PathBuf| std::fs::remove_file(p),
        |_| Err::<String, _>(io::Error::other("use failed")),
    );

    assert_bracket_err!(result, Use);
    assert!(
        !path.exists(),
        "temp file should be deleted despite failure"
    );
}

#[test]
fn bracket_reports_release_failure_after_successful_use() {
    let path = temp_file_path("release_failure");

    let result = bracket(
        || Ok::<_, io::Error>(path.clone()),
        // Nothing was written, so removal fails
        |p: PathBuf| std::fs::remove_file(p),
        |p| Ok(p.exists()),
    );

    match result {
        Err(BracketError::Release(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
        other => panic!("expected release failure, got {:?}", other),
    }
}

#[test]
fn bracket_does_not_cleanup_on_acquire_failure() {
    let releases = CallLog::new();

    let result = bracket(
        || Err::<PathBuf, _>(io::Error::other("acquire failed")),
        |p: PathBuf| {
            releases.record(p);
            Ok::<(), io::Error>(())
        },
        |_| Ok("unused"),
    );

    let err = result.unwrap_err();
    assert_eq!(err.acquire_error().map(|e| e.to_string()), Some("acquire failed".into()));
    assert!(releases.is_empty(), "cleanup must NOT run when acquire fails");
}

// ============================================================================
// Close capability
// ============================================================================

#[test]
fn with_resource_flushes_buffered_file() {
    let path = temp_file_path("buffered");

    with_resource(
        || std::fs::File::create(&path).map(BufWriter::new),
        |w| writeln!(w, "line one").and_then(|_| writeln!(w, "line two")),
    )
    .unwrap();

    let mut contents = String::new();
    fs::with_open(&path, |f| f.read_to_string(&mut contents)).unwrap();
    assert_eq!(contents, "line one\nline two\n");

    std::fs::remove_file(&path).unwrap();
}

/// Counts how many times any `Counted` resource was closed.
static CLOSED: AtomicUsize = AtomicUsize::new(0);

struct Counted;

impl Close for Counted {
    type Error = io::Error;

    fn close(self) -> io::Result<()> {
        CLOSED.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn with_resource_closes_exactly_once_per_call() {
    let before = CLOSED.load(Ordering::SeqCst);

    for fail in [false, true] {
        let _ = with_resource(
            || Ok::<_, io::Error>(Counted),
            |_| {
                if fail {
                    Err(io::Error::other("use failed"))
                } else {
                    Ok(())
                }
            },
        );
    }

    assert_eq!(CLOSED.load(Ordering::SeqCst) - before, 2);
}

// ============================================================================
// Infallible release
// ============================================================================

#[test]
fn bracket_infallible_releases_file_handle() {
    let path = temp_file_path("infallible");
    std::fs::write(&path, "abc").unwrap();
    let releases = CallLog::new();

    let len = bracket_infallible(
        || std::fs::File::open(&path),
        |f| {
            releases.record(());
            drop(f);
        },
        |f| {
            let mut buf = Vec::new();
            f.read_to_end(&mut buf)?;
            Ok(buf.len())
        },
    )
    .unwrap();

    assert_eq!(len, 3);
    assert_eq!(releases.count(), 1);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn create_surfaces_use_error_and_still_closes() {
    let path = temp_file_path("create_use_error");

    let result = fs::with_create(&path, |f| {
        f.write_all(b"partial")?;
        Err::<(), _>(io::Error::new(io::ErrorKind::Interrupted, "stopped"))
    });

    let (primary, release) = result.unwrap_err().into_parts();
    assert_eq!(primary.map(|e| e.kind()), Some(io::ErrorKind::Interrupted));
    assert!(release.is_none());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "partial");

    std::fs::remove_file(&path).unwrap();
}
