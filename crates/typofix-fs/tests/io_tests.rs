use std::fs;

use tempfile::TempDir;
use typofix_fs::io;

#[test]
fn test_write_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/dir/test.txt");

    io::write_atomic(&path, b"hello world").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");

    io::write_text(&path, "content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let result = io::read_text(&temp.path().join("missing.txt"));

    let err = result.unwrap_err();
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn test_read_text_if_exists_missing_is_none() {
    let temp = TempDir::new().unwrap();
    let content = io::read_text_if_exists(&temp.path().join("missing.txt")).unwrap();
    assert!(content.is_none());
}

#[test]
fn test_read_text_if_exists_present() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("present.txt");
    fs::write(&path, "hi").unwrap();

    assert_eq!(io::read_text_if_exists(&path).unwrap().as_deref(), Some("hi"));
}
