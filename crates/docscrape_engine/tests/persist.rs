use std::fs;

use docscrape_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir_idempotently() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
    ensure_output_dir(&new_dir).unwrap();
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("archive.zip", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "archive.zip");
    assert_eq!(fs::read(&first).unwrap(), b"first");

    let second = writer.write("archive.zip", vec![0u8, 159, 146, 150]).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), vec![0u8, 159, 146, 150]);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("doc.csv", "data");
    assert!(matches!(result, Err(PersistError::OutputDir { .. })));
    assert!(!file_path.with_file_name("doc.csv").exists());
}

#[test]
fn path_separators_are_rejected_in_file_names() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    assert!(matches!(
        writer.write("../escape.zip", "x"),
        Err(PersistError::InvalidFileName(_))
    ));
}
