use std::fs;

use jobdesk_client::{ensure_output_dir, export_filename, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_export_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("exports").join("nested");
    ensure_output_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn export_overwrites_previous_copy() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("exports");
    let writer = AtomicFileWriter::new(dir.clone());
    let name = export_filename(1, "a.json", "Output", "xml");

    let first = writer.write(&name, "<a/>").unwrap();
    let second = writer.write(&name, "<b/>").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "<b/>");
    let leftovers: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".jobdesk-"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn export_into_a_file_path_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let writer = AtomicFileWriter::new(blocker.clone());
    assert!(writer.write("copy.txt", "data").is_err());
    assert!(!blocker.with_file_name("copy.txt").exists());
}

#[test]
fn export_filename_is_stable_and_safe() {
    let name = export_filename(7, "report: Q1?.csv", "Input", "csv");
    assert!(name.starts_with("report_ Q1.input--"), "{name}");
    assert!(name.ends_with(".csv"));
    assert_eq!(name, export_filename(7, "report: Q1?.csv", "Input", "csv"));

    // Same name, different file id: different copy.
    assert_ne!(name, export_filename(8, "report: Q1?.csv", "Input", "csv"));

    assert!(export_filename(1, "CON.txt", "Error", "txt").starts_with("CON_.error--"));
    assert!(export_filename(1, "...", "Output", "").starts_with("untitled.output--"));
    assert!(export_filename(1, "...", "Output", "").ends_with(".txt"));
}
