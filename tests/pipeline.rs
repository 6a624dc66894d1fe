use std::fs;

use check_photo_dups::{
    Analysis, DEFAULT_EXTENSIONS, PatternSet, discover, fingerprint_all, report, resolve_root,
};
use tempfile::TempDir;

#[test]
fn file_removed_after_discovery_is_skipped_and_reported() {
    let photos = TempDir::new().unwrap();
    fs::write(photos.path().join("a.jpg"), "X").unwrap();
    fs::write(photos.path().join("b.jpg"), "X").unwrap();
    fs::write(photos.path().join("c.png"), "Y").unwrap();

    let root = resolve_root(photos.path()).unwrap();
    let patterns = PatternSet::new(DEFAULT_EXTENSIONS, false).unwrap();
    let paths = discover(&root, &patterns);
    assert_eq!(paths.len(), 3);

    fs::remove_file(root.join("c.png")).unwrap();

    let batch = fingerprint_all(&paths, 2, |_, _| {}).unwrap();
    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.skipped, 1);

    let analysis = Analysis::new(&batch.records);
    let stats = analysis.stats();
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.duplicate_group_count, 1);
    assert_eq!(stats.wasted_bytes, 1);

    colored::control::set_override(false);
    let mut out = Vec::new();
    report::print_summary(&mut out, &stats, batch.skipped).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total files processed: 2"));
    assert!(text.contains("Files skipped:         1"));
}
