//! Tests for the batch command

use std::path::PathBuf;

use knowledge_extractor::commands::batch::{process_dir, BatchArgs};
use knowledge_extractor::Config;

#[test]
fn test_batch_collects_stats_per_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("one.txt"), "Alice wrote Code today.").unwrap();
    std::fs::write(dir.path().join("two.md"), "plain lowercase words only here.").unwrap();
    std::fs::write(dir.path().join("three.pdf"), "%PDF-1.4").unwrap();

    let args = BatchArgs {
        dir: dir.path().to_path_buf(),
        annotations_dir: None,
    };
    let outcome = process_dir(&Config::default(), &args).unwrap();

    assert_eq!(outcome.stats.total_documents, 2);
    assert_eq!(outcome.stats.total_entities, 2);
    assert_eq!(outcome.stats.total_relations, 0);
    assert_eq!(outcome.stats.file_types.get(".txt"), Some(&1));
    assert_eq!(outcome.stats.file_types.get(".md"), Some(&1));
    assert_eq!(outcome.skipped.len(), 1);
}

#[test]
fn test_batch_picks_up_annotations() {
    let dir = tempfile::tempdir().unwrap();
    let ann_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("acquisition.txt"),
        "Google acquired DeepMind in London. Google is big.",
    )
    .unwrap();
    std::fs::write(ann_dir.path().join("acquisition.json"), super::super::ANNOTATION).unwrap();

    let args = BatchArgs {
        dir: dir.path().to_path_buf(),
        annotations_dir: Some(PathBuf::from(ann_dir.path())),
    };
    let outcome = process_dir(&Config::default(), &args).unwrap();

    assert_eq!(outcome.stats.total_documents, 1);
    assert_eq!(outcome.stats.total_relations, 2);
}
