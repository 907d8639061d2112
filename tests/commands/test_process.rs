//! Tests for the process command

use knowledge_extractor::commands::process::{process_file, ProcessArgs};
use knowledge_extractor::Config;

const TEXT: &str = "Google acquired DeepMind in London. Google is big.";

#[test]
fn test_process_with_annotation_file() {
    let dir = tempfile::tempdir().unwrap();
    let doc_path = dir.path().join("acquisition.txt");
    let ann_path = dir.path().join("acquisition.json");
    std::fs::write(&doc_path, TEXT).unwrap();
    std::fs::write(&ann_path, super::super::ANNOTATION).unwrap();

    let args = ProcessArgs {
        path: doc_path,
        annotations: Some(ann_path),
        source: None,
        max_sentences: None,
    };
    let report = process_file(&Config::default(), &args).unwrap();

    assert_eq!(report.document.relations().len(), 2);
    assert_eq!(report.document_info.relations_count, 2);
    assert_eq!(report.document_info.word_count, 8);
}

#[test]
fn test_process_rejects_binary_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.docx");
    std::fs::write(&path, "PK").unwrap();

    let args = ProcessArgs {
        path,
        annotations: None,
        source: None,
        max_sentences: None,
    };
    let err = process_file(&Config::default(), &args).unwrap_err();
    assert!(format!("{:#}", err).contains("Unsupported file format"));
}
