//! Snapshot persistence tests: a restored engine must rank and answer
//! identically to the engine it was captured from.

use corpsman::corpus::DocumentInput;
use corpsman::engine::QueryEngine;
use corpsman::snapshot::Snapshot;
use tempfile::TempDir;

fn doc(source: &str, raw_text: &str) -> DocumentInput {
    DocumentInput {
        source: source.to_string(),
        section: None,
        raw_text: raw_text.to_string(),
        page: 1,
    }
}

fn build_engine() -> QueryEngine {
    QueryEngine::from_documents(&[
        doc(
            "Hemorrhage.pdf",
            "Apply a tourniquet above the wound for arterial bleeding control.\nPack junctional wounds with hemostatic gauze and hold pressure.",
        ),
        doc(
            "Airway.pdf",
            "Assess the airway for obstruction before any intubation attempt.",
        ),
        doc(
            "Pneumothorax.pdf",
            "Needle decompression at the second intercostal space for tension pneumothorax.",
        ),
    ])
    .unwrap()
}

#[test]
fn test_snapshot_file_round_trip_preserves_rankings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corpus.snapshot");

    let mut original = build_engine();
    original.snapshot().save_to_path(&path).unwrap();

    let restored = Snapshot::load_from_path(&path).unwrap();
    let mut reloaded = QueryEngine::from_snapshot(restored);

    for query in [
        "tourniquet for arterial bleeding control",
        "airway obstruction",
        "tension pneumothorax decompression",
        "hemostatic gauze packing",
        "nothing in the corpus at all",
    ] {
        assert_eq!(
            original.handle(query),
            reloaded.handle(query),
            "divergence on {query:?}"
        );
    }
}

#[test]
fn test_snapshot_preserves_index_shape() {
    let engine = build_engine();
    let snapshot = engine.snapshot();

    let mut buf = Vec::new();
    snapshot.save(&mut buf).unwrap();
    let restored = Snapshot::load(buf.as_slice()).unwrap();

    assert_eq!(restored, snapshot);
    let (store, index) = restored.into_parts();
    assert_eq!(store.len(), 4);
    assert_eq!(index.segment_count(), 4);
}

#[test]
fn test_missing_snapshot_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Snapshot::load_from_path(temp_dir.path().join("absent.snapshot"));
    assert!(matches!(
        result,
        Err(corpsman::error::CorpsmanError::Io(_))
    ));
}
