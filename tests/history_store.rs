mod common;

use std::sync::Arc;

use runform_lib::history::{
    FileStore, History, KeyValueStore, MemoryStore, ResultStore, HISTORY_KEY,
};

use common::sample_result;

fn memory_store() -> (Arc<MemoryStore>, ResultStore) {
    let backend = Arc::new(MemoryStore::new());
    (backend.clone(), ResultStore::new(backend))
}

#[test]
fn save_then_load_round_trips_every_field() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = ResultStore::new(Arc::new(FileStore::new(dir.path().to_path_buf()).unwrap()));

    let mut without_optionals = sample_result("b", 2);
    without_optionals.target_pace.clear();
    without_optionals.runner_description.clear();
    without_optionals.level = None;
    let records = vec![sample_result("a", 1), without_optionals];

    store.save_history(&records).expect("save history");
    assert_eq!(store.load_history(), records);
    assert!(dir.path().join(format!("{HISTORY_KEY}.json")).exists());
}

#[test]
fn nothing_stored_loads_empty() {
    let (_, store) = memory_store();
    assert!(store.load_history().is_empty());
}

#[test]
fn corrupted_data_loads_empty_without_error() {
    let (backend, store) = memory_store();
    backend.set(HISTORY_KEY, "[{\"id\": \"a\", \"overallScore\": ").unwrap();
    assert!(store.load_history().is_empty());

    backend.set(HISTORY_KEY, "{\"not\": \"a list\"}").unwrap();
    assert!(store.load_history().is_empty());
}

#[test]
fn records_from_before_skill_levels_still_load() {
    let (backend, store) = memory_store();
    let legacy = r#"[{
        "id": "legacy-1",
        "timestamp": "2025-11-02T06:15:00.000Z",
        "overallScore": 70,
        "metrics": { "cadence": 168, "strideLength": 1.0, "groundContactTime": 260, "verticalOscillation": 10, "flightTime": 90 },
        "observations": [],
        "footStrike": "Heel",
        "summary": "古いデータ",
        "trainingSteps": [],
        "targetPace": "6:00",
        "runnerDescription": ""
    }]"#;
    backend.set(HISTORY_KEY, legacy).unwrap();

    let loaded = store.load_history();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "legacy-1");
    assert_eq!(loaded[0].target_pace, "6:00");
    assert_eq!(loaded[0].level, None);
}

#[test]
fn append_prepends_and_persists_each_time() {
    let (_, store) = memory_store();
    let mut history = History::load(store.clone());

    for (index, id) in ["first", "second", "third"].into_iter().enumerate() {
        history.append(sample_result(id, index as u32)).unwrap();
        assert_eq!(store.load_history().len(), index + 1);
    }

    let ids: Vec<&str> = history.all().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["third", "second", "first"]);
    assert_eq!(store.load_history(), history.all());
}

#[test]
fn remove_drops_exactly_one_and_keeps_order() {
    let (_, store) = memory_store();
    let mut history = History::load(store.clone());
    for (index, id) in ["a", "b", "c", "d"].into_iter().enumerate() {
        history.append(sample_result(id, index as u32)).unwrap();
    }

    assert!(history.remove("b").unwrap());
    let ids: Vec<&str> = history.all().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["d", "c", "a"]);
    assert_eq!(store.load_history().len(), 3);

    assert!(!history.remove("b").unwrap());
    assert_eq!(history.len(), 3);
}

#[test]
fn history_reloads_from_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let open = || {
        let backend = Arc::new(FileStore::new(dir.path().join("data")).unwrap());
        History::load(ResultStore::new(backend))
    };

    let mut history = open();
    assert!(history.is_empty());
    history.append(sample_result("x", 5)).unwrap();
    history.append(sample_result("y", 6)).unwrap();

    let reopened = open();
    assert_eq!(reopened.all(), history.all());
    assert_eq!(reopened.get("x").map(|r| r.overall_score), Some(77.5));
}
