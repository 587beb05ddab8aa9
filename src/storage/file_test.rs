use super::*;

fn store_in(dir: &tempfile::TempDir) -> FileStore {
    FileStore::new(dir.path().join("nested").join("storage.json"))
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert_eq!(store.get("user").unwrap(), None);
    assert!(!store.path().exists());
}

#[test]
fn set_creates_parent_dirs_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.set("user", r#"{"id":"x"}"#).unwrap();
    assert!(store.path().exists());
    assert_eq!(store.get("user").unwrap().as_deref(), Some(r#"{"id":"x"}"#));
}

#[test]
fn values_survive_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    store_in(&dir).set("lang", "ja").unwrap();
    assert_eq!(store_in(&dir).get("lang").unwrap().as_deref(), Some("ja"));
}

#[test]
fn remove_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.set("user", "u").unwrap();
    store.set("lang", "en").unwrap();
    store.remove("user").unwrap();
    assert_eq!(store.get("user").unwrap(), None);
    assert_eq!(store.get("lang").unwrap().as_deref(), Some("en"));
}

#[test]
fn remove_missing_key_does_not_create_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.remove("user").unwrap();
    assert!(!store.path().exists());
}

#[test]
fn no_temp_file_left_after_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.set("user", "u").unwrap();
    assert!(!store.temp_path().exists());
}

#[test]
fn corrupt_file_is_reported_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "[1, 2").unwrap();
    let store = FileStore::new(&path);
    assert!(matches!(store.get("user"), Err(StorageError::Corrupt(_))));
}

#[test]
fn set_replaces_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "[1, 2").unwrap();
    let store = FileStore::new(&path);

    store.set("user", "x").unwrap();
    assert_eq!(store.get("user").unwrap().as_deref(), Some("x"));
}

#[test]
fn remove_replaces_corrupt_file_even_without_the_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "{ not json").unwrap();
    let store = FileStore::new(&path);

    store.remove("user").unwrap();
    assert_eq!(store.get("user").unwrap(), None);
}

#[test]
fn failed_rename_removes_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("occupant"), "x").unwrap();
    let store = FileStore::new(&path);

    assert!(matches!(store.save(&Entries::new()), Err(StorageError::Io(_))));
    assert!(!store.temp_path().exists());
}

#[test]
fn non_string_values_are_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, r#"{"user": {"id": "x"}}"#).unwrap();
    assert!(matches!(FileStore::new(&path).get("user"), Err(StorageError::Corrupt(_))));
}

#[test]
fn empty_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "").unwrap();
    assert_eq!(FileStore::new(&path).get("user").unwrap(), None);
}
