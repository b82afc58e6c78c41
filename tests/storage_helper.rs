//! Contract tests for the scoped storage helper over temp-dir roots.

use resteasy::{Error, SettingsScope, StorageHelper, StorageRoots, StorageScope};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tempfile::TempDir;

fn helper() -> (TempDir, StorageHelper) {
    let dir = TempDir::new().expect("temp dir");
    let storage = StorageHelper::new(StorageRoots::under(dir.path()));
    (dir, storage)
}

/// Polls until `predicate` holds, for detached-write effects.
async fn eventually<F, Fut>(mut predicate: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if predicate().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 2s");
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    visits: u32,
}

#[tokio::test]
async fn get_setting_absent_returns_default() {
    let (_dir, storage) = helper();
    let value = storage
        .get_setting("missing", "fallback".to_string(), SettingsScope::Local)
        .await;
    assert_eq!(value, "fallback");
}

#[tokio::test]
async fn settings_round_trip_primitive_scalars() {
    let (_dir, storage) = helper();

    storage.set_setting("s", &"hello".to_string(), SettingsScope::Local).await.unwrap();
    storage.set_setting("i", &42_i64, SettingsScope::Local).await.unwrap();
    storage.set_setting("b", &true, SettingsScope::Local).await.unwrap();

    assert_eq!(
        storage.get_setting("s", String::new(), SettingsScope::Local).await,
        "hello"
    );
    assert_eq!(storage.get_setting("i", 0_i64, SettingsScope::Local).await, 42);
    assert!(storage.get_setting("b", false, SettingsScope::Local).await);
}

#[tokio::test]
async fn set_setting_overwrites() {
    let (_dir, storage) = helper();
    storage.set_setting("k", &1_i64, SettingsScope::Roaming).await.unwrap();
    storage.set_setting("k", &2_i64, SettingsScope::Roaming).await.unwrap();
    assert_eq!(storage.get_setting("k", 0_i64, SettingsScope::Roaming).await, 2);
}

#[tokio::test]
async fn setting_exists_and_delete_are_scoped() {
    let (_dir, storage) = helper();
    storage.set_setting("k", &"v", SettingsScope::Local).await.unwrap();

    assert!(storage.setting_exists("k", SettingsScope::Local).await);
    assert!(!storage.setting_exists("k", SettingsScope::Roaming).await);

    storage.delete_setting("k", SettingsScope::Local).await.unwrap();
    assert!(!storage.setting_exists("k", SettingsScope::Local).await);

    // Deleting an absent key is a no-op, not an error.
    storage.delete_setting("k", SettingsScope::Local).await.unwrap();
}

#[tokio::test]
async fn settings_survive_helper_reconstruction() {
    let (dir, storage) = helper();
    storage.set_setting("persisted", &7_i64, SettingsScope::Local).await.unwrap();
    drop(storage);

    let reopened = StorageHelper::new(StorageRoots::under(dir.path()));
    assert_eq!(reopened.get_setting("persisted", 0_i64, SettingsScope::Local).await, 7);
}

#[tokio::test]
async fn corrupt_settings_table_falls_back_to_default() {
    let (dir, storage) = helper();
    let table = dir.path().join("local").join("settings.json");
    std::fs::create_dir_all(table.parent().unwrap()).unwrap();
    std::fs::write(&table, "{ not json").unwrap();

    assert_eq!(
        storage.get_setting("any", 9_i64, SettingsScope::Local).await,
        9
    );
    assert!(!storage.setting_exists("any", SettingsScope::Local).await);
}

#[tokio::test]
async fn incompatible_setting_value_falls_back_to_default() {
    let (_dir, storage) = helper();
    storage.set_setting("k", &"not a number", SettingsScope::Local).await.unwrap();
    assert_eq!(storage.get_setting("k", 5_i64, SettingsScope::Local).await, 5);
}

#[tokio::test]
async fn write_file_round_trips_and_replaces() {
    let (_dir, storage) = helper();

    assert!(storage.write_file("doc", "first", StorageScope::Local).await.unwrap());
    assert_eq!(storage.read_file("doc", StorageScope::Local).await.unwrap(), "first");

    // Collision policy is always-replace.
    assert!(storage.write_file("doc", "second", StorageScope::Local).await.unwrap());
    assert_eq!(storage.read_file("doc", StorageScope::Local).await.unwrap(), "second");
}

#[tokio::test]
async fn file_scopes_do_not_share_keys() {
    let (_dir, storage) = helper();
    storage.write_file("doc", "local", StorageScope::Local).await.unwrap();

    assert!(storage.file_exists("doc", StorageScope::Local).await.unwrap());
    assert!(!storage.file_exists("doc", StorageScope::Roaming).await.unwrap());
    assert!(!storage.file_exists("doc", StorageScope::Temporary).await.unwrap());

    storage.write_file("doc", "temp", StorageScope::Temporary).await.unwrap();
    assert_eq!(storage.read_file("doc", StorageScope::Local).await.unwrap(), "local");
    assert_eq!(storage.read_file("doc", StorageScope::Temporary).await.unwrap(), "temp");
}

#[tokio::test]
async fn untyped_read_of_absent_file_is_fatal() {
    let (_dir, storage) = helper();
    let err = storage.read_file("missing", StorageScope::Local).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        Error::FileNotFound { ref key, scope: StorageScope::Local } if key == "missing"
    ));
}

#[tokio::test]
async fn typed_read_of_absent_file_yields_default() {
    let (_dir, storage) = helper();

    let profile: Profile = storage.read_file_json("missing", StorageScope::Local).await.unwrap();
    assert_eq!(profile, Profile::default());

    let list: Vec<String> = storage.read_file_json("missing", StorageScope::Roaming).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn typed_read_of_malformed_file_propagates() {
    let (_dir, storage) = helper();
    storage.write_file("bad", "{ nope", StorageScope::Local).await.unwrap();

    let result: resteasy::Result<Profile> =
        storage.read_file_json("bad", StorageScope::Local).await;
    assert!(matches!(result, Err(Error::Serialization(_))));
}

#[tokio::test]
async fn typed_write_round_trips_through_json() {
    let (_dir, storage) = helper();
    let profile = Profile { name: "ada".into(), visits: 3 };

    assert!(storage.write_file_json("p", &profile, StorageScope::Roaming).await.unwrap());
    let back: Profile = storage.read_file_json("p", StorageScope::Roaming).await.unwrap();
    assert_eq!(back, profile);
}

#[tokio::test]
async fn delete_file_is_idempotent_success() {
    let (_dir, storage) = helper();

    // Nonexistent key: already absent counts as success.
    assert!(storage.delete_file("ghost", StorageScope::Local).await.unwrap());

    storage.write_file("real", "body", StorageScope::Local).await.unwrap();
    assert!(storage.delete_file("real", StorageScope::Local).await.unwrap());
    assert!(!storage.file_exists("real", StorageScope::Local).await.unwrap());
}

#[tokio::test]
async fn file_exists_in_explicit_directory() {
    let (dir, storage) = helper();
    storage.write_file("doc", "body", StorageScope::Local).await.unwrap();

    let local = dir.path().join("local");
    assert!(StorageHelper::file_exists_in(&local, "doc").await.unwrap());
    assert!(!StorageHelper::file_exists_in(&local, "other").await.unwrap());
    assert!(!StorageHelper::file_exists_in(dir.path(), "doc").await.unwrap());
}

#[tokio::test]
async fn detached_write_eventually_lands() {
    let (_dir, storage) = helper();
    storage.write_file_detached("later", "payload", StorageScope::Local);

    let probe = storage.clone();
    eventually(|| {
        let probe = probe.clone();
        async move { probe.file_exists("later", StorageScope::Local).await.unwrap() }
    })
    .await;
    assert_eq!(storage.read_file("later", StorageScope::Local).await.unwrap(), "payload");
}

#[tokio::test]
async fn detached_delete_eventually_lands() {
    let (_dir, storage) = helper();
    storage.write_file("gone", "body", StorageScope::Local).await.unwrap();
    storage.delete_file_detached("gone", StorageScope::Local);

    let probe = storage.clone();
    eventually(|| {
        let probe = probe.clone();
        async move { !probe.file_exists("gone", StorageScope::Local).await.unwrap() }
    })
    .await;
}

#[tokio::test]
async fn detached_typed_write_serializes_value() {
    let (_dir, storage) = helper();
    let profile = Profile { name: "bab".into(), visits: 1 };
    storage.write_file_json_detached("p", &profile, StorageScope::Local);

    let probe = storage.clone();
    eventually(|| {
        let probe = probe.clone();
        async move { probe.file_exists("p", StorageScope::Local).await.unwrap() }
    })
    .await;
    let back: Profile = storage.read_file_json("p", StorageScope::Local).await.unwrap();
    assert_eq!(back, profile);
}
