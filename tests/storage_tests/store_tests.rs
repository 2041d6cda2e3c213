//! Tests for FileStore
//!
//! These tests verify:
//! - Opening/creating the root directory
//! - Put/get/delete round trips
//! - Nested keys and directory creation
//! - Idempotent delete and explicit misses
//! - Key validation
//! - Concurrent writers to one key

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use bucket::storage::FileStore;
use bucket::BucketError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, FileStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(temp_dir.path().join("bucket")).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("a").join("b").join(".bucket");

    assert!(!root.exists());

    let store = FileStore::open(&root).unwrap();

    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn test_open_existing_root_keeps_entries() {
    let (temp_dir, store) = setup_temp_store();
    store.put("kept", b"value").unwrap();

    let reopened = FileStore::open(temp_dir.path().join("bucket")).unwrap();
    assert_eq!(reopened.get("kept").unwrap(), Some(b"value".to_vec()));
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_put_get() {
    let (_temp, store) = setup_temp_store();

    store.put("hello", b"world").unwrap();

    assert_eq!(store.get("hello").unwrap(), Some(b"world".to_vec()));
}

#[test]
fn test_value_is_plain_file_contents() {
    let (_temp, store) = setup_temp_store();

    store.put("plain", b"\x00\x01binary\xff").unwrap();

    let on_disk = fs::read(store.root().join("plain")).unwrap();
    assert_eq!(on_disk, b"\x00\x01binary\xff".to_vec());
}

#[test]
fn test_get_missing_is_none() {
    let (_temp, store) = setup_temp_store();
    assert_eq!(store.get("missing").unwrap(), None);
}

#[test]
fn test_empty_value_is_not_a_miss() {
    let (_temp, store) = setup_temp_store();

    store.put("empty", b"").unwrap();

    assert_eq!(store.get("empty").unwrap(), Some(Vec::new()));
}

#[test]
fn test_overwrite_replaces_value() {
    let (_temp, store) = setup_temp_store();

    store.put("key", b"a much longer first value").unwrap();
    store.put("key", b"short").unwrap();

    assert_eq!(store.get("key").unwrap(), Some(b"short".to_vec()));
}

#[test]
fn test_large_value() {
    let (_temp, store) = setup_temp_store();
    let value: Vec<u8> = (0..1_000_000u32).map(|i| (i % 256) as u8).collect();

    store.put("large", &value).unwrap();

    assert_eq!(store.get("large").unwrap(), Some(value));
}

#[cfg(unix)]
#[test]
fn test_stored_file_mode_matches_plain_write() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, store) = setup_temp_store();

    store.put("reports/jan", b"abc").unwrap();
    let plain = store.root().join("reports").join("plain");
    fs::write(&plain, b"abc").unwrap();

    let stored_mode = fs::metadata(store.root().join("reports/jan"))
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    let plain_mode = fs::metadata(&plain).unwrap().permissions().mode() & 0o777;

    assert_eq!(stored_mode, plain_mode);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_file() {
    let (_temp, store) = setup_temp_store();

    store.put("gone", b"soon").unwrap();
    store.delete("gone").unwrap();

    assert_eq!(store.get("gone").unwrap(), None);
    assert!(!store.root().join("gone").exists());
}

#[test]
fn test_delete_is_idempotent() {
    let (_temp, store) = setup_temp_store();

    store.put("twice", b"v").unwrap();
    store.delete("twice").unwrap();
    store.delete("twice").unwrap();
    store.delete("never-written").unwrap();
    store.delete("no/such/dir").unwrap();
}

#[test]
fn test_delete_leaves_directories() {
    let (_temp, store) = setup_temp_store();

    store.put("reports/jan", b"abc").unwrap();
    store.delete("reports/jan").unwrap();

    assert!(store.root().join("reports").is_dir());
}

// =============================================================================
// Nested Key Tests
// =============================================================================

#[test]
fn test_nested_key_creates_directories() {
    let (_temp, store) = setup_temp_store();

    store.put("reports/2024/jan", b"abc").unwrap();

    assert!(store.root().join("reports").join("2024").is_dir());
    assert!(store.root().join("reports/2024/jan").is_file());
    assert_eq!(store.get("reports/2024/jan").unwrap(), Some(b"abc".to_vec()));
}

#[test]
fn test_current_dir_prefix_aliases_plain_key() {
    let (_temp, store) = setup_temp_store();

    store.put("./alias", b"same").unwrap();

    assert_eq!(store.get("alias").unwrap(), Some(b"same".to_vec()));
}

#[test]
fn test_nested_get_under_file_is_miss() {
    let (_temp, store) = setup_temp_store();

    store.put("file", b"x").unwrap();

    assert_eq!(store.get("file/child").unwrap(), None);
}

#[test]
fn test_get_directory_key_is_error() {
    let (_temp, store) = setup_temp_store();

    store.put("dir/child", b"x").unwrap();

    assert!(matches!(store.get("dir"), Err(BucketError::Io(_))));
}

// =============================================================================
// Key Validation Tests
// =============================================================================

#[test]
fn test_path_for_joins_root() {
    let (_temp, store) = setup_temp_store();

    let path = store.path_for("reports/jan").unwrap();

    assert_eq!(path, store.root().join(PathBuf::from("reports/jan")));
}

#[test]
fn test_rejects_keys_escaping_root() {
    let (_temp, store) = setup_temp_store();

    for key in ["", ".", "/etc/passwd", "../outside", "a/../../b"] {
        assert!(
            matches!(store.put(key, b"x"), Err(BucketError::InvalidKey(_))),
            "key {key:?} should be rejected"
        );
        assert!(matches!(store.get(key), Err(BucketError::InvalidKey(_))));
        assert!(matches!(store.delete(key), Err(BucketError::InvalidKey(_))));
    }
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_puts_leave_one_whole_value() {
    let (_temp, store) = setup_temp_store();
    let store = Arc::new(store);

    let first = vec![b'a'; 512 * 1024];
    let second = vec![b'b'; 256 * 1024];

    for _ in 0..10 {
        let handles: Vec<_> = [first.clone(), second.clone()]
            .into_iter()
            .map(|value| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.put("contended", &value).unwrap())
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stored = store.get("contended").unwrap().unwrap();
        assert!(stored == first || stored == second, "value was mixed");
    }
}

#[test]
fn test_concurrent_distinct_keys() {
    let (_temp, store) = setup_temp_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("thread{t}/key{i}");
                    store.put(&key, key.as_bytes()).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for t in 0..8 {
        for i in 0..25 {
            let key = format!("thread{t}/key{i}");
            assert_eq!(store.get(&key).unwrap(), Some(key.clone().into_bytes()));
        }
    }
}
