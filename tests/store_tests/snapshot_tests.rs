//! Tests for snapshot files
//!
//! These tests verify:
//! - Round trip of orders, inventory and counters
//! - Missing and empty files load as "no snapshot"
//! - Garbage fails loudly
//! - Parent directories are created and no temp files are left behind

use std::fs;

use bakery_store::store::{read_snapshot, write_snapshot, InventoryRecord, OrderRecord, Snapshot};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

fn sample_snapshot() -> Snapshot {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap();
    Snapshot {
        orders: vec![OrderRecord {
            id: 3,
            name: "Ada".to_string(),
            address: "1 Mill Lane".to_string(),
            phone: "555-0100".to_string(),
            items_json: r#"[{"name":"Baguette","quantity":2}]"#.to_string(),
            bread_json: r#"{"days":["mon"],"frequency":"weekly","start_date":"2024-05-06","notes":""}"#
                .to_string(),
            croissant_json: r#"[{"day":"sat","quantity":4,"item":"butter"}]"#.to_string(),
            comment: "ring twice".to_string(),
            created_at,
        }],
        inventory: vec![InventoryRecord {
            id: 5,
            name: "Baguette".to_string(),
            category: "bread".to_string(),
            available_count: 10,
            price_cents: 15000,
            baked_at: Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap(),
            created_at,
        }],
        order_counter: 3,
        inventory_counter: 5,
    }
}

#[test]
fn test_round_trip_preserves_everything() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bakery.json");
    let snapshot = sample_snapshot();

    write_snapshot(&path, &snapshot).unwrap();
    let loaded = read_snapshot(&path).unwrap().unwrap();

    assert_eq!(loaded, snapshot);
}

#[test]
fn test_file_layout_uses_plain_field_names() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bakery.json");

    write_snapshot(&path, &sample_snapshot()).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();

    assert_eq!(json["order_counter"], 3);
    assert_eq!(json["inventory_counter"], 5);
    assert!(json["orders"][0]["items"].is_string());
    assert!(json["orders"][0]["bread_schedule"].is_string());
    assert_eq!(json["inventory"][0]["price_cents"], 15000);
}

#[test]
fn test_missing_file_is_none() {
    let temp_dir = TempDir::new().unwrap();

    let loaded = read_snapshot(&temp_dir.path().join("absent.json")).unwrap();

    assert!(loaded.is_none());
}

#[test]
fn test_empty_file_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bakery.json");
    fs::write(&path, b"").unwrap();

    assert!(read_snapshot(&path).unwrap().is_none());
}

#[test]
fn test_garbage_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bakery.json");
    fs::write(&path, b"{ not json").unwrap();

    assert!(read_snapshot(&path).is_err());
}

#[test]
fn test_write_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("deeper").join("bakery.json");

    write_snapshot(&path, &Snapshot::default()).unwrap();

    assert!(path.exists());
}

#[test]
fn test_overwrite_leaves_only_the_target_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bakery.json");

    write_snapshot(&path, &Snapshot::default()).unwrap();
    write_snapshot(&path, &sample_snapshot()).unwrap();

    let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(read_snapshot(&path).unwrap().unwrap().order_counter, 3);
}
