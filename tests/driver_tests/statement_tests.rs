//! Tests for statement classification and execution
//!
//! These tests verify:
//! - Every accepted statement shape and the rejection of anything else
//! - Positional argument mapping and arity checks
//! - Sentinel handling of partial updates
//! - List ordering

use bakery_store::driver::{Connection, Driver, StatementKind, Value, INVENTORY_COLUMNS, ORDER_COLUMNS};
use bakery_store::{BakeryError, Context};

// =============================================================================
// Helper Functions
// =============================================================================

const INSERT_ORDER: &str = "INSERT INTO orders (name, address, phone, items, bread_schedule, croissant_schedule, comment) VALUES (?, ?, ?, ?, ?, ?, ?)";
const LIST_ORDERS: &str = "SELECT id, name, address, phone, items, bread_schedule, croissant_schedule, comment FROM orders ORDER BY id DESC";
const INSERT_ITEM: &str = "INSERT INTO inventory (name, category, available_count, price_cents, baked_at) VALUES (?, ?, ?, ?, ?)";
const LIST_ITEMS: &str = "SELECT id, name, category, available_count, price_cents, baked_at FROM inventory ORDER BY baked_at DESC";
const UPDATE_ITEM: &str =
    "UPDATE inventory SET available_count = ?, price_cents = ?, baked_at = ? WHERE id = ?";
const DELETE_ITEM: &str = "DELETE FROM inventory WHERE id = ?";

fn setup_connection() -> (Driver, Connection) {
    let driver = Driver::in_memory().unwrap();
    let conn = driver.connect();
    (driver, conn)
}

fn order_args(name: &str) -> Vec<Value> {
    vec![
        name.into(),
        "1 Mill Lane".into(),
        "555-0100".into(),
        r#"[{"name":"Baguette","quantity":2}]"#.into(),
        "{}".into(),
        "[]".into(),
        "".into(),
    ]
}

fn item_args(name: &str, baked_at: &str) -> Vec<Value> {
    vec![
        name.into(),
        "bread".into(),
        10i64.into(),
        15000i64.into(),
        baked_at.into(),
    ]
}

fn insert_item(conn: &Connection, name: &str, baked_at: &str) -> i64 {
    conn.exec(&Context::background(), INSERT_ITEM, &item_args(name, baked_at))
        .unwrap()
        .last_insert_id
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_classify_known_shapes() {
    let cases = [
        (INSERT_ORDER, StatementKind::InsertOrder),
        (LIST_ORDERS, StatementKind::ListOrders),
        (INSERT_ITEM, StatementKind::InsertInventory),
        (LIST_ITEMS, StatementKind::ListInventory),
        (UPDATE_ITEM, StatementKind::UpdateInventory),
        (DELETE_ITEM, StatementKind::DeleteInventory),
        ("CREATE TABLE IF NOT EXISTS orders (id INTEGER)", StatementKind::SchemaBootstrap),
    ];

    for (query, expected) in cases {
        assert_eq!(StatementKind::classify(query).unwrap(), expected, "{}", query);
    }
}

#[test]
fn test_classify_ignores_case_and_whitespace() {
    let kind = StatementKind::classify("\n   select * FROM Inventory").unwrap();

    assert_eq!(kind, StatementKind::ListInventory);
}

#[test]
fn test_unknown_statement_is_rejected() {
    for query in ["DROP TABLE orders", "UPDATE orders SET name = ?", "SELECT 1"] {
        let err = StatementKind::classify(query).unwrap_err();
        assert!(matches!(err, BakeryError::UnsupportedStatement(_)), "{}", query);
    }
}

#[test]
fn test_arity_per_shape() {
    assert_eq!(StatementKind::InsertOrder.arity(), 7);
    assert_eq!(StatementKind::InsertInventory.arity(), 5);
    assert_eq!(StatementKind::UpdateInventory.arity(), 4);
    assert_eq!(StatementKind::DeleteInventory.arity(), 1);
    assert!(StatementKind::ListOrders.is_query());
    assert!(!StatementKind::DeleteInventory.is_query());
}

// =============================================================================
// Exec Tests
// =============================================================================

#[test]
fn test_insert_order_returns_id_and_created_at() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();

    let first = conn.exec(&ctx, INSERT_ORDER, &order_args("Ada")).unwrap();
    let second = conn.exec(&ctx, INSERT_ORDER, &order_args("Grace")).unwrap();

    assert_eq!(first.last_insert_id, 1);
    assert_eq!(second.last_insert_id, 2);
    assert_eq!(first.rows_affected, 1);
    assert!(first.created_at.is_some());
}

#[test]
fn test_too_few_arguments() {
    let (_driver, conn) = setup_connection();

    let err = conn
        .exec(&Context::background(), INSERT_ORDER, &order_args("Ada")[..6])
        .unwrap_err();

    assert!(matches!(err, BakeryError::InvalidArgument(_)));
}

#[test]
fn test_insert_inventory_requires_baked_at() {
    let (_driver, conn) = setup_connection();
    let mut args = item_args("Baguette", "");
    args[4] = Value::Null;

    let err = conn
        .exec(&Context::background(), INSERT_ITEM, &args)
        .unwrap_err();

    assert!(matches!(err, BakeryError::InvalidArgument(_)));
}

#[test]
fn test_insert_inventory_accepts_text_numbers() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    let args: Vec<Value> = vec![
        "Rye".into(),
        "bread".into(),
        "4".into(),
        "900".into(),
        "2024-05-01T06:00:00Z".into(),
    ];

    conn.exec(&ctx, INSERT_ITEM, &args).unwrap();
    let rows = conn.query(&ctx, LIST_ITEMS, &[]).unwrap();
    let row = rows.iter().next().unwrap();

    assert_eq!(row.int(3).unwrap(), 4);
    assert_eq!(row.int(4).unwrap(), 900);
}

#[test]
fn test_update_sentinels_leave_fields_alone() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    let id = insert_item(&conn, "Baguette", "2024-05-01T06:00:00Z");

    // negative count, negative price and NULL baked_at are all "not supplied"
    let args = [Value::from(-1i64), Value::from(-1i64), Value::Null, Value::from(id)];
    let result = conn.exec(&ctx, UPDATE_ITEM, &args).unwrap();
    assert_eq!(result.rows_affected, 1);

    let rows = conn.query(&ctx, LIST_ITEMS, &[]).unwrap();
    let row = rows.iter().next().unwrap();
    assert_eq!(row.int(3).unwrap(), 10);
    assert_eq!(row.int(4).unwrap(), 15000);
    assert_eq!(row.text(5).unwrap(), "2024-05-01T06:00:00+00:00");
}

#[test]
fn test_update_with_zero_baked_at_keeps_bake_time() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    let id = insert_item(&conn, "Baguette", "2024-05-01T06:00:00Z");

    let args = [Value::Null, Value::Null, "0001-01-01T00:00:00Z".into(), Value::from(id)];
    conn.exec(&ctx, UPDATE_ITEM, &args).unwrap();

    let rows = conn.query(&ctx, LIST_ITEMS, &[]).unwrap();
    let row = rows.iter().next().unwrap();
    assert_eq!(row.text(5).unwrap(), "2024-05-01T06:00:00+00:00");
    assert_eq!(row.values().len(), INVENTORY_COLUMNS.len());
}

#[test]
fn test_update_price_to_zero() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    let id = insert_item(&conn, "Baguette", "2024-05-01T06:00:00Z");

    let args = [Value::Null, Value::from(0i64), Value::Null, Value::from(id)];
    conn.exec(&ctx, UPDATE_ITEM, &args).unwrap();

    let rows = conn.query(&ctx, LIST_ITEMS, &[]).unwrap();
    assert_eq!(rows.iter().next().unwrap().get(4), Some(&Value::Int(0)));
}

#[test]
fn test_update_count_to_zero() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    let id = insert_item(&conn, "Baguette", "2024-05-01T06:00:00Z");

    let args = [Value::from(0i64), Value::Null, "".into(), Value::from(id)];
    conn.exec(&ctx, UPDATE_ITEM, &args).unwrap();

    let rows = conn.query(&ctx, LIST_ITEMS, &[]).unwrap();
    assert_eq!(rows.iter().next().unwrap().int(3).unwrap(), 0);
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let (_driver, conn) = setup_connection();
    let args = [Value::from(1i64), Value::Null, Value::Null, Value::from(99i64)];

    let err = conn
        .exec(&Context::background(), UPDATE_ITEM, &args)
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_delete_twice() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    let id = insert_item(&conn, "Baguette", "2024-05-01T06:00:00Z");

    conn.exec(&ctx, DELETE_ITEM, &[Value::from(id)]).unwrap();
    let err = conn.exec(&ctx, DELETE_ITEM, &[Value::from(id)]).unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_delete_requires_id() {
    let (_driver, conn) = setup_connection();

    let err = conn
        .exec(&Context::background(), DELETE_ITEM, &[Value::Null])
        .unwrap_err();

    assert!(matches!(err, BakeryError::InvalidArgument(_)));
}

#[test]
fn test_schema_bootstrap_is_noop() {
    let (driver, conn) = setup_connection();
    let ctx = Context::background();

    let result = conn
        .exec(&ctx, "CREATE TABLE IF NOT EXISTS inventory (id INTEGER)", &[])
        .unwrap();

    assert_eq!(result.rows_affected, 0);
    driver.ensure_schema(&ctx).unwrap();
    assert!(conn.query(&ctx, LIST_ITEMS, &[]).unwrap().is_empty());
}

#[test]
fn test_exec_rejects_list_statement() {
    let (_driver, conn) = setup_connection();

    let err = conn
        .exec(&Context::background(), LIST_ORDERS, &[])
        .unwrap_err();

    assert!(matches!(err, BakeryError::InvalidArgument(_)));
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_orders_listed_newest_first() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    for name in ["Ada", "Grace", "Linus"] {
        conn.exec(&ctx, INSERT_ORDER, &order_args(name)).unwrap();
    }

    let rows = conn.query(&ctx, LIST_ORDERS, &[]).unwrap();

    assert_eq!(rows.columns(), &ORDER_COLUMNS[..]);
    let ids: Vec<i64> = rows.iter().map(|row| row.int(0).unwrap()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn test_inventory_listed_by_baked_at_with_stable_ties() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    insert_item(&conn, "Early", "2024-05-01T04:00:00Z");
    insert_item(&conn, "Tie-A", "2024-05-01T06:00:00Z");
    insert_item(&conn, "Late", "2024-05-01T09:00:00Z");
    insert_item(&conn, "Tie-B", "2024-05-01T06:00:00Z");

    let rows = conn.query(&ctx, LIST_ITEMS, &[]).unwrap();

    assert_eq!(rows.columns(), &INVENTORY_COLUMNS[..]);
    let names: Vec<String> = rows.iter().map(|row| row.text(1).unwrap()).collect();
    assert_eq!(names, vec!["Late", "Tie-A", "Tie-B", "Early"]);
}

#[test]
fn test_prepared_statement_is_reusable() {
    let (_driver, conn) = setup_connection();
    let ctx = Context::background();
    let statement = conn.prepare(INSERT_ORDER).unwrap();

    assert_eq!(statement.kind(), StatementKind::InsertOrder);
    for name in ["Ada", "Grace"] {
        statement.exec(&ctx, &order_args(name)).unwrap();
    }

    assert_eq!(conn.query(&ctx, LIST_ORDERS, &[]).unwrap().len(), 2);
}
