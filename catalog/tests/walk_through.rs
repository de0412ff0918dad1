use sqlreview_catalog::{
    Code, DatabaseSnapshot, DatabaseState, IdentifierCase, IntegrityMode, Statement, TableState,
    WalkThroughError,
};
use sqlreview_types::Dialect;
use sqlreview_types::mysql::ddl::{ColumnDef, IndexDef, TableDef};

fn replay(db: &mut DatabaseState, json: &str) -> Result<(), WalkThroughError> {
    let statements = Statement::list_from_json(json).expect("statement JSON");
    db.walk_through(&statements)
}

fn shop() -> DatabaseState {
    DatabaseState::new("shop", Dialect::MySQL)
}

fn column_order(db: &DatabaseState, table: &str) -> Vec<(String, u32)> {
    db.table(table)
        .unwrap()
        .columns_by_position()
        .into_iter()
        .map(|c| (c.name().to_string(), c.position.unwrap_or_default()))
        .collect()
}

fn order(names: &[&str]) -> Vec<(String, u32)> {
    names
        .iter()
        .zip(1..)
        .map(|(n, p)| (n.to_string(), p))
        .collect()
}

const CREATE_ABC: &str = r#"
    {"line": 1, "type": "create_table", "table": {"name": "t"},
     "columns": [
        {"name": "a", "type": "int"},
        {"name": "b", "type": "int"},
        {"name": "c", "type": "int"}
     ],
     "constraints": [
        {"kind": "index", "name": "idx_ab", "keys": [{"column": "a"}, {"column": "b"}]}
     ]}
"#;

// =============================================================================
// Column drops cascade into indexes
// =============================================================================

#[test]
fn drop_column_shrinks_index() {
    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "alter_table", "table": {{"name": "t"}},
              "specs": [{{"action": "drop_column", "name": "a"}}]}}]"#
        ),
    )
    .unwrap();

    let t = db.table("t").unwrap();
    assert_eq!(t.index("idx_ab").unwrap().expressions(), ["b"]);
    assert_eq!(column_order(&db, "t"), order(&["b", "c"]));
}

#[test]
fn drop_last_key_column_removes_index() {
    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "alter_table", "table": {{"name": "t"}},
              "specs": [{{"action": "drop_column", "name": "a"}}]}},
            {{"line": 3, "type": "alter_table", "table": {{"name": "t"}},
              "specs": [{{"action": "drop_column", "name": "b"}}]}}]"#
        ),
    )
    .unwrap();

    let t = db.table("t").unwrap();
    assert!(t.index("idx_ab").is_none());
    assert_eq!(column_order(&db, "t"), order(&["c"]));
}

#[test]
fn drop_only_column_is_rejected() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "id", "type": "int", "options": ["primary_key"]}]},
            {"line": 2, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "drop_column", "name": "id"}]}
        ]"#,
    )
    .unwrap_err();

    assert_eq!(err.code, Code::DropAllColumns);
    assert_eq!(err.line, Some(2));
}

// =============================================================================
// Primary keys
// =============================================================================

#[test]
fn second_primary_key_is_rejected() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "a", "type": "int", "options": ["primary_key"]}]},
            {"line": 2, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "add_constraint",
                        "constraint": {"kind": "primary_key", "keys": [{"column": "a"}]}}]}
        ]"#,
    )
    .unwrap_err();

    assert_eq!(err.code, Code::PrimaryKeyExists);
    assert_eq!(err.line, Some(2));
}

#[test]
fn primary_key_columns_become_not_null() {
    let mut db = shop();
    replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "a", "type": "int", "options": ["null"]}, {"name": "b", "type": "int"}],
             "constraints": [{"kind": "primary_key", "keys": [{"column": "a"}, {"column": "b"}]}]}
        ]"#,
    )
    .unwrap();

    let t = db.table("t").unwrap();
    assert!(t.column("a").unwrap().is_not_null());
    assert!(t.column("b").unwrap().is_not_null());
    assert_eq!(t.primary_key().unwrap().expressions(), ["a", "b"]);
}

#[test]
fn modify_keeps_primary_key_not_null() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "id", "type": "int", "options": ["primary_key"]},
                         {"name": "b", "type": "int"}]},
            {"line": 2, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "modify_column", "column": {"name": "id", "type": "bigint"}}]},
            {"line": 3, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "change_column", "old_name": "b", "column": {"name": "c", "type": "int"}}]},
            {"line": 4, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "set_default", "column": "id", "value": {"kind": "null"}}]}
        ]"#,
    )
    .unwrap_err();

    assert_eq!(err.code, Code::SetNullDefaultForNotNullColumn);
    assert_eq!(err.line, Some(4));
    let t = db.table("t").unwrap();
    assert_eq!(t.primary_key().unwrap().expressions(), ["id"]);
    assert!(t.column("id").unwrap().is_not_null());
    assert!(!t.column("c").unwrap().is_not_null());
}

#[test]
fn change_primary_key_column_renames_key() {
    let mut db = shop();
    replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "id", "type": "int"}, {"name": "b", "type": "int"}],
             "constraints": [{"kind": "primary_key", "keys": [{"column": "id"}]}]},
            {"line": 2, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "change_column", "old_name": "id",
                        "column": {"name": "order_id", "type": "bigint", "options": ["null"]}}]}
        ]"#,
    )
    .unwrap();

    let t = db.table("t").unwrap();
    assert_eq!(t.primary_key().unwrap().expressions(), ["order_id"]);
    assert!(t.column("order_id").unwrap().is_not_null());
}

#[test]
fn table_primary_key_rejects_null_default() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "a", "type": "int", "options": [{"default": {"kind": "null"}}]}],
             "constraints": [{"kind": "primary_key", "keys": [{"column": "a"}]}]}
        ]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::SetNullDefaultForNotNullColumn);
    assert_eq!(err.content, "Invalid default value for column `a`");

    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "a", "type": "int", "options": [{"default": {"kind": "null"}}]}]},
            {"line": 2, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "add_constraint",
                        "constraint": {"kind": "primary_key", "keys": [{"column": "a"}]}}]}
        ]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::SetNullDefaultForNotNullColumn);
    assert_eq!(err.line, Some(2));
    assert!(db.table("t").unwrap().primary_key().is_none());
}

#[test]
fn drop_primary_key_twice() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "a", "type": "int", "options": ["primary_key"]}]},
            {"line": 2, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "drop_primary_key"}]},
            {"line": 3, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "drop_primary_key"}]}
        ]"#,
    )
    .unwrap_err();

    assert_eq!(err.code, Code::PrimaryKeyNotExists);
    assert_eq!(err.line, Some(3));
}

// =============================================================================
// Renames
// =============================================================================

#[test]
fn rename_column_round_trip() {
    let mut db = shop();
    replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "a", "type": "int"}],
             "constraints": [{"kind": "unique", "keys": [{"column": "a"}]}]},
            {"line": 2, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "rename_column", "old_name": "a", "new_name": "b"}]},
            {"line": 3, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "rename_column", "old_name": "b", "new_name": "a"}]}
        ]"#,
    )
    .unwrap();

    let t = db.table("t").unwrap();
    assert_eq!(column_order(&db, "t"), order(&["a"]));
    assert_eq!(t.index("a").unwrap().expressions(), ["a"]);
}

#[test]
fn rename_column_onto_existing() {
    let mut db = shop();
    let err = replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "alter_table", "table": {{"name": "t"}},
              "specs": [{{"action": "rename_column", "old_name": "a", "new_name": "B"}}]}}]"#
        ),
    )
    .unwrap_err();
    assert_eq!(err.code, Code::ColumnExists);
}

#[test]
fn rename_table_within_database() {
    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "rename_table",
              "pairs": [{{"from": {{"name": "t"}}, "to": {{"database": "shop", "name": "t2"}}}}]}}]"#
        ),
    )
    .unwrap();

    assert!(db.table("t").is_none());
    assert_eq!(column_order(&db, "t2"), order(&["a", "b", "c"]));
}

#[test]
fn rename_table_out_of_database_drops_it() {
    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "rename_table",
              "pairs": [{{"from": {{"name": "t"}}, "to": {{"database": "archive", "name": "t"}}}}]}}]"#
        ),
    )
    .unwrap();
    assert!(db.table("t").is_none());
}

#[test]
fn rename_missing_table_to_itself() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[{"line": 1, "type": "rename_table",
             "pairs": [{"from": {"name": "ghost"}, "to": {"name": "ghost"}}]}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::TableNotExists);
    assert_eq!(err.content, "Table `ghost` does not exist");

    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "rename_table",
              "pairs": [{{"from": {{"name": "t"}}, "to": {{"name": "T"}}}}]}}]"#
        ),
    )
    .unwrap();
    assert_eq!(db.table("t").unwrap().name(), "t");
}

#[test]
fn rename_table_from_other_database() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[{"line": 4, "type": "rename_table",
             "pairs": [{"from": {"database": "archive", "name": "t"}, "to": {"name": "t"}}]}]"#,
    )
    .unwrap_err();

    assert_eq!(err.code, Code::NotCurrentDatabase);
    assert_eq!(err.content, "Database `archive` is not the current database `shop`");
    assert_eq!(err.line, Some(4));
}

#[test]
fn alter_rename_then_modify_follows_new_name() {
    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "alter_table", "table": {{"name": "t"}},
              "specs": [
                {{"action": "rename_table", "new_name": {{"name": "u"}}}},
                {{"action": "add_columns", "columns": [{{"name": "d", "type": "int"}}], "position": "first"}}
              ]}}]"#
        ),
    )
    .unwrap();

    assert!(db.table("t").is_none());
    assert_eq!(column_order(&db, "u"), order(&["d", "a", "b", "c"]));
}

// =============================================================================
// Positions
// =============================================================================

#[test]
fn modify_after_moves_column() {
    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "alter_table", "table": {{"name": "t"}},
              "specs": [{{"action": "modify_column", "column": {{"name": "a", "type": "bigint"}},
                          "position": {{"after": "c"}}}}]}}]"#
        ),
    )
    .unwrap();

    assert_eq!(column_order(&db, "t"), order(&["b", "c", "a"]));
    let a = db.table("t").unwrap().column("a").unwrap();
    assert_eq!(a.sql_type.as_deref(), Some("bigint"));
}

#[test]
fn change_column_keeps_slot() {
    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "alter_table", "table": {{"name": "t"}},
              "specs": [{{"action": "change_column", "old_name": "b",
                          "column": {{"name": "bb", "type": "varchar(10)"}}}}]}}]"#
        ),
    )
    .unwrap();

    assert_eq!(column_order(&db, "t"), order(&["a", "bb", "c"]));
    let t = db.table("t").unwrap();
    assert_eq!(t.index("idx_ab").unwrap().expressions(), ["a", "bb"]);
}

#[test]
fn add_after_missing_column() {
    let mut db = shop();
    let err = replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "alter_table", "table": {{"name": "t"}},
              "specs": [{{"action": "add_columns", "columns": [{{"name": "d", "type": "int"}}],
                          "position": {{"after": "zz"}}}}]}}]"#
        ),
    )
    .unwrap_err();
    assert_eq!(err.code, Code::ColumnNotExists);
}

// =============================================================================
// Defaults
// =============================================================================

fn create_with_column(column: &str) -> String {
    format!(
        r#"[{{"line": 1, "type": "create_table", "table": {{"name": "t"}},
              "columns": [{{"name": "id", "type": "int"}}, {column}]}}]"#
    )
}

#[test]
fn blob_default_is_rejected() {
    let mut db = shop();
    let err = replay(
        &mut db,
        &create_with_column(
            r#"{"name": "b", "type": "blob", "options": [{"default": {"kind": "string", "value": "x"}}]}"#,
        ),
    )
    .unwrap_err();
    assert_eq!(err.code, Code::InvalidColumnDefault);
}

#[test]
fn text_number_default_is_rejected() {
    let mut db = shop();
    let err = replay(
        &mut db,
        &create_with_column(
            r#"{"name": "body", "type": "text", "options": [{"default": {"kind": "number", "value": "5"}}]}"#,
        ),
    )
    .unwrap_err();
    assert_eq!(err.code, Code::InvalidColumnDefault);
    assert_eq!(
        err.content,
        "BLOB, TEXT, GEOMETRY or JSON column `body` can't have a default value"
    );
}

#[test]
fn set_default_on_blob_and_text_is_rejected() {
    for ty in ["blob", "mediumtext"] {
        let mut db = shop();
        let err = replay(
            &mut db,
            &format!(
                r#"[{{"line": 1, "type": "create_table", "table": {{"name": "t"}},
                      "columns": [{{"name": "id", "type": "int"}}, {{"name": "payload", "type": "{ty}"}}]}},
                    {{"line": 2, "type": "alter_table", "table": {{"name": "t"}},
                      "specs": [{{"action": "set_default", "column": "payload",
                                  "value": {{"kind": "string", "value": "x"}}}}]}}]"#
            ),
        )
        .unwrap_err();
        assert_eq!(err.code, Code::InvalidColumnDefault, "{ty}");
        assert_eq!(err.line, Some(2));
        let payload = db.table("t").unwrap().column("payload").unwrap();
        assert_eq!(payload.default, None);
    }
}

#[test]
fn text_null_default_is_allowed() {
    let mut db = shop();
    replay(
        &mut db,
        &create_with_column(r#"{"name": "b", "type": "text", "options": [{"default": {"kind": "null"}}]}"#),
    )
    .unwrap();
}

#[test]
fn int_default_is_accepted() {
    let mut db = shop();
    replay(
        &mut db,
        &create_with_column(
            r#"{"name": "n", "type": "int", "options": [{"default": {"kind": "number", "value": "5"}}]}"#,
        ),
    )
    .unwrap();
    let n = db.table("t").unwrap().column("n").unwrap();
    assert_eq!(n.default.as_deref(), Some("5"));
}

#[test]
fn out_of_range_default() {
    let mut db = shop();
    let err = replay(
        &mut db,
        &create_with_column(
            r#"{"name": "n", "type": "tinyint unsigned", "options": [{"default": {"kind": "number", "value": "256"}}]}"#,
        ),
    )
    .unwrap_err();
    assert_eq!(err.code, Code::InvalidColumnDefault);
}

#[test]
fn set_default_null_on_not_null_column() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_table", "table": {"name": "t"},
             "columns": [{"name": "a", "type": "int", "options": ["not_null"]}]},
            {"line": 2, "type": "alter_table", "table": {"name": "t"},
             "specs": [{"action": "set_default", "column": "a", "value": {"kind": "null"}}]}
        ]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::SetNullDefaultForNotNullColumn);
}

// =============================================================================
// Tables, views and databases
// =============================================================================

#[test]
fn create_table_twice() {
    let mut db = shop();
    let err = replay(&mut db, &format!("[{CREATE_ABC}, {CREATE_ABC}]")).unwrap_err();
    assert_eq!(err.code, Code::TableExists);

    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "create_table", "table": {{"name": "T"}}, "ifNotExists": true,
              "columns": [{{"name": "x", "type": "int"}}]}}]"#
        ),
    )
    .unwrap();
    assert!(db.table("t").unwrap().column("x").is_none());
}

#[test]
fn create_table_like_copies_structure() {
    let mut db = shop();
    replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "create_table", "table": {{"name": "t_copy"}}, "like": {{"name": "t"}}}}]"#
        ),
    )
    .unwrap();
    let copy = db.table("t_copy").unwrap();
    assert_eq!(copy.index("idx_ab").unwrap().expressions(), ["a", "b"]);
    assert_eq!(column_order(&db, "t_copy"), order(&["a", "b", "c"]));
}

#[test]
fn create_table_like_other_database() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[{"line": 1, "type": "create_table", "table": {"name": "t"},
             "like": {"database": "archive", "name": "t"}}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::ReferenceOtherDatabase);
}

#[test]
fn create_table_as_select() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[{"line": 1, "type": "create_table", "text": "CREATE TABLE t AS SELECT 1",
             "table": {"name": "t"}, "asSelect": "SELECT 1"}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::StatementCreateTableAs);
    assert!(err.content.contains("CREATE TABLE t AS SELECT 1"));
}

#[test]
fn view_name_clashes() {
    let mut db = shop();
    let err = replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "create_view", "view": {{"name": "t"}}, "orReplace": true}}]"#
        ),
    )
    .unwrap_err();
    assert_eq!(err.code, Code::TableExists);

    let mut db = shop();
    replay(
        &mut db,
        r#"[
            {"line": 1, "type": "create_view", "view": {"name": "v"}, "definition": "SELECT 1"},
            {"line": 2, "type": "create_view", "view": {"name": "v"}, "orReplace": true, "definition": "SELECT 2"}
        ]"#,
    )
    .unwrap();
    assert_eq!(
        db.schema().view("v").unwrap().definition.as_deref(),
        Some("SELECT 2")
    );

    let err = replay(
        &mut db,
        r#"[{"line": 3, "type": "create_table", "table": {"name": "v"},
             "columns": [{"name": "a", "type": "int"}]}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::TableExists);
}

#[test]
fn dropped_database_rejects_everything_after() {
    let mut db = shop();
    let err = replay(
        &mut db,
        &format!(
            r#"[{{"line": 1, "type": "drop_database", "name": "shop"}},
            {CREATE_ABC}]"#
        ),
    )
    .unwrap_err();
    assert!(db.is_deleted());
    assert_eq!(err.code, Code::DatabaseIsDeleted);
    assert_eq!(err.content, "Database `shop` is deleted");
}

#[test]
fn create_database_is_out_of_scope() {
    let mut db = shop();
    let err = replay(&mut db, r#"[{"line": 1, "type": "create_database", "name": "other"}]"#)
        .unwrap_err();
    assert_eq!(err.code, Code::NotCurrentDatabase);
}

#[test]
fn alter_database_sets_charset() {
    let mut db = shop();
    replay(
        &mut db,
        r#"[{"line": 1, "type": "alter_database", "name": "SHOP",
             "options": [{"charset": "utf8mb4"}, {"collate": "utf8mb4_bin"}]}]"#,
    )
    .unwrap();
    assert_eq!(db.charset.as_deref(), Some("utf8mb4"));
    assert_eq!(db.collation.as_deref(), Some("utf8mb4_bin"));
}

#[test]
fn insert_checks_columns() {
    let mut db = shop();
    let err = replay(
        &mut db,
        &format!(
            r#"[{CREATE_ABC},
            {{"line": 2, "type": "insert", "table": {{"name": "t"}}, "columns": ["a", "zz"]}}]"#
        ),
    )
    .unwrap_err();
    assert_eq!(err.code, Code::ColumnNotExists);
    assert_eq!(err.line, Some(2));

    let err = replay(
        &mut db,
        r#"[{"line": 3, "type": "insert", "table": {"name": "missing"}}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::TableNotExists);
}

#[test]
fn statements_against_other_database() {
    let mut db = shop();
    let err = replay(
        &mut db,
        r#"[{"line": 1, "type": "create_table", "table": {"database": "other", "name": "t"},
             "columns": [{"name": "a", "type": "int"}]}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::NotCurrentDatabase);
}

// =============================================================================
// Seeded catalogs
// =============================================================================

const SEED: &str = r#"{
    "name": "shop",
    "tables": [{
        "name": "orders",
        "columns": [
            {"name": "id", "position": 1, "type": "int", "nullable": false},
            {"name": "note", "position": 2, "type": "varchar(20)", "nullable": true}
        ],
        "indexes": [
            {"name": "PRIMARY", "expressions": ["id"], "unique": true, "primary": true}
        ]
    }]
}"#;

fn seeded(mode: IntegrityMode) -> DatabaseState {
    DatabaseSnapshot::from_json(SEED)
        .unwrap()
        .into_state(Dialect::MySQL, mode, IdentifierCase::Insensitive)
        .unwrap()
}

#[test]
fn lenient_tables_tolerate_unknown_columns() {
    let stmts = r#"[
        {"line": 1, "type": "alter_table", "table": {"name": "orders"},
         "specs": [
            {"action": "drop_column", "name": "legacy"},
            {"action": "rename_column", "old_name": "ghost", "new_name": "spirit"},
            {"action": "drop_index", "name": "idx_gone"}
         ]}
    ]"#;

    let mut strict = seeded(IntegrityMode::Strict);
    let err = replay(&mut strict, stmts).unwrap_err();
    assert_eq!(err.code, Code::ColumnNotExists);

    let mut lenient = seeded(IntegrityMode::Lenient);
    replay(&mut lenient, stmts).unwrap();
    assert!(lenient.table("orders").unwrap().column("spirit").is_some());
}

#[test]
fn lenient_mode_still_checks_tables() {
    let mut lenient = seeded(IntegrityMode::Lenient);
    let err = replay(
        &mut lenient,
        r#"[{"line": 1, "type": "drop_table", "tables": [{"name": "customers"}]}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::TableNotExists);
}

#[test]
fn seeded_primary_key_blocks_another() {
    let mut db = seeded(IntegrityMode::Strict);
    let err = replay(
        &mut db,
        r#"[{"line": 1, "type": "create_index", "name": "PRIMARY", "table": {"name": "orders"},
             "kind": "unique", "keys": [{"column": "note"}]}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::IncorrectIndexName);
}

#[test]
fn case_sensitive_table_names() {
    let mut db = DatabaseSnapshot::from_json(SEED)
        .unwrap()
        .into_state(Dialect::MySQL, IntegrityMode::Strict, IdentifierCase::Sensitive)
        .unwrap();
    let err = replay(
        &mut db,
        r#"[{"line": 1, "type": "drop_table", "tables": [{"name": "ORDERS"}]}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::TableNotExists);

    // columns stay case-insensitive
    replay(
        &mut db,
        r#"[{"line": 2, "type": "insert", "table": {"name": "orders"}, "columns": ["ID", "Note"]}]"#,
    )
    .unwrap();
}

#[test]
fn snapshot_after_replay() {
    let mut db = seeded(IntegrityMode::Strict);
    replay(
        &mut db,
        r#"[{"line": 1, "type": "alter_table", "table": {"name": "orders"},
             "specs": [{"action": "add_columns", "columns": [{"name": "total", "type": "decimal(10,2)"}],
                        "position": {"after": "id"}}]}]"#,
    )
    .unwrap();

    let snapshot = db.snapshot();
    let names: Vec<_> = snapshot.tables[0].columns.iter().map(|c| c.name()).collect();
    assert_eq!(names, ["id", "total", "note"]);
}

#[test]
fn tables_seeded_from_definitions() {
    const ORDERS: TableDef = TableDef::new("orders").engine("InnoDB");
    const COLUMNS: &[ColumnDef] = &[
        ColumnDef::new("id", "int"),
        ColumnDef::new("note", "varchar(20)").default_value("''"),
    ];
    const INDEXES: &[IndexDef] = &[
        IndexDef::primary_key(&["id"]),
        IndexDef::new("idx_note", &["note"]),
    ];

    let mut db = shop();
    db.seed_table(TableState::from_defs(ORDERS, COLUMNS, INDEXES).unwrap())
        .unwrap();

    let err = replay(
        &mut db,
        r#"[{"line": 1, "type": "alter_table", "table": {"name": "orders"},
             "specs": [{"action": "set_default", "column": "id", "value": {"kind": "null"}}]}]"#,
    )
    .unwrap_err();
    assert_eq!(err.code, Code::SetNullDefaultForNotNullColumn);

    replay(
        &mut db,
        r#"[{"line": 2, "type": "alter_table", "table": {"name": "orders"},
             "specs": [{"action": "drop_column", "name": "note"}]}]"#,
    )
    .unwrap();
    let orders = db.table("orders").unwrap();
    assert!(orders.index("idx_note").is_none());
    assert_eq!(column_order(&db, "orders"), order(&["id"]));
}
