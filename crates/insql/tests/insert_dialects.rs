//! Cross-dialect properties of generated INSERT statements.

use insql::{
    Condition, DbType, Dialect, PlaceholderStyle, Statement, StdDialect, Table, Value,
};

const ALL: [DbType; 6] = [
    DbType::MySql,
    DbType::Postgres,
    DbType::Mssql,
    DbType::Oracle,
    DbType::Sqlite,
    DbType::Other,
];

fn count_placeholders(sql: &str, style: PlaceholderStyle) -> usize {
    match style {
        PlaceholderStyle::Question => sql.matches('?').count(),
        PlaceholderStyle::Dollar => sql.matches('$').count(),
        PlaceholderStyle::AtP => sql.matches("@p").count(),
        PlaceholderStyle::Colon => sql.matches(':').count(),
    }
}

/// Numbered placeholders in order of appearance, e.g. `[1, 2, 3]` for `$1 .. $2 .. $3`.
fn placeholder_indices(sql: &str, marker: &str) -> Vec<usize> {
    sql.split(marker)
        .skip(1)
        .map(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap()
        })
        .collect()
}

fn shapes() -> Vec<(Vec<&'static str>, Vec<Value>)> {
    vec![
        (vec![], vec![]),
        (vec!["name"], vec![Value::from("alice")]),
        (
            vec!["name", "age", "email"],
            vec![Value::from("bob"), Value::from(42), Value::Null],
        ),
    ]
}

#[test]
fn placeholders_match_arguments_for_every_dialect() {
    for db in ALL {
        let d = StdDialect::new(db);
        for (cols, vals) in shapes() {
            for with_cond in [false, true] {
                let mut stmt = Statement::new(&d, Table::new("account")).set_expr("created", "NOW()");
                if with_cond {
                    stmt = stmt.where_cond(Condition::between("age", 18, 65));
                }
                let w = stmt.gen_insert_sql(&cols, vals.clone()).unwrap();
                assert_eq!(
                    count_placeholders(w.sql(), d.placeholder()),
                    w.args().len(),
                    "{db}: {}",
                    w.sql()
                );
                let expected = vals.len() + if with_cond { 2 } else { 0 };
                assert_eq!(w.args().len(), expected, "{db}: {}", w.sql());
                assert_eq!(&w.args()[..vals.len()], &vals[..]);
            }
        }
    }
}

#[test]
fn numbered_placeholders_are_sequential() {
    for (d, marker) in [
        (StdDialect::postgres(), "$"),
        (StdDialect::mssql(), "@p"),
        (StdDialect::oracle(), ":"),
    ] {
        let w = Statement::new(&d, Table::new("t"))
            .where_cond(Condition::in_list("k", vec![1, 2]).and_also(Condition::eq("z", 0)))
            .gen_insert_sql(&["a", "b"], ["x", "y"])
            .unwrap();
        assert_eq!(placeholder_indices(w.sql(), marker), vec![1, 2, 3, 4, 5], "{}", w.sql());
        assert_eq!(
            w.args(),
            &[
                Value::from("x"),
                Value::from("y"),
                Value::Int(1),
                Value::Int(2),
                Value::Int(0)
            ]
        );
    }
}

#[test]
fn generation_is_deterministic() {
    for db in ALL {
        let d = StdDialect::new(db);
        let build = || {
            Statement::new(&d, Table::new("user").with_autoincrement("id"))
                .set_expr("b", "1")
                .set_expr("a", "2")
                .gen_insert_sql(&["z", "y"], [1, 2])
                .unwrap()
                .finish()
        };
        assert_eq!(build(), build());
    }
}

#[test]
fn exactly_one_key_mechanism_per_dialect() {
    for db in ALL {
        let d = StdDialect::new(db);
        let w = Statement::new(&d, Table::new("item").with_autoincrement("id"))
            .gen_insert_sql(&["name"], ["x"])
            .unwrap();
        let sql = w.sql();
        let mechanisms = [
            sql.contains(" OUTPUT Inserted."),
            sql.contains(" RETURNING "),
            sql.contains(".nextval"),
        ];
        let used = mechanisms.iter().filter(|m| **m).count();
        match db {
            DbType::Mssql => assert_eq!(mechanisms, [true, false, false], "{sql}"),
            DbType::Postgres => assert_eq!(mechanisms, [false, true, false], "{sql}"),
            DbType::Oracle => assert_eq!(mechanisms, [false, false, true], "{sql}"),
            DbType::MySql | DbType::Sqlite | DbType::Other => assert_eq!(used, 0, "{sql}"),
        }
    }
}

#[test]
fn columns_line_up_with_values() {
    let d = StdDialect::other();
    let w = Statement::new(&d, Table::new("t"))
        .set_expr("c3", "NOW()")
        .gen_insert_sql(&["c1", "c2"], ["v1", "v2"])
        .unwrap();
    let sql = w.sql();
    let (head, tail) = sql.split_once(" VALUES ").unwrap();
    let cols: Vec<&str> = head
        .strip_prefix("INSERT INTO t (")
        .and_then(|s| s.strip_suffix(')'))
        .unwrap()
        .split(',')
        .collect();
    let vals: Vec<&str> = tail
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap()
        .split(',')
        .collect();
    assert_eq!(cols, vec!["c1", "c2", "c3"]);
    assert_eq!(vals, vec!["?", "?", "NOW()"]);
}

#[test]
fn dialect_from_config_string() {
    let db: DbType = serde_json::from_str(r#""sqlserver""#).unwrap();
    let d = StdDialect::from(db);
    let w = Statement::new(&d, Table::new("t"))
        .gen_insert_sql(&["a"], [1])
        .unwrap();
    assert_eq!(w.sql(), "INSERT INTO [t] ([a]) VALUES (@p1)");
}

#[test]
fn arguments_serialize_for_logging() {
    let d = StdDialect::mysql();
    let (_, args) = Statement::new(&d, Table::new("t"))
        .gen_insert_map_sql(&["a", "b", "c"], [Value::from("x"), Value::from(true), Value::Null])
        .unwrap();
    assert_eq!(serde_json::to_string(&args).unwrap(), r#"["x",true,null]"#);
}
