//! Example printing the same inserts for every built-in dialect.
//!
//! Run with:
//!   cargo run --example dialects -p insql

use insql::{BuildResult, Condition, DbType, Statement, StdDialect, Table, Value};

fn main() -> BuildResult<()> {
    let users = Table::new("user").with_autoincrement("id");

    for db in [
        DbType::MySql,
        DbType::Postgres,
        DbType::Mssql,
        DbType::Oracle,
        DbType::Sqlite,
    ] {
        let dialect = StdDialect::new(db);
        println!("== {db}");

        let empty = Statement::new(&dialect, users.clone())
            .gen_insert_sql::<&str, _>(&[], Vec::<Value>::new())?;
        println!("empty row:   {empty}");

        let row = Statement::new(&dialect, users.clone())
            .set_expr("created_at", "CURRENT_TIMESTAMP")
            .gen_insert_sql(&["name", "age"], [Value::from("alice"), Value::from(30)])?;
        println!("values:      {row}  {:?}", row.args());

        let (sql, args) = Statement::new(&dialect, Table::new("audit"))
            .where_cond(Condition::gt("age", 18))
            .gen_insert_map_sql(&["name"], ["bob"])?;
        println!("conditional: {sql}  {args:?}");
    }

    Ok(())
}
