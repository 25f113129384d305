use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use insql::{Condition, DbType, Statement, StdDialect, Table, Value};

fn columns(n: usize) -> (Vec<String>, Vec<Value>) {
    let cols = (0..n).map(|i| format!("col{i}")).collect();
    let vals = (0..n).map(|i| Value::from(i as i64)).collect();
    (cols, vals)
}

fn bench_gen_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert/gen_insert_sql");

    for db in [DbType::MySql, DbType::Postgres, DbType::Mssql, DbType::Oracle] {
        let dialect = StdDialect::new(db);
        let (cols, vals) = columns(20);
        group.bench_with_input(BenchmarkId::from_parameter(db), &db, |b, _| {
            b.iter(|| {
                let stmt = Statement::new(&dialect, Table::new("users").with_autoincrement("id"));
                black_box(stmt.gen_insert_sql(&cols, vals.clone()).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_column_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert/columns");
    let dialect = StdDialect::postgres();

    for n in [1, 5, 10, 50, 100] {
        let (cols, vals) = columns(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let stmt = Statement::new(&dialect, Table::new("t"));
                black_box(stmt.gen_insert_sql(&cols, vals.clone()).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_conditional_map(c: &mut Criterion) {
    let dialect = StdDialect::mssql();
    let (cols, vals) = columns(10);

    c.bench_function("insert/gen_insert_map_sql/conditional", |b| {
        b.iter(|| {
            let stmt = Statement::new(&dialect, Table::new("t"))
                .set_expr("updated", "GETDATE()")
                .where_cond(Condition::in_list("k", vec![1, 2, 3]).and_also(Condition::is_null("z")));
            black_box(stmt.gen_insert_map_sql(&cols, vals.clone()).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_gen_insert,
    bench_column_count,
    bench_conditional_map
);
criterion_main!(benches);
