use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlweave::{PlaceholderFormat, SelectBuilder, Sqlizer, args, eq, exists, in_, select};

/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ...
fn build_select(n: usize) -> SelectBuilder {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let mut sb = select(columns).from("t");
    for i in 0..n {
        sb = sb.where_(eq(format!("col{i}"), i as i64));
    }
    sb.placeholder_format(PlaceholderFormat::Dollar)
}

/// `depth` SELECTs nested through EXISTS, each binding one argument.
fn build_nested(depth: usize) -> SelectBuilder {
    let mut sb = select(["1"]).from("t0").where_sql("v = ?", args![0]);
    for i in 1..depth {
        sb = select(["1"])
            .from(format!("t{i}"))
            .where_sql("v = ?", args![i as i64])
            .where_(exists(sb));
    }
    sb.placeholder_format(PlaceholderFormat::Dollar)
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 5, 10, 50, 100] {
        let sb = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &sb, |b, sb| {
            b.iter(|| black_box(sb.to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).to_sql()));
        });
    }

    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/nested_exists");

    for depth in [2, 5, 10, 20] {
        let sb = build_nested(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &sb, |b, sb| {
            b.iter(|| black_box(sb.to_sql()));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let sb = select(["*"]).from("t").where_(in_("id", values.clone()));
                black_box(sb.to_sql())
            });
        });
    }

    group.finish();
}

fn bench_replace_placeholders(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/replace_placeholders");

    for n in [10, 100, 1000] {
        let sql = vec!["x = ?"; n].join(" AND ");
        group.bench_with_input(BenchmarkId::from_parameter(n), &sql, |b, sql| {
            b.iter(|| black_box(PlaceholderFormat::Dollar.replace_placeholders(sql)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_sql,
    bench_build_and_render,
    bench_nested,
    bench_in_list,
    bench_replace_placeholders
);
criterion_main!(benches);
