use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::time::Duration;
use table_diff::{
    ColDiff, DiffReader, DiffResult, MemorySource, RowDiff, Table, longest_increasing_indices,
    move_ops,
};

const MEASUREMENT_SECS: u64 = 10;
const WARMUP_SECS: u64 = 3;
const SAMPLE_SIZE: usize = 20;

fn column_names(width: usize) -> Vec<String> {
    (0..width).map(|i| format!("col{i:04}")).collect()
}

/// Splits the list in half and interleaves the halves, scattering nearly
/// every column away from its original position.
fn interleaved(names: &[String]) -> Vec<String> {
    let half = names.len() / 2;
    let mut out = Vec::with_capacity(names.len());
    for i in 0..half {
        out.push(names[i].clone());
        out.push(names[half + i].clone());
    }
    out.extend_from_slice(&names[half * 2..]);
    out
}

fn reversed_positions(len: usize) -> Vec<usize> {
    (0..len).rev().collect()
}

fn sawtooth_positions(len: usize, period: usize) -> Vec<usize> {
    let mut out: Vec<usize> = (0..len).collect();
    for chunk in out.chunks_mut(period) {
        chunk.reverse();
    }
    out
}

fn bench_schema_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_merge");
    group.measurement_time(Duration::from_secs(MEASUREMENT_SECS));
    group.warm_up_time(Duration::from_secs(WARMUP_SECS));
    group.sample_size(SAMPLE_SIZE);

    for width in [50usize, 200, 1000] {
        let names = column_names(width);
        let base = Table::new(names.clone(), vec![0]);
        let identical = Table::new(names.clone(), vec![0]);
        let scrambled = Table::new(interleaved(&names), vec![0]);

        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("identical", width), &width, |b, _| {
            b.iter(|| {
                let cd = ColDiff::between(&base, &identical);
                criterion::black_box(cd);
            });
        });
        group.bench_with_input(BenchmarkId::new("interleaved", width), &width, |b, _| {
            b.iter(|| {
                let cd = ColDiff::between(&base, &scrambled);
                criterion::black_box(cd);
            });
        });
    }
    group.finish();
}

fn bench_order_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_analysis");
    group.measurement_time(Duration::from_secs(MEASUREMENT_SECS));
    group.warm_up_time(Duration::from_secs(WARMUP_SECS));
    group.sample_size(SAMPLE_SIZE);

    for len in [1_000usize, 4_000] {
        let reversed = reversed_positions(len);
        let sawtooth = sawtooth_positions(len, 16);

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("lis_reversed", len), &len, |b, _| {
            b.iter(|| criterion::black_box(longest_increasing_indices(&reversed)));
        });
        group.bench_with_input(BenchmarkId::new("lis_sawtooth", len), &len, |b, _| {
            b.iter(|| criterion::black_box(longest_increasing_indices(&sawtooth)));
        });
        group.bench_with_input(BenchmarkId::new("move_ops_sawtooth", len), &len, |b, _| {
            b.iter(|| criterion::black_box(move_ops(&sawtooth)));
        });
    }
    group.finish();
}

fn bench_row_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_projection");
    group.measurement_time(Duration::from_secs(MEASUREMENT_SECS));
    group.warm_up_time(Duration::from_secs(WARMUP_SECS));
    group.sample_size(SAMPLE_SIZE);

    let width = 200usize;
    let names = column_names(width);
    let base = Table::new(names.clone(), vec![0]);
    let layer = Table::new(interleaved(&names), vec![0]);
    let cd = ColDiff::between(&base, &layer);
    let row: Vec<String> = (0..width).map(|i| format!("value{i}")).collect();

    group.throughput(Throughput::Elements(width as u64));
    group.bench_function("rearrange_row", |b| {
        b.iter(|| criterion::black_box(cd.rearrange_row(0, &row)));
    });
    group.bench_function("rearrange_base_row", |b| {
        b.iter(|| criterion::black_box(cd.rearrange_base_row(&row)));
    });
    group.bench_function("combine_rows", |b| {
        b.iter(|| criterion::black_box(cd.combine_rows(0, &row, &row)));
    });
    group.finish();
}

fn modified_fixture(rows: u64, width: usize) -> (MemorySource, DiffResult) {
    let names = column_names(width);
    let table: Vec<Vec<String>> = (0..rows)
        .map(|r| (0..width).map(|c| format!("r{r}c{c}")).collect())
        .collect();
    let mut source = MemorySource::new();
    source.insert_table("sumNew", table.clone());
    source.insert_table("sumOld", table);
    let diff = DiffResult {
        table_sum: "sumNew".to_string(),
        old_table_sum: "sumOld".to_string(),
        pk: vec![0],
        old_pk: vec![0],
        columns: names.clone(),
        old_columns: names,
        row_diff: Some(
            (0..rows)
                .map(|i| RowDiff { off1: Some(i), off2: Some(i) })
                .collect(),
        ),
        data_profile: None,
    };
    (source, diff)
}

fn bench_reader_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader_drain");
    group.measurement_time(Duration::from_secs(MEASUREMENT_SECS));
    group.warm_up_time(Duration::from_secs(WARMUP_SECS));
    group.sample_size(SAMPLE_SIZE);

    for rows in [1_000u64, 5_000] {
        let (source, diff) = modified_fixture(rows, 10);

        group.throughput(Throughput::Elements(rows));
        group.bench_with_input(BenchmarkId::new("modified_rows", rows), &rows, |b, _| {
            b.iter(|| {
                let reader =
                    DiffReader::new(&source, diff.clone()).expect("summary is well formed");
                let drained = reader
                    .modified_rows()
                    .expect("row sequences are available")
                    .map(|row| row.expect("fetch succeeds"))
                    .count();
                criterion::black_box(drained);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_schema_merge,
    bench_order_analysis,
    bench_row_projection,
    bench_reader_drain,
);

criterion_main!(benches);
