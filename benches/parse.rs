use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use linegrid::{bench_log, format, Grid};

fn parse_result(c: &mut Criterion) {
    let grid = Grid::new(300, 200);
    let mut buf = Vec::new();
    grid.write_expected(&mut buf).unwrap();

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(buf.len() as u64));
    group.bench_function("result file", |b| {
        b.iter(|| format::parse_result(buf.as_slice()).unwrap())
    });
    group.bench_function("segments only", |b| {
        b.iter(|| format::read_segments(buf.as_slice()).unwrap())
    });
    group.finish();
}

fn convert_log(c: &mut Criterion) {
    let log: String = (1..=1000)
        .map(|i| format!("BM_SweepLineGrid/{i}/100 {} ns {} ns 10\n", i * 31, i * 30))
        .collect();
    let records = bench_log::parse_log(log.as_bytes()).unwrap();

    c.bench_function("parse bench log", |b| {
        b.iter(|| bench_log::parse_log(log.as_bytes()).unwrap())
    });
    c.bench_function("write csv", |b| {
        b.iter(|| bench_log::write_csv(&records, std::io::sink()).unwrap())
    });
}

criterion_group!(benches, parse_result, convert_log);
criterion_main!(benches);
