use biexport::archive::{ArchiveWriter, Compression, ExportArchive};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;

fn data_model(connections: usize) -> String {
    let connections: Vec<_> = (0..connections)
        .map(|i| {
            serde_json::json!({
                "name": format!("conn-{i}"),
                "dbSource": {
                    "querySources": [{
                        "name": "dbo",
                        "querySources": [
                            {"name": "orders", "type": "table", "modified": "2024-05-01T12:00:00Z"},
                            {"name": "totals", "type": "view", "modified": "2024-05-02T12:00:00Z"}
                        ]
                    }]
                }
            })
        })
        .collect();

    let value = serde_json::json!({
        "name": "Bench Model",
        "version": 1,
        "sourceConnections": connections,
    });
    serde_json::to_string_pretty(&value).unwrap()
}

pub fn minify_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("minify");
    for size in [1, 16, 256].iter() {
        let data = data_model(*size);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &_size| {
            b.iter(|| biexport::minify(black_box(&data)));
        });
    }
    group.finish();
}

pub fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let options = biexport::RenderOptions::new();
    for size in [1, 16, 256].iter() {
        let data = data_model(*size);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &_size| {
            b.iter(|| biexport::render_view(black_box(&data), &options));
        });
    }
    group.finish();
}

pub fn archive_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive");
    let data = data_model(256);
    for compression in [Compression::Stored, Compression::Deflated] {
        let mut writer = ArchiveWriter::new(Cursor::new(Vec::new()));
        writer
            .add_entry("Bench Model", data.as_bytes(), compression)
            .unwrap();
        let out = writer.finish().unwrap().into_inner();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(format!("read-{:?}", compression), |b| {
            b.iter(|| {
                let mut archive = ExportArchive::from_slice(black_box(&out)).unwrap();
                archive.read_entry_to_string("Bench Model").unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, minify_benchmark, render_benchmark, archive_benchmark);

criterion_main!(benches);
