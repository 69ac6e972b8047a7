//! Encode/decode benchmarks over representative value graphs.
//!
//! Measures:
//! - Flat numeric arrays (narrow integer classification throughput)
//! - String-heavy tables (interning)
//! - Nested config-like tables (recursion and table shape classification)
//! - Catalog-heavy graphs (fixed-layout writers)

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use valpak::{
    compress, decompress, CFrame, Color3, EnumItem, Quaternion, Serializer, Table, Value, Vector3,
};

// =============================================================================
// Fixtures
// =============================================================================

/// A flat array of 10k numbers spread across the narrow encodings.
fn numeric_array() -> Value {
    let values = (0..10_000)
        .map(|i| Value::Number(f64::from(i % 700) - 100.0))
        .collect::<Vec<_>>();
    Value::from(values)
}

/// A roster of players with heavily repeated field names.
fn player_roster() -> Value {
    let fields = ["name", "level", "health", "team", "zone"];
    let teams = ["red", "blue"];
    let values = (0..500usize)
        .map(|i| {
            let mut player = Table::new();
            player.insert(fields[0], format!("player_{i}"));
            player.insert(fields[1], (i % 100) as f64);
            player.insert(fields[2], (i % 250) as f64);
            player.insert(fields[3], teams[i % teams.len()]);
            player.insert(fields[4], "overworld");
            Value::Table(player)
        })
        .collect::<Vec<_>>();
    Value::from(values)
}

/// A config-like tree a few levels deep.
fn nested_config() -> Value {
    fn section(depth: usize) -> Value {
        let mut table = Table::new();
        table.insert("enabled", depth % 2 == 0);
        table.insert("weight", depth as f64 * 0.5);
        table.insert("label", format!("section_{depth}"));
        if depth > 0 {
            table.insert("left", section(depth - 1));
            table.insert("right", section(depth - 1));
        }
        Value::Table(table)
    }
    section(8)
}

/// A scene-like graph dominated by catalog values.
fn catalog_soup() -> Value {
    let values = (0..1_000)
        .map(|i| {
            let mut part = Table::new();
            let at = i as f32;
            part.insert(
                "frame",
                Value::CFrame(CFrame::new(
                    Vector3::new(at, at * 2.0, at * 3.0),
                    Quaternion::IDENTITY,
                )),
            );
            part.insert("tint", Value::Color3(Color3::new(0.1, 0.2, 0.3)));
            part.insert("brick", Value::BrickColor((i % 1032) as u16));
            part.insert("material", Value::EnumItem(EnumItem::new("Material", "Plastic")));
            Value::Table(part)
        })
        .collect::<Vec<_>>();
    Value::from(values)
}

fn fixtures() -> Vec<(&'static str, Value)> {
    vec![
        ("numeric_array", numeric_array()),
        ("player_roster", player_roster()),
        ("nested_config", nested_config()),
        ("catalog_soup", catalog_soup()),
    ]
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    for (name, value) in fixtures() {
        let payload = compress(&value).unwrap();
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_function(name, |b| {
            let mut serializer = Serializer::new();
            b.iter(|| serializer.compress(black_box(&value)).unwrap());
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    for (name, value) in fixtures() {
        let payload = compress(&value).unwrap();
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| decompress(black_box(&payload)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
