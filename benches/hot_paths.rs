use creances_map::data::{CountryRecord, YearSnapshot, YearTotals};
use creances_map::map::geometry::fill_pixels;
use creances_map::map::Viewport;
use creances_map::scale::ColorScale;
use creances_map::search;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;

fn snapshot(n: usize) -> YearSnapshot {
    let mut countries = HashMap::new();
    for (i, c) in creances_map::reference::COUNTRIES.iter().cycle().take(n).enumerate() {
        countries.insert(
            c.iso.to_string(),
            CountryRecord {
                name: c.name.to_string(),
                apd: i as f64 * 1e6,
                napd: i as f64 * 5e5,
                total: i as f64 * 1.5e6,
            },
        );
    }
    YearSnapshot {
        countries,
        totals: YearTotals {
            apd: 0.0,
            napd: 0.0,
            total: 0.0,
            country_count: n as u32,
        },
    }
}

fn bench_color_scale(c: &mut Criterion) {
    let snap = snapshot(150);
    c.bench_function("color_scale_build_and_fill", |b| {
        b.iter(|| {
            let scale = ColorScale::for_snapshot(Some(black_box(&snap)));
            let mut acc = 0u32;
            for record in snap.countries.values() {
                if let ratatui::style::Color::Rgb(r, _, _) = scale.fill(Some(record)) {
                    acc = acc.wrapping_add(r as u32);
                }
            }
            acc
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let snap = snapshot(150);
    c.bench_function("search_suggestions", |b| {
        b.iter(|| search::suggestions(black_box("an"), &snap).count())
    });
}

fn bench_projection(c: &mut Criterion) {
    let viewport = Viewport::world(400, 200);
    let points: Vec<(f64, f64)> = (0..1000)
        .map(|i| (i as f64 * 0.36 - 180.0, (i % 160) as f64 - 80.0))
        .collect();
    c.bench_function("project_1k_points", |b| {
        b.iter(|| {
            points
                .iter()
                .map(|&(lon, lat)| viewport.project(lon, lat))
                .fold((0, 0), |acc, (x, y)| (acc.0 + x, acc.1 + y))
        })
    });
}

fn bench_fill(c: &mut Criterion) {
    // A jagged 64-gon roughly the size of a large on-screen country.
    let ring: Vec<(i32, i32)> = (0..64)
        .map(|i| {
            let angle = i as f64 / 64.0 * std::f64::consts::TAU;
            let radius = 60.0 + (i % 5) as f64 * 7.0;
            (
                (120.0 + radius * angle.cos()) as i32,
                (100.0 + radius * angle.sin()) as i32,
            )
        })
        .collect();
    c.bench_function("fill_polygon", |b| {
        b.iter(|| fill_pixels(black_box(&[ring.clone()]), 400, 200).len())
    });
}

criterion_group!(
    benches,
    bench_color_scale,
    bench_search,
    bench_projection,
    bench_fill
);
criterion_main!(benches);
