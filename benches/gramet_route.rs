use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gramet_route::{
    match_route, match_stations, GeoPoint, MatchOptions, Route, SplitOptions, StationDataset,
    StationGrid,
};

// A station every half degree over the North Atlantic.
fn grid() -> StationGrid {
    let stations = (0..60).flat_map(|row| {
        (0..160).map(move |col| {
            let latitude = 35.0 + f64::from(row) * 0.5;
            let longitude = -80.0 + f64::from(col) * 0.5;
            (format!("S{row:02}{col:03}"), latitude, longitude)
        })
    });
    StationGrid::with_default_precision(StationDataset::from_stations(stations, 3)).unwrap()
}

fn route() -> Route {
    Route::new(vec![
        GeoPoint::new(49.0097, 2.5479).with_name("LFPG"),
        GeoPoint::new(52.0, -10.0),
        GeoPoint::new(54.0, -20.0),
        GeoPoint::new(54.0, -30.0),
        GeoPoint::new(52.0, -40.0),
        GeoPoint::new(50.0, -50.0),
        GeoPoint::new(40.6398, -73.7789).with_name("KJFK"),
    ])
}

fn bench_matcher(c: &mut Criterion) {
    let grid = grid();
    let route = route();
    let options = MatchOptions::default();
    c.bench_function("split_60km", |b| {
        let split = SplitOptions::builder()
            .unit(gramet_route::DistanceUnit::Kilometers)
            .preserve_vertices(true)
            .build();
        b.iter(|| black_box(&route).split(60.0, &split))
    });
    c.bench_function("match_stations", |b| {
        b.iter(|| match_stations(&grid, black_box(&route), &options))
    });
    c.bench_function("match_route", |b| {
        b.iter(|| match_route(&grid, black_box(&route), &options))
    });
}

criterion_group!(benches, bench_matcher);
criterion_main!(benches);
