//! Matches a Paris to New York track against a handful of stations and prints
//! the resulting gramet request.
//!
//! Run with `cargo run --example paris_new_york`.

use chrono::{TimeDelta, Utc};
use gramet_route::{GeoPoint, Gramet, GrametError, ReductionAlgorithm, Route, StationDataset};

fn main() -> Result<(), GrametError> {
    let dataset = StationDataset::from_stations(
        [
            ("07157", 49.0097, 2.5479),
            ("03969", 53.4213, -6.2701),
            ("03962", 52.7019, -8.9248),
            ("04018", 63.985, -22.6056),
            ("71815", 48.5333, -58.55),
            ("71801", 47.6186, -52.7519),
            ("71395", 44.8808, -63.5086),
            ("72509", 42.3656, -71.0096),
            ("74486", 40.6398, -73.7789),
        ],
        3,
    );
    let gramet = Gramet::from_dataset(dataset, None)?;

    let mut points = vec![GeoPoint::new(49.0097, 2.5479).with_name("LFPG")];
    for label in ["52N010W", "53N020W", "53N030W", "52N040W", "50N050W"] {
        points.push(GeoPoint::from_arinc_label(label)?.with_name(label));
    }
    points.push(GeoPoint::new(40.6398, -73.7789).with_name("KJFK"));
    let route = Route::new(points).with_name("LFPG-KJFK");

    for algorithm in [ReductionAlgorithm::Xtd, ReductionAlgorithm::Crs] {
        let stations = gramet
            .station_route()
            .route(&route)
            .algorithm(algorithm)
            .call()?;
        println!("{algorithm}: {}", stations.labels().join(" "));
    }

    let request = gramet
        .request()
        .route(&route)
        .name("AF006 LFPG-KJFK")
        .departure(Utc::now() + TimeDelta::hours(2))
        .flight_time(TimeDelta::minutes(495))
        .flight_level(360)
        .call()?;
    for point in request.route().iter() {
        println!("{:>8} {}", point.name(), point.rounded_dm());
    }
    println!("{}", request.url());
    println!("cache key: {}", request.proxy_key());
    Ok(())
}
