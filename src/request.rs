//! Gramet cross-section request built from a matched station route.

use crate::route::flight_route::Route;
use bon::Builder;
use chrono::{DateTime, TimeDelta, Utc};

const GRAMET_URL: &str = "http://www.ogimet.com/display_gramet.php";

/// Vertical extent of the cross-section, in feet.
const HEIGHT_LIMIT_FT: u32 = 3000;

/// Parameters of a gramet request over the stations of a matched route.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use gramet_route::{GeoPoint, GrametRequest, Route};
///
/// let route = Route::new(vec![
///     GeoPoint::new(49.0097, 2.5479).with_name("07157"),
///     GeoPoint::new(51.0, -30.0),
///     GeoPoint::new(40.6398, -73.7789).with_name("74486"),
/// ]);
/// let request = GrametRequest::builder()
///     .route(route)
///     .departure(Utc.with_ymd_and_hms(2030, 5, 1, 10, 0, 0).unwrap())
///     .flight_time(TimeDelta::minutes(490))
///     .flight_level(350)
///     .build();
/// assert_eq!(request.labels(), vec!["07157", "74486"]);
/// assert_eq!(request.end_hour(), 9);
/// assert_eq!(request.proxy_key(), "0-1903860000-9-350-07157_74486");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct GrametRequest {
    /// Station route, usually the output of [`crate::match_route`].
    route: Route,
    /// Take-off time.
    departure: DateTime<Utc>,
    flight_time: TimeDelta,
    /// Average cruise flight level.
    flight_level: u32,
    /// First forecast hour, relative to the reference time.
    #[builder(default)]
    start_hour: u32,
}

impl GrametRequest {
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    pub fn flight_level(&self) -> u32 {
        self.flight_level
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Station labels in route order; unnamed display points are skipped.
    pub fn labels(&self) -> Vec<&str> {
        self.route.labels()
    }

    /// Labels joined by spaces, the customary description of a gramet route.
    pub fn description(&self) -> String {
        self.labels().join(" ")
    }

    /// Flight time rounded up to whole hours.
    pub fn end_hour(&self) -> u32 {
        let minutes = self.flight_time.num_minutes().max(0);
        u32::try_from((minutes + 59) / 60).unwrap_or(u32::MAX)
    }

    /// Reference time of the forecast: departure, or `now` for past flights.
    pub fn reference_time(&self, now: DateTime<Utc>) -> i64 {
        rounded_timestamp(self.departure.max(now))
    }

    /// Request URL with the reference time evaluated at `now`.
    pub fn url_at(&self, now: DateTime<Utc>) -> String {
        format!(
            "{GRAMET_URL}?lang=en&hini={}&tref={}&hfin={}&fl={}&hl={HEIGHT_LIMIT_FT}&aero=yes&wmo={}&submit=submit",
            self.start_hour,
            self.reference_time(now),
            self.end_hour(),
            self.flight_level,
            self.labels().join("_"),
        )
    }

    pub fn url(&self) -> String {
        self.url_at(Utc::now())
    }

    /// Stable cache key: unlike the URL it depends on the departure only, not
    /// on the time the request is made.
    pub fn proxy_key(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.start_hour,
            rounded_timestamp(self.departure),
            self.end_hour(),
            self.flight_level,
            self.labels().join("_"),
        )
    }
}

fn rounded_timestamp(time: DateTime<Utc>) -> i64 {
    (time.timestamp_millis() + 500).div_euclid(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::geo_point::GeoPoint;
    use chrono::TimeZone;

    fn request(departure: DateTime<Utc>) -> GrametRequest {
        let route = Route::new(vec![
            GeoPoint::new(49.0, 2.5).with_name("07157"),
            GeoPoint::new(52.0, -10.0),
            GeoPoint::new(53.3, -8.9).with_name("03969"),
            GeoPoint::new(47.6, -52.7).with_name("71801"),
        ]);
        GrametRequest::builder()
            .route(route)
            .departure(departure)
            .flight_time(TimeDelta::minutes(421))
            .flight_level(370)
            .build()
    }

    #[test]
    fn test_labels_and_description() {
        let request = request(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(request.labels(), vec!["07157", "03969", "71801"]);
        assert_eq!(request.description(), "07157 03969 71801");
    }

    #[test]
    fn test_end_hour_rounds_up() {
        let mut request = request(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(request.end_hour(), 8);
        request.flight_time = TimeDelta::minutes(420);
        assert_eq!(request.end_hour(), 7);
        request.flight_time = TimeDelta::zero();
        assert_eq!(request.end_hour(), 0);
    }

    #[test]
    fn test_reference_time_uses_later_of_departure_and_now() {
        let departure = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let request = request(departure);
        let before = departure - TimeDelta::hours(3);
        let after = departure + TimeDelta::hours(3);
        assert_eq!(request.reference_time(before), departure.timestamp());
        assert_eq!(request.reference_time(after), after.timestamp());
    }

    #[test]
    fn test_url_at() {
        let departure = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let url = request(departure).url_at(departure - TimeDelta::hours(1));
        assert_eq!(
            url,
            "http://www.ogimet.com/display_gramet.php?lang=en&hini=0&tref=1717243200\
             &hfin=8&fl=370&hl=3000&aero=yes&wmo=07157_03969_71801&submit=submit"
        );
    }

    #[test]
    fn test_proxy_key_ignores_now() {
        let departure = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let request = request(departure);
        assert_eq!(request.proxy_key(), "0-1717243200-8-370-07157_03969_71801");
    }
}
