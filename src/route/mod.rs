pub mod flight_route;
pub mod split;
