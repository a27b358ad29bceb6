pub mod geoip;

pub use geoip::{Coordinates, GeoLookup, GeoProvider};
