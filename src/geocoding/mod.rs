pub mod client;
pub mod error;

pub use client::{Geocoder, OpenWeatherGeocoder};
