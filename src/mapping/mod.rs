mod geocoder;
pub mod markers;
pub mod session;
pub mod stagger;

pub use geocoder::{GeocodeError, Geocoder, GoogleGeocoder, LatLng};
pub use session::MapSession;
