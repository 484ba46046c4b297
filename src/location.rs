//! Geographic locations and great-circle helpers.
//!
//! Locations are longitude/latitude pairs in degrees. Distance, bearing and
//! destination use spherical formulas on the WGS84 mean radius; they are
//! collaborators of the index, not part of the curve core, and are kept to
//! the standard closed forms.

use crate::geometry::BBox;
use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 semi-minor axis in meters.
pub const WGS84_B: f64 = 6_356_752.314_245;

/// Mean Earth radius used for great-circle math, `(WGS84_A + WGS84_B) / 2`.
pub const EARTH_RADIUS: f64 = (WGS84_A + WGS84_B) / 2.0;

/// A point on the Earth's surface in degrees.
///
/// Longitude comes first throughout the crate, matching the x/y axis order
/// of the planar index domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl Location {
    /// Create a location from longitude and latitude in degrees.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// The location as an `[x, y]` vector for box geometry.
    pub fn to_vector(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lng = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Initial bearing towards `other`, degrees clockwise from north in
    /// `[0, 360)`.
    pub fn bearing_to(&self, other: &Location) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lng = (other.longitude - self.longitude).to_radians();

        let y = delta_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }

    /// The location reached by travelling `distance` meters from here on the
    /// given initial bearing (degrees clockwise from north).
    pub fn destination(&self, bearing: f64, distance: f64) -> Location {
        let lat1 = self.latitude.to_radians();
        let lng1 = self.longitude.to_radians();
        let theta = bearing.to_radians();
        let delta = distance / EARTH_RADIUS;

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lng2 = lng1
            + (theta.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * lat2.sin());

        // Normalize longitude back into [-180, 180).
        let longitude = (lng2.to_degrees() + 540.0) % 360.0 - 180.0;
        Location::new(longitude, lat2.to_degrees())
    }

    /// Axis-aligned box guaranteed to contain every location within
    /// `distance` meters.
    ///
    /// The longitude span widens with latitude; past the point where a
    /// parallel circle no longer bounds the cap, the full longitude range is
    /// used.
    pub fn bounding_box(&self, distance: f64) -> BBox {
        let angular = distance / EARTH_RADIUS;
        let delta_lat = angular.to_degrees();

        let ratio = angular.sin() / self.latitude.to_radians().cos();
        let delta_lng = if ratio.abs() < 1.0 {
            ratio.asin().to_degrees()
        } else {
            180.0
        };

        BBox::new(
            [self.longitude - delta_lng, self.latitude - delta_lat],
            [delta_lng * 2.0, delta_lat * 2.0],
        )
    }

    /// Earth-centered, Earth-fixed coordinates in meters on the WGS84
    /// ellipsoid (zero height).
    pub fn to_ecef(&self) -> [f64; 3] {
        let lat = self.latitude.to_radians();
        let lng = self.longitude.to_radians();
        let e2 = 1.0 - (WGS84_B * WGS84_B) / (WGS84_A * WGS84_A);
        let n = WGS84_A / (1.0 - e2 * lat.sin().powi(2)).sqrt();

        [
            n * lat.cos() * lng.cos(),
            n * lat.cos() * lng.sin(),
            n * (1.0 - e2) * lat.sin(),
        ]
    }

    /// Inverse of [`to_ecef`](Self::to_ecef), using Bowring's closed form.
    pub fn from_ecef(ecef: [f64; 3]) -> Location {
        let [x, y, z] = ecef;
        let e2 = 1.0 - (WGS84_B * WGS84_B) / (WGS84_A * WGS84_A);
        let ep2 = (WGS84_A * WGS84_A) / (WGS84_B * WGS84_B) - 1.0;

        let p = (x * x + y * y).sqrt();
        let theta = (z * WGS84_A).atan2(p * WGS84_B);
        let lat = (z + ep2 * WGS84_B * theta.sin().powi(3))
            .atan2(p - e2 * WGS84_A * theta.cos().powi(3));
        let lng = y.atan2(x);

        Location::new(lng.to_degrees(), lat.to_degrees())
    }
}
