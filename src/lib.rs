//! Hilbert-curve spatial indexing for geographic point data.
//!
//! This crate indexes two-dimensional points (geographic coordinates
//! projected onto a bounded plane) along a Hilbert space-filling curve. The
//! curve's locality property lets a single sorted sequence of integer keys
//! answer rectangular range queries without a tree structure.
//!
//! # Architecture
//!
//! ```text
//! insert(location)                       query(box, depth)
//!        │                                      │
//!        ▼                                      ▼
//! integral grid mapping              curve traversal over the domain
//!        │                            (prune non-intersecting nodes)
//!        ▼                                      │
//! hilbert::encode → curve index                 ▼
//!        │                           candidate index intervals
//!        ▼                                      │
//! sorted point sequence  ◄── binary search ─────┘
//!        │
//!        ▼
//! exact containment refine → results
//! ```
//!
//! Sorting is explicit: batch inserts, call [`SpatialIndex::sort`] once,
//! then query. Results are exact at every traversal depth; `depth` only
//! trades traversal work against candidate scanning.
//!
//! # Modules
//!
//! - [`hilbert`]: rotation tables, encode/decode, pruning quadtree traversal
//! - [`index`]: the sorted point index and its range queries
//! - [`geometry`]: axis-aligned boxes, spheres, closed geometry dispatch
//! - [`location`]: longitude/latitude points and great-circle helpers
//! - [`error`]: error types
//!
//! # Example
//!
//! ```
//! use geocurve::{BBox, Location, SpatialIndex};
//!
//! let mut index = SpatialIndex::for_earth(16)?;
//! index.insert(Location::new(170.53, -43.89));
//! index.insert(Location::new(151.21, -33.85));
//! index.sort();
//!
//! let south_island = BBox::from_bounds([166.0, -48.0], [180.0, -34.0])?;
//! assert_eq!(index.query(&south_island, 10).len(), 1);
//! # Ok::<(), geocurve::SpatialError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod hilbert;
pub mod index;
pub mod location;

pub use error::{Result, SpatialError};
pub use geometry::{BBox, Shape, Sphere};
pub use hilbert::{decode, encode, traverse, CurveIndex, Visit, MAX_ORDER};
pub use index::{Point, QueryStats, SpatialIndex, TraversalNode};
pub use location::{Location, EARTH_RADIUS, WGS84_A, WGS84_B};
