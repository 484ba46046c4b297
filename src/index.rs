//! The spatial index: a curve-sorted point sequence plus range queries.
//!
//! Points are mapped into an integer grid over the domain box, keyed by
//! their Hilbert curve index, and kept in one flat vector. Sorting is an
//! explicit step: batch the inserts, call [`SpatialIndex::sort`] once, then
//! query. The index never re-sorts on its own; candidate-interval binary
//! search assumes a fully sorted sequence.
//!
//! Queries drive the curve traversal over the domain, prune subtrees whose
//! boxes cannot intersect the query region, collect candidate curve-index
//! intervals at the requested depth, binary-search the sorted sequence per
//! interval, and refine candidates by exact containment. Results are exact
//! at every depth; depth only trades traversal work against candidate-scan
//! work.

use crate::error::{Result, SpatialError};
use crate::geometry::BBox;
use crate::hilbert::{self, CurveIndex, Visit, MAX_ORDER};
use crate::location::Location;
use serde::{Deserialize, Serialize};

/// A location paired with its curve index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub location: Location,
    pub curve_index: CurveIndex,
}

/// A quadtree node yielded by [`SpatialIndex::traverse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalNode {
    /// Geometric extent of the node.
    pub bounds: BBox,
    /// Smallest curve index in the node's subtree.
    pub index: CurveIndex,
    /// Recursion levels remaining below this node.
    pub remaining: u32,
}

/// Statistics from one query execution.
///
/// Use these to understand how well the traversal pruned and how selective
/// the candidate intervals were.
#[derive(Debug, Clone, Default)]
pub struct QueryStats {
    /// Quadtree nodes visited during traversal.
    pub nodes_visited: usize,

    /// Nodes pruned because their box missed the query region.
    pub nodes_pruned: usize,

    /// Candidate curve-index intervals after coalescing.
    pub candidate_ranges: usize,

    /// Points scanned out of the sorted sequence.
    pub candidates_scanned: usize,

    /// Points that passed the exact containment filter.
    pub result_count: usize,
}

impl QueryStats {
    /// Ratio of results to scanned candidates. Lower means the curve
    /// intervals over-approximated the query region more.
    pub fn selectivity(&self) -> f64 {
        if self.candidates_scanned == 0 {
            0.0
        } else {
            self.result_count as f64 / self.candidates_scanned as f64
        }
    }
}

/// An ordered sequence of points indexed by Hilbert curve position.
///
/// # Usage
///
/// ```
/// use geocurve::{BBox, Location, SpatialIndex};
///
/// let mut index = SpatialIndex::for_earth(16).unwrap();
/// index.insert(Location::new(170.53, -43.89));
/// index.insert(Location::new(151.21, -33.85));
/// index.sort();
///
/// let query = BBox::from_bounds([166.0, -48.0], [180.0, -34.0]).unwrap();
/// let found = index.query(&query, 10);
/// assert_eq!(found.len(), 1);
/// ```
///
/// # Precondition
///
/// `query`, `query_with_stats` and `query_radius` are only guaranteed
/// correct once every point has been inserted and [`sort`](Self::sort) has
/// been called. Inserting after a sort requires sorting again before the
/// next query.
pub struct SpatialIndex {
    bounds: BBox,
    order: u32,
    points: Vec<Point>,
}

impl SpatialIndex {
    /// Create an index over the given domain box.
    ///
    /// Fails with [`SpatialError::InvalidOrder`] if `order` exceeds
    /// [`MAX_ORDER`].
    pub fn new(bounds: BBox, order: u32) -> Result<Self> {
        if order > MAX_ORDER {
            return Err(SpatialError::InvalidOrder {
                order,
                max: MAX_ORDER,
            });
        }
        Ok(Self {
            bounds,
            order,
            points: Vec::new(),
        })
    }

    /// Create an index over the whole Earth in degrees:
    /// (-180, -90) to (180, 90).
    pub fn for_earth(order: u32) -> Result<Self> {
        Self::new(BBox::new([-180.0, -90.0], [360.0, 180.0]), order)
    }

    /// The domain box.
    pub fn bounds(&self) -> BBox {
        self.bounds
    }

    /// The curve order; grid resolution is `2^order` cells per axis.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Number of inserted points.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Inserted locations in stored order (curve order after
    /// [`sort`](Self::sort)).
    pub fn points(&self) -> impl Iterator<Item = &Location> {
        self.points.iter().map(|p| &p.location)
    }

    /// Curve index of a location within this index's grid.
    ///
    /// Out-of-domain locations produce an out-of-range grid cell and hence a
    /// curve index no in-domain query interval can reach; the exact
    /// containment filter keeps them out of results either way.
    pub fn curve_index_of(&self, location: &Location) -> CurveIndex {
        let scale = 1i64 << self.order;
        let grid = self.bounds.integral_offset(location.to_vector(), scale);
        hilbert::encode(grid[0] as u32, grid[1] as u32, self.order)
    }

    /// Append a location. Does not maintain sort order.
    pub fn insert(&mut self, location: Location) {
        let curve_index = self.curve_index_of(&location);
        self.points.push(Point {
            location,
            curve_index,
        });
    }

    /// Stable sort of the point sequence by curve index, ascending.
    ///
    /// Must run after the last insert and before the first query.
    pub fn sort(&mut self) {
        self.points.sort_by_key(|p| p.curve_index);
    }

    /// Quadtree nodes intersecting `query`, in curve order, down to `depth`
    /// levels (clamped to the index order).
    pub fn traverse(&self, query: &BBox, depth: u32) -> Vec<TraversalNode> {
        let depth = depth.min(self.order);
        let mut nodes = Vec::new();
        if depth == 0 {
            return nodes;
        }
        let cut = self.order - depth;
        hilbert::traverse(
            self.order,
            self.bounds.origin(),
            self.bounds.size(),
            &mut |cell, index, remaining| {
                if !cell.intersect(query) {
                    return Visit::Skip;
                }
                nodes.push(TraversalNode {
                    bounds: *cell,
                    index,
                    remaining,
                });
                if remaining == cut {
                    Visit::Skip
                } else {
                    Visit::Continue
                }
            },
        );
        nodes
    }

    /// Locations inside `query`, using at most `depth` traversal levels.
    ///
    /// Results are exact with respect to the box's half-open containment at
    /// any depth; see the type-level precondition.
    pub fn query(&self, query: &BBox, depth: u32) -> Vec<Location> {
        self.query_with_stats(query, depth).0
    }

    /// [`query`](Self::query) with execution statistics.
    pub fn query_with_stats(&self, query: &BBox, depth: u32) -> (Vec<Location>, QueryStats) {
        let depth = depth.min(self.order);
        let mut stats = QueryStats::default();
        let mut ranges: Vec<(CurveIndex, CurveIndex)> = Vec::new();

        if depth == 0 {
            // Degenerate query: one interval spanning the whole domain, every
            // point a candidate for the exact filter.
            ranges.push((0, 1i64 << (2 * self.order)));
        } else {
            let cut = self.order - depth;
            hilbert::traverse(
                self.order,
                self.bounds.origin(),
                self.bounds.size(),
                &mut |cell, index, remaining| {
                    stats.nodes_visited += 1;
                    if !cell.intersect(query) {
                        stats.nodes_pruned += 1;
                        return Visit::Skip;
                    }
                    if remaining == cut {
                        // Traversal yields intervals in increasing curve
                        // order; coalesce when contiguous.
                        let hi = index + (1i64 << (2 * cut));
                        match ranges.last_mut() {
                            Some(last) if last.1 == index => last.1 = hi,
                            _ => ranges.push((index, hi)),
                        }
                        return Visit::Skip;
                    }
                    Visit::Continue
                },
            );
        }
        stats.candidate_ranges = ranges.len();

        let mut results = Vec::new();
        for &(lo, hi) in &ranges {
            let candidates = self.points_in_range(lo, hi);
            stats.candidates_scanned += candidates.len();
            tracing::trace!(lo, hi, candidates = candidates.len(), "scan candidate range");
            for point in candidates {
                if query.include_point(point.location.to_vector()) {
                    results.push(point.location);
                }
            }
        }
        stats.result_count = results.len();

        tracing::debug!(
            nodes_visited = stats.nodes_visited,
            nodes_pruned = stats.nodes_pruned,
            ranges = stats.candidate_ranges,
            scanned = stats.candidates_scanned,
            results = stats.result_count,
            "spatial query"
        );

        (results, stats)
    }

    /// Locations within `radius` meters of `center`, nearest first.
    ///
    /// Runs a box query over the radius' bounding box, then refines by exact
    /// great-circle distance.
    pub fn query_radius(
        &self,
        center: &Location,
        radius: f64,
        depth: u32,
    ) -> Vec<(Location, f64)> {
        let query = center.bounding_box(radius);
        let mut results: Vec<(Location, f64)> = self
            .query(&query, depth)
            .into_iter()
            .filter_map(|location| {
                let distance = center.distance_to(&location);
                (distance <= radius).then_some((location, distance))
            })
            .collect();
        results.sort_by(|a, b| a.1.total_cmp(&b.1));
        results
    }

    /// Slice of the sorted sequence whose curve index falls in `[lo, hi)`.
    fn points_in_range(&self, lo: CurveIndex, hi: CurveIndex) -> &[Point] {
        let start = self.points.partition_point(|p| p.curve_index < lo);
        let end = start + self.points[start..].partition_point(|p| p.curve_index < hi);
        &self.points[start..end]
    }
}
