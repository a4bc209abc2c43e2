//! Seed matching: binding ingested geometries to drawing-layer objects.
//!
//! The rendering surface assigns its own layer ids while painting the
//! ingested dataset, and re-emits an "object added" notification for every
//! layer it draws. The matcher recognizes which of those notifications carry
//! a geometry from the ingested batch, so each seed becomes a tracked
//! feature exactly once; everything after that is user-drawn.

use crate::features::{coordinates_equal, FeatureKind, Geometry, LatLng};
use crate::ingest::SeedBatch;

/// Outcome of presenting an added object to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMatch {
    /// The geometry claimed the seed at this index; the caller should create
    /// a feature for it with seeded default properties.
    Claimed(usize),
    /// Not a seed (all seeds claimed, or no unclaimed seed matches); the
    /// object is user-created and handled by the direct creation path.
    Ignored,
}

/// One kind's seed list with per-seed claim flags.
#[derive(Debug, Clone)]
struct SeedList<G> {
    seeds: Vec<G>,
    claimed: Vec<bool>,
    fully_matched: bool,
}

impl<G> SeedList<G> {
    fn new(seeds: Vec<G>) -> Self {
        let claimed = vec![false; seeds.len()];
        Self {
            seeds,
            claimed,
            fully_matched: false,
        }
    }

    /// Claim the first unclaimed seed matching the predicate, in ingestion
    /// order. Coordinate-identical duplicate seeds are each claimed once, so
    /// the fully-matched flag stays reachable.
    fn claim(&mut self, kind: FeatureKind, matches: impl Fn(&G) -> bool) -> SeedMatch {
        if self.fully_matched {
            return SeedMatch::Ignored;
        }
        let hit = self
            .seeds
            .iter()
            .enumerate()
            .find(|&(index, seed)| !self.claimed[index] && matches(seed));
        let Some((index, _)) = hit else {
            if self.seeds.iter().enumerate().any(|(i, s)| self.claimed[i] && matches(s)) {
                log::warn!("{kind} geometry matches only already-claimed seeds");
            }
            return SeedMatch::Ignored;
        };
        self.claimed[index] = true;
        if !self.seeds.is_empty() && self.claimed.iter().all(|&c| c) {
            log::debug!("all {} {kind} seeds matched", self.seeds.len());
            self.fully_matched = true;
        }
        SeedMatch::Claimed(index)
    }

    fn pending(&self) -> usize {
        self.claimed.iter().filter(|&&c| !c).count()
    }
}

/// Reconciles the ingested seed batch against drawing-layer objects reported
/// one at a time by the rendering surface.
#[derive(Debug, Clone)]
pub struct SeedMatcher {
    points: SeedList<LatLng>,
    lines: SeedList<Vec<LatLng>>,
    polygons: SeedList<Vec<LatLng>>,
}

impl SeedMatcher {
    /// Create a matcher over an ingested batch.
    pub fn new(batch: SeedBatch) -> Self {
        Self {
            points: SeedList::new(batch.points),
            lines: SeedList::new(batch.lines),
            polygons: SeedList::new(batch.polygons),
        }
    }

    /// Present an added object's realized geometry.
    ///
    /// Equality is exact: identical vertex count and pairwise-equal
    /// coordinates, no tolerance. Once a kind's seeds are all claimed every
    /// further object of that kind is `Ignored` without scanning.
    pub fn match_object(&mut self, geometry: &Geometry) -> SeedMatch {
        match geometry {
            Geometry::Point(coordinate) => self
                .points
                .claim(FeatureKind::Point, |seed| seed == coordinate),
            Geometry::Line(coordinates) => self
                .lines
                .claim(FeatureKind::Line, |seed| coordinates_equal(seed, coordinates)),
            Geometry::Polygon(ring) => self
                .polygons
                .claim(FeatureKind::Polygon, |seed| coordinates_equal(seed, ring)),
        }
    }

    /// Check whether every seed of a kind has been claimed.
    ///
    /// Stays false for a kind with no seeds at all, matching the flag
    /// semantics of the event flow (an empty seed list never "completes").
    pub fn is_fully_matched(&self, kind: FeatureKind) -> bool {
        match kind {
            FeatureKind::Point => self.points.fully_matched,
            FeatureKind::Line => self.lines.fully_matched,
            FeatureKind::Polygon => self.polygons.fully_matched,
        }
    }

    /// Number of seeds of a kind still waiting for their drawing-layer
    /// object. A count that never reaches zero makes duplicate or lost
    /// arrivals observable.
    pub fn pending(&self, kind: FeatureKind) -> usize {
        match kind {
            FeatureKind::Point => self.points.pending(),
            FeatureKind::Line => self.lines.pending(),
            FeatureKind::Polygon => self.polygons.pending(),
        }
    }

    /// Total number of seeds of a kind.
    pub fn seed_len(&self, kind: FeatureKind) -> usize {
        match kind {
            FeatureKind::Point => self.points.seeds.len(),
            FeatureKind::Line => self.lines.seeds.len(),
            FeatureKind::Polygon => self.polygons.seeds.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_batch(points: Vec<LatLng>) -> SeedBatch {
        SeedBatch {
            points,
            ..SeedBatch::new()
        }
    }

    #[test]
    fn test_two_seeds_then_flag() {
        let mut matcher = SeedMatcher::new(point_batch(vec![
            LatLng::new(1.0, 1.0),
            LatLng::new(2.0, 2.0),
        ]));

        assert_eq!(
            matcher.match_object(&Geometry::Point(LatLng::new(2.0, 2.0))),
            SeedMatch::Claimed(1)
        );
        assert!(!matcher.is_fully_matched(FeatureKind::Point));

        assert_eq!(
            matcher.match_object(&Geometry::Point(LatLng::new(1.0, 1.0))),
            SeedMatch::Claimed(0)
        );
        assert!(matcher.is_fully_matched(FeatureKind::Point));
        assert_eq!(matcher.pending(FeatureKind::Point), 0);
    }

    #[test]
    fn test_ignored_after_fully_matched() {
        let mut matcher = SeedMatcher::new(point_batch(vec![LatLng::new(1.0, 1.0)]));
        matcher.match_object(&Geometry::Point(LatLng::new(1.0, 1.0)));
        assert!(matcher.is_fully_matched(FeatureKind::Point));

        // Even an exact seed geometry is ignored once the flag is set.
        assert_eq!(
            matcher.match_object(&Geometry::Point(LatLng::new(1.0, 1.0))),
            SeedMatch::Ignored
        );
    }

    #[test]
    fn test_non_matching_geometry_ignored() {
        let mut matcher = SeedMatcher::new(point_batch(vec![LatLng::new(1.0, 1.0)]));
        assert_eq!(
            matcher.match_object(&Geometry::Point(LatLng::new(9.0, 9.0))),
            SeedMatch::Ignored
        );
        assert_eq!(matcher.pending(FeatureKind::Point), 1);
    }

    #[test]
    fn test_duplicate_seeds_each_claimed_once() {
        let duplicate = LatLng::new(3.0, 3.0);
        let mut matcher = SeedMatcher::new(point_batch(vec![duplicate, duplicate]));

        assert_eq!(
            matcher.match_object(&Geometry::Point(duplicate)),
            SeedMatch::Claimed(0)
        );
        assert_eq!(
            matcher.match_object(&Geometry::Point(duplicate)),
            SeedMatch::Claimed(1)
        );
        assert!(matcher.is_fully_matched(FeatureKind::Point));

        // A third arrival has nothing left to claim.
        assert_eq!(
            matcher.match_object(&Geometry::Point(duplicate)),
            SeedMatch::Ignored
        );
    }

    #[test]
    fn test_empty_seed_list_never_completes() {
        let mut matcher = SeedMatcher::new(SeedBatch::new());
        assert!(!matcher.is_fully_matched(FeatureKind::Line));
        assert_eq!(
            matcher.match_object(&Geometry::Line(vec![
                LatLng::new(1.0, 1.0),
                LatLng::new(2.0, 2.0),
            ])),
            SeedMatch::Ignored
        );
        assert!(!matcher.is_fully_matched(FeatureKind::Line));
    }

    #[test]
    fn test_line_matching_is_exact_and_ordered() {
        let seed = vec![LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)];
        let mut matcher = SeedMatcher::new(SeedBatch {
            lines: vec![seed.clone()],
            ..SeedBatch::new()
        });

        // Reversed vertex order is a different geometry.
        let reversed: Vec<LatLng> = seed.iter().rev().copied().collect();
        assert_eq!(
            matcher.match_object(&Geometry::Line(reversed)),
            SeedMatch::Ignored
        );
        assert_eq!(
            matcher.match_object(&Geometry::Line(seed)),
            SeedMatch::Claimed(0)
        );
    }
}
