use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use wdl_core::{Entity, EntityId, Vector3, World};

use crate::bounds::{BoundingBox, distance, distance_squared};

/// Angular step of the placement ring search, in degrees.
const PLACEMENT_ANGLE_STEP: usize = 30;

/// Spatial queries over a world: derived bounding boxes, proximity and
/// collision tests, and a greedy placement search.
///
/// The reasoner borrows the world it analyzes; pointing it at a
/// different world with [`SpatialReasoner::set_world`] invalidates the
/// per-entity bounds cache wholesale. The cache is a side table keyed by
/// entity id — nothing is stored on the entities themselves.
pub struct SpatialReasoner<'w> {
    world: &'w World,
    bounds_cache: HashMap<EntityId, BoundingBox>,
}

impl<'w> SpatialReasoner<'w> {
    /// Create a reasoner over the given world.
    pub fn new(world: &'w World) -> Self {
        Self {
            world,
            bounds_cache: HashMap::new(),
        }
    }

    /// Replace the analyzed world and clear all cached bounds.
    pub fn set_world(&mut self, world: &'w World) {
        self.world = world;
        self.bounds_cache.clear();
    }

    /// The derived bounding box of an entity: centered on its position
    /// with half-extent `scale / 2` per axis.
    ///
    /// Rotation is deliberately ignored — boxes stay axis-aligned no
    /// matter how the entity is rotated. Downstream collision and
    /// placement semantics are defined against this simplification.
    pub fn entity_bounds(&mut self, entity: &Entity) -> BoundingBox {
        *self
            .bounds_cache
            .entry(entity.id)
            .or_insert_with(|| {
                BoundingBox::from_center_size(
                    entity.transform.position,
                    entity.transform.scale,
                )
            })
    }

    /// The union of every entity's box, or `None` for an empty world.
    pub fn world_bounds(&mut self) -> Option<BoundingBox> {
        let world = self.world;
        let mut entities = world.entities().iter();
        let first = self.entity_bounds(entities.next()?);
        Some(entities.fold(first, |acc, entity| acc.union(&self.entity_bounds(entity))))
    }

    /// The entity nearest to `position` and its distance. Linear scan;
    /// ties go to the first entity in world order.
    pub fn nearest_entity(&self, position: Vector3) -> Option<(&'w Entity, f64)> {
        let mut nearest: Option<(&Entity, f64)> = None;
        for entity in self.world.entities() {
            let dist = distance(position, entity.transform.position);
            if nearest.is_none_or(|(_, best)| dist < best) {
                nearest = Some((entity, dist));
            }
        }
        nearest
    }

    /// All entities within `radius` of `center`, inclusive.
    pub fn entities_in_radius(&self, center: Vector3, radius: f64) -> Vec<&'w Entity> {
        let radius_sq = radius * radius;
        self.world
            .entities()
            .iter()
            .filter(|e| distance_squared(center, e.transform.position) <= radius_sq)
            .collect()
    }

    /// All entities whose *position* (not their full box) lies inside
    /// the given bounds.
    pub fn entities_in_bounds(&self, bounds: &BoundingBox) -> Vec<&'w Entity> {
        self.world
            .entities()
            .iter()
            .filter(|e| bounds.contains_point(e.transform.position))
            .collect()
    }

    /// Whether two entities' derived boxes intersect.
    pub fn check_collision(&mut self, first: &Entity, second: &Entity) -> bool {
        let a = self.entity_bounds(first);
        let b = self.entity_bounds(second);
        a.intersects(&b)
    }

    /// All entities colliding with the given entity, excluding itself.
    pub fn colliding_entities(&mut self, entity: &Entity) -> Vec<&'w Entity> {
        let world = self.world;
        world
            .entities()
            .iter()
            .filter(|other| other.id != entity.id && self.check_collision(entity, other))
            .collect()
    }

    /// Every unordered pair of colliding entities, ordered by the first
    /// entity's list index, then the second's. A plain O(n²) scan — no
    /// spatial partitioning, entity counts stay small.
    pub fn all_collisions(&mut self) -> Vec<(&'w Entity, &'w Entity)> {
        let world = self.world;
        let mut pairs = Vec::new();
        for (i, first) in world.entities().iter().enumerate() {
            for second in &world.entities()[i + 1..] {
                if self.check_collision(first, second) {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }

    /// Suggest a position for a new entity of the given size, at least
    /// `min_clearance` away from every existing entity's position, at
    /// height `preferred_y`.
    ///
    /// Searches concentric rings outward from the origin in the
    /// horizontal plane (ring step = clearance, angular step = 30°),
    /// bounded by twice the world's horizontal extent, and returns the
    /// first clear candidate. An empty world yields the origin
    /// immediately. Returns `None` when the bounded search is exhausted
    /// — a greedy heuristic, not an optimal packing; valid placements
    /// beyond the search radius are not found.
    pub fn suggest_placement(
        &mut self,
        _size: Vector3,
        min_clearance: f64,
        preferred_y: f64,
    ) -> Option<Vector3> {
        let origin = Vector3::new(0.0, preferred_y, 0.0);
        if self.world.entities().is_empty() || min_clearance <= 0.0 {
            return Some(origin);
        }

        let world = self.world;
        let bounds = self.world_bounds()?;
        let search_range = bounds.size().x.max(bounds.size().z) * 2.0;
        let rings = (search_range / min_clearance) as usize;

        for ring in 0..rings {
            let radius = ring as f64 * min_clearance;
            for angle_deg in (0..360).step_by(PLACEMENT_ANGLE_STEP) {
                let angle = f64::from(angle_deg as u32).to_radians();
                let candidate =
                    Vector3::new(radius * angle.cos(), preferred_y, radius * angle.sin());
                let clear = world
                    .entities()
                    .iter()
                    .all(|e| distance(candidate, e.transform.position) >= min_clearance);
                if clear {
                    return Some(candidate);
                }
            }
        }

        None
    }

    /// Entity count per unit volume inside `region`; zero when the
    /// region has zero volume.
    pub fn density(&self, region: &BoundingBox) -> f64 {
        let volume = region.volume();
        if volume == 0.0 {
            return 0.0;
        }
        self.entities_in_bounds(region).len() as f64 / volume
    }

    /// Aggregate spatial statistics for the whole world.
    pub fn analyze(&mut self) -> SpatialReport {
        let Some(bounds) = self.world_bounds() else {
            return SpatialReport {
                entity_count: 0,
                world_bounds: None,
                collisions: Vec::new(),
                collision_count: 0,
                density: 0.0,
            };
        };

        let collisions: Vec<CollisionPair> = self
            .all_collisions()
            .into_iter()
            .map(|(a, b)| CollisionPair {
                first: a.name.clone(),
                second: b.name.clone(),
            })
            .collect();

        SpatialReport {
            entity_count: self.world.entity_count(),
            world_bounds: Some(BoundsSummary {
                min: bounds.min_point,
                max: bounds.max_point,
                size: bounds.size(),
                volume: bounds.volume(),
            }),
            collision_count: collisions.len(),
            collisions,
            density: self.density(&bounds),
        }
    }
}

/// A pair of colliding entities, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionPair {
    pub first: String,
    pub second: String,
}

/// Derived world bounds in summary form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsSummary {
    pub min: Vector3,
    pub max: Vector3,
    pub size: Vector3,
    pub volume: f64,
}

/// Aggregate spatial statistics for a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialReport {
    pub entity_count: usize,
    /// `None` for a world with no entities.
    pub world_bounds: Option<BoundsSummary>,
    /// Colliding pairs, in scan order.
    pub collisions: Vec<CollisionPair>,
    pub collision_count: usize,
    /// Entity density over the derived world bounds.
    pub density: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdl_core::{EntityKind, WorldMeta};

    fn world_with(entities: Vec<Entity>) -> World {
        let mut world = World::new(WorldMeta::new("Spatial fixture"));
        for entity in entities {
            world.add_entity(entity);
        }
        world
    }

    fn cube(name: &str, x: f64, scale: f64) -> Entity {
        Entity::new(EntityKind::Prop, name).with_transform(
            wdl_core::Transform::at(Vector3::new(x, 0.0, 0.0)).scaled(Vector3::splat(scale)),
        )
    }

    #[test]
    fn entity_bounds_from_position_and_scale() {
        let world = world_with(vec![
            Entity::new(EntityKind::Prop, "Block").with_transform(
                wdl_core::Transform::at(Vector3::new(10.0, 20.0, 30.0))
                    .scaled(Vector3::new(4.0, 6.0, 8.0)),
            ),
        ]);
        let mut reasoner = SpatialReasoner::new(&world);
        let bounds = reasoner.world_bounds().unwrap();
        assert_eq!(bounds.min_point, Vector3::new(8.0, 17.0, 26.0));
        assert_eq!(bounds.max_point, Vector3::new(12.0, 23.0, 34.0));
    }

    #[test]
    fn rotation_does_not_change_bounds() {
        let rotated = Entity::new(EntityKind::Prop, "Tilted").with_transform(
            wdl_core::Transform::at(Vector3::ZERO)
                .rotated(Vector3::new(0.0, 45.0, 0.0))
                .scaled(Vector3::splat(2.0)),
        );
        let world = world_with(vec![rotated]);
        let mut reasoner = SpatialReasoner::new(&world);
        let bounds = reasoner.entity_bounds(&world.entities()[0]);
        assert_eq!(bounds.min_point, Vector3::splat(-1.0));
        assert_eq!(bounds.max_point, Vector3::splat(1.0));
    }

    #[test]
    fn world_bounds_empty_world_is_none() {
        let world = world_with(vec![]);
        let mut reasoner = SpatialReasoner::new(&world);
        assert!(reasoner.world_bounds().is_none());
    }

    #[test]
    fn set_world_clears_cache() {
        let first = world_with(vec![cube("A", 0.0, 1.0)]);
        let second = world_with(vec![cube("B", 100.0, 1.0)]);

        let mut reasoner = SpatialReasoner::new(&first);
        assert_eq!(reasoner.world_bounds().unwrap().center().x, 0.0);

        reasoner.set_world(&second);
        assert_eq!(reasoner.world_bounds().unwrap().center().x, 100.0);
    }

    #[test]
    fn nearest_entity_ties_break_by_order() {
        let world = world_with(vec![cube("Left", -5.0, 1.0), cube("Right", 5.0, 1.0)]);
        let reasoner = SpatialReasoner::new(&world);
        let (entity, dist) = reasoner.nearest_entity(Vector3::ZERO).unwrap();
        assert_eq!(entity.name, "Left");
        assert_eq!(dist, 5.0);
    }

    #[test]
    fn nearest_entity_empty_world_is_none() {
        let world = world_with(vec![]);
        let reasoner = SpatialReasoner::new(&world);
        assert!(reasoner.nearest_entity(Vector3::ZERO).is_none());
    }

    #[test]
    fn radius_query_is_inclusive() {
        let world = world_with(vec![cube("Edge", 5.0, 1.0), cube("Far", 5.1, 1.0)]);
        let reasoner = SpatialReasoner::new(&world);
        let hits = reasoner.entities_in_radius(Vector3::ZERO, 5.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Edge");
    }

    #[test]
    fn bounds_query_uses_position_not_box() {
        // A large entity whose box pokes into the region but whose
        // position is outside does not count.
        let world = world_with(vec![cube("Big", 3.0, 10.0)]);
        let reasoner = SpatialReasoner::new(&world);
        let region = BoundingBox::new(Vector3::splat(-2.0), Vector3::splat(2.0));
        assert!(reasoner.entities_in_bounds(&region).is_empty());
    }

    #[test]
    fn three_overlapping_entities_make_three_pairs() {
        let world = world_with(vec![
            cube("A", 0.0, 4.0),
            cube("B", 1.0, 4.0),
            cube("C", 0.5, 4.0),
        ]);
        let mut reasoner = SpatialReasoner::new(&world);
        let pairs = reasoner.all_collisions();
        assert_eq!(pairs.len(), 3);
        let names: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(a, b)| (a.name.as_str(), b.name.as_str()))
            .collect();
        assert_eq!(names, [("A", "B"), ("A", "C"), ("B", "C")]);
    }

    #[test]
    fn colliding_entities_excludes_self() {
        let world = world_with(vec![cube("A", 0.0, 4.0), cube("B", 1.0, 4.0)]);
        let mut reasoner = SpatialReasoner::new(&world);
        let subject = &world.entities()[0];
        let hits = reasoner.colliding_entities(subject);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "B");
    }

    #[test]
    fn empty_world_placement_is_origin() {
        let world = world_with(vec![]);
        let mut reasoner = SpatialReasoner::new(&world);
        let spot = reasoner
            .suggest_placement(Vector3::ONE, 2.0, 1.5)
            .unwrap();
        assert_eq!(spot, Vector3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn placement_respects_clearance() {
        let world = world_with(vec![cube("Origin", 0.0, 1.0)]);
        let mut reasoner = SpatialReasoner::new(&world);
        if let Some(spot) = reasoner.suggest_placement(Vector3::ONE, 3.0, 0.0) {
            assert!(distance(spot, Vector3::ZERO) >= 3.0);
        }
        // None is also acceptable: the bounded search may be exhausted.
    }

    #[test]
    fn placement_is_deterministic() {
        let world = world_with(vec![cube("A", 0.0, 2.0), cube("B", 3.0, 2.0)]);
        let mut reasoner = SpatialReasoner::new(&world);
        let first = reasoner.suggest_placement(Vector3::ONE, 2.0, 0.0);
        let second = reasoner.suggest_placement(Vector3::ONE, 2.0, 0.0);
        assert_eq!(first, second);
    }

    #[test]
    fn density_zero_volume_is_zero() {
        let world = world_with(vec![cube("A", 0.0, 1.0)]);
        let reasoner = SpatialReasoner::new(&world);
        let flat = BoundingBox::new(Vector3::ZERO, Vector3::new(2.0, 0.0, 2.0));
        assert_eq!(reasoner.density(&flat), 0.0);
    }

    #[test]
    fn density_counts_positions_in_region() {
        let world = world_with(vec![cube("A", 0.0, 1.0), cube("B", 1.0, 1.0)]);
        let reasoner = SpatialReasoner::new(&world);
        let region = BoundingBox::new(Vector3::splat(-2.0), Vector3::splat(2.0));
        assert_eq!(reasoner.density(&region), 2.0 / 64.0);
    }

    #[test]
    fn analyze_empty_world() {
        let world = world_with(vec![]);
        let mut reasoner = SpatialReasoner::new(&world);
        let report = reasoner.analyze();
        assert_eq!(report.entity_count, 0);
        assert!(report.world_bounds.is_none());
        assert!(report.collisions.is_empty());
        assert_eq!(report.density, 0.0);
    }

    #[test]
    fn report_serializes_with_documented_keys() {
        let world = world_with(vec![cube("A", 0.0, 4.0), cube("B", 1.0, 4.0)]);
        let mut reasoner = SpatialReasoner::new(&world);
        let json = serde_json::to_value(reasoner.analyze()).unwrap();
        assert_eq!(json["entity_count"], 2);
        assert_eq!(json["collision_count"], 1);
        assert_eq!(json["collisions"][0]["first"], "A");
        assert!(json["world_bounds"]["volume"].is_number());
    }

    #[test]
    fn analyze_reports_collisions_by_name() {
        let world = world_with(vec![cube("A", 0.0, 4.0), cube("B", 1.0, 4.0)]);
        let mut reasoner = SpatialReasoner::new(&world);
        let report = reasoner.analyze();
        assert_eq!(report.entity_count, 2);
        assert_eq!(report.collision_count, 1);
        assert_eq!(report.collisions[0].first, "A");
        assert_eq!(report.collisions[0].second, "B");
        assert!(report.world_bounds.is_some());
    }
}
