use crate::entity::{Entity, EntityKind};
use crate::world::World;

/// A builder for filtering entities in a world.
///
/// Results come back in world (insertion) order, which is already
/// deterministic; filters only narrow the list.
pub struct Query<'w> {
    world: &'w World,
    kind_filter: Option<EntityKind>,
    tag_filters: Vec<String>,
    name_contains: Option<String>,
    limit: Option<usize>,
    offset: usize,
}

impl<'w> Query<'w> {
    pub(crate) fn new(world: &'w World) -> Self {
        Self {
            world,
            kind_filter: None,
            tag_filters: Vec::new(),
            name_contains: None,
            limit: None,
            offset: 0,
        }
    }

    /// Filter by entity kind.
    pub fn kind(mut self, kind: EntityKind) -> Self {
        self.kind_filter = Some(kind);
        self
    }

    /// Filter to entities that have a specific tag. Repeated calls
    /// require all given tags.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_filters.push(tag.into());
        self
    }

    /// Filter to entities whose name contains the given substring
    /// (case-insensitive).
    pub fn name_contains(mut self, s: impl Into<String>) -> Self {
        self.name_contains = Some(s.into().to_lowercase());
        self
    }

    /// Limit the number of results.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Skip the first N results.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = n;
        self
    }

    /// Execute the query and return matching entities.
    pub fn execute(self) -> Vec<&'w Entity> {
        let matches = self
            .world
            .entities()
            .iter()
            .filter(|e| self.matches(e))
            .skip(self.offset);
        match self.limit {
            Some(limit) => matches.take(limit).collect(),
            None => matches.collect(),
        }
    }

    /// Count matching entities without collecting them. Ignores limit
    /// and offset.
    pub fn count(self) -> usize {
        self.world.entities().iter().filter(|e| self.matches(e)).count()
    }

    fn matches(&self, entity: &Entity) -> bool {
        if let Some(kind) = self.kind_filter
            && entity.kind != kind
        {
            return false;
        }

        for tag in &self.tag_filters {
            if !entity.has_tag(tag) {
                return false;
            }
        }

        if let Some(ref s) = self.name_contains
            && !entity.name.to_lowercase().contains(s)
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldMeta;

    fn test_world() -> World {
        let mut world = World::new(WorldMeta::new("Query fixture"));
        world.add_entity(Entity::new(EntityKind::Terrain, "Ground").tagged(["terrain"]));
        world.add_entity(Entity::new(EntityKind::Prop, "Oak Crate").tagged(["wooden"]));
        world.add_entity(
            Entity::new(EntityKind::Prop, "Oak Barrel").tagged(["wooden", "round"]),
        );
        world.add_entity(Entity::new(EntityKind::Character, "Guide"));
        world
    }

    #[test]
    fn query_by_kind() {
        let world = test_world();
        assert_eq!(world.query().kind(EntityKind::Prop).execute().len(), 2);
    }

    #[test]
    fn query_by_multiple_tags() {
        let world = test_world();
        let results = world.query().tag("wooden").tag("round").execute();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Oak Barrel");
    }

    #[test]
    fn query_by_name_substring() {
        let world = test_world();
        assert_eq!(world.query().name_contains("oak").execute().len(), 2);
        assert_eq!(world.query().name_contains("OAK").count(), 2);
    }

    #[test]
    fn results_keep_world_order() {
        let world = test_world();
        let names: Vec<&str> = world
            .query()
            .kind(EntityKind::Prop)
            .execute()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["Oak Crate", "Oak Barrel"]);
    }

    #[test]
    fn limit_and_offset() {
        let world = test_world();
        assert_eq!(world.query().limit(2).execute().len(), 2);
        let offset = world.query().offset(3).execute();
        assert_eq!(offset.len(), 1);
        assert_eq!(offset[0].name, "Guide");
    }
}
