//! Doubly linked list of mobile circles over a generational arena
//!
//! Nodes live in a `SlotMap`, links are stable `EntityId` handles rather than
//! pointers. A freed handle never resolves again (its generation moves on), so
//! a stale reference reads as "gone" instead of aliasing a newer entity.
//!
//! Traversal that may destroy the current entity must capture the successor
//! before handing the current one out. `Traversal` does exactly that and also
//! stops at the tail captured when it started, so entities appended during a
//! pass (fragments) are not visited until the next pass.

use glam::Vec2;
use slotmap::{SlotMap, new_key_type};

use crate::error::EntityError;

new_key_type! {
    /// Stable handle for an entity in an `EntityList`
    pub struct EntityId;
}

/// State shared by every body that drifts across the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct MobileCircle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Set by collision detection, resolved by the owning subsystem
    pub collided: bool,
}

impl MobileCircle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            collided: false,
        }
    }

    /// Advance one tick with toroidal wrap, each axis independently.
    ///
    /// A coordinate at or beyond `-radius` jumps to the far edge, one at or
    /// beyond `extent + radius` jumps to 0; only otherwise does velocity apply.
    pub fn advance_wrapped(&mut self, extent: Vec2) {
        self.pos.x = wrap_axis(self.pos.x, self.vel.x, self.radius, extent.x);
        self.pos.y = wrap_axis(self.pos.y, self.vel.y, self.radius, extent.y);
    }
}

#[inline]
fn wrap_axis(pos: f32, vel: f32, radius: f32, extent: f32) -> f32 {
    if pos <= -radius {
        extent
    } else if pos >= extent + radius {
        0.0
    } else {
        pos + vel
    }
}

/// Anything an `EntityList` can hold
pub trait Mobile {
    fn body(&self) -> &MobileCircle;
    fn body_mut(&mut self) -> &mut MobileCircle;
}

impl Mobile for MobileCircle {
    fn body(&self) -> &MobileCircle {
        self
    }

    fn body_mut(&mut self) -> &mut MobileCircle {
        self
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    entity: T,
    prev: Option<EntityId>,
    next: Option<EntityId>,
}

/// Bounded, insertion-ordered entity store with O(1) add and remove
#[derive(Debug, Clone)]
pub struct EntityList<T> {
    nodes: SlotMap<EntityId, Node<T>>,
    head: Option<EntityId>,
    tail: Option<EntityId>,
    capacity: usize,
    rejected: u32,
}

impl<T> EntityList<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            head: None,
            tail: None,
            capacity,
            rejected: 0,
        }
    }

    /// Append at the tail. When the list is full nothing is linked, the
    /// failure is counted and the entity is dropped.
    pub fn add(&mut self, entity: T) -> Result<EntityId, EntityError> {
        if self.nodes.len() >= self.capacity {
            self.rejected = self.rejected.saturating_add(1);
            return Err(EntityError::CapacityExhausted {
                capacity: self.capacity,
            });
        }

        let prev = self.tail;
        let id = self.nodes.insert(Node {
            entity,
            prev,
            next: None,
        });
        match prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        Ok(id)
    }

    /// Unlink and return the entity. Stale handles return `None`.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let node = self.nodes.remove(id)?;

        match node.prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|n| self.nodes.get_mut(n)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }

        Some(node.entity)
    }

    /// Run `erase` on every entity in list order, then free them all
    pub fn erase_all(&mut self, mut erase: impl FnMut(&T)) {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            cursor = node.next;
            erase(&node.entity);
        }
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of adds refused because the list was full
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    pub fn head(&self) -> Option<EntityId> {
        self.head
    }

    pub fn tail(&self) -> Option<EntityId> {
        self.tail
    }

    pub fn next_of(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(id).and_then(|n| n.next)
    }

    pub fn prev_of(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(id).and_then(|n| n.prev)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.nodes.get(id).map(|n| &n.entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|n| &mut n.entity)
    }

    /// Read-only iteration in link order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Start a pass that tolerates removal of the entity it just returned
    pub fn traversal(&self) -> Traversal {
        Traversal {
            next: self.head,
            last: self.tail,
        }
    }

    /// Walk the links both ways and compare with the arena.
    ///
    /// Returns `false` if head/tail, back links or the node count disagree.
    pub fn links_consistent(&self) -> bool {
        let mut forward = 0usize;
        let mut prev: Option<EntityId> = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(id) else {
                return false;
            };
            if node.prev != prev {
                return false;
            }
            forward += 1;
            if forward > self.nodes.len() {
                return false;
            }
            prev = Some(id);
            cursor = node.next;
        }
        if prev != self.tail {
            return false;
        }

        let mut backward = 0usize;
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            backward += 1;
            if backward > self.nodes.len() {
                return false;
            }
            cursor = self.prev_of(id);
        }

        forward == self.nodes.len() && backward == self.nodes.len()
    }
}

impl<T: Mobile> EntityList<T> {
    /// Flag an entity collided. Returns `false` for a stale handle.
    pub fn mark_collided(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.body_mut().collided = true;
                true
            }
            None => false,
        }
    }
}

pub struct Iter<'a, T> {
    list: &'a EntityList<T>,
    cursor: Option<EntityId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (EntityId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.nodes.get(id)?;
        self.cursor = node.next;
        Some((id, &node.entity))
    }
}

/// Cursor over the entities present when the pass started
#[derive(Debug, Clone, Copy)]
pub struct Traversal {
    next: Option<EntityId>,
    last: Option<EntityId>,
}

impl Traversal {
    /// Yield the next entity, having already recorded its successor
    pub fn advance<T>(&mut self, list: &EntityList<T>) -> Option<EntityId> {
        let current = self.next?;
        if !list.contains(current) {
            self.next = None;
            return None;
        }
        self.next = if Some(current) == self.last {
            None
        } else {
            list.next_of(current)
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(x: f32) -> MobileCircle {
        MobileCircle::new(Vec2::new(x, 0.0), Vec2::ZERO, 1.0)
    }

    fn xs(list: &EntityList<MobileCircle>) -> Vec<f32> {
        list.iter().map(|(_, c)| c.pos.x).collect()
    }

    #[test]
    fn test_add_and_remove_endpoints() {
        let mut list = EntityList::with_capacity(8);
        let a = list.add(circle(1.0)).unwrap();
        let b = list.add(circle(2.0)).unwrap();
        let c = list.add(circle(3.0)).unwrap();
        assert_eq!(list.head(), Some(a));
        assert_eq!(list.tail(), Some(c));

        list.remove(a);
        assert_eq!(list.head(), Some(b));
        assert!(list.links_consistent());

        list.remove(c);
        assert_eq!(list.tail(), Some(b));
        assert_eq!(list.head(), Some(b));
        assert!(list.links_consistent());

        list.remove(b);
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
    }

    #[test]
    fn test_remove_middle() {
        let mut list = EntityList::with_capacity(8);
        list.add(circle(1.0)).unwrap();
        let b = list.add(circle(2.0)).unwrap();
        list.add(circle(3.0)).unwrap();

        assert_eq!(list.remove(b).map(|c| c.pos.x), Some(2.0));
        assert_eq!(xs(&list), vec![1.0, 3.0]);
        assert!(list.links_consistent());
    }

    #[test]
    fn test_stale_handle_is_inert() {
        let mut list = EntityList::with_capacity(8);
        let a = list.add(circle(1.0)).unwrap();
        list.remove(a);
        let b = list.add(circle(2.0)).unwrap();

        assert!(list.remove(a).is_none());
        assert!(!list.mark_collided(a));
        assert!(list.contains(b));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_full_list_rejects_without_linking() {
        let mut list = EntityList::with_capacity(2);
        list.add(circle(1.0)).unwrap();
        let tail = list.add(circle(2.0)).unwrap();

        let err = list.add(circle(3.0)).unwrap_err();
        assert_eq!(err, EntityError::CapacityExhausted { capacity: 2 });
        assert_eq!(list.rejected(), 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.tail(), Some(tail));
        assert!(list.links_consistent());
    }

    #[test]
    fn test_erase_all_visits_every_entity() {
        let mut list = EntityList::with_capacity(8);
        for i in 0..4 {
            list.add(circle(i as f32)).unwrap();
        }
        let mut erased = Vec::new();
        list.erase_all(|c| erased.push(c.pos.x));

        assert_eq!(erased, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(list.len(), 0);
        assert_eq!(list.head(), None);
        assert!(list.links_consistent());

        // Idempotent
        list.erase_all(|_| panic!("nothing left to erase"));
    }

    #[test]
    fn test_traversal_survives_removing_current() {
        let mut list = EntityList::with_capacity(8);
        for i in 0..5 {
            list.add(circle(i as f32)).unwrap();
        }

        let mut seen = Vec::new();
        let mut pass = list.traversal();
        while let Some(id) = pass.advance(&list) {
            let x = list.get(id).unwrap().pos.x;
            seen.push(x);
            if x as i32 % 2 == 0 {
                list.remove(id);
            }
        }

        assert_eq!(seen, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(xs(&list), vec![1.0, 3.0]);
    }

    #[test]
    fn test_traversal_skips_entities_appended_during_pass() {
        let mut list = EntityList::with_capacity(8);
        list.add(circle(0.0)).unwrap();
        list.add(circle(1.0)).unwrap();

        let mut visits = 0;
        let mut pass = list.traversal();
        while let Some(id) = pass.advance(&list) {
            visits += 1;
            let x = list.get(id).unwrap().pos.x;
            list.add(circle(x + 10.0)).unwrap();
            list.remove(id);
        }

        assert_eq!(visits, 2);
        assert_eq!(xs(&list), vec![10.0, 11.0]);
    }

    #[test]
    fn test_wrap_jumps_edges() {
        let extent = Vec2::new(320.0, 240.0);
        let mut c = MobileCircle::new(Vec2::new(-6.0, 246.0), Vec2::new(-1.0, 1.0), 6.0);
        c.advance_wrapped(extent);
        assert_eq!(c.pos, Vec2::new(320.0, 0.0));
        c.advance_wrapped(extent);
        assert_eq!(c.pos, Vec2::new(319.0, 1.0));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Add), (0usize..16).prop_map(Op::Remove)]
    }

    proptest! {
        #[test]
        fn prop_links_match_structure(ops in proptest::collection::vec(op(), 0..64)) {
            let mut list = EntityList::with_capacity(12);
            let mut live: Vec<EntityId> = Vec::new();
            for op in ops {
                match op {
                    Op::Add => {
                        if let Ok(id) = list.add(circle(0.0)) {
                            live.push(id);
                        }
                    }
                    Op::Remove(i) if !live.is_empty() => {
                        let id = live.remove(i % live.len());
                        prop_assert!(list.remove(id).is_some());
                    }
                    Op::Remove(_) => {}
                }
                prop_assert!(list.links_consistent());
                prop_assert_eq!(list.len(), live.len());
                prop_assert_eq!(list.iter().map(|(id, _)| id).collect::<Vec<_>>(), live.clone());
            }
        }

        #[test]
        fn prop_wrap_returns_to_band(
            x in -20.0f32..340.0,
            y in -20.0f32..260.0,
            vx in 1.0f32..12.0,
            vy in 1.0f32..12.0,
            flip_x in any::<bool>(),
            flip_y in any::<bool>(),
        ) {
            let extent = Vec2::new(320.0, 240.0);
            let radius = 6.0;
            let vel = Vec2::new(if flip_x { -vx } else { vx }, if flip_y { -vy } else { vy });
            let mut c = MobileCircle::new(Vec2::new(x, y), vel, radius);
            for _ in 0..500 {
                c.advance_wrapped(extent);
                // Never strays further than one step past the wrap thresholds
                prop_assert!(c.pos.x > -radius - 13.0 && c.pos.x < extent.x + radius + 13.0);
                prop_assert!(c.pos.y > -radius - 13.0 && c.pos.y < extent.y + radius + 13.0);
            }
            // And keeps coming back inside the band
            let mut inside = false;
            for _ in 0..200 {
                c.advance_wrapped(extent);
                if (0.0..extent.x).contains(&c.pos.x) && (0.0..extent.y).contains(&c.pos.y) {
                    inside = true;
                    break;
                }
            }
            prop_assert!(inside);
        }
    }
}
