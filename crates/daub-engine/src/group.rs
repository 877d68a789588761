//! Groups: ordered child lists with aggregate hit-testing.
//!
//! Child order is paint order (later children draw on top) and also decides
//! which overlapping sibling wins when an event bubbles: the last match.

use std::ops::Deref;
use std::rc::Rc;

use log::trace;

use crate::coords::{Transform, Vec2};
use crate::error::SceneError;
use crate::shape::{ShapeKind, ShapeOptions, ShapeRef};

// ── Group kind ────────────────────────────────────────────────────────────

/// Kind payload of a group node.
#[derive(Debug, Default)]
pub struct Group {
    children: Vec<ShapeRef>,
}

impl Group {
    pub fn children(&self) -> &[ShapeRef] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

// ── hit-test result ───────────────────────────────────────────────────────

/// Result of hit-testing one node.
#[derive(Debug, Clone)]
pub enum Collision {
    /// Leaf answer.
    Hit(bool),
    /// Group answer: the children that matched, nested per sub-group.
    Group(GroupMatch),
}

impl Collision {
    /// `true` for a leaf hit or a group match with at least one entry.
    pub fn is_hit(&self) -> bool {
        match self {
            Self::Hit(hit) => *hit,
            Self::Group(m) => !m.shapes.is_empty(),
        }
    }
}

/// Children of `group` that matched, in child order.
#[derive(Debug, Clone)]
pub struct GroupMatch {
    pub group: ShapeRef,
    pub shapes: Vec<MatchEntry>,
}

#[derive(Debug, Clone)]
pub enum MatchEntry {
    Shape(ShapeRef),
    Group(GroupMatch),
}

/// Hit-tests `children` of `group`, whose absolute transform is `transform`.
///
/// Sub-groups are kept only when something inside them matched. Children
/// that are not rendered are skipped.
pub(crate) fn match_children(
    group: &ShapeRef,
    children: &[ShapeRef],
    coords: Vec2,
    transform: &Transform,
) -> GroupMatch {
    let mut shapes = Vec::new();
    for child in children.iter().filter(|c| c.render_flag()) {
        let collision = child.test_bounds(coords, transform);
        if child.is_group() {
            if let Collision::Group(m) = collision {
                if !m.shapes.is_empty() {
                    shapes.push(MatchEntry::Group(m));
                }
            }
        } else if collision.is_hit() {
            shapes.push(MatchEntry::Shape(child.clone()));
        }
    }
    GroupMatch { group: group.clone(), shapes }
}

// ── GroupRef ──────────────────────────────────────────────────────────────

/// Typed handle to a group node. Derefs to [`ShapeRef`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupRef(ShapeRef);

impl GroupRef {
    pub fn new(options: ShapeOptions) -> Self {
        Self(ShapeRef::from_kind(options, Group::default()))
    }

    /// `None` unless `shape` is a group.
    pub fn from_shape(shape: ShapeRef) -> Option<Self> {
        shape.is_group().then_some(Self(shape))
    }

    pub fn as_shape(&self) -> &ShapeRef {
        &self.0
    }

    pub fn into_shape(self) -> ShapeRef {
        self.0
    }

    fn with_children<R>(&self, f: impl FnOnce(&[ShapeRef]) -> R) -> Option<R> {
        match &self.0.node().kind {
            ShapeKind::Group(group) => Some(f(&group.children)),
            _ => None,
        }
    }

    fn with_children_mut<R>(&self, f: impl FnOnce(&mut Vec<ShapeRef>) -> R) -> Option<R> {
        match &mut self.0.node_mut().kind {
            ShapeKind::Group(group) => Some(f(&mut group.children)),
            _ => None,
        }
    }

    /// Appends `shape`.
    pub fn add(&self, shape: &ShapeRef) -> Result<&Self, SceneError> {
        self.insert(None, std::slice::from_ref(shape))
    }

    /// Appends `shapes` in order.
    pub fn add_all(&self, shapes: &[ShapeRef]) -> Result<&Self, SceneError> {
        self.insert(None, shapes)
    }

    /// Inserts `shapes` starting at `zindex`, keeping their relative order.
    /// `None` appends. An index past the end appends.
    ///
    /// A shape that already belongs to a group is detached from it first.
    /// Fails without changing anything if any shape is this group or one of
    /// its ancestors.
    pub fn insert(&self, zindex: Option<usize>, shapes: &[ShapeRef]) -> Result<&Self, SceneError> {
        for shape in shapes {
            self.check_insertable(shape)?;
        }
        if !self.0.is_group() {
            return Err(SceneError::UnsupportedKind { op: "add", kind: self.0.kind_name() });
        }

        let mut index = zindex;
        for shape in shapes {
            detach(shape);
            self.with_children_mut(|children| match index.as_mut() {
                Some(i) => {
                    let at = (*i).min(children.len());
                    children.insert(at, shape.clone());
                    *i = at + 1;
                }
                None => children.push(shape.clone()),
            });
            shape.node_mut().base.parent = Some(Rc::downgrade(&self.0.0));
        }
        trace!("{:?} now holds {} children", self.0, self.len());
        Ok(self)
    }

    fn check_insertable(&self, shape: &ShapeRef) -> Result<(), SceneError> {
        let mut ancestor = Some(self.0.clone());
        while let Some(current) = ancestor {
            if current.ptr_eq(shape) {
                return Err(SceneError::CyclicGroup);
            }
            ancestor = current.node().base.parent();
        }
        Ok(())
    }

    /// Removes the first occurrence of `shape`. Returns whether it was found.
    pub fn remove(&self, shape: &ShapeRef) -> bool {
        let removed = self
            .with_children_mut(|children| {
                let pos = children.iter().position(|c| c.ptr_eq(shape))?;
                Some(children.remove(pos))
            })
            .flatten();
        match removed {
            Some(child) => {
                child.node_mut().base.parent = None;
                true
            }
            None => false,
        }
    }

    /// Removes every child.
    pub fn empty(&self) {
        let children = self.with_children_mut(std::mem::take).unwrap_or_default();
        for child in children {
            child.node_mut().base.parent = None;
        }
    }

    /// Calls `f(index, child)` for each child, over a snapshot of the list so
    /// `f` may add or remove children.
    pub fn each(&self, mut f: impl FnMut(usize, &ShapeRef)) {
        for (i, child) in self.children().iter().enumerate() {
            f(i, child);
        }
    }

    /// Snapshot of the child list.
    pub fn children(&self) -> Vec<ShapeRef> {
        self.with_children(<[ShapeRef]>::to_vec).unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<ShapeRef> {
        self.with_children(|c| c.get(index).cloned()).flatten()
    }

    pub fn contains(&self, shape: &ShapeRef) -> bool {
        self.with_children(|c| c.iter().any(|s| s.ptr_eq(shape))).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.with_children(<[ShapeRef]>::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Removes `shape` from the group currently holding it.
fn detach(shape: &ShapeRef) {
    let Some(parent) = shape.parent() else {
        return;
    };
    parent.remove(shape);
}

impl Deref for GroupRef {
    type Target = ShapeRef;

    fn deref(&self) -> &ShapeRef {
        &self.0
    }
}

impl From<GroupRef> for ShapeRef {
    fn from(group: GroupRef) -> Self {
        group.0
    }
}

impl AsRef<ShapeRef> for GroupRef {
    fn as_ref(&self) -> &ShapeRef {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32) -> ShapeRef {
        ShapeRef::rectangle(ShapeOptions::at(x, y), 10.0, 10.0)
    }

    // ── membership ───────────────────────────────────────────────────────

    #[test]
    fn add_then_remove_keeps_order() {
        let g = GroupRef::new(ShapeOptions::default());
        let (a, b, c) = (rect(0.0, 0.0), rect(1.0, 1.0), rect(2.0, 2.0));
        g.add_all(&[a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(g.len(), 3);

        assert!(g.remove(&b));
        assert_eq!(g.children(), vec![a.clone(), c.clone()]);
        assert!(b.parent().is_none());
        assert_eq!(a.parent(), Some(g.clone()));
    }

    #[test]
    fn removing_a_stranger_is_a_no_op() {
        let g = GroupRef::new(ShapeOptions::default());
        let (a, b) = (rect(0.0, 0.0), rect(1.0, 1.0));
        g.add_all(&[a.clone(), b.clone()]).unwrap();
        assert!(!g.remove(&rect(5.0, 5.0)));
        assert_eq!(g.children(), vec![a, b]);
    }

    #[test]
    fn empty_always_yields_zero() {
        let g = GroupRef::new(ShapeOptions::default());
        g.empty();
        assert_eq!(g.len(), 0);

        let a = rect(0.0, 0.0);
        g.add(&a).unwrap().add(&rect(1.0, 1.0)).unwrap();
        g.empty();
        assert!(g.is_empty());
        assert!(a.parent().is_none());
    }

    #[test]
    fn batch_insert_at_zindex_preserves_relative_order() {
        let g = GroupRef::new(ShapeOptions::default());
        let (a, b, x, y) = (rect(0.0, 0.0), rect(1.0, 1.0), rect(2.0, 2.0), rect(3.0, 3.0));
        g.add_all(&[a.clone(), b.clone()]).unwrap();
        g.insert(Some(1), &[x.clone(), y.clone()]).unwrap();
        assert_eq!(g.children(), vec![a.clone(), x.clone(), y.clone(), b.clone()]);

        let z = rect(4.0, 4.0);
        g.insert(Some(0), std::slice::from_ref(&z)).unwrap();
        assert_eq!(g.get(0), Some(z));

        let w = rect(5.0, 5.0);
        g.insert(Some(99), std::slice::from_ref(&w)).unwrap();
        assert_eq!(g.get(g.len() - 1), Some(w));
    }

    #[test]
    fn adding_moves_shape_out_of_previous_group() {
        let g1 = GroupRef::new(ShapeOptions::default());
        let g2 = GroupRef::new(ShapeOptions::default());
        let a = rect(0.0, 0.0);
        g1.add(&a).unwrap();
        g2.add(&a).unwrap();
        assert!(g1.is_empty());
        assert!(g2.contains(&a));
        assert_eq!(a.parent(), Some(g2));
    }

    #[test]
    fn cycles_are_rejected_atomically() {
        let outer = GroupRef::new(ShapeOptions::default());
        let inner = GroupRef::new(ShapeOptions::default());
        outer.add(&inner).unwrap();

        assert_eq!(outer.add(&outer).err(), Some(SceneError::CyclicGroup));
        let a = rect(0.0, 0.0);
        assert_eq!(inner.add_all(&[a.clone(), outer.as_shape().clone()]).err(), Some(SceneError::CyclicGroup));
        assert!(inner.is_empty());
        assert!(a.parent().is_none());
    }

    #[test]
    fn each_tolerates_removal_during_iteration() {
        let g = GroupRef::new(ShapeOptions::default());
        g.add_all(&[rect(0.0, 0.0), rect(1.0, 1.0), rect(2.0, 2.0)]).unwrap();
        let mut seen = Vec::new();
        g.each(|i, child| {
            seen.push(i);
            g.remove(child);
        });
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(g.is_empty());
    }

    // ── hit-testing ──────────────────────────────────────────────────────

    #[test]
    fn nested_match_keeps_only_non_empty_groups() {
        let root = GroupRef::new(ShapeOptions::default());
        let hit_group = GroupRef::new(ShapeOptions::at(100.0, 0.0));
        let miss_group = GroupRef::new(ShapeOptions::default());
        let leaf = rect(0.0, 0.0);
        let inner = rect(0.0, 0.0);
        hit_group.add(&inner).unwrap();
        miss_group.add(&rect(500.0, 500.0)).unwrap();
        root.add_all(&[leaf.clone(), hit_group.as_shape().clone(), miss_group.as_shape().clone()])
            .unwrap();

        let Collision::Group(m) = root.check_collision(Vec2::new(105.0, 5.0), &Transform::identity()) else {
            panic!("groups answer with a match");
        };
        assert_eq!(m.group, *root.as_shape());
        assert_eq!(m.shapes.len(), 1);
        let MatchEntry::Group(sub) = &m.shapes[0] else {
            panic!("expected nested group match");
        };
        assert_eq!(sub.group, *hit_group.as_shape());
        assert!(matches!(&sub.shapes[..], [MatchEntry::Shape(s)] if *s == inner));
    }

    #[test]
    fn static_group_hides_its_subtree() {
        let root = GroupRef::new(ShapeOptions::default());
        let g = GroupRef::new(ShapeOptions::default().without_events());
        g.add(&rect(0.0, 0.0)).unwrap();
        root.add(&g).unwrap();
        assert!(!root.check_collision(Vec2::new(5.0, 5.0), &Transform::identity()).is_hit());
    }

    #[test]
    fn hidden_children_are_not_hit() {
        let root = GroupRef::new(ShapeOptions::default());
        let a = rect(0.0, 0.0);
        a.set_render_flag(false);
        root.add(&a).unwrap();
        assert!(!root.check_collision(Vec2::new(5.0, 5.0), &Transform::identity()).is_hit());
    }
}
