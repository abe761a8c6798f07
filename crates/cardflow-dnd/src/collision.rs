#![forbid(unsafe_code)]

//! Drop-target resolution from pointer geometry.
//!
//! [`CollisionResolver`] picks the single best drop target for a pointer
//! sample using three tiers, first match wins:
//!
//! 1. **Pointer within**: among rectangles containing the pointer, the one
//!    with the smallest area (a card nested in its column beats the column).
//! 2. **Rect intersection**: when nothing contains the pointer (fast
//!    gestures overshoot narrow targets), the rectangle sharing the largest
//!    area with a probe rectangle centred on the pointer.
//! 3. **Closest corners**: when the winner is a non-empty container, the
//!    container's own item rectangles are ranked by mean corner distance to
//!    the probe so the drop lands on a concrete insertion index.
//!
//! # Invariants
//!
//! 1. Resolution is a pure function of its inputs: identical boards,
//!    rectangles and pointers always produce the same result.
//! 2. Ties never depend on anything but input order. Equal-area containment
//!    prefers items over containers, then the earlier rectangle.
//! 3. A dragged container only ever resolves to a container target.
//! 4. Rectangles naming ids that are not on the board are ignored.

use cardflow_board::{Board, ContainerId, DragEntity, EntityKind, ItemId};
use cardflow_core::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Identity of a droppable rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropTargetId {
    Item(ItemId),
    Container(ContainerId),
}

impl DropTargetId {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Item(_) => EntityKind::Item,
            Self::Container(_) => EntityKind::Container,
        }
    }
}

/// A droppable rectangle measured by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropRect {
    pub target: DropTargetId,
    pub rect: Rect,
}

impl DropRect {
    pub fn item(id: impl Into<ItemId>, rect: Rect) -> Self {
        Self {
            target: DropTargetId::Item(id.into()),
            rect,
        }
    }

    pub fn container(id: impl Into<ContainerId>, rect: Rect) -> Self {
        Self {
            target: DropTargetId::Container(id.into()),
            rect,
        }
    }
}

/// Where the dragged entity should go.
///
/// For items, `index` is the final position inside `container`. For
/// containers, `container` is the hovered container and `index` its
/// position among containers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropTarget {
    pub container: ContainerId,
    pub index: usize,
}

impl DropTarget {
    pub fn new(container: impl Into<ContainerId>, index: usize) -> Self {
        Self {
            container: container.into(),
            index,
        }
    }
}

/// Which tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionTier {
    PointerWithin,
    RectIntersection,
    ClosestCorners,
}

/// A resolved pointer sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub target: DropTarget,
    /// The droppable the pointer is considered to be over.
    pub over: DropTargetId,
    pub tier: CollisionTier,
}

/// Why a pre-resolved target was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRejection {
    /// The target kind cannot accept the dragged entity.
    InvalidTarget,
    /// The target is not on the board.
    UnknownTarget,
}

struct Candidate<'a> {
    order: usize,
    target: &'a DropTargetId,
    rect: Rect,
    area: f64,
}

impl Candidate<'_> {
    fn kind_rank(&self) -> u8 {
        match self.target {
            DropTargetId::Item(_) => 0,
            DropTargetId::Container(_) => 1,
        }
    }
}

/// Three-tier collision resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    probe_width: f64,
    probe_height: f64,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_PROBE_SIZE,
            crate::config::DEFAULT_PROBE_SIZE,
        )
    }
}

impl CollisionResolver {
    /// Create a resolver with the given probe size (pixels).
    #[must_use]
    pub const fn new(probe_width: f64, probe_height: f64) -> Self {
        Self {
            probe_width,
            probe_height,
        }
    }

    /// Probe rectangle used for intersection and corner ranking.
    #[must_use]
    pub fn probe(&self, pointer: Point) -> Rect {
        Rect::centered_on(pointer, self.probe_width, self.probe_height)
    }

    /// Resolve the drop target for one pointer sample.
    ///
    /// Returns `None` when no usable rectangle is near the pointer, or when
    /// the pointer has a non-finite coordinate.
    pub fn resolve<P>(
        &self,
        board: &Board<P>,
        dragged: &DragEntity,
        pointer: Point,
        rects: &[DropRect],
    ) -> Option<Resolution> {
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            return None;
        }
        let candidates: Vec<Candidate<'_>> = rects
            .iter()
            .enumerate()
            .filter(|(_, r)| accepts(board, dragged, &r.target))
            .map(|(order, r)| Candidate {
                order,
                target: &r.target,
                rect: r.rect,
                area: r.rect.area(),
            })
            .collect();
        let probe = self.probe(pointer);

        let (hit, tier) = if let Some(hit) = pointer_within(&candidates, pointer) {
            (hit, CollisionTier::PointerWithin)
        } else {
            (
                rect_intersection(&candidates, &probe)?,
                CollisionTier::RectIntersection,
            )
        };

        let (over, tier) = match (hit.target, dragged.kind()) {
            (DropTargetId::Container(container), EntityKind::Item) => {
                match closest_corners(board, &candidates, container, &probe) {
                    Some(item) => (item.target, CollisionTier::ClosestCorners),
                    None => (hit.target, tier),
                }
            }
            _ => (hit.target, tier),
        };

        let target = target_for(board, dragged, over).ok()?;
        tracing::trace!(
            dragged = %dragged,
            container = %target.container,
            index = target.index,
            ?tier,
            "resolved drop target"
        );
        Some(Resolution {
            target,
            over: over.clone(),
            tier,
        })
    }
}

/// Whether a droppable can receive the dragged entity.
fn accepts<P>(board: &Board<P>, dragged: &DragEntity, target: &DropTargetId) -> bool {
    match (target, dragged.kind()) {
        (DropTargetId::Item(_), EntityKind::Container) => false,
        (DropTargetId::Item(id), EntityKind::Item) => board.locate_item(id).is_some(),
        (DropTargetId::Container(id), _) => board.container_index(id).is_some(),
    }
}

fn pointer_within<'a, 'b>(
    candidates: &'b [Candidate<'a>],
    pointer: Point,
) -> Option<&'b Candidate<'a>> {
    candidates
        .iter()
        .filter(|c| c.rect.contains(pointer))
        .min_by(|a, b| {
            a.area
                .total_cmp(&b.area)
                .then(a.kind_rank().cmp(&b.kind_rank()))
                .then(a.order.cmp(&b.order))
        })
}

fn rect_intersection<'a, 'b>(
    candidates: &'b [Candidate<'a>],
    probe: &Rect,
) -> Option<&'b Candidate<'a>> {
    candidates
        .iter()
        .map(|c| (c, c.rect.intersection_area(probe)))
        .filter(|(_, shared)| *shared > 0.0)
        .min_by(|(a, a_shared), (b, b_shared)| {
            b_shared
                .total_cmp(a_shared)
                .then(a.area.total_cmp(&b.area))
                .then(a.order.cmp(&b.order))
        })
        .map(|(c, _)| c)
}

fn closest_corners<'a, 'b, P>(
    board: &Board<P>,
    candidates: &'b [Candidate<'a>],
    container: &ContainerId,
    probe: &Rect,
) -> Option<&'b Candidate<'a>> {
    let owner = board.container(container)?;
    if owner.is_empty() {
        return None;
    }
    candidates
        .iter()
        .filter(|c| match c.target {
            DropTargetId::Item(id) => owner.position(id).is_some(),
            DropTargetId::Container(_) => false,
        })
        .map(|c| (c, c.rect.corner_distance(probe)))
        .min_by(|(a, a_dist), (b, b_dist)| {
            a_dist
                .total_cmp(b_dist)
                .then_with(|| a.order.cmp(&b.order))
        })
        .map(|(c, _)| c)
}

/// Translate a droppable into a concrete drop target for `dragged`.
///
/// Over an item, the target index is that item's index. Over a container,
/// an item is appended (its own slot excluded) and a container takes the
/// hovered container's position.
pub fn target_for<P>(
    board: &Board<P>,
    dragged: &DragEntity,
    over: &DropTargetId,
) -> Result<DropTarget, TargetRejection> {
    match (dragged, over) {
        (DragEntity::Container(_), DropTargetId::Item(_)) => Err(TargetRejection::InvalidTarget),
        (DragEntity::Container(_), DropTargetId::Container(id)) => board
            .container_index(id)
            .map(|index| DropTarget::new(id.clone(), index))
            .ok_or(TargetRejection::UnknownTarget),
        (DragEntity::Item(_), DropTargetId::Item(id)) => board
            .locate_item(id)
            .and_then(|slot| slot.container.map(|c| DropTarget::new(c, slot.index)))
            .ok_or(TargetRejection::UnknownTarget),
        (DragEntity::Item(dragged), DropTargetId::Container(id)) => {
            let container = board.container(id).ok_or(TargetRejection::UnknownTarget)?;
            let own = usize::from(container.position(dragged).is_some());
            Ok(DropTarget::new(id.clone(), container.len() - own))
        }
    }
}
