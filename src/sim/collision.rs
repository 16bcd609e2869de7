//! Collision detection between actors
//!
//! Pairwise test over hitbox sets, gated on both actors being collidable.
//! Cost is |hitboxes(a)| x |hitboxes(b)|; the scan stops on the first hit, so
//! entities keep their most likely boxes first.

use super::actor::Actor;
use super::geometry::Rect;

/// True iff both actors are collidable and some hitbox of `a` overlaps some
/// hitbox of `b`. Symmetric in its arguments.
pub fn detect_collision<A, B>(a: &A, b: &B) -> bool
where
    A: Actor + ?Sized,
    B: Actor + ?Sized,
{
    if !(a.is_collidable() && b.is_collidable()) {
        return false;
    }
    boxes_collide(a.body().hitboxes().live(), b.body().hitboxes().live())
}

/// True iff any box in `a` overlaps any box in `b`
pub fn boxes_collide(a: &[Rect], b: &[Rect]) -> bool {
    a.iter().any(|ra| b.iter().any(|rb| ra.intersects(rb)))
}
