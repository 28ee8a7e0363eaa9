/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
and capability traits exchanged between:
- the kinematic box mover (ray fans, per-axis clamping)
- the static world backend (parry2d ray queries)
- higher-level movement helpers (bounded step toward a target)

The mover itself depends only on the [`RayCaster`] and [`Body`] traits, so a
host can plug in its own broad phase or a full physics-engine-backed query
instead of [`crate::collision::world::StaticWorld`].
*/

use nalgebra as na;

use crate::mask::CollisionMask;

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Point2 = na::Point2<f32>;

/// World-space axis-aligned bounding box of the moving body.
pub type Bounds = parry2d::bounding_volume::Aabb;

/// Nearest-hit result of a ray-cast query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit, in world units.
    pub distance: f32,
}

/// Nearest-hit ray query capability supplied by the physics collaborator.
///
/// `direction` is unit length; a `None` result means no obstacle within
/// `max_distance` for the given layer mask.
pub trait RayCaster {
    fn cast_ray(
        &self,
        origin: Point2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionMask,
    ) -> Option<RayHit>;
}

/// Host-side moving body: current bounds plus the position-commit primitives
/// the step orchestrators use.
pub trait Body {
    /// Current world-space AABB of the body.
    fn bounds(&self) -> Bounds;
    /// Current world-space position (center of the bounds).
    fn position(&self) -> Point2;
    /// Commit a position delta.
    fn translate(&mut self, delta: Vec2);
    /// Commit an absolute position.
    fn set_position(&mut self, position: Point2);
}

/// Per-step collision summary consumed by callers (animation, grounding
/// logic, etc.).
///
/// Reset at the start of every movement step, before any ray is cast; valid
/// until the next step overwrites it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionState {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,
    /// Number of horizontal rays that registered a hit this step.
    pub horizontal_hit_count: u32,
}

impl CollisionState {
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Derived predicate: did any side touch something this step?
    #[inline]
    pub fn any_collision(&self) -> bool {
        self.above || self.below || self.left || self.right
    }
}

/// Last non-zero horizontal movement direction.
///
/// `Unset` until the first non-zero horizontal input, then sticky: a step
/// with zero horizontal displacement keeps the previous value. Horizontal
/// probes are cast in this direction, which is what makes walls detectable
/// while standing still.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Unset,
    Left,
    Right,
}

impl Facing {
    /// Signed probe direction: -1, +1, or 0 when unset.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Unset => 0.0,
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    #[inline]
    pub fn from_sign(x: f32) -> Self {
        if x < 0.0 {
            Facing::Left
        } else if x > 0.0 {
            Facing::Right
        } else {
            Facing::Unset
        }
    }

    /// Sticky update: zero input keeps the current value.
    #[inline]
    pub fn update(&mut self, dx: f32) {
        if dx != 0.0 {
            *self = Self::from_sign(dx);
        }
    }
}
