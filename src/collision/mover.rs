use log::trace;

use super::{
    settings::{
        DEFAULT_HORIZONTAL_RAY_COUNT, DEFAULT_SKIN_WIDTH, DEFAULT_VERTICAL_RAY_COUNT,
        MIN_RAY_COUNT, REST_PROBE_SKIN_FACTOR,
    },
    types::{Body, Bounds, CollisionState, Facing, Point2, RayCaster, Vec2},
};
use crate::mask::CollisionMask;
use crate::motion::{MoveTowardParams, bounded_step_toward};

/// Immutable-per-session tuning for [`KinematicBoxMover`].
///
/// Ray counts below [`MIN_RAY_COUNT`] are clamped at construction time.
#[derive(Clone, Copy, Debug)]
pub struct MoverConfig {
    /// Inward margin subtracted from the body bounds before casting rays.
    pub skin_width: f32,
    /// Number of rays in the horizontal fan.
    pub horizontal_ray_count: u32,
    /// Number of rays in the vertical fan.
    pub vertical_ray_count: u32,
    /// Layer filter passed to every ray-cast query.
    pub mask: CollisionMask,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            skin_width: DEFAULT_SKIN_WIDTH,
            horizontal_ray_count: DEFAULT_HORIZONTAL_RAY_COUNT,
            vertical_ray_count: DEFAULT_VERTICAL_RAY_COUNT,
            mask: CollisionMask::ALL,
        }
    }
}

/// Four corner points of the body bounds shrunk inward by the skin width.
///
/// Transient: recomputed from the current bounds every step, never persisted
/// across steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayOrigins {
    pub bottom_left: Point2,
    pub bottom_right: Point2,
    pub top_left: Point2,
    pub top_right: Point2,
}

/// Corner ray origins of `bounds` shrunk inward by `skin` on every side.
#[inline]
pub fn ray_origins(bounds: &Bounds, skin: f32) -> RayOrigins {
    let min = bounds.mins + Vec2::new(skin, skin);
    let max = bounds.maxs - Vec2::new(skin, skin);
    RayOrigins {
        bottom_left: min,
        bottom_right: Point2::new(max.x, min.y),
        top_left: Point2::new(min.x, max.y),
        top_right: max,
    }
}

/// Kinematic axis-aligned-box mover.
///
/// Resolves a requested per-tick displacement against static geometry by
/// casting fans of parallel rays from the body's skin-inset bounds and
/// clamping each axis to the nearest hit. Horizontal probing follows the
/// sticky facing direction, so walls are detected even while standing still;
/// vertical probing follows the sign of the requested vertical displacement.
///
/// Every step is a fresh resolve-and-commit cycle; the only state carried
/// across steps is the configuration, the cached ray spacings, the facing
/// direction, and the last step's [`CollisionState`]. Single-threaded use
/// only: one step call per simulation tick from one logic thread.
pub struct KinematicBoxMover {
    config: MoverConfig,
    horizontal_ray_spacing: f32,
    vertical_ray_spacing: f32,
    facing: Facing,
    collisions: CollisionState,
}

impl KinematicBoxMover {
    /// Build a mover for a body with the given starting bounds.
    ///
    /// Ray counts are clamped to [`MIN_RAY_COUNT`] here, and the ray spacings
    /// are derived from `bounds`.
    pub fn new(config: MoverConfig, bounds: &Bounds) -> Self {
        let mut config = config;
        config.horizontal_ray_count = config.horizontal_ray_count.max(MIN_RAY_COUNT);
        config.vertical_ray_count = config.vertical_ray_count.max(MIN_RAY_COUNT);

        let mut mover = Self {
            config,
            horizontal_ray_spacing: 0.0,
            vertical_ray_spacing: 0.0,
            facing: Facing::Unset,
            collisions: CollisionState::default(),
        };
        mover.recalculate_ray_spacing(bounds);
        mover
    }

    #[inline]
    pub fn config(&self) -> &MoverConfig {
        &self.config
    }

    /// Collision summary of the most recent step.
    #[inline]
    pub fn collisions(&self) -> CollisionState {
        self.collisions
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[inline]
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    #[inline]
    pub fn collision_mask(&self) -> CollisionMask {
        self.config.mask
    }

    #[inline]
    pub fn set_collision_mask(&mut self, mask: CollisionMask) {
        self.config.mask = mask;
    }

    /// Vertical gap between neighboring rays of the horizontal fan.
    #[inline]
    pub fn horizontal_ray_spacing(&self) -> f32 {
        self.horizontal_ray_spacing
    }

    /// Horizontal gap between neighboring rays of the vertical fan.
    #[inline]
    pub fn vertical_ray_spacing(&self) -> f32 {
        self.vertical_ray_spacing
    }

    /// Recompute the ray spacings from the current collider bounds.
    ///
    /// Not called automatically: a host that resizes the collider at runtime
    /// must call this itself, otherwise the fans keep the stale spacing.
    pub fn recalculate_ray_spacing(&mut self, bounds: &Bounds) {
        let size = shrunk_size(bounds, self.config.skin_width);
        self.horizontal_ray_spacing = fan_spacing(size.y, self.config.horizontal_ray_count);
        self.vertical_ray_spacing = fan_spacing(size.x, self.config.vertical_ray_count);
    }

    /// Resolve a requested displacement against the world without committing.
    ///
    /// Resets the collision state, recomputes the ray origins from `bounds`,
    /// updates the facing direction if the horizontal component is non-zero,
    /// then runs the horizontal resolver followed (for non-zero vertical
    /// input) by the vertical resolver. Returns the clamped displacement for
    /// the caller to commit.
    pub fn resolve<C: RayCaster>(
        &mut self,
        caster: &C,
        bounds: &Bounds,
        displacement: Vec2,
    ) -> Vec2 {
        self.collisions.reset();
        let origins = ray_origins(bounds, self.config.skin_width);
        self.facing.update(displacement.x);

        let mut resolved = displacement;
        self.horizontal_collisions(caster, &origins, &mut resolved);
        if resolved.y != 0.0 {
            self.vertical_collisions(caster, &origins, &mut resolved);
        }
        resolved
    }

    /// Resolve `displacement` and commit the clamped result to `body`.
    ///
    /// Returns the committed displacement.
    pub fn move_by<C: RayCaster, B: Body>(
        &mut self,
        caster: &C,
        body: &mut B,
        displacement: Vec2,
    ) -> Vec2 {
        let resolved = self.resolve(caster, &body.bounds(), displacement);
        body.translate(resolved);
        resolved
    }

    /// Step toward `target` at `speed`, bounded by `dt` (never overshooting),
    /// and commit the stepped position.
    ///
    /// The probe direction fed to the resolvers is the unit vector from the
    /// target to the stepped position, and the stepped position is committed
    /// as-is; the probe pass only updates the collision state and facing
    /// consumed by callers. Returns the committed position.
    pub fn move_toward<C: RayCaster, B: Body>(
        &mut self,
        caster: &C,
        body: &mut B,
        target: Point2,
        speed: f32,
        dt: f32,
    ) -> Point2 {
        let step = bounded_step_toward(MoveTowardParams {
            current: body.position(),
            target,
            speed,
            dt,
        });

        self.collisions.reset();
        let origins = ray_origins(&body.bounds(), self.config.skin_width);
        self.facing.update(step.probe_direction.x);

        let mut direction = step.probe_direction;
        self.horizontal_collisions(caster, &origins, &mut direction);
        if direction.y != 0.0 {
            self.vertical_collisions(caster, &origins, &mut direction);
        }

        body.set_position(step.new_position);
        step.new_position
    }

    /// Cast the horizontal fan in the facing direction and clamp
    /// `displacement.x` to the nearest hit.
    fn horizontal_collisions<C: RayCaster>(
        &mut self,
        caster: &C,
        origins: &RayOrigins,
        displacement: &mut Vec2,
    ) {
        let direction = self.facing.sign();
        if direction == 0.0 {
            // No facing yet: there is no side to probe.
            return;
        }

        let skin = self.config.skin_width;
        let mut ray_length = displacement.x.abs() + skin;
        if displacement.x.abs() < skin {
            ray_length = REST_PROBE_SKIN_FACTOR * skin;
        }

        let side = if direction < 0.0 {
            origins.bottom_left
        } else {
            origins.bottom_right
        };

        for i in 0..self.config.horizontal_ray_count {
            let origin = side + Vec2::new(0.0, self.horizontal_ray_spacing * i as f32);
            let Some(hit) = caster.cast_ray(
                origin,
                Vec2::new(direction, 0.0),
                ray_length,
                self.config.mask,
            ) else {
                continue;
            };
            trace!("horizontal ray {i} hit at distance {}", hit.distance);

            displacement.x = (hit.distance - skin) * direction;
            // Later rays only refine: the fan never reports anything past the
            // closest hit seen so far.
            ray_length = hit.distance;
            if displacement.x.abs() < skin {
                ray_length = REST_PROBE_SKIN_FACTOR * skin;
            }

            if direction < 0.0 {
                self.collisions.left = true;
            } else {
                self.collisions.right = true;
            }
            self.collisions.horizontal_hit_count += 1;
        }
    }

    /// Cast the vertical fan in the direction of `displacement.y` and clamp
    /// it to the nearest hit. Only called for non-zero vertical input.
    fn vertical_collisions<C: RayCaster>(
        &mut self,
        caster: &C,
        origins: &RayOrigins,
        displacement: &mut Vec2,
    ) {
        let direction = if displacement.y < 0.0 { -1.0 } else { 1.0 };
        let skin = self.config.skin_width;
        let mut ray_length = displacement.y.abs() + skin;

        let side = if direction < 0.0 {
            origins.bottom_left
        } else {
            origins.top_left
        };

        for i in 0..self.config.vertical_ray_count {
            // Shift by the already-resolved horizontal move so the fan probes
            // where the body will actually be.
            let origin = side + Vec2::new(self.vertical_ray_spacing * i as f32 + displacement.x, 0.0);
            let Some(hit) = caster.cast_ray(
                origin,
                Vec2::new(0.0, direction),
                ray_length,
                self.config.mask,
            ) else {
                continue;
            };
            trace!("vertical ray {i} hit at distance {}", hit.distance);

            displacement.y = (hit.distance - skin) * direction;
            ray_length = hit.distance;

            if direction > 0.0 {
                self.collisions.above = true;
            } else {
                self.collisions.below = true;
            }
        }
    }
}

/// Bounds size after shrinking by `skin` on every side, floored at zero so a
/// degenerate collider cannot produce a negative edge length.
#[inline]
fn shrunk_size(bounds: &Bounds, skin: f32) -> Vec2 {
    let extents = bounds.extents();
    Vec2::new(
        (extents.x - 2.0 * skin).max(0.0),
        (extents.y - 2.0 * skin).max(0.0),
    )
}

/// Even spacing of `count` rays along an edge of length `edge`.
///
/// A zero-length edge yields zero spacing: every ray starts at the corner.
#[inline]
fn fan_spacing(edge: f32, count: u32) -> f32 {
    let count = count.max(MIN_RAY_COUNT);
    if edge > 0.0 { edge / (count - 1) as f32 } else { 0.0 }
}
