use log::debug;
use nalgebra as na;
use parry2d::{
    bounding_volume::Aabb,
    query::{Ray, RayCast},
    shape,
};

use super::types::{Point2, RayCaster, RayHit, Vec2};
use crate::mask::CollisionMask;

/// Static collision shapes supported by the world.
#[derive(Clone, Copy, Debug)]
pub enum StaticShape {
    /// Infinite half-plane, solid on the side the normal points away from:
    /// all points x with normal ⋅ x <= dist.
    HalfPlane {
        /// World-space unit normal of the surface.
        normal: Vec2,
        /// Surface offset along the normal, i.e. normal ⋅ x = dist.
        dist: f32,
    },
    /// Axis-aligned box.
    Box {
        /// Half-extents (hx, hy).
        half_extents: Vec2,
        /// World-space center.
        center: Point2,
    },
    /// Circle.
    Circle {
        radius: f32,
        center: Point2,
    },
    /// Line segment between two world points.
    Segment { a: Point2, b: Point2 },
}

/// A static collider: a shape plus the collision layers it occupies.
///
/// A ray-cast query hits the collider when the query mask intersects
/// `layers`.
#[derive(Clone, Copy, Debug)]
pub struct StaticCollider {
    pub shape: StaticShape,
    pub layers: CollisionMask,
}

impl StaticCollider {
    /// Collider present on every layer.
    #[inline]
    pub fn new(shape: StaticShape) -> Self {
        Self {
            shape,
            layers: CollisionMask::ALL,
        }
    }

    #[inline]
    pub fn with_layers(shape: StaticShape, layers: CollisionMask) -> Self {
        Self { shape, layers }
    }
}

/// Immutable set of static colliders answering nearest-hit ray queries.
///
/// Finite shapes carry a precomputed world-space AABB used as a linear
/// broad-phase prune; half-planes are infinite and always narrow-phase
/// tested. Narrow-phase ray casts go through parry2d.
pub struct StaticWorld {
    colliders: Vec<StaticCollider>,
    /// World-space AABBs parallel to `colliders`; `None` marks an infinite
    /// shape.
    aabbs: Vec<Option<Aabb>>,
}

impl StaticWorld {
    pub fn new(colliders: Vec<StaticCollider>) -> Self {
        let aabbs = colliders.iter().map(|c| collider_aabb(&c.shape)).collect();
        debug!("static world built with {} colliders", colliders.len());
        Self { colliders, aabbs }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    #[inline]
    pub fn colliders(&self) -> &[StaticCollider] {
        &self.colliders
    }
}

impl RayCaster for StaticWorld {
    fn cast_ray(
        &self,
        origin: Point2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionMask,
    ) -> Option<RayHit> {
        if max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(origin, direction);
        let swept = ray_aabb(origin, direction, max_distance);

        let mut best: Option<f32> = None;
        for (collider, aabb) in self.colliders.iter().zip(&self.aabbs) {
            if !collider.layers.intersects(mask) {
                continue;
            }
            if let Some(aabb) = aabb {
                if !aabb_intersects(aabb, &swept) {
                    continue;
                }
            }

            // Cap the cast at the best hit so far; closer hits only.
            let limit = best.unwrap_or(max_distance);
            if let Some(toi) = cast_ray_against(&collider.shape, &ray, limit) {
                if best.map_or(true, |b| toi < b) {
                    best = Some(toi);
                }
            }
        }

        best.map(|distance| RayHit { distance })
    }
}

/// Cast `ray` against a single static shape and return the distance to the
/// earliest hit within `max_distance` (if any).
fn cast_ray_against(shape: &StaticShape, ray: &Ray, max_distance: f32) -> Option<f32> {
    match *shape {
        StaticShape::HalfPlane { normal, dist } => {
            // Surface equation in world space: normal ⋅ x = dist.
            let unit_n = na::Unit::new_normalize(normal);
            let halfspace = shape::HalfSpace::new(unit_n);
            let iso = na::Isometry2::translation((normal * dist).x, (normal * dist).y);
            halfspace.cast_ray(&iso, ray, max_distance, true)
        }
        StaticShape::Box {
            half_extents,
            center,
        } => {
            let cuboid = shape::Cuboid::new(half_extents);
            let iso = na::Isometry2::translation(center.x, center.y);
            cuboid.cast_ray(&iso, ray, max_distance, true)
        }
        StaticShape::Circle { radius, center } => {
            let ball = shape::Ball::new(radius);
            let iso = na::Isometry2::translation(center.x, center.y);
            ball.cast_ray(&iso, ray, max_distance, true)
        }
        StaticShape::Segment { a, b } => {
            let segment = shape::Segment::new(a, b);
            segment.cast_ray(&na::Isometry2::identity(), ray, max_distance, true)
        }
    }
}

/// World-space AABB of a static shape; `None` for infinite shapes.
fn collider_aabb(shape: &StaticShape) -> Option<Aabb> {
    match *shape {
        StaticShape::HalfPlane { .. } => None,
        StaticShape::Box {
            half_extents,
            center,
        } => {
            let cuboid = shape::Cuboid::new(half_extents);
            Some(cuboid.aabb(&na::Isometry2::translation(center.x, center.y)))
        }
        StaticShape::Circle { radius, center } => {
            let ball = shape::Ball::new(radius);
            Some(ball.aabb(&na::Isometry2::translation(center.x, center.y)))
        }
        StaticShape::Segment { a, b } => {
            let segment = shape::Segment::new(a, b);
            Some(segment.aabb(&na::Isometry2::identity()))
        }
    }
}

/// AABB covering the ray segment from `origin` to
/// `origin + direction * max_distance`.
fn ray_aabb(origin: Point2, direction: Vec2, max_distance: f32) -> Aabb {
    let end = origin + direction * max_distance;
    Aabb::new(
        Point2::new(origin.x.min(end.x), origin.y.min(end.y)),
        Point2::new(origin.x.max(end.x), origin.y.max(end.y)),
    )
}

/// Test two AABBs for intersection.
fn aabb_intersects(a: &Aabb, b: &Aabb) -> bool {
    !(a.maxs.x < b.mins.x || a.mins.x > b.maxs.x || a.maxs.y < b.mins.y || a.mins.y > b.maxs.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-5;

    fn world_of(shapes: &[StaticShape]) -> StaticWorld {
        StaticWorld::new(shapes.iter().copied().map(StaticCollider::new).collect())
    }

    fn cast(
        world: &StaticWorld,
        origin: (f32, f32),
        direction: (f32, f32),
        max_distance: f32,
    ) -> Option<f32> {
        world
            .cast_ray(
                Point2::new(origin.0, origin.1),
                Vec2::new(direction.0, direction.1),
                max_distance,
                CollisionMask::ALL,
            )
            .map(|hit| hit.distance)
    }

    #[test]
    fn ray_hits_box_at_the_near_face() {
        let world = world_of(&[StaticShape::Box {
            half_extents: Vec2::new(1.0, 1.0),
            center: Point2::new(5.0, 0.0),
        }]);

        let distance = cast(&world, (0.0, 0.0), (1.0, 0.0), 10.0).unwrap();
        assert!((distance - 4.0).abs() < EPS);
    }

    #[test]
    fn ray_respects_max_distance() {
        let world = world_of(&[StaticShape::Box {
            half_extents: Vec2::new(1.0, 1.0),
            center: Point2::new(5.0, 0.0),
        }]);

        assert_eq!(cast(&world, (0.0, 0.0), (1.0, 0.0), 3.0), None);
        assert_eq!(cast(&world, (0.0, 0.0), (1.0, 0.0), 0.0), None);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let world = world_of(&[StaticShape::Box {
            half_extents: Vec2::new(1.0, 1.0),
            center: Point2::new(-5.0, 0.0),
        }]);

        assert_eq!(cast(&world, (0.0, 0.0), (1.0, 0.0), 10.0), None);
    }

    #[test]
    fn nearest_collider_wins_in_either_insertion_order() {
        let near = StaticShape::Box {
            half_extents: Vec2::new(1.0, 1.0),
            center: Point2::new(3.0, 0.0),
        };
        let far = StaticShape::Box {
            half_extents: Vec2::new(1.0, 1.0),
            center: Point2::new(6.0, 0.0),
        };

        for shapes in [[near, far], [far, near]] {
            let world = world_of(&shapes);
            let distance = cast(&world, (0.0, 0.0), (1.0, 0.0), 10.0).unwrap();
            assert!((distance - 2.0).abs() < EPS);
        }
    }

    #[test]
    fn half_plane_is_hit_without_a_broad_phase_entry() {
        let world = world_of(&[StaticShape::HalfPlane {
            normal: Vec2::new(0.0, 1.0),
            dist: 0.0,
        }]);

        let distance = cast(&world, (0.0, 5.0), (0.0, -1.0), 10.0).unwrap();
        assert!((distance - 5.0).abs() < EPS);
    }

    #[test]
    fn circle_and_segment_block_rays() {
        let world = world_of(&[StaticShape::Circle {
            radius: 1.0,
            center: Point2::new(5.0, 0.0),
        }]);
        let distance = cast(&world, (0.0, 0.0), (1.0, 0.0), 10.0).unwrap();
        assert!((distance - 4.0).abs() < EPS);

        let world = world_of(&[StaticShape::Segment {
            a: Point2::new(1.0, -1.0),
            b: Point2::new(1.0, 1.0),
        }]);
        let distance = cast(&world, (0.0, 0.0), (1.0, 0.0), 10.0).unwrap();
        assert!((distance - 1.0).abs() < EPS);
    }

    #[test]
    fn mask_filters_colliders_by_layer() {
        crate::define_collision_layers!(Layer, {
            Ground,
            Hazard,
        });

        let wall = StaticShape::Box {
            half_extents: Vec2::new(1.0, 1.0),
            center: Point2::new(5.0, 0.0),
        };
        let world = StaticWorld::new(vec![StaticCollider::with_layers(
            wall,
            CollisionMask::from_layer(Layer::Ground),
        )]);

        let hit = world.cast_ray(
            Point2::origin(),
            Vec2::new(1.0, 0.0),
            10.0,
            CollisionMask::from_layer(Layer::Ground),
        );
        assert!(hit.is_some());

        let filtered = world.cast_ray(
            Point2::origin(),
            Vec2::new(1.0, 0.0),
            10.0,
            CollisionMask::from_layer(Layer::Hazard),
        );
        assert_eq!(filtered, None);
    }

    #[test]
    fn empty_world_reports_no_hits() {
        let world = world_of(&[]);
        assert!(world.is_empty());
        assert_eq!(world.len(), 0);
        assert_eq!(cast(&world, (0.0, 0.0), (1.0, 0.0), 100.0), None);
    }
}
