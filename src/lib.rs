pub mod collision;
pub mod mask;
pub mod motion;

pub use collision::{
    Body, Bounds, CollisionState, Facing, KinematicBoxMover, MoverConfig, Point2, RayCaster,
    RayHit, RayOrigins, StaticCollider, StaticShape, StaticWorld, Vec2, ray_origins,
};
pub use mask::{CollisionLayer, CollisionMask};
pub use motion::{MoveTowardParams, MoveTowardResult, bounded_step_toward};
