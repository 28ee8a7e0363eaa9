/*!
Collision root module.

This module re-exports the submodules that implement the kinematic box mover
using parry2d for ray queries against a static world. The code is split for
clarity:

- types:    shared data types and capability traits (RayCaster, Body)
- settings: mover tuning constants and defaults
- mover:    ray-fan resolvers and the step orchestrators
- world:    static world backend implementing RayCaster
*/

pub mod mover;
pub mod settings;
pub mod types;
pub mod world;

// Re-export commonly used types and functions.
pub use mover::{KinematicBoxMover, MoverConfig, RayOrigins, ray_origins};
pub use types::{Body, Bounds, CollisionState, Facing, Point2, RayCaster, RayHit, Vec2};
pub use world::{StaticCollider, StaticShape, StaticWorld};
