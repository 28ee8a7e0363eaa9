/*!
Box mover tuning constants.

These constants centralize the parameters used by the ray-fan resolvers.
Keeping them together makes tuning easier and helps ensure deterministic
behavior across platforms.

Notes
- Distances are in world units, time in seconds.
- Favor practical world-space tolerances over machine epsilon for robust
  behavior.
- Per-mover customization goes through `MoverConfig`; these are the
  defaults it starts from.
*/

/// Inward margin subtracted from the body bounds before casting rays
/// (world units). Rays start slightly inside the body so touching surfaces
/// never swallow the probe. Too large creates visible gaps; too small risks
/// jitter on contact.
pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;

/// Default number of rays in the horizontal fan.
pub const DEFAULT_HORIZONTAL_RAY_COUNT: u32 = 4;

/// Default number of rays in the vertical fan.
pub const DEFAULT_VERTICAL_RAY_COUNT: u32 = 4;

/// Floor for both ray counts: one ray per corner is the minimum valid fan,
/// and it keeps the spacing division well-defined.
pub const MIN_RAY_COUNT: u32 = 2;

/// Probe length, in skin widths, used when the requested horizontal step is
/// smaller than the skin width. Walls stay detectable while standing still.
pub const REST_PROBE_SKIN_FACTOR: f32 = 2.0;

/// Practical small distance for comparisons (world units).
pub const DIST_EPS: f32 = 1.0e-6;
