// NOTE: This module contains no collision logic. It computes the bounded
// per-tick step used by `KinematicBoxMover::move_toward`; the mover feeds
// the resulting probe direction through its resolvers before committing.

use crate::collision::settings::DIST_EPS;
use crate::collision::types::{Point2, Vec2};

/// Input for computing the bounded per-tick step toward a target point.
#[derive(Clone, Copy, Debug)]
pub struct MoveTowardParams {
    /// Current world position of the mover.
    pub current: Point2,
    /// Target world position.
    pub target: Point2,
    /// Linear speed in world units per second.
    pub speed: f32,
    /// Delta time in seconds.
    pub dt: f32,
}

/// Result of the bounded-step computation.
#[derive(Clone, Copy, Debug)]
pub struct MoveTowardResult {
    /// Position after stepping at most `speed * dt` toward the target,
    /// never overshooting it.
    pub new_position: Point2,
    /// Unit vector from the target to the stepped position; zero once the
    /// step lands on the target.
    pub probe_direction: Vec2,
    /// True once the step lands on the target.
    pub finished: bool,
    /// Distance to the target before the step.
    pub distance_to_target: f32,
}

/// Compute the per-tick step toward `target`, clamped to `speed * dt`.
///
/// Negative speed or dt is treated as zero. This does not apply any
/// collision; the caller decides what to do with the probe direction.
#[inline]
pub fn bounded_step_toward(params: MoveTowardParams) -> MoveTowardResult {
    let MoveTowardParams {
        current,
        target,
        speed,
        dt,
    } = params;

    let delta = target - current;
    let dist = delta.norm();
    let max_step = speed.max(0.0) * dt.max(0.0);

    let new_position = if dist <= max_step || dist <= DIST_EPS {
        target
    } else {
        current + delta * (max_step / dist)
    };

    let away = new_position - target;
    let away_len = away.norm();
    let probe_direction = if away_len > DIST_EPS {
        away / away_len
    } else {
        Vec2::zeros()
    };

    MoveTowardResult {
        new_position,
        probe_direction,
        finished: away_len <= DIST_EPS,
        distance_to_target: dist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-6;

    fn step(current: (f32, f32), target: (f32, f32), speed: f32, dt: f32) -> MoveTowardResult {
        bounded_step_toward(MoveTowardParams {
            current: Point2::new(current.0, current.1),
            target: Point2::new(target.0, target.1),
            speed,
            dt,
        })
    }

    #[test]
    fn step_is_clamped_to_speed_dt() {
        let result = step((0.0, 0.0), (3.0, 0.0), 1.0, 1.0);

        assert!((result.new_position.x - 1.0).abs() < EPS);
        assert_eq!(result.new_position.y, 0.0);
        assert!(!result.finished);
        assert!((result.distance_to_target - 3.0).abs() < EPS);
    }

    #[test]
    fn short_distance_lands_on_the_target() {
        let result = step((0.0, 0.0), (0.5, 0.0), 1.0, 1.0);

        assert_eq!(result.new_position, Point2::new(0.5, 0.0));
        assert_eq!(result.probe_direction, Vec2::zeros());
        assert!(result.finished);
    }

    #[test]
    fn probe_direction_points_away_from_the_target() {
        let result = step((0.0, 0.0), (10.0, 0.0), 2.0, 1.0);

        assert!((result.new_position.x - 2.0).abs() < EPS);
        assert!((result.probe_direction.x + 1.0).abs() < EPS);
        assert_eq!(result.probe_direction.y, 0.0);
    }

    #[test]
    fn diagonal_step_preserves_direction() {
        // 3-4-5 triangle: half the distance covered per tick.
        let result = step((0.0, 0.0), (3.0, 4.0), 5.0, 0.5);

        assert!((result.new_position.x - 1.5).abs() < EPS);
        assert!((result.new_position.y - 2.0).abs() < EPS);
        assert!((result.probe_direction.x + 0.6).abs() < EPS);
        assert!((result.probe_direction.y + 0.8).abs() < EPS);
        assert!(!result.finished);
    }

    #[test]
    fn non_positive_speed_or_dt_stays_put() {
        let stalled = step((1.0, 1.0), (4.0, 1.0), -2.0, 1.0);
        assert_eq!(stalled.new_position, Point2::new(1.0, 1.0));
        assert!(!stalled.finished);

        let frozen = step((1.0, 1.0), (4.0, 1.0), 2.0, 0.0);
        assert_eq!(frozen.new_position, Point2::new(1.0, 1.0));
        assert!(!frozen.finished);
    }

    #[test]
    fn already_at_the_target_is_finished() {
        let result = step((2.0, 2.0), (2.0, 2.0), 1.0, 1.0);

        assert_eq!(result.new_position, Point2::new(2.0, 2.0));
        assert_eq!(result.probe_direction, Vec2::zeros());
        assert!(result.finished);
        assert_eq!(result.distance_to_target, 0.0);
    }
}
