//! Velocity tracking for fling detection.
//!
//! Impulse strategy: velocity is derived from the kinetic energy the pointer
//! samples would impart, which is far less jittery than a two-point slope.

use crate::geometry::{Point, Velocity};
use crate::input::PointerEvent;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Default sample horizon in milliseconds.
pub const DEFAULT_HORIZON_MS: i64 = 100;

/// A gap between consecutive samples longer than this means the pointer
/// stopped; older samples are ignored.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default, Debug)]
struct DataPointAtTime {
    time_ms: i64,
    data_point: f32,
}

/// 1D velocity tracker over absolute positions.
///
/// # Usage
/// ```ignore
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_data_point(time_ms, position);
/// // ... more points ...
/// let velocity = tracker.calculate_velocity(); // px/sec
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    /// Ring buffer of samples.
    samples: [Option<DataPointAtTime>; HISTORY_SIZE],
    /// Current write index in ring buffer.
    index: usize,
    horizon_ms: i64,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self::with_horizon(DEFAULT_HORIZON_MS)
    }

    /// Only samples younger than `horizon_ms` (relative to the newest one)
    /// contribute to the estimate.
    pub fn with_horizon(horizon_ms: i64) -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
            horizon_ms,
        }
    }

    pub fn horizon_ms(&self) -> i64 {
        self.horizon_ms
    }

    /// Adds a position sample taken at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: i64, data_point: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(DataPointAtTime {
            time_ms,
            data_point,
        });
    }

    /// Calculates the velocity in units/second.
    ///
    /// Returns 0.0 if there aren't enough samples or if the pointer hasn't moved.
    pub fn calculate_velocity(&self) -> f32 {
        let mut data_points = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let newest_sample = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current_index = self.index;
        let mut previous_time = newest_sample.time_ms;

        while let Some(sample) = self.samples[current_index] {
            let age = newest_sample.time_ms - sample.time_ms;
            let gap = (previous_time - sample.time_ms).abs();
            previous_time = sample.time_ms;

            if age > self.horizon_ms || gap > ASSUME_STOPPED_MS {
                break;
            }

            data_points[sample_count] = sample.data_point;
            times[sample_count] = -(age as f32);

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };

            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }
        }

        if sample_count < 2 {
            return 0.0;
        }

        calculate_impulse_velocity(&data_points, &times, sample_count) * 1000.0
    }

    /// Clears all tracked data.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Samples are ordered newest first with non-positive relative times.
fn calculate_impulse_velocity(
    data_points: &[f32; HISTORY_SIZE],
    times: &[f32; HISTORY_SIZE],
    sample_count: usize,
) -> f32 {
    if sample_count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = sample_count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let data_points_delta = data_points[i - 1] - data_points[i];
        let v_curr = data_points_delta / (next_time - current_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// Converts kinetic energy to velocity using E = 0.5 * m * v^2 (with m = 1).
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Two-axis tracker fed directly from pointer events.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window_ms: i64) -> Self {
        Self {
            x: VelocityTracker1D::with_horizon(window_ms),
            y: VelocityTracker1D::with_horizon(window_ms),
        }
    }

    pub fn add_position(&mut self, time_ms: i64, position: Point) {
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    /// Records the event's window-space position and timestamp.
    pub fn add_event(&mut self, event: &PointerEvent) {
        self.add_position(event.uptime_millis, event.global_position);
    }

    pub fn calculate_velocity(&self) -> Velocity {
        Velocity::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerEventKind;

    #[test]
    fn test_empty_tracker_returns_zero() {
        let tracker = VelocityTracker1D::new();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn test_single_point_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn test_constant_velocity() {
        let mut tracker = VelocityTracker1D::new();
        // Moving at 100 px per 10ms = 10000 px/s
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.add_data_point(20, 200.0);
        tracker.add_data_point(30, 300.0);

        let velocity = tracker.calculate_velocity();
        assert!(
            (velocity - 10000.0).abs() < 1000.0,
            "Expected ~10000, got {}",
            velocity
        );
    }

    #[test]
    fn two_samples_give_their_slope() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        tracker.add_data_point(10, 120.0);
        let velocity = tracker.calculate_velocity();
        assert!((velocity - 2000.0).abs() < 1.0, "got {velocity}");
    }

    #[test]
    fn test_reset() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);

        tracker.reset();

        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn test_negative_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);

        let velocity = tracker.calculate_velocity();
        assert!(
            velocity < 0.0,
            "Expected negative velocity, got {}",
            velocity
        );
    }

    #[test]
    fn test_old_samples_ignored() {
        let mut tracker = VelocityTracker1D::new();
        // Old sample (more than the horizon ago)
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(150, 100.0);
        tracker.add_data_point(160, 200.0);
        tracker.add_data_point(170, 300.0);

        let velocity = tracker.calculate_velocity();
        assert!(
            (velocity - 10000.0).abs() < 1000.0,
            "Should calculate velocity from recent samples, got {velocity}"
        );
    }

    #[test]
    fn wider_horizon_keeps_steady_slow_drag() {
        // 20 samples spread over 380ms at 0.5 px/ms.
        let mut narrow = VelocityTracker1D::new();
        let mut wide = VelocityTracker1D::with_horizon(500);
        for step in 0..20 {
            let time = step * 20;
            narrow.add_data_point(time, time as f32 * 0.5);
            wide.add_data_point(time, time as f32 * 0.5);
        }
        assert_eq!(wide.horizon_ms(), 500);
        assert!((wide.calculate_velocity() - 500.0).abs() < 25.0);
        assert!((narrow.calculate_velocity() - 500.0).abs() < 25.0);
    }

    #[test]
    fn test_gap_over_stopped_threshold_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);

        let velocity = tracker.calculate_velocity();
        assert_eq!(velocity, 0.0);
    }

    #[test]
    fn pause_before_release_discards_earlier_motion() {
        let mut tracker = VelocityTracker1D::with_horizon(500);
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        // Held still for 200ms, then lifted in place.
        tracker.add_data_point(210, 100.0);
        tracker.add_data_point(220, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn two_axis_tracker_reads_global_positions() {
        let mut tracker = VelocityTracker::with_window(500);
        for (time, x) in [(0, 100.0), (10, 110.0), (20, 120.0)] {
            let event = PointerEvent::new(
                PointerEventKind::Move,
                Point::new(0.0, 0.0),
                Point::new(x, 50.0),
            )
            .with_uptime_millis(time);
            tracker.add_event(&event);
        }
        let velocity = tracker.calculate_velocity();
        assert!((velocity.x - 1000.0).abs() < 50.0, "got {:?}", velocity);
        assert_eq!(velocity.y, 0.0);

        tracker.reset();
        assert_eq!(tracker.calculate_velocity(), Velocity::ZERO);
    }
}
