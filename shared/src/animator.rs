//! Programmatic peek-height animation.
//!
//! The toolkit cannot animate peek changes caused by content swaps, so the core interpolates
//! the height itself and pushes every intermediate value. Only one session exists at a time;
//! frames carry the session id so late frames of a cancelled session are dropped.

use tracing::debug;

pub const DEFAULT_DURATION_MS: u64 = 200;

/// Material "fast out, slow in" curve: cubic-bezier(0.4, 0.0, 0.2, 1.0).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    pub const FAST_OUT_SLOW_IN: Self = Self {
        x1: 0.4,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Eased progress for linear progress `x`, clamped to [0, 1].
    pub fn ease(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let mut t = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, t) - x;
            if err.abs() < 1e-7 {
                return Self::sample(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        // Newton did not converge; fall back to bisection.
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let value = Self::sample(self.x1, self.x2, t);
            if (value - x).abs() < 1e-7 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnimationSession {
    pub id: u64,
    pub start_height: i32,
    pub target_height: i32,
    pub bottom_inset: i32,
    pub parent_height: i32,
    pub duration_ms: u64,
    /// Set by the first frame.
    pub started_at_ms: Option<u64>,
}

impl AnimationSession {
    fn value_at(&self, progress: f64) -> i32 {
        if progress >= 1.0 {
            return self.target_height;
        }
        let eased = CubicBezier::FAST_OUT_SLOW_IN.ease(progress);
        let delta = f64::from(self.target_height - self.start_height);
        self.start_height + (delta * eased).round() as i32
    }
}

/// Values to push to the host for one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    pub session: u64,
    pub peek_height: i32,
    /// Enlarged so the sheet is never clipped mid-animation.
    pub max_height: i32,
    pub distance_to_top: i32,
    pub finished: bool,
}

#[derive(Debug, Default)]
pub struct HeightAnimator {
    next_id: u64,
    active: Option<AnimationSession>,
}

impl HeightAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session, cancelling the running one first. Returns the new session id.
    pub fn start(
        &mut self,
        start_height: i32,
        target_height: i32,
        bottom_inset: i32,
        parent_height: i32,
        duration_ms: u64,
    ) -> u64 {
        if let Some(previous) = self.cancel() {
            debug!(session = previous.id, "peek animation replaced");
        }
        self.next_id += 1;
        let id = self.next_id;
        self.active = Some(AnimationSession {
            id,
            start_height,
            target_height,
            bottom_inset,
            parent_height,
            duration_ms,
            started_at_ms: None,
        });
        debug!(session = id, start_height, target_height, "peek animation started");
        id
    }

    pub fn cancel(&mut self) -> Option<AnimationSession> {
        self.active.take()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&AnimationSession> {
        self.active.as_ref()
    }

    /// Advances `session` to `now_ms`. `None` when the session is no longer the active one.
    pub fn tick(&mut self, session: u64, now_ms: u64) -> Option<AnimationFrame> {
        let current = self.active.as_mut().filter(|s| s.id == session)?;
        let started = *current.started_at_ms.get_or_insert(now_ms);

        let elapsed = now_ms.saturating_sub(started);
        let progress = if current.duration_ms == 0 {
            1.0
        } else {
            elapsed as f64 / current.duration_ms as f64
        };

        let value = current.value_at(progress);
        let frame = AnimationFrame {
            session,
            peek_height: value,
            max_height: value + current.bottom_inset,
            distance_to_top: current.parent_height - value - current.bottom_inset,
            finished: value == current.target_height,
        };

        if frame.finished {
            self.active = None;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ease_hits_endpoints() {
        let curve = CubicBezier::FAST_OUT_SLOW_IN;
        assert_eq!(curve.ease(0.0), 0.0);
        assert_eq!(curve.ease(1.0), 1.0);
        assert_eq!(curve.ease(-3.0), 0.0);
        assert_eq!(curve.ease(7.0), 1.0);
    }

    #[test]
    fn ease_is_ahead_of_linear_at_midpoint() {
        let mid = CubicBezier::FAST_OUT_SLOW_IN.ease(0.5);
        assert!(mid > 0.5 && mid < 1.0, "mid = {mid}");
    }

    #[test]
    fn first_frame_starts_the_clock() {
        let mut animator = HeightAnimator::new();
        let id = animator.start(300, 500, 40, 2000, 200);

        let frame = animator.tick(id, 10_000).unwrap();
        assert_eq!(frame.peek_height, 300);
        assert_eq!(frame.max_height, 340);
        assert_eq!(frame.distance_to_top, 2000 - 300 - 40);
        assert!(!frame.finished);
    }

    #[test]
    fn reaches_target_exactly_and_ends() {
        let mut animator = HeightAnimator::new();
        let id = animator.start(300, 500, 40, 2000, 200);
        animator.tick(id, 0).unwrap();

        let mid = animator.tick(id, 100).unwrap();
        assert!(mid.peek_height > 300 && mid.peek_height < 500);

        let last = animator.tick(id, 250).unwrap();
        assert_eq!(last.peek_height, 500);
        assert!(last.finished);
        assert!(!animator.is_running());
        assert!(animator.tick(id, 300).is_none());
    }

    #[test]
    fn new_session_replaces_the_old_one() {
        let mut animator = HeightAnimator::new();
        let first = animator.start(300, 500, 0, 2000, 200);
        let second = animator.start(320, 800, 0, 2000, 200);

        assert_ne!(first, second);
        assert!(animator.tick(first, 0).is_none());
        assert_eq!(animator.active().map(|s| s.target_height), Some(800));

        animator.tick(second, 0).unwrap();
        let last = animator.tick(second, 200).unwrap();
        assert_eq!(last.peek_height, 800);
    }

    #[test]
    fn cancel_drops_pending_frames() {
        let mut animator = HeightAnimator::new();
        let id = animator.start(0, 100, 0, 1000, 200);
        assert!(animator.cancel().is_some());
        assert!(animator.tick(id, 50).is_none());
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let mut animator = HeightAnimator::new();
        let id = animator.start(0, 100, 0, 1000, 0);
        let frame = animator.tick(id, 5).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.peek_height, 100);
    }

    proptest! {
        #[test]
        fn ease_is_monotonic(a in 0.0f64..1.0, b in 0.0f64..1.0) {
            let curve = CubicBezier::FAST_OUT_SLOW_IN;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(curve.ease(lo) <= curve.ease(hi) + 1e-6);
        }

        #[test]
        fn frames_stay_between_start_and_target(
            start in 0i32..3000,
            target in 0i32..3000,
            at in 0u64..400,
        ) {
            let mut animator = HeightAnimator::new();
            let id = animator.start(start, target, 0, 4000, 200);
            animator.tick(id, 0);
            if let Some(frame) = animator.tick(id, at) {
                let (lo, hi) = if start <= target { (start, target) } else { (target, start) };
                prop_assert!(frame.peek_height >= lo && frame.peek_height <= hi);
            }
        }
    }
}
