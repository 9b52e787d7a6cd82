/// Default length of a smooth scroll, in seconds.
pub const SMOOTH_SCROLL_SECS: f64 = 0.35;

/// A fire-and-forget eased scroll between two offsets.
///
/// Starting a new animation simply replaces the old one; nothing queues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f32,
    to: f32,
    started_at: f64,
    duration: f64,
}

impl ScrollAnimation {
    pub fn new(from: f32, to: f32, started_at: f64) -> Self {
        Self::with_duration(from, to, started_at, SMOOTH_SCROLL_SECS)
    }

    pub fn with_duration(from: f32, to: f32, started_at: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            started_at,
            duration: duration.max(0.0),
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Offset at time `now`, and whether the animation has finished.
    pub fn sample(&self, now: f64) -> (f32, bool) {
        if self.duration <= 0.0 {
            return (self.to, true);
        }
        let t = ((now - self.started_at) / self.duration).clamp(0.0, 1.0);
        // Ease-out cubic.
        let eased = 1.0 - (1.0 - t).powi(3);
        let offset = self.from + (self.to - self.from) * eased as f32;
        (offset, t >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_endpoints() {
        let anim = ScrollAnimation::with_duration(0.0, 100.0, 10.0, 0.5);
        assert_eq!(anim.sample(10.0), (0.0, false));
        assert_eq!(anim.sample(10.5), (100.0, true));
        assert_eq!(anim.sample(99.0), (100.0, true));
        let (mid, done) = anim.sample(10.25);
        assert!(mid > 50.0 && mid < 100.0, "ease-out front-loads: {}", mid);
        assert!(!done);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let anim = ScrollAnimation::with_duration(5.0, 40.0, 0.0, 0.0);
        assert_eq!(anim.sample(0.0), (40.0, true));
        assert_eq!(anim.target(), 40.0);
    }
}
