use std::collections::VecDeque;

/// How far back the frame-timestamp window reaches.
pub const WINDOW_MS: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTiming {
    /// Seconds since the previous frame; 0 on the very first frame.
    pub delta_secs: f64,
    /// Timestamps in the rolling window, current frame included (>= 1).
    /// Roughly the measured frames per second once a second has elapsed.
    pub samples: usize,
}

/// Rolling window of recent frame timestamps (milliseconds).
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    times: VecDeque<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms` and drop samples older than one second.
    pub fn tick(&mut self, now_ms: f64) -> FrameTiming {
        let prev = self.times.back().copied();
        self.times.push_back(now_ms);
        while let Some(&oldest) = self.times.front() {
            if now_ms - oldest > WINDOW_MS {
                self.times.pop_front();
            } else {
                break;
            }
        }
        FrameTiming {
            delta_secs: prev.map_or(0.0, |p| (now_ms - p) / 1000.0),
            samples: self.times.len(),
        }
    }

    pub fn samples(&self) -> usize {
        self.times.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_no_delta() {
        let mut clock = FrameClock::new();
        let t = clock.tick(500.0);
        assert_eq!(t.delta_secs, 0.0);
        assert_eq!(t.samples, 1);
    }

    #[test]
    fn window_self_limits_to_one_second() {
        let mut clock = FrameClock::new();
        let mut last = None;
        for i in 0..600 {
            last = Some(clock.tick(i as f64 * 10.0));
        }
        let t = last.unwrap();
        assert!((t.delta_secs - 0.01).abs() < 1e-9);
        // 100 fps -> 101 samples within [now - 1000, now]
        assert_eq!(t.samples, 101);
    }

    #[test]
    fn long_stall_evicts_everything_but_now() {
        let mut clock = FrameClock::new();
        for i in 0..10 {
            clock.tick(i as f64 * 16.0);
        }
        let t = clock.tick(10_000.0);
        assert_eq!(t.samples, 1);
        assert!(t.delta_secs > 9.0);
    }
}
