use fpc_core::TickReport;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct MovementMetricsSnapshot {
    pub(crate) ticks: u32,
    pub(crate) grounded_ticks: u32,
    pub(crate) jumps: u32,
    pub(crate) steps: u32,
    pub(crate) landings: u32,
    pub(crate) blocked_x: u32,
    pub(crate) blocked_z: u32,
    pub(crate) stance_changes: u32,
    pub(crate) clamped_ticks: u32,
}

/// Counts tick outcomes over a window of `interval_ticks` ticks.
#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_ticks: u32,
    current: MovementMetricsSnapshot,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval_ticks: u32) -> Self {
        Self {
            interval_ticks: interval_ticks.max(1),
            current: MovementMetricsSnapshot::default(),
        }
    }

    pub(crate) fn record_tick(&mut self, report: &TickReport, requested_frame_delta: f32) {
        let counters = &mut self.current;
        counters.ticks = counters.ticks.saturating_add(1);
        let bump = |counter: &mut u32, hit: bool| {
            if hit {
                *counter = counter.saturating_add(1);
            }
        };
        bump(&mut counters.grounded_ticks, report.grounded);
        bump(&mut counters.jumps, report.jumped);
        bump(&mut counters.steps, report.stepped);
        bump(&mut counters.landings, report.landed);
        bump(&mut counters.blocked_x, report.blocked_x);
        bump(&mut counters.blocked_z, report.blocked_z);
        bump(&mut counters.stance_changes, report.stance_changed);
        bump(
            &mut counters.clamped_ticks,
            report.frame_delta + f32::EPSILON < requested_frame_delta,
        );
    }

    /// Returns and resets the window once it holds `interval_ticks` ticks.
    pub(crate) fn maybe_snapshot(&mut self) -> Option<MovementMetricsSnapshot> {
        if self.current.ticks < self.interval_ticks {
            return None;
        }
        Some(std::mem::take(&mut self.current))
    }

    /// Whatever is left in a partial window.
    pub(crate) fn flush(&mut self) -> Option<MovementMetricsSnapshot> {
        if self.current.ticks == 0 {
            return None;
        }
        Some(std::mem::take(&mut self.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(frame_delta: f32) -> TickReport {
        TickReport {
            frame_delta,
            ..TickReport::default()
        }
    }

    #[test]
    fn snapshot_after_interval_then_resets() {
        let mut accumulator = MetricsAccumulator::new(3);
        let jump = TickReport {
            jumped: true,
            grounded: true,
            ..report(1.0)
        };

        accumulator.record_tick(&jump, 1.0);
        accumulator.record_tick(&report(1.0), 1.0);
        assert_eq!(accumulator.maybe_snapshot(), None);

        accumulator.record_tick(&report(1.0), 1.0);
        let snapshot = accumulator.maybe_snapshot().expect("window complete");
        assert_eq!(snapshot.ticks, 3);
        assert_eq!(snapshot.jumps, 1);
        assert_eq!(snapshot.grounded_ticks, 1);
        assert_eq!(snapshot.clamped_ticks, 0);

        assert_eq!(accumulator.maybe_snapshot(), None);
        assert_eq!(accumulator.flush(), None);
    }

    #[test]
    fn stalled_frames_count_as_clamped() {
        let mut accumulator = MetricsAccumulator::new(10);
        accumulator.record_tick(&report(1.0), 15.0);
        accumulator.record_tick(&report(1.0), 1.0);
        let snapshot = accumulator.flush().expect("partial window");
        assert_eq!(snapshot.ticks, 2);
        assert_eq!(snapshot.clamped_ticks, 1);
    }
}
