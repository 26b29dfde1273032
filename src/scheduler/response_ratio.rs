use super::{Process, Scheduler, Selection, Tick};

/// Highest Response Ratio Next.
///
/// Non-preemptive. When the processor frees up, every arrived process is
/// scored with [`Process::response_ratio`] and the highest score wins, so
/// long-waiting jobs eventually beat short fresh ones.
#[derive(Debug, Default)]
pub struct HighestResponseRatio {
    selection: Selection,
}

impl HighestResponseRatio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for HighestResponseRatio {
    const NAME: &'static str = "Highest Response Ratio Next";

    fn schedule(&mut self, now: Tick, processes: &[Process]) -> Option<usize> {
        self.selection.select(now, processes, false, |candidate, best| {
            candidate.response_ratio(now) > best.response_ratio(now)
        })
    }

    fn reset(&mut self) {
        self.selection.reset();
    }

    fn current_process(&self) -> Option<usize> {
        self.selection.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_only_matters_at_the_next_free_slot() {
        let mut processes = vec![Process::new(0, 0, 4), Process::new(1, 2, 1)];
        let mut scheduler = HighestResponseRatio::new();
        let mut trace = Vec::new();

        for now in 0..6 {
            let decision = scheduler.schedule(now, &processes);
            if let Some(index) = decision {
                processes[index].serve(1);
            }
            trace.push(decision);
        }

        assert_eq!(
            trace,
            vec![Some(0), Some(0), Some(0), Some(0), Some(1), None]
        );
    }

    #[test]
    fn starved_long_job_beats_fresh_short_one() {
        // At tick 10: P0 ratio (10 + 5) / 5 = 3, P1 ratio (1 + 1) / 1 = 2.
        let processes = vec![Process::new(0, 0, 5), Process::new(1, 9, 1)];
        let mut scheduler = HighestResponseRatio::new();

        assert_eq!(scheduler.schedule(10, &processes), Some(0));
    }

    #[test]
    fn equal_ratios_pick_the_lowest_index() {
        let processes = vec![Process::new(0, 0, 2), Process::new(1, 0, 3)];
        let mut scheduler = HighestResponseRatio::new();

        assert_eq!(scheduler.schedule(0, &processes), Some(0));
    }

    #[test]
    fn zero_demand_never_scored() {
        let processes = vec![Process::new(0, 0, 0), Process::new(1, 0, 2)];
        let mut scheduler = HighestResponseRatio::new();

        assert_eq!(scheduler.schedule(0, &processes), Some(1));
    }
}
