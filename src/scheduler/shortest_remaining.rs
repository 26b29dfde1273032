use super::{Process, Scheduler, Selection, Tick};

/// Picks the arrived process with the least remaining service.
///
/// By default the choice is only revisited when the running process
/// finishes, so a shorter job arriving mid-run waits its turn just like under
/// [`ShortestProcessNext`](super::ShortestProcessNext). [`Self::preemptive`]
/// builds the textbook variant, which re-evaluates every tick.
#[derive(Debug, Default)]
pub struct ShortestRemainingTime {
    selection: Selection,
    preemptive: bool,
}

impl ShortestRemainingTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preemptive() -> Self {
        Self {
            selection: Selection::new(),
            preemptive: true,
        }
    }

    pub fn is_preemptive(&self) -> bool {
        self.preemptive
    }
}

impl Scheduler for ShortestRemainingTime {
    const NAME: &'static str = "Shortest Remaining Time";

    fn schedule(&mut self, now: Tick, processes: &[Process]) -> Option<usize> {
        self.selection
            .select(now, processes, self.preemptive, |candidate, best| {
                candidate.remaining_time() < best.remaining_time()
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

    fn drive(
        scheduler: &mut ShortestRemainingTime,
        processes: &mut [Process],
    ) -> Vec<Option<usize>> {
        let mut trace = Vec::new();
        for now in 0.. {
            let decision = scheduler.schedule(now, processes);
            match decision {
                Some(index) => {
                    processes[index].serve(1);
                }
                None if processes.iter().all(Process::is_done) => break,
                None => {}
            }
            trace.push(decision);
        }
        trace
    }

    #[test]
    fn gated_variant_runs_to_completion() {
        let mut processes = vec![Process::new(0, 0, 4), Process::new(1, 1, 1)];
        let mut scheduler = ShortestRemainingTime::new();

        let trace = drive(&mut scheduler, &mut processes);

        assert_eq!(trace, vec![Some(0), Some(0), Some(0), Some(0), Some(1)]);
        assert!(!scheduler.is_preemptive());
    }

    #[test]
    fn preemptive_variant_switches_to_shorter_arrival() {
        let mut processes = vec![Process::new(0, 0, 4), Process::new(1, 1, 1)];
        let mut scheduler = ShortestRemainingTime::preemptive();

        let trace = drive(&mut scheduler, &mut processes);

        assert_eq!(trace, vec![Some(0), Some(1), Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn compares_remaining_not_total_demand() {
        let mut processes = vec![Process::new(0, 0, 5), Process::new(1, 0, 3)];
        processes[0].serve(4);
        let mut scheduler = ShortestRemainingTime::new();

        assert_eq!(scheduler.schedule(0, &processes), Some(0));
    }
}
