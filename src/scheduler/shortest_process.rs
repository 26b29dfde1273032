use super::{Process, Scheduler, Selection, Tick};

/// Non-preemptive: the shortest total demand among the arrived processes is
/// picked, and kept until it finishes.
#[derive(Debug, Default)]
pub struct ShortestProcessNext {
    selection: Selection,
}

impl ShortestProcessNext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ShortestProcessNext {
    const NAME: &'static str = "Shortest Process Next";

    fn schedule(&mut self, now: Tick, processes: &[Process]) -> Option<usize> {
        self.selection
            .select(now, processes, false, |candidate, best| {
                candidate.service_time() < best.service_time()
            })
    }

    fn reset(&mut self) {
        self.selection.reset();
    }

    fn current_process(&self) -> Option<usize> {
        self.selection.current()
    }
}
