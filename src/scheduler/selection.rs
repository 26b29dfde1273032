use super::{Process, Tick};

/// Run-length gated selection shared by the non-preemptive policies.
///
/// A new candidate is only searched for when nothing has been selected yet or
/// the current selection has finished. In between, the same index is returned
/// every tick.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    current: Option<usize>,
    run_length: Tick,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Consecutive ticks the current selection has been handed out.
    pub fn run_length(&self) -> Tick {
        self.run_length
    }

    /// Returns the index to run at `now`.
    ///
    /// `prefer(candidate, best)` returns true when `candidate` must replace
    /// `best`. It should be strict so that the lowest index wins ties. With
    /// `every_tick` set the gate is ignored and a scan happens on each call.
    pub fn select<F>(
        &mut self,
        now: Tick,
        processes: &[Process],
        every_tick: bool,
        prefer: F,
    ) -> Option<usize>
    where
        F: Fn(&Process, &Process) -> bool,
    {
        if processes.iter().all(Process::is_done) {
            return None;
        }

        if let Some(index) = self.current {
            if processes.get(index).map_or(true, Process::is_done) {
                self.current = None;
                self.run_length = 0;
            }
        }

        if self.run_length == 0 || every_tick {
            match scan(now, processes, &prefer) {
                Some(index) => {
                    if self.current != Some(index) {
                        log::trace!("tick {now}: selected process {index}");
                        self.run_length = 0;
                    }
                    self.current = Some(index);
                }
                None => {
                    self.current = None;
                    self.run_length = 0;
                    return None;
                }
            }
        }

        self.run_length += 1;
        self.current
    }
}

fn scan<F>(now: Tick, processes: &[Process], prefer: &F) -> Option<usize>
where
    F: Fn(&Process, &Process) -> bool,
{
    processes
        .iter()
        .enumerate()
        .filter(|(_, process)| process.is_eligible(now))
        .fold(None::<(usize, &Process)>, |best, (index, process)| match best {
            Some((_, incumbent)) if !prefer(process, incumbent) => best,
            _ => Some((index, process)),
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shorter(candidate: &Process, best: &Process) -> bool {
        candidate.service_time() < best.service_time()
    }

    #[test]
    fn idle_until_something_arrives() {
        let processes = vec![Process::new(0, 2, 3)];
        let mut selection = Selection::new();

        assert_eq!(selection.select(0, &processes, false, shorter), None);
        assert_eq!(selection.select(1, &processes, false, shorter), None);
        assert_eq!(selection.run_length(), 0);
        assert_eq!(selection.select(2, &processes, false, shorter), Some(0));
        assert_eq!(selection.run_length(), 1);
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let processes = vec![Process::new(0, 0, 2), Process::new(1, 0, 2)];
        let mut selection = Selection::new();
        assert_eq!(selection.select(0, &processes, false, shorter), Some(0));
    }

    #[test]
    fn gate_holds_until_completion() {
        let mut processes = vec![Process::new(0, 0, 2), Process::new(1, 1, 1)];
        let mut selection = Selection::new();

        assert_eq!(selection.select(0, &processes, false, shorter), Some(0));
        processes[0].serve(1);
        assert_eq!(selection.select(1, &processes, false, shorter), Some(0));
        processes[0].serve(1);
        assert_eq!(selection.select(2, &processes, false, shorter), Some(1));
        assert_eq!(selection.run_length(), 1);
    }

    #[test]
    fn reset_forgets_the_selection() {
        let processes = vec![Process::new(0, 0, 2)];
        let mut selection = Selection::new();
        selection.select(0, &processes, false, shorter);
        selection.reset();
        assert_eq!(selection.current(), None);
        assert_eq!(selection.run_length(), 0);
    }
}
