use super::{Process, Scheduler, Tick};
use std::{collections::VecDeque, num::NonZeroU32};

pub struct RoundRobinScheduler {
    quantum: NonZeroU32,
    ready: VecDeque<usize>,
    time_to_next_schedule: Tick,
    // Whether the front of the queue has held the processor since it got there
    dispatched: bool,
    strict_fifo: bool,
}

impl RoundRobinScheduler {
    /// Whenever the countdown hits zero the front entry goes to the back,
    /// including right after an idle tick. Processes admitted together after
    /// the processor idled therefore start with the second one.
    pub fn new(quantum: NonZeroU32) -> Self {
        Self {
            quantum,
            ready: VecDeque::new(),
            time_to_next_schedule: quantum.get(),
            dispatched: false,
            strict_fifo: false,
        }
    }

    /// Only rotates an entry that actually held the processor, so processes
    /// always get their first turn in admission order.
    pub fn strict_fifo(quantum: NonZeroU32) -> Self {
        Self {
            strict_fifo: true,
            ..RoundRobinScheduler::new(quantum)
        }
    }

    pub fn is_strict_fifo(&self) -> bool {
        self.strict_fifo
    }

    pub fn quantum(&self) -> NonZeroU32 {
        self.quantum
    }

    pub fn ready_queue(&self) -> impl Iterator<Item = usize> + '_ {
        self.ready.iter().copied()
    }

    fn admit(&mut self, now: Tick, processes: &[Process]) {
        for (index, process) in processes.iter().enumerate() {
            if process.arrival_time() == now {
                log::trace!("tick {now}: admitted process {index}");
                self.ready.push_back(index);
            }
        }
    }

    fn retire_front(&mut self, now: Tick, processes: &[Process]) {
        while let Some(&front) = self.ready.front() {
            if !processes.get(front).map_or(true, Process::is_done) {
                break;
            }
            self.ready.pop_front();
            self.dispatched = false;
            self.time_to_next_schedule = self.quantum.get();
        }

        let Some(&front) = self.ready.front() else {
            return;
        };

        if self.time_to_next_schedule == 0 {
            if self.dispatched || !self.strict_fifo {
                log::trace!("tick {now}: requeued process {front}");
                self.ready.rotate_left(1);
                self.dispatched = false;
            }
            self.time_to_next_schedule = self.quantum.get();
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin Scheduler";

    fn schedule(&mut self, now: Tick, processes: &[Process]) -> Option<usize> {
        self.admit(now, processes);
        self.retire_front(now, processes);

        match self.ready.front() {
            Some(&front) => {
                self.time_to_next_schedule -= 1;
                self.dispatched = true;
                Some(front)
            }
            None => {
                // Re-evaluate as soon as something shows up
                self.time_to_next_schedule = 0;
                self.dispatched = false;
                None
            }
        }
    }

    fn reset(&mut self) {
        *self = Self {
            strict_fifo: self.strict_fifo,
            ..RoundRobinScheduler::new(self.quantum)
        };
    }

    fn current_process(&self) -> Option<usize> {
        if self.dispatched {
            self.ready.front().copied()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantum(ticks: u32) -> NonZeroU32 {
        NonZeroU32::new(ticks).unwrap()
    }

    fn drive(
        scheduler: &mut RoundRobinScheduler,
        processes: &mut [Process],
        ticks: Tick,
    ) -> Vec<Option<usize>> {
        (0..ticks)
            .map(|now| {
                let decision = scheduler.schedule(now, processes);
                if let Some(index) = decision {
                    processes[index].serve(1);
                }
                decision
            })
            .collect()
    }

    #[test]
    fn rotates_after_each_quantum() {
        let mut processes = vec![Process::new(0, 0, 4), Process::new(1, 0, 2)];
        let mut scheduler = RoundRobinScheduler::new(quantum(2));

        let trace = drive(&mut scheduler, &mut processes, 7);

        assert_eq!(
            trace,
            vec![Some(0), Some(0), Some(1), Some(1), Some(0), Some(0), None]
        );
    }

    #[test]
    fn idle_before_first_arrival() {
        let mut processes = vec![Process::new(0, 2, 1)];
        let mut scheduler = RoundRobinScheduler::new(quantum(3));

        let trace = drive(&mut scheduler, &mut processes, 4);

        assert_eq!(trace, vec![None, None, Some(0), None]);
        assert_eq!(scheduler.current_process(), None);
    }

    #[test]
    fn simultaneous_arrivals_after_idle_rotate_once() {
        let processes = vec![Process::new(0, 1, 2), Process::new(1, 1, 2)];
        let mut scheduler = RoundRobinScheduler::new(quantum(2));

        assert_eq!(scheduler.schedule(0, &processes), None);
        assert_eq!(scheduler.schedule(1, &processes), Some(1));
        assert_eq!(scheduler.ready_queue().collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn simultaneous_arrivals_after_idle_run_in_order_with_strict_fifo() {
        let mut processes = vec![Process::new(0, 1, 1), Process::new(1, 1, 1)];
        let mut scheduler = RoundRobinScheduler::strict_fifo(quantum(1));

        let trace = drive(&mut scheduler, &mut processes, 4);

        assert_eq!(trace, vec![None, Some(0), Some(1), None]);
    }

    #[test]
    fn finished_process_leaves_before_its_quantum() {
        let mut processes = vec![Process::new(0, 0, 1), Process::new(1, 0, 3)];
        let mut scheduler = RoundRobinScheduler::new(quantum(4));

        let trace = drive(&mut scheduler, &mut processes, 5);

        assert_eq!(trace, vec![Some(0), Some(1), Some(1), Some(1), None]);
    }

    #[test]
    fn late_arrival_joins_the_back() {
        let mut processes = vec![Process::new(0, 0, 3), Process::new(1, 1, 1)];
        let mut scheduler = RoundRobinScheduler::new(quantum(2));

        drive(&mut scheduler, &mut processes, 2);

        assert_eq!(scheduler.ready_queue().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn reset_clears_the_ready_queue() {
        let mut processes = vec![Process::new(0, 0, 3)];
        let mut scheduler = RoundRobinScheduler::new(quantum(2));
        drive(&mut scheduler, &mut processes, 1);

        scheduler.reset();

        assert_eq!(scheduler.ready_queue().count(), 0);
        assert_eq!(scheduler.current_process(), None);
        assert_eq!(scheduler.quantum().get(), 2);
    }

    #[test]
    fn reset_keeps_the_fifo_mode() {
        let mut scheduler = RoundRobinScheduler::strict_fifo(quantum(2));
        scheduler.reset();
        assert!(scheduler.is_strict_fifo());
        assert!(!RoundRobinScheduler::new(quantum(2)).is_strict_fifo());
    }
}
