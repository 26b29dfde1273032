mod display;
mod process;
mod response_ratio;
mod round_robin;
mod runner;
mod selection;
mod shortest_process;
mod shortest_remaining;
mod simulation;

use std::time::Duration;

pub use process::Process;
pub use response_ratio::HighestResponseRatio;
pub use round_robin::RoundRobinScheduler;
pub use runner::ProcessRunner;
pub use selection::Selection;
pub use shortest_process::ShortestProcessNext;
pub use shortest_remaining::ShortestRemainingTime;
pub use simulation::{
    Clock, ServiceApplier, Simulation, SimulationError, Step, TickClock, UnitService,
};

/// One discrete unit of simulated time.
pub type Tick = u32;

const DEFAULT_TICK_RATE: Duration = Duration::from_millis(200);

/// A single-processor scheduling policy.
///
/// The driver calls [`Scheduler::schedule`] exactly once per tick, with
/// strictly increasing ticks, and applies one tick of service to the returned
/// process before the next call. `None` means the processor stays idle.
pub trait Scheduler {
    const NAME: &'static str;

    fn schedule(&mut self, now: Tick, processes: &[Process]) -> Option<usize>;

    /// Back to the freshly created state, ready for another workload.
    fn reset(&mut self);

    /// The index handed out by the last call, if the policy is still holding it.
    fn current_process(&self) -> Option<usize>;
}
