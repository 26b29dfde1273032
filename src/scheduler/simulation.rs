use super::{Process, Scheduler, Tick};
use std::{error::Error, fmt};

/// Source of the simulated time handed to the policy.
pub trait Clock {
    fn now(&self) -> Tick;
    fn advance(&mut self);
}

/// Applies the service earned by one scheduling decision.
///
/// Returns true when the process completed because of it.
pub trait ServiceApplier {
    fn apply(&mut self, process: &mut Process) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TickClock {
    now: Tick,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: Tick) -> Self {
        Self { now }
    }
}

impl Clock for TickClock {
    fn now(&self) -> Tick {
        self.now
    }

    fn advance(&mut self) {
        self.now += 1;
    }
}

/// One tick of service per decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnitService;

impl ServiceApplier for UnitService {
    fn apply(&mut self, process: &mut Process) -> bool {
        process.serve(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub tick: Tick,
    pub decision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    TickLimit { limit: Tick },
    InvalidDecision { tick: Tick, index: usize, len: usize },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::TickLimit { limit } => {
                write!(f, "processes still running after {limit} ticks")
            }
            SimulationError::InvalidDecision { tick, index, len } => write!(
                f,
                "tick {tick}: scheduler picked process {index} out of {len}"
            ),
        }
    }
}

impl Error for SimulationError {}

/// Drives a policy over a process list, one decision per tick.
pub struct Simulation<S, C = TickClock, A = UnitService> {
    scheduler: S,
    processes: Vec<Process>,
    clock: C,
    service: A,
    trace: Vec<Option<usize>>,
    finish_times: Vec<Option<Tick>>,
}

impl<S: Scheduler> Simulation<S> {
    pub fn new(scheduler: S, processes: Vec<Process>) -> Self {
        Simulation::with_parts(scheduler, processes, TickClock::new(), UnitService)
    }
}

impl<S, C, A> Simulation<S, C, A>
where
    S: Scheduler,
    C: Clock,
    A: ServiceApplier,
{
    pub fn with_parts(scheduler: S, processes: Vec<Process>, clock: C, service: A) -> Self {
        let finish_times = vec![None; processes.len()];
        Self {
            scheduler,
            processes,
            clock,
            service,
            trace: Vec::new(),
            finish_times,
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Decision taken at every tick so far, in order.
    pub fn trace(&self) -> &[Option<usize>] {
        &self.trace
    }

    /// Tick at the end of which each process completed.
    pub fn finish_times(&self) -> &[Option<Tick>] {
        &self.finish_times
    }

    pub fn is_complete(&self) -> bool {
        self.processes.iter().all(Process::is_done)
    }

    pub fn step(&mut self) -> Result<Step, SimulationError> {
        let tick = self.clock.now();
        let decision = self.scheduler.schedule(tick, &self.processes);

        if let Some(index) = decision {
            let len = self.processes.len();
            let process = self
                .processes
                .get_mut(index)
                .ok_or(SimulationError::InvalidDecision { tick, index, len })?;

            if self.service.apply(process) {
                log::debug!("tick {tick}: process {index} ({}) finished", process.name());
                self.finish_times[index] = Some(tick + 1);
            }
        }

        self.trace.push(decision);
        self.clock.advance();
        Ok(Step { tick, decision })
    }

    /// Steps until every process is done.
    pub fn run(&mut self, max_ticks: Tick) -> Result<(), SimulationError> {
        log::info!(
            "{}: running {} processes",
            S::NAME,
            self.processes.len()
        );

        let mut steps = 0;
        while !self.is_complete() {
            if steps == max_ticks {
                return Err(SimulationError::TickLimit { limit: max_ticks });
            }
            self.step()?;
            steps += 1;
        }

        log::info!("{}: all processes done at tick {}", S::NAME, self.now());
        Ok(())
    }
}
