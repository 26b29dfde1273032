use super::{
    display::DisplayTerminal, Clock, Scheduler, ServiceApplier, Simulation, SimulationError,
    TickClock, UnitService, DEFAULT_TICK_RATE,
};
use std::{io, time::Duration};

pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    Tick,
    None,
}

/// Plays a simulation in the terminal, one tick per display tick.
pub struct ProcessRunner<S, C = TickClock, A = UnitService> {
    terminal: DisplayTerminal,
    simulation: Simulation<S, C, A>,
    paused: bool,
}

impl<S, C, A> ProcessRunner<S, C, A>
where
    S: Scheduler,
    C: Clock,
    A: ServiceApplier,
{
    pub fn new(simulation: Simulation<S, C, A>) -> Result<Self, io::Error> {
        ProcessRunner::with_tick_rate(simulation, DEFAULT_TICK_RATE)
    }

    pub fn with_tick_rate(
        simulation: Simulation<S, C, A>,
        tick_rate: Duration,
    ) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new(tick_rate)?;

        Ok(Self {
            terminal,
            simulation,
            paused: false,
        })
    }

    pub fn into_simulation(self) -> Simulation<S, C, A> {
        self.simulation
    }

    fn step_simulation(&mut self) -> Result<(), SimulationError> {
        if !self.simulation.is_complete() {
            self.simulation.step()?;
        }
        Ok(())
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        self.terminal.draw(&self.simulation, self.paused)?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => self.step_simulation()?,
            RunnerEvent::Tick if !self.paused => self.step_simulation()?,
            _ => {}
        }
        Ok(true)
    }
}
