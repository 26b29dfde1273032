use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use log::LevelFilter;
use std::{env, error::Error, io};
use tick_scheduler::{
    config::{Config, ConfigError, SchedSpec},
    logger, report,
    scheduler::{
        HighestResponseRatio, Process, ProcessRunner, RoundRobinScheduler, Scheduler,
        ShortestProcessNext, ShortestRemainingTime, Simulation,
    },
    workload,
};

fn main() -> Result<(), Box<dyn Error>> {
    let config = match Config::from_args(env::args_os()) {
        Ok(config) => config,
        Err(ConfigError::Cli(err)) => err.exit(),
        Err(err) => return Err(err.into()),
    };

    // Log lines would tear through the terminal view
    let level = if config.tui {
        LevelFilter::Error
    } else {
        logger::level_for(config.verbosity)
    };
    logger::init(level)?;

    let processes = workload::load(&config.workload)?;
    log::info!(
        "loaded {} processes from {}, scheduling with {}",
        processes.len(),
        config.workload.display(),
        config.schedspec
    );

    match config.schedspec {
        SchedSpec::RoundRobin(quantum) => {
            simulate(&config, RoundRobinScheduler::new(quantum), processes)
        }
        SchedSpec::ShortestProcessNext => {
            simulate(&config, ShortestProcessNext::new(), processes)
        }
        SchedSpec::ShortestRemainingTime { preemptive: false } => {
            simulate(&config, ShortestRemainingTime::new(), processes)
        }
        SchedSpec::ShortestRemainingTime { preemptive: true } => {
            simulate(&config, ShortestRemainingTime::preemptive(), processes)
        }
        SchedSpec::HighestResponseRatio => {
            simulate(&config, HighestResponseRatio::new(), processes)
        }
    }
}

fn simulate<S: Scheduler>(
    config: &Config,
    scheduler: S,
    processes: Vec<Process>,
) -> Result<(), Box<dyn Error>> {
    let mut simulation = Simulation::new(scheduler, processes);

    if config.tui {
        execute!(io::stdout(), Clear(ClearType::All))?;

        let mut runner = ProcessRunner::with_tick_rate(simulation, config.tick_rate)?;
        while runner.run()? {}
        simulation = runner.into_simulation();

        execute!(io::stdout(), Clear(ClearType::All))?;
    } else {
        simulation.run(config.max_ticks)?;
    }

    println!("{}", S::NAME);
    println!();
    println!("{}", report::gantt(simulation.processes(), simulation.trace()));
    println!();
    println!(
        "{}",
        report::summarize(simulation.processes(), simulation.finish_times())
    );
    Ok(())
}
