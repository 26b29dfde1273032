use crate::scheduler::Tick;
use clap::{App, Arg};
use regex::Regex;
use std::{
    error::Error, ffi::OsString, fmt, num::NonZeroU32, path::PathBuf, str::FromStr,
    time::Duration,
};

const SCHEDSPEC_PATTERN: &str = r"^(?:R(\d+)|N|S|SP|H)$";

/// Which policy to run, as given on the command line.
///
/// `R<quantum>`, `N` (shortest process next), `S` (shortest remaining time),
/// `SP` (preemptive shortest remaining time) or `H` (highest response ratio).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedSpec {
    RoundRobin(NonZeroU32),
    ShortestProcessNext,
    ShortestRemainingTime { preemptive: bool },
    HighestResponseRatio,
}

fn schedspec_regex() -> Result<Regex, ConfigError> {
    Regex::new(SCHEDSPEC_PATTERN).map_err(ConfigError::Pattern)
}

impl FromStr for SchedSpec {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SchedSpec::parse_with(&schedspec_regex()?, value)
    }
}

impl SchedSpec {
    /// Parses `value` against an already compiled [`SCHEDSPEC_PATTERN`].
    fn parse_with(re: &Regex, value: &str) -> Result<Self, ConfigError> {
        let captures = re
            .captures(value)
            .ok_or_else(|| ConfigError::InvalidSchedSpec(value.to_owned()))?;

        if let Some(quantum) = captures.get(1) {
            let quantum = quantum
                .as_str()
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::InvalidQuantum(quantum.as_str().to_owned()))?;
            return Ok(SchedSpec::RoundRobin(quantum));
        }

        Ok(match value {
            "N" => SchedSpec::ShortestProcessNext,
            "S" => SchedSpec::ShortestRemainingTime { preemptive: false },
            "SP" => SchedSpec::ShortestRemainingTime { preemptive: true },
            _ => SchedSpec::HighestResponseRatio,
        })
    }
}

impl fmt::Display for SchedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedSpec::RoundRobin(quantum) => write!(f, "R{quantum}"),
            SchedSpec::ShortestProcessNext => write!(f, "N"),
            SchedSpec::ShortestRemainingTime { preemptive: false } => write!(f, "S"),
            SchedSpec::ShortestRemainingTime { preemptive: true } => write!(f, "SP"),
            SchedSpec::HighestResponseRatio => write!(f, "H"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Cli(clap::Error),
    Pattern(regex::Error),
    InvalidSchedSpec(String),
    InvalidQuantum(String),
    InvalidNumber { option: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Cli(err) => write!(f, "{err}"),
            ConfigError::Pattern(err) => write!(f, "bad scheduler pattern: {err}"),
            ConfigError::InvalidSchedSpec(value) => write!(
                f,
                "invalid scheduler specification: {value}. Must be one of R<num>, N, S, SP or H"
            ),
            ConfigError::InvalidQuantum(value) => {
                write!(f, "invalid quantum: {value}. Must be at least 1")
            }
            ConfigError::InvalidNumber { option, value } => {
                write!(f, "invalid value for --{option}: {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Cli(err) => Some(err),
            ConfigError::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub workload: PathBuf,
    pub schedspec: SchedSpec,
    pub tui: bool,
    pub tick_rate: Duration,
    pub max_ticks: Tick,
    pub verbosity: u64,
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let re = schedspec_regex()?;
        let validator_re = re.clone();

        let matches = App::new("Discrete-time CPU scheduling simulator")
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::with_name("workload")
                    .long("workload")
                    .takes_value(true)
                    .required(true)
                    .help("Workload file, one `[name] <arrival> <service>` per line"),
            )
            .arg(
                Arg::with_name("schedspec")
                    .short("s")
                    .long("schedspec")
                    .takes_value(true)
                    .default_value("R1")
                    .validator(move |value| valid_schedspec(&validator_re, value))
                    .help("Scheduler specification (R<num>, N, S, SP or H)"),
            )
            .arg(
                Arg::with_name("tui")
                    .long("tui")
                    .help("Play the simulation in an interactive terminal view"),
            )
            .arg(
                Arg::with_name("tick-rate")
                    .long("tick-rate")
                    .takes_value(true)
                    .default_value("200")
                    .help("Milliseconds per simulated tick in the terminal view"),
            )
            .arg(
                Arg::with_name("max-ticks")
                    .long("max-ticks")
                    .takes_value(true)
                    .default_value("100000")
                    .help("Give up when processes are still running after this many ticks"),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .multiple(true)
                    .help("Log more, repeat for more detail"),
            )
            .get_matches_from_safe(args)
            .map_err(ConfigError::Cli)?;

        Ok(Config {
            workload: PathBuf::from(matches.value_of("workload").unwrap_or_default()),
            schedspec: SchedSpec::parse_with(&re, matches.value_of("schedspec").unwrap_or("R1"))?,
            tui: matches.is_present("tui"),
            tick_rate: Duration::from_millis(number(matches.value_of("tick-rate"), "tick-rate")?),
            max_ticks: number(matches.value_of("max-ticks"), "max-ticks")?,
            verbosity: matches.occurrences_of("verbose"),
        })
    }
}

fn valid_schedspec(re: &Regex, value: String) -> Result<(), String> {
    if re.is_match(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSchedSpec(value).to_string())
    }
}

fn number<T: FromStr>(value: Option<&str>, option: &'static str) -> Result<T, ConfigError> {
    let value = value.unwrap_or_default();
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        option,
        value: value.to_owned(),
    })
}
