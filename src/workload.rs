//! Workload files: one process per line, `[name] <arrival> <service>`.
//!
//! Blank lines and lines starting with `#` are ignored. Processes are
//! numbered in file order.

use crate::scheduler::{Process, Tick};
use std::{error::Error, fmt, fs, io, num::ParseIntError, path::Path};

#[derive(Debug)]
pub enum WorkloadError {
    Io(io::Error),
    FieldCount { line: usize, found: usize },
    InvalidNumber { line: usize, source: ParseIntError },
    ZeroServiceDemand { line: usize },
    Empty,
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::Io(err) => write!(f, "failed to read workload: {err}"),
            WorkloadError::FieldCount { line, found } => write!(
                f,
                "line {line}: expected `[name] <arrival> <service>`, found {found} fields"
            ),
            WorkloadError::InvalidNumber { line, source } => {
                write!(f, "line {line}: {source}")
            }
            WorkloadError::ZeroServiceDemand { line } => {
                write!(f, "line {line}: service demand must be at least one tick")
            }
            WorkloadError::Empty => write!(f, "workload has no processes"),
        }
    }
}

impl Error for WorkloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorkloadError::Io(err) => Some(err),
            WorkloadError::InvalidNumber { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for WorkloadError {
    fn from(err: io::Error) -> Self {
        WorkloadError::Io(err)
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Process>, WorkloadError> {
    let contents = fs::read_to_string(path)?;
    parse(&contents)
}

pub fn parse(contents: &str) -> Result<Vec<Process>, WorkloadError> {
    let mut processes = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let (name, arrival, service) = match fields.as_slice() {
            [arrival, service] => (None, *arrival, *service),
            [name, arrival, service] => (Some(*name), *arrival, *service),
            _ => {
                return Err(WorkloadError::FieldCount {
                    line: line_number,
                    found: fields.len(),
                })
            }
        };

        let arrival_time = parse_tick(arrival, line_number)?;
        let service_time = parse_tick(service, line_number)?;
        if service_time == 0 {
            return Err(WorkloadError::ZeroServiceDemand { line: line_number });
        }

        let id = processes.len();
        processes.push(match name {
            Some(name) => Process::named(id, name, arrival_time, service_time),
            None => Process::new(id, arrival_time, service_time),
        });
    }

    if processes.is_empty() {
        return Err(WorkloadError::Empty);
    }
    log::debug!("loaded {} processes", processes.len());
    Ok(processes)
}

fn parse_tick(field: &str, line: usize) -> Result<Tick, WorkloadError> {
    field
        .parse()
        .map_err(|source| WorkloadError::InvalidNumber { line, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_anonymous_lines() {
        let processes = parse("# arrival service\nA 0 3\n\n2 6\n").unwrap();

        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].name(), "A");
        assert_eq!(processes[0].service_time(), 3);
        assert_eq!(processes[1].name(), "P1");
        assert_eq!(processes[1].arrival_time(), 2);
        assert_eq!(processes[1].id(), 1);
    }

    #[test]
    fn rejects_zero_demand() {
        assert!(matches!(
            parse("A 0 3\nB 1 0\n"),
            Err(WorkloadError::ZeroServiceDemand { line: 2 })
        ));
    }

    #[test]
    fn rejects_negative_arrival() {
        assert!(matches!(
            parse("A -1 3\n"),
            Err(WorkloadError::InvalidNumber { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(
            parse("A 0 3 4\n"),
            Err(WorkloadError::FieldCount { line: 1, found: 4 })
        ));
    }

    #[test]
    fn rejects_empty_workload() {
        assert!(matches!(parse("# nothing\n"), Err(WorkloadError::Empty)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load("/nonexistent/workload.txt"),
            Err(WorkloadError::Io(_))
        ));
    }
}
