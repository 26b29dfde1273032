//! Textual output of a finished (or running) simulation: a per-tick timeline
//! and turnaround statistics.

use crate::scheduler::{Process, Tick};
use std::fmt;

const RUNNING: char = '#';
const WAITING: char = '.';
const ABSENT: char = ' ';

/// One row per process, one column per recorded tick.
///
/// `#` marks the ticks a process held the processor, `.` the ticks it had
/// arrived and was still waiting for it.
pub fn gantt(processes: &[Process], trace: &[Option<usize>]) -> String {
    let name_width = processes
        .iter()
        .map(|process| process.name().len())
        .max()
        .unwrap_or(0);

    let mut rows = Vec::with_capacity(processes.len());
    for (index, process) in processes.iter().enumerate() {
        let mut served = 0;
        let timeline: String = trace
            .iter()
            .enumerate()
            .map(|(tick, decision)| {
                if *decision == Some(index) {
                    served += 1;
                    RUNNING
                } else if process.has_arrived(tick as Tick) && served < process.service_time() {
                    WAITING
                } else {
                    ABSENT
                }
            })
            .collect();
        rows.push(format!(
            "{:<width$} |{}",
            process.name(),
            timeline.trim_end(),
            width = name_width
        ));
    }
    rows.join("\n")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStats {
    pub id: usize,
    pub name: String,
    pub arrival_time: Tick,
    pub service_time: Tick,
    pub finish_time: Option<Tick>,
    pub turnaround: Option<Tick>,
    pub normalized_turnaround: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub processes: Vec<ProcessStats>,
    pub mean_turnaround: Option<f64>,
    pub mean_normalized_turnaround: Option<f64>,
}

pub fn summarize(processes: &[Process], finish_times: &[Option<Tick>]) -> Summary {
    let stats: Vec<ProcessStats> = processes
        .iter()
        .zip(finish_times)
        .map(|(process, &finish_time)| {
            let turnaround = finish_time.map(|finish| finish - process.arrival_time());
            ProcessStats {
                id: process.id(),
                name: process.name().to_owned(),
                arrival_time: process.arrival_time(),
                service_time: process.service_time(),
                finish_time,
                turnaround,
                normalized_turnaround: turnaround
                    .filter(|_| process.service_time() > 0)
                    .map(|turnaround| turnaround as f64 / process.service_time() as f64),
            }
        })
        .collect();

    let mean_turnaround = mean(stats.iter().filter_map(|s| s.turnaround.map(f64::from)));
    let mean_normalized_turnaround = mean(stats.iter().filter_map(|s| s.normalized_turnaround));

    Summary {
        processes: stats,
        mean_turnaround,
        mean_normalized_turnaround,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12} {:>8} {:>8} {:>8} {:>10} {:>8}",
            "Process", "Arrival", "Service", "Finish", "Turnaround", "Tr/Ts"
        )?;
        for stats in &self.processes {
            writeln!(
                f,
                "{:<12} {:>8} {:>8} {:>8} {:>10} {:>8}",
                stats.name,
                stats.arrival_time,
                stats.service_time,
                or_dash(stats.finish_time),
                or_dash(stats.turnaround),
                or_dash(stats.normalized_turnaround.map(|value| format!("{value:.2}"))),
            )?;
        }
        write!(
            f,
            "{:<12} {:>8} {:>8} {:>8} {:>10} {:>8}",
            "Mean",
            "",
            "",
            "",
            or_dash(self.mean_turnaround.map(|value| format!("{value:.2}"))),
            or_dash(self.mean_normalized_turnaround.map(|value| format!("{value:.2}"))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gantt_marks_running_and_waiting_ticks() {
        let processes = vec![Process::new(0, 0, 4), Process::new(1, 1, 2)];
        let trace = [Some(0), Some(0), Some(1), Some(1), Some(0), Some(0)];

        assert_eq!(gantt(&processes, &trace), "P0 |##..##\nP1 | .##");
    }

    #[test]
    fn gantt_leaves_idle_ticks_blank() {
        let processes = vec![Process::named(0, "job", 2, 1)];
        let trace = [None, None, Some(0)];

        assert_eq!(gantt(&processes, &trace), "job |  #");
    }

    #[test]
    fn summary_turnaround() {
        let processes = vec![Process::new(0, 0, 4), Process::new(1, 0, 2)];
        let summary = summarize(&processes, &[Some(6), Some(2)]);

        assert_eq!(summary.processes[0].turnaround, Some(6));
        assert_eq!(summary.processes[0].normalized_turnaround, Some(1.5));
        assert_eq!(summary.processes[1].normalized_turnaround, Some(1.0));
        assert_eq!(summary.mean_turnaround, Some(4.0));
        assert_eq!(summary.mean_normalized_turnaround, Some(1.25));
    }

    #[test]
    fn unfinished_processes_show_a_dash() {
        let processes = vec![Process::new(0, 0, 4)];
        let summary = summarize(&processes, &[None]);

        assert_eq!(summary.mean_turnaround, None);
        assert!(summary.to_string().lines().nth(1).unwrap().contains('-'));
    }
}
