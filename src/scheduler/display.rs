use super::{runner::RunnerEvent, Clock, Scheduler, ServiceApplier, Simulation};
use crate::report;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new(tick_rate: Duration) -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).expect("Failed to poll events.") {
                    if let Event::Key(key) = event::read().expect("Failed to read events.") {
                        if input_tx.send(DisplayEvent::Input(key)).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw<S, C, A>(
        &mut self,
        simulation: &Simulation<S, C, A>,
        paused: bool,
    ) -> Result<(), io::Error>
    where
        S: Scheduler,
        C: Clock,
        A: ServiceApplier,
    {
        let processes = simulation.processes();
        let current_process = simulation
            .scheduler()
            .current_process()
            .and_then(|index| processes.get(index))
            .filter(|process| !process.is_done());

        let status = if simulation.is_complete() {
            format!("Tick {} | All processes are done.", simulation.now())
        } else {
            match current_process {
                Some(process) => format!(
                    "Tick {} | {} | {}{}",
                    simulation.now(),
                    process.id(),
                    process.name(),
                    if paused { " | Paused" } else { "" }
                ),
                None => format!("Tick {} | The processor is idle.", simulation.now()),
            }
        };
        let gantt = report::gantt(processes, simulation.trace());

        // Draw the tui to the terminal
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(chart_height(processes.len())),
                ])
                .split(f.size());

            let process = Paragraph::new(status)
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(Color::LightBlue),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Current Process")
                        .border_type(BorderType::Rounded),
                );

            f.render_widget(process, chunks[0]);

            let items = processes.iter().map(|process| {
                let state = if process.is_done() {
                    "Done"
                } else if Some(process.id()) == current_process.map(|current| current.id()) {
                    "Running"
                } else if process.has_arrived(simulation.now()) {
                    "Waiting"
                } else {
                    "Unarrived"
                };

                Row::new(vec![
                    Cell::from(process.id().to_string())
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from("|"),
                    Cell::from(process.name().to_owned()),
                    Cell::from("|"),
                    Cell::from(process.arrival_time().to_string()),
                    Cell::from("|"),
                    Cell::from(process.service_time().to_string()),
                    Cell::from("|"),
                    Cell::from(process.progress_percentage()),
                    Cell::from("|"),
                    Cell::from(state),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "ID", "|", "Name", "|", "Arrival", "|", "Service", "|", "Done", "|",
                        "State",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Length(20),
                    Constraint::Length(1),
                    Constraint::Length(7),
                    Constraint::Length(1),
                    Constraint::Length(7),
                    Constraint::Length(1),
                    Constraint::Length(4),
                    Constraint::Length(1),
                    Constraint::Length(9),
                ])
                .block(Block::default().title(S::NAME).borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);

            let chart = Paragraph::new(gantt)
                .block(Block::default().title("Timeline").borders(Borders::ALL));

            f.render_widget(chart, chunks[2]);
        })?;

        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // A closed channel means the input thread is gone
        let Ok(event) = self.input_rx.recv() else {
            return RunnerEvent::Quit;
        };

        // Get the user's input and return a matching event
        match event {
            DisplayEvent::Input(key) => {
                if key.modifiers.is_empty() {
                    match key.code {
                        KeyCode::Char('q') => return RunnerEvent::Quit,
                        KeyCode::Char('p') => return RunnerEvent::Pause,
                        KeyCode::Char('r') => return RunnerEvent::Resume,
                        KeyCode::Char('s') => return RunnerEvent::Step,
                        _ => {}
                    };
                }
            }
            DisplayEvent::Tick => return RunnerEvent::Tick,
        }
        RunnerEvent::None
    }
}

// Timeline rows plus the two borders
fn chart_height(processes: usize) -> u16 {
    u16::try_from(processes)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}
