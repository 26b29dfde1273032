use super::Tick;

/// A synthetic process, as seen by the scheduling policies.
///
/// Policies only read these fields. The driver owns the process list and is
/// the only one to call [`Process::serve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    id: usize,
    name: String,
    arrival_time: Tick,
    service_time: Tick,
    service_elapsed: Tick,
    done: bool,
}

impl Process {
    pub fn new(id: usize, arrival_time: Tick, service_time: Tick) -> Self {
        Process::named(id, &format!("P{id}"), arrival_time, service_time)
    }

    pub fn named(id: usize, name: &str, arrival_time: Tick, service_time: Tick) -> Self {
        Self {
            id,
            name: name.to_owned(),
            arrival_time,
            service_time,
            service_elapsed: 0,
            // Nothing to run, so it never takes part in a selection.
            done: service_time == 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_time(&self) -> Tick {
        self.arrival_time
    }

    pub fn service_time(&self) -> Tick {
        self.service_time
    }

    pub fn service_elapsed(&self) -> Tick {
        self.service_elapsed
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn remaining_time(&self) -> Tick {
        self.service_time - self.service_elapsed
    }

    pub fn has_arrived(&self, now: Tick) -> bool {
        self.arrival_time <= now
    }

    /// Arrived and still needs the processor.
    pub fn is_eligible(&self, now: Tick) -> bool {
        self.has_arrived(now) && !self.done
    }

    /// `(waiting + service) / service`, where waiting is the time since arrival
    /// not spent on the processor.
    pub fn response_ratio(&self, now: Tick) -> f64 {
        let waiting = now
            .saturating_sub(self.arrival_time)
            .saturating_sub(self.service_elapsed) as f64;
        let service = self.service_time as f64;
        (waiting + service) / service
    }

    /// Adds `amount` ticks of service, clamped to the demand. Returns true if
    /// this call completed the process.
    pub fn serve(&mut self, amount: Tick) -> bool {
        if self.done {
            return false;
        }
        self.service_elapsed = (self.service_elapsed + amount).min(self.service_time);
        self.done = self.service_elapsed == self.service_time;
        self.done
    }

    pub fn progress_percentage(&self) -> String {
        if self.service_time == 0 {
            return "100%".to_owned();
        }
        format!(
            "{}%",
            (self.service_elapsed as f64 / self.service_time as f64 * 100.0).round()
        )
    }
}
