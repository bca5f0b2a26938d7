use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::metrics;
use crate::timer::{Clock, IntervalTimer, SystemClock};

/// Length of a session in seconds
pub const SESSION_SECS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum FinishCause {
    Timeout,
    Submitted,
}

/// What an operation did to the session, so the caller knows whether to redraw
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    Unchanged,
    Updated,
    Started,
    Finished(FinishCause),
    Reset,
}

impl StateChange {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, StateChange::Unchanged)
    }
}

/// One typing test: the sentence, what has been typed, the countdown and the
/// scores derived from them. Owns the only tick timer.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    corpus: Corpus,
    rng: StdRng,
    clock: C,
    timer: IntervalTimer,
    reference: String,
    input: String,
    seconds_remaining: u32,
    phase: Phase,
    wpm: f64,
    accuracy: f64,
}

impl Session<SystemClock> {
    /// Session over the built-in sentences. A seed makes the draws repeatable.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_parts(Corpus::default(), rng, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_parts(corpus: Corpus, mut rng: StdRng, clock: C) -> Self {
        let reference = corpus.draw(&mut rng);
        debug!(reference = %reference, "session created");
        Self {
            corpus,
            rng,
            clock,
            timer: IntervalTimer::default(),
            reference,
            input: String::new(),
            seconds_remaining: SESSION_SECS,
            phase: Phase::Idle,
            wpm: 0.0,
            accuracy: 100.0,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn elapsed_secs(&self) -> u32 {
        SESSION_SECS - self.seconds_remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn wpm(&self) -> f64 {
        self.wpm
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn timer(&self) -> &IntervalTimer {
        &self.timer
    }

    /// How long until the countdown next needs attention, if it is running.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.timer.time_until_next(self.clock.now())
    }

    /// The input surface accepts keystrokes until time runs out, and only once
    /// a sentence is loaded.
    pub fn input_enabled(&self) -> bool {
        self.seconds_remaining > 0 && !self.reference.is_empty()
    }

    /// Apply the full new contents of the input field.
    ///
    /// A trailing line terminator is a finish request and is never committed.
    /// Otherwise the first non-empty value starts the countdown, and the value
    /// is committed with both scores recomputed.
    pub fn handle_input_change(&mut self, new_value: &str) -> StateChange {
        if let Some(typed) = strip_terminator(new_value) {
            if self.phase != Phase::Running {
                debug!(phase = %self.phase, "finish request ignored");
                return StateChange::Unchanged;
            }
            self.input = typed.to_string();
            return self.finish(FinishCause::Submitted);
        }

        let mut change = StateChange::Updated;
        if self.phase == Phase::Idle && self.seconds_remaining > 0 && !new_value.is_empty() {
            self.phase = Phase::Running;
            self.timer.start(self.clock.now());
            info!(reference = %self.reference, "session started");
            change = StateChange::Started;
        }

        self.input = new_value.to_string();
        self.accuracy = if self.input.is_empty() {
            100.0
        } else {
            metrics::accuracy(&self.reference, &self.input)
        };
        self.recalc_wpm();
        debug!(
            len = self.input.chars().count(),
            accuracy = self.accuracy,
            wpm = self.wpm,
            "input committed"
        );

        change
    }

    /// One second of countdown. Does nothing unless the session is running.
    pub fn tick(&mut self) -> StateChange {
        if self.phase != Phase::Running {
            return StateChange::Unchanged;
        }

        if self.seconds_remaining <= 1 {
            self.seconds_remaining = 0;
            return self.finish(FinishCause::Timeout);
        }

        self.seconds_remaining -= 1;
        debug!(seconds_remaining = self.seconds_remaining, "tick");
        StateChange::Updated
    }

    /// Run every tick the timer has come due for since the last call.
    pub fn fire_due_ticks(&mut self) -> StateChange {
        let due = self.timer.due(self.clock.now());
        let mut change = StateChange::Unchanged;
        for _ in 0..due {
            change = self.tick();
            if self.phase == Phase::Finished {
                break;
            }
        }
        change
    }

    /// Back to Idle with a freshly drawn sentence.
    pub fn reset(&mut self) -> StateChange {
        self.timer.stop();
        self.input.clear();
        self.seconds_remaining = SESSION_SECS;
        self.phase = Phase::Idle;
        self.wpm = 0.0;
        self.accuracy = 100.0;
        self.reference = self.corpus.draw(&mut self.rng);
        info!(reference = %self.reference, "session reset");
        StateChange::Reset
    }

    fn finish(&mut self, cause: FinishCause) -> StateChange {
        self.timer.stop();
        self.phase = Phase::Finished;
        self.recalc_wpm();
        info!(
            %cause,
            elapsed_secs = self.elapsed_secs(),
            wpm = self.wpm,
            accuracy = self.accuracy,
            "session finished"
        );
        StateChange::Finished(cause)
    }

    fn recalc_wpm(&mut self) {
        if let Some(wpm) = metrics::words_per_minute(&self.input, self.elapsed_secs()) {
            self.wpm = wpm;
        }
    }
}

/// The value without its trailing line terminator, if it has one.
fn strip_terminator(value: &str) -> Option<&str> {
    value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .or_else(|| value.strip_suffix('\r'))
}
