use crate::session::{Phase, Session};
use crate::timer::Clock;

pub const PLACEHOLDER: &str = "Start typing here... (Press Enter to finish)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CharClass {
    Pending,
    Correct,
    Incorrect,
}

/// Everything the screen shows, derived from a session and nothing else
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub reference: Vec<(char, CharClass)>,
    pub input: String,
    pub seconds_remaining: u32,
    pub wpm: f64,
    pub accuracy: f64,
    pub phase: Phase,
    pub input_enabled: bool,
    pub restart_enabled: bool,
}

impl SessionView {
    pub fn time_left_label(&self) -> String {
        format!("Time Left: {}s", self.seconds_remaining)
    }

    pub fn wpm_label(&self) -> String {
        format!("WPM: {:.1}", self.wpm)
    }

    pub fn accuracy_label(&self) -> String {
        format!("Accuracy: {:.1}%", self.accuracy)
    }

    pub fn count(&self, class: CharClass) -> usize {
        self.reference.iter().filter(|(_, c)| *c == class).count()
    }
}

impl<C: Clock> From<&Session<C>> for SessionView {
    fn from(session: &Session<C>) -> Self {
        Self {
            reference: classify(session.reference(), session.input()),
            input: session.input().to_string(),
            seconds_remaining: session.seconds_remaining(),
            wpm: session.wpm(),
            accuracy: session.accuracy(),
            phase: session.phase(),
            input_enabled: session.input_enabled(),
            restart_enabled: true,
        }
    }
}

/// Class of each reference character against the input at the same position.
/// Input past the end of the reference is not represented.
pub fn classify(reference: &str, input: &str) -> Vec<(char, CharClass)> {
    let mut typed = input.chars();
    reference
        .chars()
        .map(|expected| {
            let class = match typed.next() {
                None => CharClass::Pending,
                Some(c) if c == expected => CharClass::Correct,
                Some(_) => CharClass::Incorrect,
            };
            (expected, class)
        })
        .collect()
}
