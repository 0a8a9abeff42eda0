//! Line-based terminal prompts for calendar day selection.

use planboard_core::{InputOutcome, ScheduledTaskDraft, ScheduledTaskInput};
use std::io::{BufRead, Write};

/// Asks for task text, then an optional time, one line each.
///
/// End of input at the text prompt means the user cancelled. End of input at
/// the time prompt keeps the text and leaves the time empty.
pub struct PromptInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> PromptInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        write!(self.writer, "{question}").ok()?;
        self.writer.flush().ok()?;
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> ScheduledTaskInput for PromptInput<R, W> {
    fn collect(&mut self, date: &str) -> InputOutcome {
        let Some(text) = self.ask(&format!("Add task for {date}: ")) else {
            return InputOutcome::Cancelled;
        };
        if text.trim().is_empty() {
            return InputOutcome::Submitted(ScheduledTaskDraft { text, time: None });
        }
        let time = self.ask("Enter time (optional, e.g. 14:00): ");
        InputOutcome::Submitted(ScheduledTaskDraft { text, time })
    }
}
