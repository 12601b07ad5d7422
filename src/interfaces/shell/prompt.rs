//! Prompts printed ahead of each operator answer

use std::io::Write;

use tracing::warn;

use crate::application::InputReader;
use crate::domain::DomainResult;

/// Wraps an [`InputReader`] and tells the operator what to type next
pub struct PromptingInput<I, W> {
    inner: I,
    out: W,
}

impl<I: InputReader, W: Write> PromptingInput<I, W> {
    pub fn new(inner: I, out: W) -> Self {
        Self { inner, out }
    }

    fn prompt(&mut self, lines: &[&str]) {
        for line in lines {
            if let Err(e) = writeln!(self.out, "{}", line) {
                warn!("Unable to print prompt: {}", e);
                return;
            }
        }
        if let Err(e) = self.out.flush() {
            warn!("Unable to print prompt: {}", e);
        }
    }

    pub fn into_parts(self) -> (I, W) {
        (self.inner, self.out)
    }
}

impl<I: InputReader, W: Write> InputReader for PromptingInput<I, W> {
    fn read_selection(&mut self) -> DomainResult<u32> {
        self.prompt(&["Please select vehicle type from menu", "1 CAR", "2 BIKE"]);
        self.inner.read_selection()
    }

    fn read_vehicle_registration_number(&mut self) -> DomainResult<String> {
        self.prompt(&["Please type the vehicle registration number and press enter key"]);
        self.inner.read_vehicle_registration_number()
    }
}
