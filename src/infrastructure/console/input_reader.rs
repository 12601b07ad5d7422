//! Line-based operator input

use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;

use tracing::error;

use crate::application::InputReader;
use crate::domain::{DomainError, DomainResult};
use crate::support::errors::{AppError, InfraError};

/// Reads operator answers one line at a time.
///
/// Clones share the underlying reader, so the shell menu and the parking
/// service consume the same line stream.
pub struct ConsoleInputReader<R> {
    reader: Rc<RefCell<R>>,
}

impl<R> Clone for ConsoleInputReader<R> {
    fn clone(&self) -> Self {
        Self {
            reader: Rc::clone(&self.reader),
        }
    }
}

impl ConsoleInputReader<io::StdinLock<'static>> {
    /// Reader over the process standard input
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> ConsoleInputReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Rc::new(RefCell::new(reader)),
        }
    }

    /// Next line without its line ending. `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.borrow_mut().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Menu option for the shell loop. `Ok(None)` once the input is closed.
    ///
    /// A failing reader is an `InfraError`, a line that is not a number a
    /// `DomainError`.
    pub fn read_menu_option(&mut self) -> Result<Option<u32>, AppError> {
        let line = self.next_line().map_err(|e| {
            error!("Error while reading user input from Shell: {}", e);
            InfraError::from(e)
        })?;
        match line {
            Some(line) => Ok(Some(parse_number(&line)?)),
            None => Ok(None),
        }
    }
}

impl<R: BufRead> InputReader for ConsoleInputReader<R> {
    fn read_selection(&mut self) -> DomainResult<u32> {
        let line = self.next_line().map_err(|e| {
            error!("Error while reading user input from Shell: {}", e);
            DomainError::InvalidVehicleType(e.to_string())
        })?;
        match line {
            Some(line) => parse_number(&line),
            None => Err(DomainError::InvalidVehicleType("end of input".to_string())),
        }
    }

    fn read_vehicle_registration_number(&mut self) -> DomainResult<String> {
        let line = self.next_line().map_err(|e| {
            error!("Error while reading user input from Shell: {}", e);
            DomainError::InvalidRegistration(e.to_string())
        })?;
        match line.as_deref().map(str::trim) {
            Some(reg) if !reg.is_empty() => Ok(reg.to_string()),
            Some(_) => Err(DomainError::InvalidRegistration("Invalid input provided".to_string())),
            None => Err(DomainError::InvalidRegistration("end of input".to_string())),
        }
    }
}

fn parse_number(line: &str) -> DomainResult<u32> {
    line.trim().parse::<u32>().map_err(|e| {
        error!("Error while reading user input from Shell: {}", e);
        DomainError::InvalidVehicleType(format!("'{}' is not a number", line.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &str) -> ConsoleInputReader<Cursor<Vec<u8>>> {
        ConsoleInputReader::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn reads_selection_number() {
        let mut input = reader("1\n 2 \r\n");
        assert_eq!(input.read_selection().unwrap(), 1);
        assert_eq!(input.read_selection().unwrap(), 2);
    }

    #[test]
    fn non_numeric_selection_is_invalid_vehicle_type() {
        let mut input = reader("car\n");
        assert!(matches!(
            input.read_selection().unwrap_err(),
            DomainError::InvalidVehicleType(_)
        ));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut input = reader("");
        assert!(input.read_selection().is_err());
        assert!(matches!(
            input.read_vehicle_registration_number().unwrap_err(),
            DomainError::InvalidRegistration(_)
        ));
    }

    #[test]
    fn menu_option_is_none_at_end_of_input() {
        let mut input = reader("3\n");
        assert_eq!(input.read_menu_option().unwrap(), Some(3));
        assert_eq!(input.read_menu_option().unwrap(), None);
    }

    /// Reader whose every read fails
    struct BrokenPipe;

    impl io::Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin gone"))
        }
    }

    impl BufRead for BrokenPipe {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin gone"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn menu_option_separates_read_failures_from_bad_numbers() {
        let mut broken = ConsoleInputReader::new(BrokenPipe);
        assert!(matches!(
            broken.read_menu_option().unwrap_err(),
            AppError::Infra(InfraError::Io(_))
        ));

        let mut input = reader("seven\n");
        assert!(matches!(
            input.read_menu_option().unwrap_err(),
            AppError::Domain(DomainError::InvalidVehicleType(_))
        ));
    }

    #[test]
    fn clones_share_the_line_stream() {
        let mut menu = reader("1\nABCDEF\n");
        let mut service_input = menu.clone();
        assert_eq!(menu.read_menu_option().unwrap(), Some(1));
        assert_eq!(service_input.read_vehicle_registration_number().unwrap(), "ABCDEF");
        assert_eq!(menu.read_menu_option().unwrap(), None);
    }

    #[test]
    fn registration_is_trimmed() {
        let mut input = reader("  ABCDEF \n");
        assert_eq!(input.read_vehicle_registration_number().unwrap(), "ABCDEF");
    }

    #[test]
    fn blank_registration_is_rejected() {
        let mut input = reader("   \n");
        assert!(matches!(
            input.read_vehicle_registration_number().unwrap_err(),
            DomainError::InvalidRegistration(_)
        ));
    }
}
