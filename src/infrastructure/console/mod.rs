//! Console adapters

mod input_reader;

pub use input_reader::ConsoleInputReader;
