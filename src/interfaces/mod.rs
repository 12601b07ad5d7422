//! Interface layer - operator facing adapters

pub mod shell;

pub use shell::{PromptingInput, Shell};
