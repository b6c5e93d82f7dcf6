//! Error types.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` derives the
//! `Display` and `std::error::Error` impls from the `#[error(...)]` strings,
//! so each variant reads like the message it prints.

use thiserror::Error;

/// Failure to read path data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A character that can't start a command, a number or a separator.
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    /// A letter that isn't one of the path commands.
    #[error("unknown path command {0:?}")]
    UnknownCommand(char),

    /// The data stopped in the middle of a command's arguments.
    #[error("path data ended short: command {command:?} is missing arguments")]
    EndedShort { command: char },

    /// A command letter where a number was required.
    #[error("expected a number for command {command:?}, found {found:?}")]
    ExpectedNumber { command: char, found: char },

    /// Numbers after a command that takes none.
    #[error("unexpected number after command {command:?}")]
    UnexpectedNumber { command: char },

    /// A hand-built segment whose argument count doesn't fit its command.
    #[error("command {command:?} takes {expected} arguments, got {found}")]
    WrongArity { command: char, expected: usize, found: usize },
}

/// Failure to read an SVG document.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    Parse(String),

    #[error("no shapes found in SVG")]
    NoShapes,
}
