use std::io;

/// Failures local to one machine instance. None of these should take down the
/// host process; the caller decides whether to halt or continue.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to read ROM image: {0}")]
    RomUnreadable(#[from] io::Error),

    #[error("ROM image is {size} bytes but only {max} bytes fit above the load offset")]
    RomTooLarge { size: usize, max: usize },

    #[error("subroutine call at {pc:#06X} would overflow the 16-entry stack")]
    StackOverflow { pc: u16 },

    #[error("subroutine return at {pc:#06X} with an empty stack")]
    StackUnderflow { pc: u16 },
}
