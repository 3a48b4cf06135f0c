// src/exit.rs
//! Process exit codes for `contextmap`.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ContextMapExit {
    Success = 0,
    /// I/O, config, or ranking failure.
    Error = 1,
    /// Bad command-line input (missing root, unusable option).
    InvalidInput = 2,
}

impl ContextMapExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for ContextMapExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
