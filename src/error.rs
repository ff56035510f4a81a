//! Application-level error type.
//!
//! Module-level failures (artifact decode, prediction) are typed enums owned
//! by their modules; `AppError` is the single type that crosses `main`, and
//! carries the process exit code.
//!
//! Exit code conventions:
//!
//! - 2: usage/input errors (clap reports these itself)
//! - 3: model artifact load failure (fatal at startup)
//! - 4: runtime errors (terminal, prediction, filesystem)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Model artifact load failure (exit code 3).
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Runtime error: terminal, prediction, filesystem (exit code 4).
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
