//! Error types for the ATM simulator.

use crate::atm::policy::PolicyViolation;
use thiserror::Error;

/// Result type alias for ATM operations
pub type Result<T> = std::result::Result<T, AtmError>;

/// Errors that can occur while operating the ATM.
///
/// Policy refusals and bad user input carry the message shown at the
/// terminal; I/O and data errors bubble up to the fatal handler in `main`.
#[derive(Error, Debug)]
pub enum AtmError {
    /// Failed to read or write one of the data files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file row could not be parsed or written
    #[error("data file error: {0}")]
    Csv(#[from] csv::Error),

    /// The requested account is not in the store
    #[error("account {0} not found in store")]
    NoSuchAccount(String),

    /// A money operation was attempted without an authenticated session
    #[error("Please login first!")]
    NotLoggedIn,

    /// A withdrawal, deposit or transfer was refused by policy
    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// The current password did not verify during a password change
    #[error("Current password is incorrect!")]
    IncorrectPassword,

    /// The new password is not exactly six characters long
    #[error("Password must be 6 digits!")]
    PasswordLength,

    /// The new password contains a non-digit character
    #[error("Password must be numeric!")]
    PasswordNotNumeric,

    /// The new password and its confirmation differ
    #[error("Two passwords do not match!")]
    PasswordMismatch,
}
