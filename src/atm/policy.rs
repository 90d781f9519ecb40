//! Pure predicates governing whether a money operation is permitted.
//!
//! All limits are fixed bank policy. `today_so_far` is always recomputed
//! from the audit log by the caller; it is never cached on the account.

use crate::atm::money::Money;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Wrong password submissions tolerated per process before lockout.
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Length of an account number, in decimal digits.
pub const ACCOUNT_NUMBER_LENGTH: usize = 19;

/// Length of a national ID card string.
pub const ID_CARD_LENGTH: usize = 18;

/// Length of a password, in decimal digits.
pub const PASSWORD_LENGTH: usize = 6;

/// Withdrawals must be a multiple of this note size.
pub const WITHDRAWAL_MULTIPLE: u32 = 100;

/// Balance given to newly seeded demo accounts.
pub const INITIAL_BALANCE: Money = Money::from_raw(dec!(10000.00));

/// Largest amount a single withdrawal may move.
pub const SINGLE_WITHDRAWAL_LIMIT: Money = Money::from_raw(dec!(2000.00));

/// Largest cumulative amount withdrawable per account per local day.
pub const DAILY_WITHDRAWAL_LIMIT: Money = Money::from_raw(dec!(5000.00));

/// A refused money operation, with the message shown at the terminal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Invalid amount!")]
    NonPositiveAmount,

    #[error("Withdrawal amount must be multiple of 100!")]
    NotMultipleOfHundred,

    #[error("Exceeds single withdrawal limit!")]
    OverSingleLimit,

    #[error("Exceeds daily withdrawal limit!")]
    OverDailyLimit,

    #[error("Insufficient balance!")]
    InsufficientBalance,

    #[error("Target account does not exist!")]
    UnknownTarget,

    #[error("Cannot transfer to yourself!")]
    SelfTransfer,
}

/// Checks a withdrawal of `amount` given the day's prior withdrawals and the
/// current balance. Checks run in the order the terminal reports them.
pub fn check_withdrawal(
    amount: Money,
    today_so_far: Money,
    balance: Money,
) -> Result<(), PolicyViolation> {
    if !amount.is_positive() {
        return Err(PolicyViolation::NonPositiveAmount);
    }
    if !amount.is_multiple_of(WITHDRAWAL_MULTIPLE) {
        return Err(PolicyViolation::NotMultipleOfHundred);
    }
    if amount > SINGLE_WITHDRAWAL_LIMIT {
        return Err(PolicyViolation::OverSingleLimit);
    }
    if today_so_far + amount > DAILY_WITHDRAWAL_LIMIT {
        return Err(PolicyViolation::OverDailyLimit);
    }
    if amount > balance {
        return Err(PolicyViolation::InsufficientBalance);
    }
    Ok(())
}

/// Checks a deposit of `amount`.
pub fn check_deposit(amount: Money) -> Result<(), PolicyViolation> {
    if !amount.is_positive() {
        return Err(PolicyViolation::NonPositiveAmount);
    }
    Ok(())
}

/// Checks a transfer of `amount` out of an account holding
/// `source_balance`. There is no daily cap on transfers.
pub fn check_transfer(
    amount: Money,
    source_balance: Money,
    target_exists: bool,
    self_transfer: bool,
) -> Result<(), PolicyViolation> {
    if !target_exists {
        return Err(PolicyViolation::UnknownTarget);
    }
    if self_transfer {
        return Err(PolicyViolation::SelfTransfer);
    }
    if !amount.is_positive() {
        return Err(PolicyViolation::NonPositiveAmount);
    }
    if amount > source_balance {
        return Err(PolicyViolation::InsufficientBalance);
    }
    Ok(())
}
