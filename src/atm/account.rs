//! Bank account model and operations.
//!
//! Maintains the invariant: `balance >= 0` after every completed operation.

use crate::atm::money::Money;
use serde::{Deserialize, Serialize};

/// A single bank account as persisted in `accounts.dat`.
///
/// Field order matches the file format: one headerless CSV row of
/// `number,name,id_card,password,balance`. Values must not contain commas.
///
/// # Invariants
///
/// - `number` is the primary key, exactly 19 decimal digits
/// - `password` is exactly 6 decimal digits, stored in plaintext
/// - `balance` never goes negative through [`Account::withdraw`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// 19-digit account number, treated as an opaque string key.
    pub number: String,

    /// Holder name.
    pub name: String,

    /// 18-character national ID.
    pub id_card: String,

    /// 6-digit password, plaintext.
    pub password: String,

    /// Current balance, never negative.
    pub balance: Money,
}

impl Account {
    /// Creates an account with the given balance.
    pub fn new(number: &str, name: &str, id_card: &str, password: &str, balance: Money) -> Self {
        Account {
            number: number.to_string(),
            name: name.to_string(),
            id_card: id_card.to_string(),
            password: password.to_string(),
            balance,
        }
    }

    /// Returns `true` if `password` matches the stored one.
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }

    /// Overwrites the stored password.
    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    /// Debits the account.
    ///
    /// Returns `false` if the amount is not positive or exceeds the balance.
    pub fn withdraw(&mut self, amount: Money) -> bool {
        if !amount.is_positive() || amount > self.balance {
            return false;
        }
        self.balance -= amount;
        true
    }

    /// Credits the account.
    ///
    /// Returns `false` if the amount is not positive.
    pub fn deposit(&mut self, amount: Money) -> bool {
        if !amount.is_positive() {
            return false;
        }
        self.balance += amount;
        true
    }
}
