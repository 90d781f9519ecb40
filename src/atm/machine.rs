//! The ATM itself: authentication plus the AUTH-only money operations.
//!
//! Every balance change persists the store before returning success, and
//! every completed operation appends an audit record stamped by the clock.

use crate::atm::account::Account;
use crate::atm::audit::{AuditLog, TxRecord, TxType};
use crate::atm::clock::{Clock, SystemClock};
use crate::atm::error::{AtmError, Result};
use crate::atm::lock::LockList;
use crate::atm::money::Money;
use crate::atm::policy;
use crate::atm::session::{AccountOutcome, PasswordOutcome, Session};
use crate::atm::store::AccountStore;
use log::debug;
use std::path::PathBuf;

/// Locations of the three data files.
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub accounts: PathBuf,
    pub transactions: PathBuf,
    pub locked: PathBuf,
}

impl Default for DataFiles {
    /// The conventional file names, relative to the working directory.
    fn default() -> Self {
        DataFiles {
            accounts: PathBuf::from("accounts.dat"),
            transactions: PathBuf::from("transactions.dat"),
            locked: PathBuf::from("locked_accounts.dat"),
        }
    }
}

/// Result of a completed transfer.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub new_balance: Money,
    pub recipient_name: String,
}

/// A single-user ATM terminal over the three data files.
pub struct Atm<C: Clock = SystemClock> {
    store: AccountStore,
    audit: AuditLog,
    locks: LockList,
    clock: C,
    session: Session,
}

impl Atm<SystemClock> {
    /// Opens the terminal on the real clock, seeding demo accounts when the
    /// store is empty.
    pub fn open(files: DataFiles) -> Result<Self> {
        Atm::with_clock(files, SystemClock)
    }
}

impl<C: Clock> Atm<C> {
    /// Opens the terminal with an explicit clock.
    pub fn with_clock(files: DataFiles, clock: C) -> Result<Self> {
        let mut store = AccountStore::open(&files.accounts)?;
        store.bootstrap()?;
        Ok(Atm {
            store,
            audit: AuditLog::new(&files.transactions),
            locks: LockList::new(&files.locked),
            clock,
            session: Session::new(),
        })
    }

    // ----- authentication -----

    pub fn submit_account(&mut self, input: &str) -> AccountOutcome {
        self.session.submit_account(input, &self.store, &self.locks)
    }

    pub fn submit_password(&mut self, password: &str) -> PasswordOutcome {
        self.session
            .submit_password(password, &self.store, &self.locks)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_terminated(&self) -> bool {
        self.session.is_terminated()
    }

    /// Ends the authenticated session.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// The logged-in account record.
    pub fn current_account(&self) -> Result<&Account> {
        let number = self.session.current_account().ok_or(AtmError::NotLoggedIn)?;
        self.store
            .lookup(number)
            .ok_or_else(|| AtmError::NoSuchAccount(number.to_string()))
    }

    // ----- money operations (AUTH-only) -----

    /// Reads the balance and appends a BALANCE_QUERY record.
    pub fn check_balance(&mut self) -> Result<Money> {
        let account = self.current_account()?;
        let balance = account.balance;
        let number = account.number.clone();
        self.record(&number, TxType::BalanceQuery, Money::ZERO, "");
        Ok(balance)
    }

    /// Today's cumulative withdrawals, recomputed from the audit log.
    pub fn today_withdrawn(&self) -> Result<Money> {
        let account = self.current_account()?;
        let today = self.clock.now().date;
        Ok(self.audit.today_withdraw_total(&account.number, &today))
    }

    /// Withdraws `amount` if policy allows; returns the new balance.
    pub fn withdraw(&mut self, amount: Money) -> Result<Money> {
        let account = self.current_account()?;
        let number = account.number.clone();
        let balance = account.balance;

        let today = self.clock.now().date;
        let today_so_far = self.audit.today_withdraw_total(&number, &today);
        policy::check_withdrawal(amount, today_so_far, balance)?;

        self.store.mutate(&number, |a| {
            a.balance -= amount;
        })?;
        self.record(&number, TxType::Withdrawal, amount, "");
        debug!("withdrew {} from {}", amount, number);

        Ok(balance - amount)
    }

    /// Deposits `amount`; returns the new balance.
    pub fn deposit(&mut self, amount: Money) -> Result<Money> {
        let account = self.current_account()?;
        let number = account.number.clone();
        let balance = account.balance;

        policy::check_deposit(amount)?;

        self.store.mutate(&number, |a| {
            a.balance += amount;
        })?;
        self.record(&number, TxType::Deposit, amount, "");
        debug!("deposited {} to {}", amount, number);

        Ok(balance + amount)
    }

    /// Transfers `amount` to `target` if policy allows.
    ///
    /// Both balances move and the store is flushed before this returns, so a
    /// completed transfer is never half-applied on disk.
    pub fn transfer(&mut self, amount: Money, target: &str) -> Result<TransferReceipt> {
        let account = self.current_account()?;
        let number = account.number.clone();
        let balance = account.balance;

        policy::check_transfer(
            amount,
            balance,
            self.store.contains(target),
            target == number,
        )?;

        self.store.transfer(&number, target, amount)?;
        self.record(&number, TxType::Transfer, amount, target);
        debug!("transferred {} from {} to {}", amount, number, target);

        // Safety: check_transfer verified the target exists
        let recipient_name = self
            .store
            .lookup(target)
            .map(|a| a.name.clone())
            .unwrap_or_default();

        Ok(TransferReceipt {
            new_balance: balance - amount,
            recipient_name,
        })
    }

    /// Changes the password after verifying the old one and validating the
    /// new one (exactly six decimal digits, typed twice identically).
    pub fn change_password(&mut self, old: &str, new: &str, confirm: &str) -> Result<()> {
        let account = self.current_account()?;
        let number = account.number.clone();

        if !account.verify_password(old) {
            return Err(AtmError::IncorrectPassword);
        }
        if new.len() != policy::PASSWORD_LENGTH {
            return Err(AtmError::PasswordLength);
        }
        if !new.chars().all(|c| c.is_ascii_digit()) {
            return Err(AtmError::PasswordNotNumeric);
        }
        if new != confirm {
            return Err(AtmError::PasswordMismatch);
        }

        self.store.mutate(&number, |a| {
            a.set_password(new);
        })?;
        debug!("password changed for {}", number);
        Ok(())
    }

    /// Final full rewrite of the store, called once on exit.
    pub fn flush(&self) -> Result<()> {
        self.store.save()
    }

    fn record(&self, number: &str, tx_type: TxType, amount: Money, target: &str) {
        let stamp = self.clock.now();
        self.audit.append(&TxRecord {
            account: number.to_string(),
            tx_type,
            amount,
            date: stamp.date,
            time: stamp.time,
            target: target.to_string(),
        });
    }
}
