//! Flat-file account store.
//!
//! The whole store is loaded at start and the file is fully rewritten after
//! every mutation, via a temp file and rename so a crash never leaves a
//! half-written store. Accounts are kept in a `BTreeMap` so the file is
//! written in account-number order.

use crate::atm::account::Account;
use crate::atm::error::{AtmError, Result};
use crate::atm::money::Money;
use crate::atm::policy::INITIAL_BALANCE;
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// In-memory mapping from account number to account record, persisted as a
/// headerless CSV file.
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
    accounts: BTreeMap<String, Account>,
}

impl AccountStore {
    /// Opens the store at `path`, loading every account.
    ///
    /// A missing file is an empty store, not an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut accounts = BTreeMap::new();

        match File::open(&path) {
            Ok(file) => {
                let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);
                for result in reader.deserialize::<Account>() {
                    let account = result?;
                    accounts.insert(account.number.clone(), account);
                }
                debug!("loaded {} accounts from {}", accounts.len(), path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("account file {} not found, starting empty", path.display());
            }
            Err(e) => return Err(AtmError::Io(e)),
        }

        Ok(AccountStore { path, accounts })
    }

    /// Seeds the two demo accounts when the store is empty and persists them.
    ///
    /// Returns `true` if seeding happened.
    pub fn bootstrap(&mut self) -> Result<bool> {
        if !self.accounts.is_empty() {
            return Ok(false);
        }

        let demo = [
            Account::new(
                "1234567890123456789",
                "Zhang San",
                "110101199001011234",
                "123456",
                INITIAL_BALANCE,
            ),
            Account::new(
                "5002222005040623456",
                "Li Hua",
                "500222200504062345",
                "123456",
                Money::new(dec!(999999)),
            ),
        ];

        for account in demo {
            self.accounts.insert(account.number.clone(), account);
        }
        self.save()?;
        info!("seeded {} demo accounts", self.accounts.len());
        Ok(true)
    }

    /// Rewrites the whole file from the current map.
    ///
    /// The rewrite goes through a sibling temp file and a rename, so readers
    /// never observe a truncated store.
    pub fn save(&self) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp)?;
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
            for account in self.accounts.values() {
                writer.serialize(account)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Looks up an account by number.
    pub fn lookup(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Returns `true` if `number` is in the store.
    pub fn contains(&self, number: &str) -> bool {
        self.accounts.contains_key(number)
    }

    /// Number of accounts in the store.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` if the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Applies `f` to the stored account and persists the store.
    pub fn mutate<F>(&mut self, number: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Account),
    {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| AtmError::NoSuchAccount(number.to_string()))?;
        f(account);
        self.save()
    }

    /// Moves `amount` from `from` to `to` and persists once.
    ///
    /// Both balances change in memory before the single file rewrite, so a
    /// completed call never leaves money in only one of the two accounts.
    /// The caller has already checked policy.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Money) -> Result<()> {
        if !self.accounts.contains_key(to) {
            return Err(AtmError::NoSuchAccount(to.to_string()));
        }
        {
            let source = self
                .accounts
                .get_mut(from)
                .ok_or_else(|| AtmError::NoSuchAccount(from.to_string()))?;
            source.balance -= amount;
        }
        {
            // Safety: checked above
            let target = self.accounts.get_mut(to).expect("target account exists");
            target.balance += amount;
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    const ZHANG: &str = "1234567890123456789";
    const LI: &str = "5002222005040623456";

    fn open_seeded(dir: &tempfile::TempDir) -> AccountStore {
        let mut store = AccountStore::open(dir.path().join("accounts.dat")).unwrap();
        store.bootstrap().unwrap();
        store
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::open(dir.path().join("accounts.dat")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_bootstrap_seeds_exactly_the_demo_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_seeded(&dir);
        assert_eq!(store.len(), 2);

        let contents = fs::read_to_string(dir.path().join("accounts.dat")).unwrap();
        assert_eq!(
            contents,
            "1234567890123456789,Zhang San,110101199001011234,123456,10000.00\n\
             5002222005040623456,Li Hua,500222200504062345,123456,999999.00\n"
        );
    }

    #[test]
    fn test_bootstrap_is_a_noop_on_nonempty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_seeded(&dir);
        assert!(!store.bootstrap().unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_seeded(&dir);
        store
            .mutate(ZHANG, |account| {
                account.balance -= money("500");
            })
            .unwrap();

        let reloaded = AccountStore::open(dir.path().join("accounts.dat")).unwrap();
        assert_eq!(reloaded.lookup(ZHANG).unwrap().balance, money("9500"));
        assert_eq!(reloaded.lookup(LI).unwrap().balance, money("999999"));
    }

    #[test]
    fn test_mutate_unknown_account_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_seeded(&dir);
        let err = store.mutate("0000000000000000000", |_| {}).unwrap_err();
        assert!(matches!(err, AtmError::NoSuchAccount(_)));
    }

    #[test]
    fn test_transfer_moves_both_balances() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_seeded(&dir);
        store.transfer(ZHANG, LI, money("2500")).unwrap();

        assert_eq!(store.lookup(ZHANG).unwrap().balance, money("7500"));
        assert_eq!(store.lookup(LI).unwrap().balance, money("1002499"));

        // Both legs are visible after reload: one rewrite covered them.
        let reloaded = AccountStore::open(dir.path().join("accounts.dat")).unwrap();
        assert_eq!(reloaded.lookup(ZHANG).unwrap().balance, money("7500"));
        assert_eq!(reloaded.lookup(LI).unwrap().balance, money("1002499"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_seeded(&dir);
        store.save().unwrap();
        assert!(!dir.path().join("accounts.tmp").exists());
    }
}
