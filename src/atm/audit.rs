//! Append-only audit trail of terminal transactions.
//!
//! The log is also the source of truth for daily-limit enforcement: the
//! running total of today's withdrawals is recomputed from the file on every
//! attempt, never cached on the account. External edits to the file are
//! therefore respected, and the total survives restarts with no extra state.

use crate::atm::error::Result;
use crate::atm::money::Money;
use csv::{ReaderBuilder, WriterBuilder};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Kind of audit record, serialized in upper snake case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxType {
    BalanceQuery,
    Withdrawal,
    Deposit,
    Transfer,
}

/// One audit log entry, a headerless CSV row of
/// `account,type,amount,date,time,target`.
///
/// Records are never mutated or deleted. `amount` is zero for balance
/// queries; `target` is empty unless the record is a transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxRecord {
    pub account: String,
    pub tx_type: TxType,
    pub amount: Money,
    /// `YYYY-M-D`, no padding; compared as a string.
    pub date: String,
    /// `H:M:S`, no padding.
    pub time: String,
    pub target: String,
}

/// The transaction log file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        AuditLog {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Appends one record to the log.
    ///
    /// Best-effort: a failed append is logged at warn level and otherwise
    /// ignored.
    pub fn append(&self, record: &TxRecord) {
        if let Err(e) = self.try_append(record) {
            warn!(
                "could not append audit record to {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn try_append(&self, record: &TxRecord) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Sums the WITHDRAWAL amounts recorded for `account` on the local date
    /// `today` (unpadded `YYYY-M-D`, compared for string equality).
    ///
    /// A missing log means nothing was withdrawn. Rows that fail to parse
    /// are skipped with a warning.
    pub fn today_withdraw_total(&self, account: &str, today: &str) -> Money {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Money::ZERO,
            Err(e) => {
                warn!("could not read audit log {}: {}", self.path.display(), e);
                return Money::ZERO;
            }
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut total = Money::ZERO;
        for (row_idx, result) in reader.deserialize::<TxRecord>().enumerate() {
            match result {
                Ok(record) => {
                    if record.account == account
                        && record.tx_type == TxType::Withdrawal
                        && record.date == today
                    {
                        total += record.amount;
                    }
                }
                Err(e) => {
                    warn!("audit log row {}: skipping unreadable record: {}", row_idx + 1, e);
                }
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn record(account: &str, tx_type: TxType, amount: &str, date: &str) -> TxRecord {
        TxRecord {
            account: account.to_string(),
            tx_type,
            amount: money(amount),
            date: date.to_string(),
            time: "9:3:7".to_string(),
            target: String::new(),
        }
    }

    const ACC: &str = "1234567890123456789";

    #[test]
    fn test_missing_log_sums_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("transactions.dat"));
        assert_eq!(log.today_withdraw_total(ACC, "2025-1-5"), Money::ZERO);
    }

    #[test]
    fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.dat");
        let log = AuditLog::new(&path);

        log.append(&record(ACC, TxType::Withdrawal, "500", "2025-1-5"));
        log.append(&record(ACC, TxType::BalanceQuery, "0", "2025-1-5"));

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1234567890123456789,WITHDRAWAL,500.00,2025-1-5,9:3:7,");
        assert_eq!(lines[1], "1234567890123456789,BALANCE_QUERY,0.00,2025-1-5,9:3:7,");
    }

    #[test]
    fn test_transfer_record_carries_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.dat");
        let log = AuditLog::new(&path);

        let mut rec = record(ACC, TxType::Transfer, "250", "2025-1-5");
        rec.target = "5002222005040623456".to_string();
        log.append(&rec);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "1234567890123456789,TRANSFER,250.00,2025-1-5,9:3:7,5002222005040623456"
        );
    }

    #[test]
    fn test_total_filters_by_account_type_and_date() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("transactions.dat"));

        log.append(&record(ACC, TxType::Withdrawal, "500", "2025-1-5"));
        log.append(&record(ACC, TxType::Withdrawal, "300", "2025-1-5"));
        // Different day, different account, different type: all ignored.
        log.append(&record(ACC, TxType::Withdrawal, "2000", "2025-1-4"));
        log.append(&record("5002222005040623456", TxType::Withdrawal, "700", "2025-1-5"));
        log.append(&record(ACC, TxType::Deposit, "900", "2025-1-5"));

        assert_eq!(log.today_withdraw_total(ACC, "2025-1-5"), money("800"));
    }

    #[test]
    fn test_unpadded_date_does_not_match_padded() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("transactions.dat"));

        log.append(&record(ACC, TxType::Withdrawal, "500", "2025-01-05"));
        assert_eq!(log.today_withdraw_total(ACC, "2025-1-5"), Money::ZERO);
    }

    #[test]
    fn test_unreadable_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.dat");
        fs::write(&path, "garbage line that is not a record\n").unwrap();

        let log = AuditLog::new(&path);
        log.append(&record(ACC, TxType::Withdrawal, "500", "2025-1-5"));

        assert_eq!(log.today_withdraw_total(ACC, "2025-1-5"), money("500"));
    }
}
