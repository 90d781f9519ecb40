//! Interactive terminal dialog: welcome, login loop, main menu dispatch.
//!
//! Generic over its reader and writer so tests can script a whole session.
//! Policy refusals and bad input print their message and fall back to the
//! menu; I/O failures on the data files propagate to the fatal handler.

use crate::atm::clock::Clock;
use crate::atm::error::{AtmError, Result};
use crate::atm::machine::Atm;
use crate::atm::money::Money;
use crate::atm::policy::{DAILY_WITHDRAWAL_LIMIT, SINGLE_WITHDRAWAL_LIMIT, WITHDRAWAL_MULTIPLE};
use crate::atm::session::{AccountOutcome, PasswordOutcome};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// The console front end of the terminal.
pub struct Dialog<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Dialog<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Dialog { reader, writer }
    }

    /// Runs the terminal until the user exits, is locked out, or input ends.
    pub fn run<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<()> {
        self.welcome()?;

        loop {
            while !atm.is_authenticated() {
                if !self.login_round(atm)? {
                    return Ok(());
                }
            }

            while atm.is_authenticated() {
                if !self.menu_round(atm)? {
                    return Ok(());
                }
            }

            // Logged out via the menu: offer another session.
            if !self.confirm("\nContinue? (y/n): ")? {
                return Ok(());
            }
        }
    }

    /// One pass through the login stage. Returns `false` to stop the program.
    fn login_round<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<bool> {
        let input = match self.prompt("\nPlease enter your 19-digit account number: ")? {
            Some(input) => input,
            None => return Ok(false),
        };

        match atm.submit_account(&input) {
            AccountOutcome::Exit => Ok(false),
            AccountOutcome::NotFound => {
                writeln!(self.writer, "Account does not exist!")?;
                self.confirm("\nContinue to try login? (y/n): ")
            }
            AccountOutcome::Locked => {
                writeln!(
                    self.writer,
                    "Account is locked, please contact bank customer service!"
                )?;
                self.confirm("\nContinue to try login? (y/n): ")
            }
            AccountOutcome::PasswordRequired => {
                let password = match self.prompt("Please enter 6-digit password: ")? {
                    Some(password) => password,
                    None => return Ok(false),
                };
                match atm.submit_password(&password) {
                    PasswordOutcome::LoggedIn => {
                        let name = atm.current_account()?.name.clone();
                        writeln!(self.writer, "\nLogin successful! Welcome {} !", name)?;
                        Ok(true)
                    }
                    PasswordOutcome::WrongPassword { remaining } => {
                        writeln!(
                            self.writer,
                            "Wrong password! Remaining attempts: {}",
                            remaining
                        )?;
                        self.confirm("\nContinue to try login? (y/n): ")
                    }
                    PasswordOutcome::LockedOut => {
                        writeln!(
                            self.writer,
                            "Too many wrong password attempts, account has been locked!"
                        )?;
                        writeln!(self.writer, "Too many login failures, program exits.")?;
                        Ok(false)
                    }
                    PasswordOutcome::OutOfTurn => Ok(true),
                }
            }
        }
    }

    /// One menu round. Returns `false` to stop the program (EOF).
    fn menu_round<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<bool> {
        self.show_menu()?;
        let choice = match self.read_token()? {
            Some(choice) => choice,
            None => return Ok(false),
        };

        match choice.as_str() {
            "1" => self.check_balance(atm)?,
            "2" => self.withdraw(atm)?,
            "3" => self.deposit(atm)?,
            "4" => self.transfer(atm)?,
            "5" => self.change_password(atm)?,
            "6" => self.account_info(atm)?,
            "7" => {
                atm.logout();
                writeln!(self.writer, "\nThank you for using, welcome next time!")?;
            }
            _ => writeln!(self.writer, "Invalid choice, please re-enter!")?,
        }

        if choice != "7" {
            self.pause()?;
        }
        Ok(true)
    }

    fn welcome(&mut self) -> Result<()> {
        writeln!(self.writer, "\nWelcome to ATM Simulation System")?;
        writeln!(
            self.writer,
            "Please insert your card (enter account number) or type 'exit' to quit"
        )?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.writer, "\nMain Menu")?;
        writeln!(self.writer, "1. Check Balance")?;
        writeln!(self.writer, "2. Withdraw")?;
        writeln!(self.writer, "3. Deposit")?;
        writeln!(self.writer, "4. Transfer")?;
        writeln!(self.writer, "5. Change Password")?;
        writeln!(self.writer, "6. Display Account Information")?;
        writeln!(self.writer, "7. Exit/Logout")?;
        write!(self.writer, "Please choose operation (1-7): ")?;
        self.writer.flush()?;
        Ok(())
    }

    fn check_balance<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<()> {
        writeln!(self.writer, "\nBalance Inquiry")?;
        match atm.check_balance() {
            Ok(balance) => writeln!(self.writer, "Current balance: ¥{}", balance)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn withdraw<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<()> {
        writeln!(self.writer, "\nWithdrawal")?;
        writeln!(
            self.writer,
            "Single withdrawal limit: ¥{}",
            SINGLE_WITHDRAWAL_LIMIT
        )?;
        writeln!(
            self.writer,
            "Daily withdrawal limit: ¥{}",
            DAILY_WITHDRAWAL_LIMIT
        )?;
        writeln!(
            self.writer,
            "Withdrawal amount must be multiple of {}",
            WITHDRAWAL_MULTIPLE
        )?;
        let today = atm.today_withdrawn()?;
        writeln!(self.writer, "Today's withdrawals: ¥{}", today)?;

        let amount = match self.prompt_amount("Please enter withdrawal amount: ")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        match atm.withdraw(amount) {
            Ok(new_balance) => {
                writeln!(
                    self.writer,
                    "Withdrawal successful! Withdrawn amount: ¥{}",
                    amount
                )?;
                writeln!(self.writer, "Remaining balance: ¥{}", new_balance)?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn deposit<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<()> {
        writeln!(self.writer, "\nDeposit")?;
        let amount = match self.prompt_amount("Please enter deposit amount: ")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        match atm.deposit(amount) {
            Ok(new_balance) => {
                writeln!(
                    self.writer,
                    "Deposit successful! Deposit amount: ¥{}",
                    amount
                )?;
                writeln!(self.writer, "Current balance: ¥{}", new_balance)?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn transfer<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<()> {
        writeln!(self.writer, "\nTransfer")?;
        let target = match self.prompt("Please enter target account number: ")? {
            Some(target) => target,
            None => return Ok(()),
        };
        let confirm = match self.prompt("Please re-enter target account number to confirm: ")? {
            Some(confirm) => confirm,
            None => return Ok(()),
        };
        if target != confirm {
            writeln!(self.writer, "Two account numbers do not match!")?;
            return Ok(());
        }

        let amount = match self.prompt_amount("Please enter transfer amount: ")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        match atm.transfer(amount, &target) {
            Ok(receipt) => {
                writeln!(
                    self.writer,
                    "Transfer successful! Transfer amount: ¥{}",
                    amount
                )?;
                writeln!(self.writer, "Remaining balance: ¥{}", receipt.new_balance)?;
                writeln!(self.writer, "Recipient: {}", receipt.recipient_name)?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn change_password<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<()> {
        writeln!(self.writer, "\nChange Password")?;
        let old = match self.prompt("Please enter current password: ")? {
            Some(old) => old,
            None => return Ok(()),
        };
        let new = match self.prompt("Please enter new password (6 digits): ")? {
            Some(new) => new,
            None => return Ok(()),
        };
        let confirm = match self.prompt("Please re-enter new password to confirm: ")? {
            Some(confirm) => confirm,
            None => return Ok(()),
        };
        match atm.change_password(&old, &new, &confirm) {
            Ok(()) => writeln!(self.writer, "Password changed successfully!")?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn account_info<C: Clock>(&mut self, atm: &mut Atm<C>) -> Result<()> {
        let account = atm.current_account()?.clone();
        writeln!(self.writer, "\nAccount Information:")?;
        writeln!(self.writer, "Account: {}", account.number)?;
        writeln!(self.writer, "Name: {}", account.name)?;
        writeln!(self.writer, "ID Card: {}", account.id_card)?;
        writeln!(self.writer, "Balance: ¥{}", account.balance)?;
        Ok(())
    }

    /// Prints the message of a user-recoverable error; re-raises anything
    /// fatal (data-file I/O, broken session state).
    fn report(&mut self, err: AtmError) -> Result<()> {
        let recoverable = matches!(
            err,
            AtmError::Policy(_)
                | AtmError::IncorrectPassword
                | AtmError::PasswordLength
                | AtmError::PasswordNotNumeric
                | AtmError::PasswordMismatch
        );
        if recoverable {
            writeln!(self.writer, "{}", err)?;
            Ok(())
        } else {
            Err(err)
        }
    }

    fn pause(&mut self) -> Result<()> {
        write!(self.writer, "\nPress any key to continue...")?;
        self.writer.flush()?;
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(())
    }

    /// Asks a y/n question; only `y`/`Y` means yes. EOF means no.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        match self.prompt(question)? {
            Some(answer) => Ok(answer == "y" || answer == "Y"),
            None => Ok(false),
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.writer, "{}", text)?;
        self.writer.flush()?;
        self.read_token()
    }

    /// Prompts for an amount; a non-numeric answer prints `Invalid amount!`
    /// and aborts the operation.
    fn prompt_amount(&mut self, text: &str) -> Result<Option<Money>> {
        let input = match self.prompt(text)? {
            Some(input) => input,
            None => return Ok(None),
        };
        match Money::from_str(&input) {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                writeln!(self.writer, "Invalid amount!")?;
                Ok(None)
            }
        }
    }

    /// Reads the next non-blank trimmed line. `None` on end of input.
    fn read_token(&mut self) -> Result<Option<String>> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let token = line.trim();
            if !token.is_empty() {
                return Ok(Some(token.to_string()));
            }
        }
    }
}
