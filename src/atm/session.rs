//! Authentication state machine.
//!
//! The login-attempt counter is per-process, not per-account: three wrong
//! passwords spread across different accounts in one run still lock the
//! account that resolved last and terminate the session.

use crate::atm::lock::LockList;
use crate::atm::policy::MAX_LOGIN_ATTEMPTS;
use crate::atm::store::AccountStore;
use log::{debug, info};

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No card inserted.
    Unauth,

    /// An account resolved and is awaiting its password.
    PromptingPassword { account: String },

    /// Logged in.
    Auth { account: String },

    /// The session is over; the terminal must stop.
    Terminated,
}

/// Outcome of submitting an account number while unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOutcome {
    /// The account resolved; ask for its password.
    PasswordRequired,

    /// The user typed `exit`; the session is terminated.
    Exit,

    /// No such account in the store.
    NotFound,

    /// The account is on the lock list and cannot authenticate.
    Locked,
}

/// Outcome of submitting a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordOutcome {
    /// Authenticated; the attempt counter is reset.
    LoggedIn,

    /// Wrong password; `remaining` attempts left in this process.
    WrongPassword { remaining: u32 },

    /// The attempt threshold was reached: the pending account has been
    /// locked and the session terminated.
    LockedOut,

    /// No account is awaiting a password. The dialog never drives the
    /// machine here.
    OutOfTurn,
}

/// One terminal session: state plus the per-process attempt counter.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    attempts: u32,
}

impl Session {
    pub fn new() -> Self {
        Session {
            state: SessionState::Unauth,
            attempts: 0,
        }
    }

    /// The logged-in account number, if any.
    pub fn current_account(&self) -> Option<&str> {
        match &self.state {
            SessionState::Auth { account } => Some(account),
            _ => None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Auth { .. })
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Wrong-password submissions so far in this process.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Resolves an account number typed at the card prompt.
    ///
    /// Failed resolutions leave the attempt counter untouched; only wrong
    /// passwords count toward the lockout threshold.
    pub fn submit_account(
        &mut self,
        input: &str,
        store: &AccountStore,
        locks: &LockList,
    ) -> AccountOutcome {
        if input == "exit" {
            self.state = SessionState::Terminated;
            return AccountOutcome::Exit;
        }
        if !store.contains(input) {
            debug!("login attempt for unknown account");
            return AccountOutcome::NotFound;
        }
        if locks.is_locked(input) {
            info!("login refused for locked account {}", input);
            return AccountOutcome::Locked;
        }
        self.state = SessionState::PromptingPassword {
            account: input.to_string(),
        };
        AccountOutcome::PasswordRequired
    }

    /// Verifies the password for the pending account.
    pub fn submit_password(
        &mut self,
        password: &str,
        store: &AccountStore,
        locks: &LockList,
    ) -> PasswordOutcome {
        let account = match &self.state {
            SessionState::PromptingPassword { account } => account.clone(),
            _ => return PasswordOutcome::OutOfTurn,
        };

        let verified = store
            .lookup(&account)
            .map(|a| a.verify_password(password))
            .unwrap_or(false);

        if verified {
            self.attempts = 0;
            self.state = SessionState::Auth { account };
            PasswordOutcome::LoggedIn
        } else {
            self.attempts += 1;
            if self.attempts >= MAX_LOGIN_ATTEMPTS {
                info!("attempt threshold reached, locking account {}", account);
                locks.lock(&account);
                self.state = SessionState::Terminated;
                PasswordOutcome::LockedOut
            } else {
                // Back to the card prompt, counter preserved across accounts.
                self.state = SessionState::Unauth;
                PasswordOutcome::WrongPassword {
                    remaining: MAX_LOGIN_ATTEMPTS - self.attempts,
                }
            }
        }
    }

    /// Ends the authenticated session and returns to the card prompt.
    pub fn logout(&mut self) {
        self.state = SessionState::Unauth;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
