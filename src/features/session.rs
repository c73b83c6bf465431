use rust_decimal::prelude::*;
use serde::Serialize;
use thiserror::Error;

use super::account::{AccountError, Pin, Username};
use super::ledger::{self, Movement, Summary};
use super::store::{BalanceLine, Store};

#[derive(Error, Debug, PartialEq)]
pub(crate) enum SessionError {
    /// Which of the two credentials failed is deliberately not disclosed.
    #[error("unknown username or wrong pin")]
    BadCredentials,

    #[error("no account is logged in")]
    NotLoggedIn,

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("no account matches username {0}")]
    UnknownRecipient(Username),

    #[error("an account cannot transfer to itself")]
    SelfTransfer,

    #[error("rejected - {0}")]
    Account(#[from] AccountError),
}

type SessionResult<T> = anyhow::Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq)]
enum State {
    Anonymous,
    Active { username: Username, sorted: bool },
}

/// Render payload handed to the presentation layer on every update.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct Statement {
    pub(crate) owner: String,
    /// The welcome label only greets by first name.
    pub(crate) first_name: String,
    pub(crate) movements: Vec<Movement>,
    #[serde(flatten)]
    pub(crate) summary: Summary,
}

/// A single-user banking session. Owns the store for its lifetime and is
/// the only writer; everything else observes through [`Statement`]s.
#[derive(Debug)]
pub struct Session {
    store: Store,
    state: State,
}

impl Session {
    pub(crate) fn new(store: Store) -> Self {
        Self {
            store,
            state: State::Anonymous,
        }
    }

    /// Username of the active account, if any.
    pub(crate) fn active(&self) -> Option<&Username> {
        match &self.state {
            State::Active { username, .. } => Some(username),
            State::Anonymous => None,
        }
    }

    fn active_username(&self) -> SessionResult<Username> {
        self.active().cloned().ok_or(SessionError::NotLoggedIn)
    }

    /// Logging in again while active switches accounts and resets the sort
    /// toggle. Returns the owner's display name for the welcome message.
    pub(crate) fn authenticate(&mut self, username: &Username, pin: Pin) -> SessionResult<String> {
        let owner = match self.store.get(username) {
            Some(account) if account.pin == pin => account.owner.clone(),
            _ => return Err(SessionError::BadCredentials),
        };
        self.state = State::Active {
            username: username.clone(),
            sorted: false,
        };
        Ok(owner)
    }

    /// Moves `amount` from the active account to `to`. All validation
    /// happens before the first append, so either both movements land or
    /// neither does.
    pub(crate) fn transfer(&mut self, to: &Username, amount: Decimal) -> SessionResult<()> {
        let from = self.active_username()?;
        if amount <= Decimal::ZERO {
            return Err(SessionError::NonPositiveAmount(amount));
        }
        if !self.store.contains(to) {
            return Err(SessionError::UnknownRecipient(to.clone()));
        }
        if *to == from {
            return Err(SessionError::SelfTransfer);
        }

        let source = self.store.get_mut(&from).ok_or(SessionError::NotLoggedIn)?;
        source.withdraw(amount)?;
        let recipient = self
            .store
            .get_mut(to)
            .ok_or_else(|| SessionError::UnknownRecipient(to.clone()))?;
        recipient.deposit(amount);
        Ok(())
    }

    pub(crate) fn request_loan(&mut self, amount: Decimal) -> SessionResult<()> {
        let username = self.active_username()?;
        if amount <= Decimal::ZERO {
            return Err(SessionError::NonPositiveAmount(amount));
        }
        let account = self
            .store
            .get_mut(&username)
            .ok_or(SessionError::NotLoggedIn)?;
        account.grant_loan(amount)?;
        Ok(())
    }

    /// Removes the active account from the store. The supplied credentials
    /// must match the active account exactly; afterwards the username is
    /// gone for good and the session is anonymous again.
    pub(crate) fn close_account(&mut self, username: &Username, pin: Pin) -> SessionResult<()> {
        let active = self.active_username()?;
        let account = self.store.get(&active).ok_or(SessionError::NotLoggedIn)?;
        if *username != active || account.pin != pin {
            return Err(SessionError::BadCredentials);
        }
        self.store.remove(&active);
        self.state = State::Anonymous;
        Ok(())
    }

    /// Flips the statement between insertion order and ascending amounts.
    /// Returns whether sorting is now on.
    pub(crate) fn toggle_sort(&mut self) -> SessionResult<bool> {
        match &mut self.state {
            State::Active { sorted, .. } => {
                *sorted = !*sorted;
                Ok(*sorted)
            }
            State::Anonymous => Err(SessionError::NotLoggedIn),
        }
    }

    pub(crate) fn statement(&self) -> SessionResult<Statement> {
        let State::Active { username, sorted } = &self.state else {
            return Err(SessionError::NotLoggedIn);
        };
        let account = self.store.get(username).ok_or(SessionError::NotLoggedIn)?;
        Ok(Statement {
            first_name: account
                .owner
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string(),
            owner: account.owner.clone(),
            movements: ledger::rows(&account.movements, *sorted),
            summary: Summary::of(&account.movements, account.interest_rate),
        })
    }

    pub(crate) fn balances(&self) -> Vec<BalanceLine> {
        self.store.balances()
    }
}
