use std::fmt;

use anyhow::Context;
use rust_decimal::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use super::account::{Pin, Username};
use super::session::{Session, SessionError};

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CommandKind {
    /// Authenticate and make the account active.
    Login,

    /// Move money from the active account to another one.
    Transfer,

    /// Credit the active account, if some prior movement backs the request.
    Loan,

    /// Flip the statement between insertion order and ascending amounts.
    Sort,

    /// Remove the active account from the store and log out.
    Close,
}

#[derive(Error, Debug)]
pub(crate) enum CommandError {
    #[error("rejected - {0}")]
    Rejected(#[from] SessionError),

    #[error("malformed command - {0}")]
    Malformed(#[from] anyhow::Error),
}

type CommandResult<T> = anyhow::Result<T, CommandError>;

/// One user action, as a row of the command script. Fields a command does
/// not use stay empty in the row.
#[derive(Deserialize, Debug, Clone)]
pub struct Command {
    #[serde(rename = "command")]
    kind: CommandKind,

    /// Login handle, for `login` and `close`.
    user: Option<Username>,

    /// Numeric secret, for `login` and `close`.
    pin: Option<Pin>,

    /// Recipient handle, for `transfer`.
    to: Option<Username>,

    /// Amount, for `transfer` and `loan`.
    amount: Option<Decimal>,
}

/// What a successful command did, for the driver's log line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    LoggedIn(String),
    Transferred { to: Username, amount: Decimal },
    LoanGranted(Decimal),
    Sorted(bool),
    Closed(Username),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::LoggedIn(owner) => write!(f, "welcome back, {owner}"),
            Outcome::Transferred { to, amount } => write!(f, "transferred {amount} to {to}"),
            Outcome::LoanGranted(amount) => write!(f, "loan of {amount} approved"),
            Outcome::Sorted(true) => write!(f, "movements sorted by amount"),
            Outcome::Sorted(false) => write!(f, "movements in original order"),
            Outcome::Closed(username) => write!(f, "account {username} closed"),
        }
    }
}

impl Command {
    /// Applies the action to the session. A row missing a field its command
    /// needs is malformed; a validation failure comes back as the session's
    /// rejection reason.
    pub(crate) fn apply(&self, session: &mut Session) -> CommandResult<Outcome> {
        match self.kind {
            CommandKind::Login => {
                let user = self.user.clone().context("login needs a user")?;
                let pin = self.pin.context("login needs a pin")?;
                let owner = session.authenticate(&user, pin)?;
                Ok(Outcome::LoggedIn(owner))
            }
            CommandKind::Transfer => {
                let to = self.to.clone().context("transfer needs a recipient")?;
                let amount = self.amount.context("transfer needs an amount")?;
                session.transfer(&to, amount)?;
                Ok(Outcome::Transferred { to, amount })
            }
            CommandKind::Loan => {
                let amount = self.amount.context("loan needs an amount")?;
                session.request_loan(amount)?;
                Ok(Outcome::LoanGranted(amount))
            }
            CommandKind::Sort => Ok(Outcome::Sorted(session.toggle_sort()?)),
            CommandKind::Close => {
                let user = self.user.clone().context("close needs a user")?;
                let pin = self.pin.context("close needs a pin")?;
                session.close_account(&user, pin)?;
                Ok(Outcome::Closed(user))
            }
        }
    }
}
