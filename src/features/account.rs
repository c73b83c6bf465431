use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Login handle: the lowercase initials of the owner's display name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, PartialOrd, Eq, Ord)]
pub struct Username(String);

impl Username {
    /// Derives the handle from a display name: the lowercase first letter
    /// of each word, in order. "Jonas Schmedtmann" becomes "js".
    pub(crate) fn from_owner(owner: &str) -> Self {
        let initials = owner
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_lowercase)
            .collect();
        Self(initials)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric secret checked on login and closure. Exact equality is the only
/// operation; there is no lockout or retry limiting.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin(u32);

impl Pin {
    pub(crate) fn new(secret: u32) -> Self {
        Self(secret)
    }
}

#[derive(Error, Debug, PartialEq)]
pub(crate) enum AccountError {
    #[error("cannot move {requested}. Only {available} is available in the account")]
    InsufficientFund {
        requested: Decimal,
        available: Decimal,
    },

    #[error("no existing movement backs a tenth of the requested loan of {0}")]
    LoanNotBacked(Decimal),
}

type AccountResult<T> = anyhow::Result<T, AccountError>;

/// A demo bank account. The movement history is append-only; the balance is
/// never stored and is always derived from it.
#[derive(Debug, Clone)]
pub struct Account {
    pub(crate) owner: String,
    pub(crate) username: Username,
    pub(crate) pin: Pin,
    /// Signed amounts in insertion order. Positive is a deposit, negative a
    /// withdrawal. Sorting is presentation-only and never touches this.
    pub(crate) movements: Vec<Decimal>,
    /// Percentage applied to each qualifying deposit.
    pub(crate) interest_rate: Decimal,
}

impl Account {
    pub(crate) fn new(
        owner: &str,
        pin: Pin,
        interest_rate: Decimal,
        movements: Vec<Decimal>,
    ) -> Self {
        Self {
            username: Username::from_owner(owner),
            owner: owner.to_string(),
            pin,
            movements,
            interest_rate,
        }
    }

    pub(crate) fn balance(&self) -> Decimal {
        super::ledger::balance(&self.movements)
    }

    pub(crate) fn deposit(&mut self, amount: Decimal) {
        self.movements.push(amount);
    }

    pub(crate) fn withdraw(&mut self, amount: Decimal) -> AccountResult<()> {
        let available = self.balance();
        if available < amount {
            return Err(AccountError::InsufficientFund {
                requested: amount,
                available,
            });
        }
        self.movements.push(-amount);
        Ok(())
    }

    /// Credits the loan when some prior movement reaches a tenth of the
    /// requested amount.
    pub(crate) fn grant_loan(&mut self, amount: Decimal) -> AccountResult<()> {
        let tenth = amount / dec!(10);
        if !self.movements.iter().any(|movement| *movement >= tenth) {
            return Err(AccountError::LoanNotBacked(amount));
        }
        self.movements.push(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Jonas Schmedtmann" => "js")]
    #[test_case("Sarah Smith" => "ss")]
    #[test_case("Steven Thomas Williams" => "stw")]
    #[test_case("cleopatra" => "c" ; "single word")]
    #[test_case("  Ada   Lovelace " => "al" ; "stray whitespace")]
    fn username_is_lowercase_initials(owner: &str) -> String {
        Username::from_owner(owner).to_string()
    }

    fn account() -> Account {
        Account::new(
            "Arya Stark",
            Pin::new(1111),
            dec!(1.2),
            vec![dec!(300), dec!(200)],
        )
    }

    #[test]
    fn withdraw_within_balance_appends_negative_movement() {
        let mut account = account();
        account.withdraw(dec!(150)).unwrap();
        assert_eq!(account.movements, vec![dec!(300), dec!(200), dec!(-150)]);
        assert_eq!(account.balance(), dec!(350));
    }

    #[test]
    fn withdraw_beyond_balance_is_rejected() {
        let mut account = account();
        let err = account.withdraw(dec!(600)).unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientFund {
                requested: dec!(600),
                available: dec!(500),
            }
        );
        assert_eq!(account.movements, vec![dec!(300), dec!(200)]);
    }

    #[test]
    fn loan_backed_by_a_large_enough_movement_is_credited() {
        let mut account = account();
        account.grant_loan(dec!(1000)).unwrap();
        assert_eq!(account.balance(), dec!(1500));
    }

    #[test]
    fn loan_without_backing_movement_is_rejected() {
        let mut account = account();
        let err = account.grant_loan(dec!(10000)).unwrap_err();
        assert_eq!(err, AccountError::LoanNotBacked(dec!(10000)));
        assert_eq!(account.movements, vec![dec!(300), dec!(200)]);
    }
}
