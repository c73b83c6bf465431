use std::collections::BTreeMap;

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;

use super::account::{Account, Pin, Username};

#[derive(Error, Debug, PartialEq)]
pub(crate) enum StoreError {
    #[error("an account with username {0} already exists")]
    DuplicateUsername(Username),
}

/// Closing position of one account, for the end-of-run listing.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct BalanceLine {
    pub(crate) username: Username,
    pub(crate) balance: Decimal,
}

/// The set of demo accounts, keyed by their derived username. Populated
/// once at startup; after that the session is its only writer.
#[derive(Debug, Default)]
pub struct Store {
    accounts: BTreeMap<Username, Account>,
}

impl Store {
    pub(crate) fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// The four accounts the demo app ships with.
    pub(crate) fn demo() -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.insert(Account::new(
            "Jonas Schmedtmann",
            Pin::new(1111),
            dec!(1.2),
            vec![
                dec!(200),
                dec!(450),
                dec!(-400),
                dec!(3000),
                dec!(-650),
                dec!(-130),
                dec!(70),
                dec!(1300),
            ],
        ))?;
        store.insert(Account::new(
            "Jessica Davis",
            Pin::new(2222),
            dec!(1.5),
            vec![
                dec!(5000),
                dec!(3400),
                dec!(-150),
                dec!(-790),
                dec!(-3210),
                dec!(-1000),
                dec!(8500),
                dec!(-30),
            ],
        ))?;
        store.insert(Account::new(
            "Steven Thomas Williams",
            Pin::new(3333),
            dec!(0.7),
            vec![
                dec!(200),
                dec!(-200),
                dec!(340),
                dec!(-300),
                dec!(-20),
                dec!(50),
                dec!(400),
                dec!(-460),
            ],
        ))?;
        store.insert(Account::new(
            "Sarah Smith",
            Pin::new(4444),
            dec!(1),
            vec![dec!(430), dec!(1000), dec!(700), dec!(50), dec!(90)],
        ))?;
        Ok(store)
    }

    /// Usernames are the lookup key and must stay unique.
    pub(crate) fn insert(&mut self, account: Account) -> Result<(), StoreError> {
        let username = account.username.clone();
        if self.accounts.contains_key(&username) {
            return Err(StoreError::DuplicateUsername(username));
        }
        self.accounts.insert(username, account);
        Ok(())
    }

    pub(crate) fn get(&self, username: &Username) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub(crate) fn get_mut(&mut self, username: &Username) -> Option<&mut Account> {
        self.accounts.get_mut(username)
    }

    pub(crate) fn contains(&self, username: &Username) -> bool {
        self.accounts.contains_key(username)
    }

    pub(crate) fn remove(&mut self, username: &Username) -> Option<Account> {
        self.accounts.remove(username)
    }

    pub(crate) fn balances(&self) -> Vec<BalanceLine> {
        self.accounts
            .iter()
            .map(|(username, account)| BalanceLine {
                username: username.clone(),
                balance: account.balance(),
            })
            .collect()
    }
}
