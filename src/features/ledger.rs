//! Pure derivations over a movement history. Every figure is recomputed
//! from the sequence on demand; nothing in here holds state.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MovementKind {
    Deposit,
    Withdrawal,
}

impl From<Decimal> for MovementKind {
    fn from(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            Self::Deposit
        } else {
            Self::Withdrawal
        }
    }
}

/// One rendered ledger row.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct Movement {
    pub(crate) amount: Decimal,
    pub(crate) kind: MovementKind,
}

/// The derived figures of an account ledger.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub(crate) struct Summary {
    pub(crate) balance: Decimal,
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) interest: Decimal,
}

impl Summary {
    /// Folds the history into balance, income, expense and accrued
    /// interest. Interest accrues per deposit at `interest_rate` percent;
    /// any single accrual under 1 is dropped, not the aggregate.
    pub(crate) fn of(movements: &[Decimal], interest_rate: Decimal) -> Self {
        let income = movements
            .iter()
            .filter(|movement| **movement > Decimal::ZERO)
            .sum();

        let expense = -movements
            .iter()
            .filter(|movement| **movement < Decimal::ZERO)
            .sum::<Decimal>();

        let interest = movements
            .iter()
            .filter(|movement| **movement > Decimal::ZERO)
            .map(|deposit| deposit * interest_rate / dec!(100))
            .filter(|earned| *earned >= Decimal::ONE)
            .sum();

        Self {
            balance: balance(movements),
            income,
            expense,
            interest,
        }
    }
}

pub(crate) fn balance(movements: &[Decimal]) -> Decimal {
    movements.iter().sum()
}

/// Rows in presentation order: insertion order, or ascending by amount when
/// `sorted`. The backing sequence is left untouched either way.
pub(crate) fn rows(movements: &[Decimal], sorted: bool) -> Vec<Movement> {
    let mut amounts = movements.to_vec();
    if sorted {
        amounts.sort();
    }
    amounts
        .into_iter()
        .map(|amount| Movement {
            kind: MovementKind::from(amount),
            amount,
        })
        .collect()
}
