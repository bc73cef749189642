use crate::ledger::ledger_model::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units of one currency, optionally held as a lot at a per-unit cost.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub units: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Amount>,
}

impl Position {
    fn same_lot(&self, currency: &str, cost: Option<&Amount>) -> bool {
        self.units.currency == currency && self.cost.as_ref() == cost
    }
}

/// Accumulated holdings of an account.
///
/// Positions are merged by (currency, cost). A position whose units net to
/// zero is removed, so an inventory that was bought and sold in full is empty.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    positions: Vec<Position>,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn add_amount(&mut self, amount: &Amount) {
        self.add_position(amount, None);
    }

    pub fn add_position(&mut self, units: &Amount, cost: Option<&Amount>) {
        if units.number.is_zero() {
            return;
        }
        match self
            .positions
            .iter()
            .position(|p| p.same_lot(&units.currency, cost))
        {
            Some(index) => {
                let position = &mut self.positions[index];
                position.units.number += units.number;
                if position.units.number.is_zero() {
                    self.positions.remove(index);
                }
            }
            None => self.positions.push(Position {
                units: units.clone(),
                cost: cost.cloned(),
            }),
        }
    }

    /// Units of `currency` across all lots.
    pub fn units_of(&self, currency: &str) -> Decimal {
        self.positions
            .iter()
            .filter(|p| p.units.currency == currency)
            .map(|p| p.units.number)
            .sum()
    }

    /// The single position of this inventory, if it holds exactly one.
    pub fn only_position(&self) -> Option<&Position> {
        match self.positions.as_slice() {
            [position] => Some(position),
            _ => None,
        }
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered: Vec<String> = self
            .positions
            .iter()
            .map(|p| match &p.cost {
                Some(cost) => format!("{} {{{}}}", p.units, cost),
                None => p.units.to_string(),
            })
            .collect();
        write!(f, "({})", rendered.join(", "))
    }
}
