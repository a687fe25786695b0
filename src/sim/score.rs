//! Score ledger: the score doubles as the currency that pays for abilities

use serde::{Deserialize, Serialize};

/// Single non-negative counter with gain/spend rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    value: u64,
}

impl ScoreLedger {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    #[inline]
    pub fn balance(&self) -> u64 {
        self.value
    }

    /// Add points; always succeeds
    pub fn credit(&mut self, amount: u64) {
        self.value = self.value.saturating_add(amount);
    }

    /// Spend `amount` if the balance covers it. Returns false and leaves the
    /// balance untouched otherwise.
    pub fn debit(&mut self, amount: u64) -> bool {
        if self.value < amount {
            return false;
        }
        self.value -= amount;
        true
    }

    /// Like [`debit`](Self::debit) but requires the balance to be strictly
    /// greater than `amount`
    pub fn debit_strict(&mut self, amount: u64) -> bool {
        if self.value <= amount {
            return false;
        }
        self.debit(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_requires_funds() {
        let mut ledger = ScoreLedger::new(49);
        assert!(!ledger.debit(50));
        assert_eq!(ledger.balance(), 49);

        ledger.credit(1);
        assert!(ledger.debit(50));
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_debit_strict_boundary() {
        let mut ledger = ScoreLedger::new(20);
        assert!(!ledger.debit_strict(20));
        assert_eq!(ledger.balance(), 20);

        ledger.credit(1);
        assert!(ledger.debit_strict(20));
        assert_eq!(ledger.balance(), 1);
    }
}
