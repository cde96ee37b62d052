//! # Cycle Budget
//!
//! Work per `execute` call is bounded by a budget of primitive memory
//! operations. Every byte fetched, read or written debits one unit; address
//! arithmetic and internal register work debit the extra units recorded in the
//! opcode table.
//!
//! The budget is only checked between instructions. An instruction that has
//! started always runs to completion, so the remaining count can end up below
//! zero; `overrun` reports by how much.

/// Remaining work allowed for one `execute` call.
///
/// # Examples
///
/// ```
/// use vm6502::CycleBudget;
///
/// let mut budget = CycleBudget::new(3);
/// budget.debit(2);
/// assert!(!budget.is_exhausted());
///
/// budget.debit(2);
/// assert!(budget.is_exhausted());
/// assert_eq!(budget.remaining(), -1);
/// assert_eq!(budget.overrun(), 1);
/// assert_eq!(budget.consumed(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleBudget {
    remaining: i64,
    consumed: u64,
}

impl CycleBudget {
    /// Creates a budget of `cycles` units.
    pub fn new(cycles: u32) -> Self {
        Self {
            remaining: cycles as i64,
            consumed: 0,
        }
    }

    /// Debits `cycles` units. The balance may go negative.
    pub fn debit(&mut self, cycles: u32) {
        self.remaining -= cycles as i64;
        self.consumed += cycles as u64;
    }

    /// True once the balance is zero or below.
    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }

    /// Units left; negative after an overrun.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Units debited so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Units spent past zero by the last instruction.
    pub fn overrun(&self) -> u64 {
        if self.remaining < 0 {
            self.remaining.unsigned_abs()
        } else {
            0
        }
    }
}
