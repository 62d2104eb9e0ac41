//! Borrow APY breakdown and the position metrics derived from it

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// USD totals of one borrow APY computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowApyBreakdown {
    /// Supplied collateral value (including an active LP stake)
    pub supply_value: Decimal,
    pub borrow_value: Decimal,
    /// Annual interest owed across all borrows
    pub borrow_interest: Decimal,
    /// `-(borrow_interest * 100 / supply_value)`, in percent
    pub borrow_apy: Decimal,
}

impl BorrowApyBreakdown {
    /// Derive the APY from accumulated totals.
    ///
    /// Fails with `DivisionByZero` when nothing was supplied.
    pub fn from_totals(
        supply_value: Decimal,
        borrow_value: Decimal,
        borrow_interest: Decimal,
    ) -> CalcResult<Self> {
        if supply_value.is_zero() {
            return Err(CalcError::DivisionByZero {
                context: "supply value",
            });
        }

        let ratio = borrow_interest
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(supply_value))
            .ok_or(CalcError::Overflow {
                context: "borrow APY",
            })?;

        // Keep a zero cost as plain zero rather than -0
        let borrow_apy = if ratio.is_zero() { Decimal::ZERO } else { -ratio };

        Ok(Self {
            supply_value,
            borrow_value,
            borrow_interest,
            borrow_apy,
        })
    }

    /// Supply value net of debt
    pub fn equity_value(&self) -> Decimal {
        self.supply_value - self.borrow_value
    }

    /// Borrow value over supply value, as a fraction (10% = 0.10)
    pub fn debt_ratio(&self) -> CalcResult<Decimal> {
        self.borrow_value
            .checked_div(self.supply_value)
            .ok_or(CalcError::DivisionByZero {
                context: "supply value",
            })
    }

    /// Position value over equity.
    ///
    /// Negative once debt exceeds collateral.
    pub fn leverage_ratio(&self) -> CalcResult<Decimal> {
        let equity = self.equity_value();
        if equity.is_zero() {
            return Err(CalcError::DivisionByZero { context: "equity" });
        }
        self.supply_value.checked_div(equity).ok_or(CalcError::Overflow {
            context: "leverage ratio",
        })
    }

    pub(crate) fn round_apy(mut self, scale: Option<u32>) -> Self {
        if let Some(dp) = scale {
            self.borrow_apy = self.borrow_apy.round_dp(dp);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_totals() {
        let breakdown = BorrowApyBreakdown::from_totals(dec!(1000), dec!(500), dec!(25)).unwrap();
        assert_eq!(breakdown.borrow_apy, dec!(-2.5));
    }

    #[test]
    fn test_zero_interest_is_zero_apy() {
        let breakdown = BorrowApyBreakdown::from_totals(dec!(1000), dec!(0), dec!(0)).unwrap();
        assert_eq!(breakdown.borrow_apy, Decimal::ZERO);
        assert!(!breakdown.borrow_apy.is_sign_negative());
    }

    #[test]
    fn test_zero_supply_fails() {
        let result = BorrowApyBreakdown::from_totals(Decimal::ZERO, dec!(10), dec!(1));
        assert!(matches!(
            result,
            Err(CalcError::DivisionByZero {
                context: "supply value"
            })
        ));
    }

    #[test]
    fn test_metrics() {
        let breakdown = BorrowApyBreakdown::from_totals(dec!(3000), dec!(2000), dec!(100)).unwrap();

        assert_eq!(breakdown.equity_value(), dec!(1000));
        // 2000 / 3000
        assert_eq!(breakdown.debt_ratio().unwrap().round_dp(4), dec!(0.6667));
        assert_eq!(breakdown.leverage_ratio().unwrap(), dec!(3));
    }

    #[test]
    fn test_leverage_undefined_at_zero_equity() {
        let breakdown = BorrowApyBreakdown::from_totals(dec!(500), dec!(500), dec!(10)).unwrap();
        assert!(matches!(
            breakdown.leverage_ratio(),
            Err(CalcError::DivisionByZero { context: "equity" })
        ));
    }

    #[test]
    fn test_underwater_leverage_is_negative() {
        let breakdown = BorrowApyBreakdown::from_totals(dec!(500), dec!(600), dec!(10)).unwrap();
        assert_eq!(breakdown.leverage_ratio().unwrap(), dec!(-5));
    }

    #[test]
    fn test_round_apy() {
        let breakdown = BorrowApyBreakdown::from_totals(dec!(3), dec!(1), dec!(0.1))
            .unwrap()
            .round_apy(Some(4));
        // -(0.1 * 100 / 3) = -3.3333...
        assert_eq!(breakdown.borrow_apy, dec!(-3.3333));
    }
}
