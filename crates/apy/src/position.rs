//! Position - supplied collateral, borrows and an optional LP stake
//!
//! Each supply and borrow is a self-contained record, so a price, an amount
//! and an APY can never drift onto the wrong token. Callers holding the
//! usual parallel arrays go through [`Position::from_parallel`], which
//! rejects arrays of different lengths.

use homora_core::{RawAmount, TokenAddress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, CalcResult};

/// A token supplied as collateral
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyEntry {
    pub token: TokenAddress,
    pub amount: RawAmount,
}

/// A borrowed token with its market borrow rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowEntry {
    pub token: TokenAddress,
    pub amount: RawAmount,
    /// Annual borrow rate as a fraction (0.05 = 5%)
    pub borrow_apy: Decimal,
}

/// LP tokens staked alongside the supplied collateral
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpStake {
    pub token: TokenAddress,
    pub amount: RawAmount,
}

impl LpStake {
    /// Counted toward supply value only with a non-zero amount and a configured token
    pub fn is_active(&self) -> bool {
        !self.amount.is_zero() && !self.token.is_zero()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    supplies: Vec<SupplyEntry>,
    borrows: Vec<BorrowEntry>,
    #[serde(default)]
    lp_stake: Option<LpStake>,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from index-aligned arrays sharing one token list.
    ///
    /// `supplies[i]`, `borrow_amounts[i]` and `borrow_apys[i]` all refer to
    /// `tokens[i]`; every array must have the same length as `tokens`.
    pub fn from_parallel(
        supplies: &[RawAmount],
        tokens: &[TokenAddress],
        borrow_amounts: &[RawAmount],
        borrow_apys: &[Decimal],
    ) -> CalcResult<Self> {
        let expected = tokens.len();
        for (field, actual) in [
            ("supplies", supplies.len()),
            ("borrow_amounts", borrow_amounts.len()),
            ("borrow_apys", borrow_apys.len()),
        ] {
            if actual != expected {
                return Err(CalcError::LengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }

        let supplies = tokens
            .iter()
            .zip(supplies)
            .map(|(token, &amount)| SupplyEntry {
                token: token.clone(),
                amount,
            })
            .collect();

        let borrows = tokens
            .iter()
            .zip(borrow_amounts.iter().zip(borrow_apys))
            .map(|(token, (&amount, &borrow_apy))| BorrowEntry {
                token: token.clone(),
                amount,
                borrow_apy,
            })
            .collect();

        Ok(Self {
            supplies,
            borrows,
            lp_stake: None,
        })
    }

    pub fn with_supply(mut self, token: TokenAddress, amount: RawAmount) -> Self {
        self.supplies.push(SupplyEntry { token, amount });
        self
    }

    pub fn with_borrow(mut self, token: TokenAddress, amount: RawAmount, borrow_apy: Decimal) -> Self {
        self.borrows.push(BorrowEntry {
            token,
            amount,
            borrow_apy,
        });
        self
    }

    pub fn with_lp_stake(mut self, token: TokenAddress, amount: RawAmount) -> Self {
        self.lp_stake = Some(LpStake { token, amount });
        self
    }

    pub fn supplies(&self) -> &[SupplyEntry] {
        &self.supplies
    }

    pub fn borrows(&self) -> &[BorrowEntry] {
        &self.borrows
    }

    pub fn lp_stake(&self) -> Option<&LpStake> {
        self.lp_stake.as_ref()
    }

    /// The LP stake, if it counts toward supply value
    pub fn active_lp_stake(&self) -> Option<&LpStake> {
        self.lp_stake.as_ref().filter(|lp| lp.is_active())
    }

    pub fn is_empty(&self) -> bool {
        self.supplies.is_empty() && self.borrows.is_empty() && self.active_lp_stake().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn token(n: u8) -> TokenAddress {
        format!("0x{:040x}", n).parse().unwrap()
    }

    #[test]
    fn test_from_parallel_aligns_records() {
        let position = Position::from_parallel(
            &[RawAmount::from_units(100), RawAmount::from_units(200)],
            &[token(1), token(2)],
            &[RawAmount::from_units(10), RawAmount::ZERO],
            &[dec!(0.05), dec!(0.08)],
        )
        .unwrap();

        assert_eq!(position.supplies().len(), 2);
        assert_eq!(position.supplies()[1].token, token(2));
        assert_eq!(position.supplies()[1].amount, RawAmount::from_units(200));

        assert_eq!(position.borrows()[0].token, token(1));
        assert_eq!(position.borrows()[0].amount, RawAmount::from_units(10));
        assert_eq!(position.borrows()[1].borrow_apy, dec!(0.08));
        assert!(position.lp_stake().is_none());
    }

    #[test]
    fn test_from_parallel_rejects_short_apys() {
        // 2 supplies, 2 borrows, 1 borrow APY
        let result = Position::from_parallel(
            &[RawAmount::from_units(1), RawAmount::from_units(2)],
            &[token(1), token(2)],
            &[RawAmount::from_units(1), RawAmount::from_units(2)],
            &[dec!(0.05)],
        );

        assert!(matches!(
            result,
            Err(CalcError::LengthMismatch {
                field: "borrow_apys",
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_from_parallel_rejects_extra_supplies() {
        let result = Position::from_parallel(
            &[RawAmount::from_units(1), RawAmount::from_units(2)],
            &[token(1)],
            &[RawAmount::from_units(1)],
            &[dec!(0.05)],
        );

        assert!(matches!(
            result,
            Err(CalcError::LengthMismatch { field: "supplies", .. })
        ));
    }

    #[test]
    fn test_from_parallel_empty() {
        let position = Position::from_parallel(&[], &[], &[], &[]).unwrap();
        assert!(position.is_empty());
    }

    #[test]
    fn test_lp_stake_activity() {
        let active = LpStake {
            token: token(9),
            amount: RawAmount::from_units(5),
        };
        assert!(active.is_active());

        let zero_amount = LpStake {
            token: token(9),
            amount: RawAmount::ZERO,
        };
        assert!(!zero_amount.is_active());

        let unconfigured = LpStake {
            token: TokenAddress::zero(),
            amount: RawAmount::from_units(5),
        };
        assert!(!unconfigured.is_active());

        let position = Position::new().with_lp_stake(TokenAddress::zero(), RawAmount::from_units(5));
        assert!(position.lp_stake().is_some());
        assert!(position.active_lp_stake().is_none());
        assert!(position.is_empty());
    }

    #[test]
    fn test_position_json() {
        let json = r#"{
            "supplies": [{ "token": "0x0000000000000000000000000000000000000001", "amount": "1000000000" }],
            "borrows": [{ "token": "0x0000000000000000000000000000000000000001", "amount": "500000000", "borrow_apy": "0.05" }]
        }"#;

        let position: Position = serde_json::from_str(json).unwrap();

        assert_eq!(position.supplies()[0].token, token(1));
        assert_eq!(position.borrows()[0].borrow_apy, dec!(0.05));
        assert!(position.lp_stake().is_none());
    }
}
