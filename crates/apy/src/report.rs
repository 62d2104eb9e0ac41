//! Position report for display and export

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateApy;
use crate::breakdown::BorrowApyBreakdown;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReport {
    pub breakdown: BorrowApyBreakdown,
    pub equity_value: Decimal,
    pub debt_ratio: Decimal,
    /// None when equity is zero
    pub leverage_ratio: Option<Decimal>,
    /// Present when pool yields were supplied and leverage is defined
    pub aggregate: Option<AggregateApy>,
}

impl PositionReport {
    /// Net yield in percent: the aggregate APY when known, else the borrow APY alone
    pub fn net_apy(&self) -> Decimal {
        self.aggregate
            .map(|apy| apy.total)
            .unwrap_or(self.breakdown.borrow_apy)
    }
}
