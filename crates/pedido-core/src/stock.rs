//! 布卷庫存帳

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{PedidoError, Result};

/// 單一寬度的庫存狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockEntry {
    /// 剩餘公尺
    pub remaining: Decimal,

    /// 本次執行已使用公尺
    pub used: Decimal,
}

/// 庫存帳（以布卷寬度為鍵，所有布料共用）
///
/// 每次執行前必須 `clone()` 一份，執行期間原地扣減。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLedger {
    entries: BTreeMap<Decimal, StockEntry>,
}

impl StockLedger {
    /// 創建空的庫存帳
    pub fn new() -> Self {
        Self::default()
    }

    /// 由庫存快照建立
    pub fn from_snapshot<I>(snapshot: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Decimal, Decimal)>,
    {
        let mut ledger = Self::new();
        for (roll_width, meters) in snapshot {
            ledger.add_stock(roll_width, meters)?;
        }
        Ok(ledger)
    }

    /// 增加某寬度的庫存
    pub fn add_stock(&mut self, roll_width: Decimal, meters: Decimal) -> Result<()> {
        if meters < Decimal::ZERO {
            return Err(PedidoError::InvalidStock { roll_width, meters });
        }
        let entry = self.entries.entry(roll_width).or_default();
        entry.remaining = entry
            .remaining
            .checked_add(meters)
            .ok_or(PedidoError::InvalidStock { roll_width, meters })?;
        Ok(())
    }

    /// 查詢剩餘庫存，無記錄視為 0
    pub fn balance(&self, roll_width: Decimal) -> Decimal {
        self.entries
            .get(&roll_width)
            .map(|e| e.remaining)
            .unwrap_or(Decimal::ZERO)
    }

    /// 查詢本次已使用量
    pub fn used(&self, roll_width: Decimal) -> Decimal {
        self.entries
            .get(&roll_width)
            .map(|e| e.used)
            .unwrap_or(Decimal::ZERO)
    }

    /// 扣減庫存，最多扣到 0，回傳實際扣減量
    pub fn deduct(&mut self, roll_width: Decimal, meters: Decimal) -> Decimal {
        if meters <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let Some(entry) = self.entries.get_mut(&roll_width) else {
            return Decimal::ZERO;
        };

        let deducted = meters.min(entry.remaining);
        entry.remaining -= deducted;
        entry.used += deducted;
        deducted
    }

    /// 取得單一寬度的完整狀態
    pub fn entry(&self, roll_width: Decimal) -> Option<&StockEntry> {
        self.entries.get(&roll_width)
    }

    /// 最終剩餘庫存（供報表稽核）
    pub fn snapshot(&self) -> BTreeMap<Decimal, Decimal> {
        self.entries
            .iter()
            .map(|(width, entry)| (*width, entry.remaining))
            .collect()
    }

    /// 所有寬度的剩餘總和
    pub fn total_remaining(&self) -> Decimal {
        self.entries
            .values()
            .fold(Decimal::ZERO, |total, e| total.saturating_add(e.remaining))
    }

    /// 遍歷所有寬度
    pub fn iter(&self) -> impl Iterator<Item = (&Decimal, &StockEntry)> {
        self.entries.iter()
    }
}
