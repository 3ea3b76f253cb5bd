//! 布卷寬度選擇

use pedido_core::{PedidoError, StockLedger};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orientation::Orientation;

/// 選卷結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSelection {
    /// 選定的布卷寬度
    pub roll_width: Decimal,
    /// 是否使用庫存
    pub stock_used: bool,
    /// 從庫存扣減的公尺
    pub stock_drawn: Decimal,
    /// 扣減後該寬度的剩餘庫存
    pub remaining_stock: Decimal,
    /// 沒有布卷夠寬，改用最寬布卷
    pub width_mismatch: bool,
}

/// 布卷選擇器
#[derive(Debug, Clone)]
pub struct RollSelector {
    /// 遞增排序的布卷寬度（非空）
    roll_widths: Vec<Decimal>,
}

impl RollSelector {
    /// 創建選擇器，寬度必須已遞增排序
    pub fn new(roll_widths: Vec<Decimal>) -> pedido_core::Result<Self> {
        if roll_widths.is_empty() {
            return Err(PedidoError::EmptyRollWidths);
        }
        Ok(Self { roll_widths })
    }

    /// 為單一裁片選擇布卷
    ///
    /// 1. 依寬度遞增，第一個夠寬且庫存足夠的寬度：使用並扣減庫存
    /// 2. 否則使用第一個夠寬的寬度（不動庫存）
    /// 3. 沒有任何寬度夠寬：使用最寬的布卷並標記寬度不符
    pub fn select(&self, orientation: &Orientation, ledger: &mut StockLedger) -> RollSelection {
        let mut fallback: Option<Decimal> = None;

        for &width in &self.roll_widths {
            if width < orientation.effective_width {
                continue;
            }

            if ledger.balance(width) >= orientation.linear_consumption {
                let drawn = ledger.deduct(width, orientation.linear_consumption);
                return RollSelection {
                    roll_width: width,
                    stock_used: true,
                    stock_drawn: drawn,
                    remaining_stock: ledger.balance(width),
                    width_mismatch: false,
                };
            }

            if fallback.is_none() {
                fallback = Some(width);
            }
        }

        match fallback {
            Some(width) => RollSelection {
                roll_width: width,
                stock_used: false,
                stock_drawn: Decimal::ZERO,
                remaining_stock: ledger.balance(width),
                width_mismatch: false,
            },
            None => {
                let widest = self.widest();
                tracing::warn!(
                    "有效寬度 {} 超過所有布卷，改用最寬布卷 {}",
                    orientation.effective_width,
                    widest
                );
                RollSelection {
                    roll_width: widest,
                    stock_used: false,
                    stock_drawn: Decimal::ZERO,
                    remaining_stock: ledger.balance(widest),
                    width_mismatch: true,
                }
            }
        }
    }

    fn widest(&self) -> Decimal {
        // new() 保證非空
        self.roll_widths[self.roll_widths.len() - 1]
    }
}
