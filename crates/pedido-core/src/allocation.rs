//! 分配結果與採購需求模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::piece::FabricIdentity;

/// 單一裁片的布卷分配記錄（建立後不再修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceAllocationRecord {
    /// 裁片ID
    pub piece_id: String,

    /// 安裝位置
    pub location: String,

    /// 產品名稱
    pub product: String,

    /// 布料識別
    pub fabric: FabricIdentity,

    /// 有效寬度（必須放得進布卷寬度的尺寸）
    pub effective_width: Decimal,

    /// 線性用量（ml）
    pub linear_consumption: Decimal,

    /// 選定的布卷寬度
    pub roll_width: Decimal,

    /// 是否使用庫存
    pub stock_used: bool,

    /// 從庫存扣減的公尺
    pub stock_drawn: Decimal,

    /// 扣減後該寬度的剩餘庫存
    pub remaining_stock: Decimal,

    /// 沒有任何布卷夠寬，改用最寬布卷
    pub width_mismatch: bool,
}

/// 彙總鍵：布料類型、型號、顏色、布卷寬度
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConsolidationKey {
    pub fabric: FabricIdentity,
    pub roll_width: Decimal,
}

impl ConsolidationKey {
    pub fn new(fabric: FabricIdentity, roll_width: Decimal) -> Self {
        Self { fabric, roll_width }
    }
}

/// 採購決策
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseDecision {
    /// 庫存足夠，不需採購
    None,
    /// 按公尺採購
    ByMeter,
    /// 整卷採購
    ByRoll,
}

impl std::fmt::Display for PurchaseDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PurchaseDecision::None => "none",
            PurchaseDecision::ByMeter => "by_meter",
            PurchaseDecision::ByRoll => "by_roll",
        };
        f.write_str(label)
    }
}

/// 彙總後的採購需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRequirement {
    /// 布料識別
    pub fabric: FabricIdentity,

    /// 布卷寬度
    pub roll_width: Decimal,

    /// 組內裁片數
    pub piece_count: usize,

    /// 總需求公尺
    pub total_meters_required: Decimal,

    /// 由庫存滿足的公尺
    pub stock_meters_consumed: Decimal,

    /// 缺口
    pub shortfall: Decimal,

    /// 採購決策
    pub decision: PurchaseDecision,

    /// 採購數量：按公尺時為公尺數，整卷時為卷數
    pub quantity: Decimal,

    /// 實際訂購公尺（整卷時為卷數乘以整卷長度）
    pub purchase_meters: Decimal,
}

impl ConsolidatedRequirement {
    /// 創建尚未決策的需求
    pub fn new(key: ConsolidationKey) -> Self {
        Self {
            fabric: key.fabric,
            roll_width: key.roll_width,
            piece_count: 0,
            total_meters_required: Decimal::ZERO,
            stock_meters_consumed: Decimal::ZERO,
            shortfall: Decimal::ZERO,
            decision: PurchaseDecision::None,
            quantity: Decimal::ZERO,
            purchase_meters: Decimal::ZERO,
        }
    }

    /// 累加一筆分配記錄（超出 Decimal 範圍時飽和，不會 panic）
    pub fn add_allocation(&mut self, record: &PieceAllocationRecord) {
        self.piece_count += 1;
        self.total_meters_required = self
            .total_meters_required
            .saturating_add(record.linear_consumption);
        self.stock_meters_consumed = self.stock_meters_consumed.saturating_add(record.stock_drawn);
    }

    pub fn key(&self) -> ConsolidationKey {
        ConsolidationKey::new(self.fabric.clone(), self.roll_width)
    }

    /// 是否需要採購
    pub fn needs_purchase(&self) -> bool {
        self.decision != PurchaseDecision::None
    }
}
