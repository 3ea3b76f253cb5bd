//! # Pedido Calculation Engine
//!
//! 布卷分配與採購彙總引擎（Lista de Pedido）
//!
//! 流程：原始裁片 → 正規化 → 方向判定 → 選卷（扣減庫存帳）→ 彙總 → 採購決策

pub mod calculator;
pub mod consolidation;
pub mod normalizer;
pub mod orientation;
pub mod purchase;
pub mod selector;

// Re-export 主要類型
pub use calculator::RollAllocator;
pub use consolidation::ConsolidationAggregator;
pub use normalizer::PieceNormalizer;
pub use orientation::{Orientation, OrientationResolver};
pub use purchase::{PurchaseDecisionEngine, PurchaseSummary};
pub use selector::{RollSelection, RollSelector};

use pedido_core::{ConsolidatedRequirement, PieceAllocationRecord, StockLedger};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 單張生產單的分配結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// 逐片分配記錄（保持輸入順序）
    pub piece_allocations: Vec<PieceAllocationRecord>,

    /// 彙總採購需求（依布料類型排序）
    pub consolidated_requirements: Vec<ConsolidatedRequirement>,

    /// 執行後的庫存帳
    pub stock_ledger: StockLedger,

    /// 採購總覽
    pub summary: PurchaseSummary,

    /// 警告信息
    pub warnings: Vec<AllocationWarning>,
}

impl AllocationResult {
    /// 最終剩餘庫存（寬度 → 公尺）
    pub fn stock_ledger_final(&self) -> BTreeMap<Decimal, Decimal> {
        self.stock_ledger.snapshot()
    }

    /// 需要採購的彙總項
    pub fn purchases(&self) -> impl Iterator<Item = &ConsolidatedRequirement> {
        self.consolidated_requirements
            .iter()
            .filter(|r| r.needs_purchase())
    }

    /// 寬度不符（改用最寬布卷）的裁片
    pub fn width_mismatches(&self) -> impl Iterator<Item = &PieceAllocationRecord> {
        self.piece_allocations.iter().filter(|r| r.width_mismatch)
    }
}

/// 分配警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationWarning {
    pub piece_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl AllocationWarning {
    pub fn new(piece_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            piece_id,
            message,
            severity,
        }
    }

    pub fn info(piece_id: String, message: String) -> Self {
        Self::new(piece_id, message, WarningSeverity::Info)
    }

    pub fn warning(piece_id: String, message: String) -> Self {
        Self::new(piece_id, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
