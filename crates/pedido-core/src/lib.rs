//! # Pedido Core
//!
//! 裁片、布卷、庫存與採購需求的核心資料模型

pub mod allocation;
pub mod config;
pub mod piece;
pub mod stock;

// Re-export 主要類型
pub use allocation::{ConsolidatedRequirement, ConsolidationKey, PieceAllocationRecord, PurchaseDecision};
pub use config::{AllocationConfig, RollOrderPolicy};
pub use piece::{FabricIdentity, Piece};
pub use stock::{StockEntry, StockLedger};

use rust_decimal::Decimal;

/// 布卷分配錯誤類型
///
/// 只用於配置或呼叫端的程式錯誤；訂單資料本身的缺漏一律降級為警告。
#[derive(Debug, thiserror::Error)]
pub enum PedidoError {
    #[error("布卷寬度清單不可為空")]
    EmptyRollWidths,

    #[error("無效的布卷寬度: {0}")]
    InvalidRollWidth(Decimal),

    #[error("重複的布卷寬度: {0}")]
    DuplicateRollWidth(Decimal),

    #[error("無效的整卷門檻: {0}")]
    InvalidThreshold(Decimal),

    #[error("無效的整卷長度: {0}")]
    InvalidRollLength(Decimal),

    #[error("無效的庫存數量: 寬度 {roll_width} 的庫存 {meters}")]
    InvalidStock { roll_width: Decimal, meters: Decimal },

    #[error("無效的輸入: {0}")]
    InvalidInput(String),

    #[error("JSON 錯誤: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PedidoError>;
