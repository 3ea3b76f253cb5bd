//! 裁片模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 布料識別（類型、型號、顏色）
///
/// 以值比較，作為所有彙總鍵的一部分。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FabricIdentity {
    /// 布料類型（Screen、Blackout、Sheer…）
    pub fabric_type: String,

    /// 型號
    pub model: String,

    /// 顏色
    pub color: String,
}

impl FabricIdentity {
    pub fn new(
        fabric_type: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            fabric_type: fabric_type.into(),
            model: model.into(),
            color: color.into(),
        }
    }
}

impl std::fmt::Display for FabricIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.fabric_type, self.model, self.color)
    }
}

/// 生產單裁片（不可變輸入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// 裁片ID
    pub id: String,

    /// 安裝位置（ubicación）
    pub location: String,

    /// 產品名稱
    pub product: String,

    /// 所屬明細行（partida）
    pub line_item: Option<String>,

    /// 寬（公尺）
    pub width: Decimal,

    /// 高（公尺）
    pub height: Decimal,

    /// 布料識別
    pub fabric: FabricIdentity,

    /// 是否旋轉裁切（由呼叫端提供）
    pub rotated: bool,
}

impl Piece {
    /// 創建新的裁片
    pub fn new(id: impl Into<String>, width: Decimal, height: Decimal, fabric: FabricIdentity) -> Self {
        Self {
            id: id.into(),
            location: String::new(),
            product: String::new(),
            line_item: None,
            width,
            height,
            fabric,
            rotated: false,
        }
    }

    /// 建構器模式：設置位置
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// 建構器模式：設置產品
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    /// 建構器模式：設置明細行
    pub fn with_line_item(mut self, line_item: impl Into<String>) -> Self {
        self.line_item = Some(line_item.into());
        self
    }

    /// 建構器模式：設置旋轉
    pub fn with_rotated(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }
}
