//! 裁片方向判定

use pedido_core::Piece;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 方向判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orientation {
    /// 必須放進布卷寬度的尺寸
    pub effective_width: Decimal,
    /// 沿布卷長度消耗的公尺
    pub linear_consumption: Decimal,
}

/// 方向判定器
pub struct OrientationResolver;

impl OrientationResolver {
    /// 旋轉時取高，否則取寬；線性用量與有效寬度取同一尺寸。
    // NOTE: 用量不是取另一個尺寸，這是現行報表的實際算法，變更前需與業務確認
    pub fn resolve(piece: &Piece) -> Orientation {
        let dimension = if piece.rotated {
            piece.height
        } else {
            piece.width
        };

        Orientation {
            effective_width: dimension,
            linear_consumption: dimension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedido_core::FabricIdentity;
    use rust_decimal_macros::dec;

    fn piece(rotated: bool) -> Piece {
        Piece::new(
            "P-1",
            dec!(1.8),
            dec!(2.3),
            FabricIdentity::new("Screen", "SC-5", "Blanco"),
        )
        .with_rotated(rotated)
    }

    #[test]
    fn test_not_rotated_uses_width() {
        let orientation = OrientationResolver::resolve(&piece(false));
        assert_eq!(orientation.effective_width, dec!(1.8));
        assert_eq!(orientation.linear_consumption, dec!(1.8));
    }

    #[test]
    fn test_rotated_uses_height() {
        let orientation = OrientationResolver::resolve(&piece(true));
        assert_eq!(orientation.effective_width, dec!(2.3));
        assert_eq!(orientation.linear_consumption, dec!(2.3));
    }
}
