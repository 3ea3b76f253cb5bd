//! 布卷分配配置模型

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PedidoError, Result};

/// 布卷分配參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// 可用布卷寬度（公尺，遞增）
    pub roll_widths: Vec<Decimal>,

    /// 整卷門檻（公尺）：缺口達到此值時改為整卷採購
    pub roll_threshold: Decimal,

    /// 整卷長度（公尺）
    pub full_roll_length: Decimal,

    /// 整卷採購的數量規則
    pub roll_order_policy: RollOrderPolicy,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            roll_widths: vec![Decimal::new(200, 2), Decimal::new(250, 2), Decimal::new(300, 2)],
            roll_threshold: Decimal::from(22),
            full_roll_length: Decimal::from(30),
            roll_order_policy: RollOrderPolicy::SingleRoll,
        }
    }
}

impl AllocationConfig {
    /// 創建預設配置（2.00 / 2.50 / 3.00，門檻 22，整卷 30）
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置布卷寬度（自動排序）
    pub fn with_roll_widths(mut self, mut widths: Vec<Decimal>) -> Self {
        widths.sort();
        self.roll_widths = widths;
        self
    }

    /// 建構器模式：設置整卷門檻
    pub fn with_roll_threshold(mut self, threshold: Decimal) -> Self {
        self.roll_threshold = threshold;
        self
    }

    /// 建構器模式：設置整卷長度
    pub fn with_full_roll_length(mut self, length: Decimal) -> Self {
        self.full_roll_length = length;
        self
    }

    /// 建構器模式：設置整卷數量規則
    pub fn with_roll_order_policy(mut self, policy: RollOrderPolicy) -> Self {
        self.roll_order_policy = policy;
        self
    }

    /// 驗證配置
    ///
    /// 任何錯誤都會讓引擎拒絕執行，而不是產生空的布卷選擇。
    pub fn validate(&self) -> Result<()> {
        if self.roll_widths.is_empty() {
            return Err(PedidoError::EmptyRollWidths);
        }

        for pair in self.roll_widths.windows(2) {
            if pair[0] == pair[1] {
                return Err(PedidoError::DuplicateRollWidth(pair[1]));
            }
            if pair[0] > pair[1] {
                return Err(PedidoError::InvalidInput(format!(
                    "布卷寬度必須遞增: {} 在 {} 之前",
                    pair[0], pair[1]
                )));
            }
        }

        if let Some(&width) = self.roll_widths.iter().find(|w| **w <= Decimal::ZERO) {
            return Err(PedidoError::InvalidRollWidth(width));
        }

        if self.roll_threshold <= Decimal::ZERO {
            return Err(PedidoError::InvalidThreshold(self.roll_threshold));
        }

        if self.full_roll_length <= Decimal::ZERO {
            return Err(PedidoError::InvalidRollLength(self.full_roll_length));
        }

        Ok(())
    }

    /// 最寬的布卷
    pub fn widest_roll(&self) -> Option<Decimal> {
        self.roll_widths.last().copied()
    }

    /// 依規則計算整卷數量
    pub fn rolls_for_shortfall(&self, shortfall: Decimal) -> u32 {
        match self.roll_order_policy {
            RollOrderPolicy::SingleRoll => 1,
            RollOrderPolicy::CoverShortfall => {
                if self.full_roll_length <= Decimal::ZERO {
                    return 1;
                }
                (shortfall / self.full_roll_length)
                    .ceil()
                    .to_u32()
                    .unwrap_or(u32::MAX)
                    .max(1)
            }
        }
    }
}

/// 整卷採購數量規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollOrderPolicy {
    /// 不論缺口多大，一律訂購一卷（現行業務規則，待確認）
    SingleRoll,

    /// 訂購足以覆蓋缺口的卷數：ceil(缺口 / 整卷長度)
    CoverShortfall,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AllocationConfig::new();

        assert_eq!(config.roll_widths, vec![dec!(2.00), dec!(2.50), dec!(3.00)]);
        assert_eq!(config.roll_threshold, dec!(22));
        assert_eq!(config.full_roll_length, dec!(30));
        assert_eq!(config.roll_order_policy, RollOrderPolicy::SingleRoll);
        assert_eq!(config.widest_roll(), Some(dec!(3.00)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_sorts_widths() {
        let config = AllocationConfig::new()
            .with_roll_widths(vec![dec!(3.20), dec!(1.50), dec!(2.80)])
            .with_roll_threshold(dec!(15))
            .with_full_roll_length(dec!(50));

        assert_eq!(config.roll_widths, vec![dec!(1.50), dec!(2.80), dec!(3.20)]);
        assert_eq!(config.widest_roll(), Some(dec!(3.20)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_roll_widths_rejected() {
        let config = AllocationConfig::new().with_roll_widths(vec![]);
        assert!(matches!(config.validate(), Err(PedidoError::EmptyRollWidths)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let duplicated = AllocationConfig::new().with_roll_widths(vec![dec!(2), dec!(2.00)]);
        assert!(matches!(
            duplicated.validate(),
            Err(PedidoError::DuplicateRollWidth(_))
        ));

        let zero_width = AllocationConfig::new().with_roll_widths(vec![dec!(0), dec!(2)]);
        assert!(matches!(
            zero_width.validate(),
            Err(PedidoError::InvalidRollWidth(_))
        ));

        let threshold = AllocationConfig::new().with_roll_threshold(dec!(0));
        assert!(matches!(
            threshold.validate(),
            Err(PedidoError::InvalidThreshold(_))
        ));

        let length = AllocationConfig::new().with_full_roll_length(dec!(-30));
        assert!(matches!(
            length.validate(),
            Err(PedidoError::InvalidRollLength(_))
        ));
    }

    #[test]
    fn test_unsorted_widths_from_json_rejected() {
        let mut config = AllocationConfig::new();
        config.roll_widths = vec![dec!(3.00), dec!(2.00)];
        assert!(matches!(config.validate(), Err(PedidoError::InvalidInput(_))));
    }

    #[test]
    fn test_rolls_for_shortfall() {
        let single = AllocationConfig::new();
        assert_eq!(single.rolls_for_shortfall(dec!(35)), 1);
        assert_eq!(single.rolls_for_shortfall(dec!(95)), 1);

        let cover = AllocationConfig::new().with_roll_order_policy(RollOrderPolicy::CoverShortfall);
        assert_eq!(cover.rolls_for_shortfall(dec!(22)), 1);
        assert_eq!(cover.rolls_for_shortfall(dec!(30)), 1);
        assert_eq!(cover.rolls_for_shortfall(dec!(35)), 2);
        assert_eq!(cover.rolls_for_shortfall(dec!(90.5)), 4);

        // 卷數超出 u32 時飽和，不會退回一卷
        let tiny_roll = AllocationConfig::new()
            .with_full_roll_length(dec!(0.0000001))
            .with_roll_order_policy(RollOrderPolicy::CoverShortfall);
        assert_eq!(tiny_roll.rolls_for_shortfall(dec!(1000000)), u32::MAX);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "roll_widths": ["2.00", "2.80"],
            "roll_threshold": "20",
            "full_roll_length": "25",
            "roll_order_policy": "cover_shortfall"
        }"#;
        let config: AllocationConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.roll_widths, vec![dec!(2.00), dec!(2.80)]);
        assert_eq!(config.roll_order_policy, RollOrderPolicy::CoverShortfall);
        assert!(config.validate().is_ok());
    }
}
