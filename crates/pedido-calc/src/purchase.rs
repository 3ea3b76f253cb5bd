//! 採購決策

use pedido_core::{AllocationConfig, ConsolidatedRequirement, PurchaseDecision};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單一缺口的採購結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub decision: PurchaseDecision,
    /// 按公尺時為公尺數，整卷時為卷數
    pub quantity: Decimal,
    /// 實際訂購公尺
    pub purchase_meters: Decimal,
}

/// 採購決策器
pub struct PurchaseDecisionEngine;

impl PurchaseDecisionEngine {
    /// 依缺口決定採購方式
    ///
    /// - 缺口為 0：不採購
    /// - 缺口小於整卷門檻：按公尺採購缺口
    /// - 其他：整卷採購，卷數依 [`pedido_core::RollOrderPolicy`]
    pub fn decide(shortfall: Decimal, config: &AllocationConfig) -> PurchaseOutcome {
        if shortfall <= Decimal::ZERO {
            return PurchaseOutcome {
                decision: PurchaseDecision::None,
                quantity: Decimal::ZERO,
                purchase_meters: Decimal::ZERO,
            };
        }

        if shortfall < config.roll_threshold {
            return PurchaseOutcome {
                decision: PurchaseDecision::ByMeter,
                quantity: shortfall,
                purchase_meters: shortfall,
            };
        }

        let rolls = Decimal::from(config.rolls_for_shortfall(shortfall));
        PurchaseOutcome {
            decision: PurchaseDecision::ByRoll,
            quantity: rolls,
            purchase_meters: rolls.saturating_mul(config.full_roll_length),
        }
    }

    /// 計算缺口並寫入決策
    pub fn apply(requirement: &mut ConsolidatedRequirement, config: &AllocationConfig) {
        let shortfall = requirement
            .total_meters_required
            .saturating_sub(requirement.stock_meters_consumed)
            .max(Decimal::ZERO);
        let outcome = Self::decide(shortfall, config);

        requirement.shortfall = shortfall;
        requirement.decision = outcome.decision;
        requirement.quantity = outcome.quantity;
        requirement.purchase_meters = outcome.purchase_meters;

        if outcome.decision != PurchaseDecision::None {
            tracing::debug!(
                "採購 {} 寬 {}: 缺口 {}，{} {}",
                requirement.fabric,
                requirement.roll_width,
                shortfall,
                outcome.decision,
                outcome.quantity
            );
        }
    }

    /// 對所有彙總項寫入決策
    pub fn apply_all(requirements: &mut [ConsolidatedRequirement], config: &AllocationConfig) {
        for requirement in requirements.iter_mut() {
            Self::apply(requirement, config);
        }
    }
}

/// 採購總覽
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseSummary {
    /// 總需求公尺
    pub total_meters_required: Decimal,
    /// 由庫存滿足的公尺
    pub stock_meters_consumed: Decimal,
    /// 總缺口
    pub total_shortfall: Decimal,
    /// 按公尺採購的公尺數
    pub meters_by_meter: Decimal,
    /// 整卷卷數
    pub rolls: Decimal,
    /// 整卷採購的公尺數
    pub meters_by_roll: Decimal,
}

impl PurchaseSummary {
    pub fn from_requirements(requirements: &[ConsolidatedRequirement]) -> Self {
        let mut summary = Self::default();

        // 以飽和加法累計，極端資料不會中斷報表
        for requirement in requirements {
            summary.total_meters_required = summary
                .total_meters_required
                .saturating_add(requirement.total_meters_required);
            summary.stock_meters_consumed = summary
                .stock_meters_consumed
                .saturating_add(requirement.stock_meters_consumed);
            summary.total_shortfall = summary.total_shortfall.saturating_add(requirement.shortfall);

            match requirement.decision {
                PurchaseDecision::None => {}
                PurchaseDecision::ByMeter => {
                    summary.meters_by_meter =
                        summary.meters_by_meter.saturating_add(requirement.purchase_meters);
                }
                PurchaseDecision::ByRoll => {
                    summary.rolls = summary.rolls.saturating_add(requirement.quantity);
                    summary.meters_by_roll =
                        summary.meters_by_roll.saturating_add(requirement.purchase_meters);
                }
            }
        }

        summary
    }

    /// 總訂購公尺
    pub fn total_purchase_meters(&self) -> Decimal {
        self.meters_by_meter.saturating_add(self.meters_by_roll)
    }
}
