//! 布卷分配主計算器

use pedido_core::{AllocationConfig, Piece, PieceAllocationRecord, StockLedger};
use rayon::prelude::*;
use serde_json::Value;

use crate::consolidation::ConsolidationAggregator;
use crate::normalizer::PieceNormalizer;
use crate::orientation::OrientationResolver;
use crate::purchase::{PurchaseDecisionEngine, PurchaseSummary};
use crate::selector::RollSelector;
use crate::{AllocationResult, AllocationWarning};

/// 布卷分配計算器
///
/// 本身不保存任何跨次執行的狀態；每次計算都會複製一份庫存快照。
#[derive(Debug, Clone)]
pub struct RollAllocator {
    /// 已驗證的配置
    config: AllocationConfig,

    /// 依配置寬度建立的選擇器
    selector: RollSelector,
}

impl RollAllocator {
    /// 創建新的計算器，配置無效時拒絕
    pub fn new(config: AllocationConfig) -> pedido_core::Result<Self> {
        config.validate()?;
        let selector = RollSelector::new(config.roll_widths.clone())?;
        Ok(Self { config, selector })
    }

    /// 主計算入口：原始裁片記錄
    pub fn calculate(&self, records: &[Value], stock_snapshot: &StockLedger) -> AllocationResult {
        tracing::info!(
            "開始布卷分配：裁片記錄 {} 筆，庫存寬度 {} 種",
            records.len(),
            stock_snapshot.iter().count()
        );

        // Step 1: 正規化
        tracing::debug!("Step 1: 裁片正規化");
        let normalized = PieceNormalizer::normalize_all(records);
        if normalized.dropped > 0 {
            tracing::warn!("捨棄 {} 筆缺少布料類型的裁片", normalized.dropped);
        }

        let mut result = self.allocate(&normalized.pieces, stock_snapshot);

        let mut warnings = normalized.warnings;
        warnings.append(&mut result.warnings);
        result.warnings = warnings;

        result
    }

    /// 由 JSON 陣列字串計算
    pub fn calculate_json(
        &self,
        json: &str,
        stock_snapshot: &StockLedger,
    ) -> pedido_core::Result<AllocationResult> {
        let value: Value = serde_json::from_str(json)?;
        let records = value.as_array().ok_or_else(|| {
            pedido_core::PedidoError::InvalidInput("裁片清單必須是 JSON 陣列".to_string())
        })?;
        Ok(self.calculate(records, stock_snapshot))
    }

    /// 已正規化的裁片分配
    pub fn allocate(&self, pieces: &[Piece], stock_snapshot: &StockLedger) -> AllocationResult {
        let start_time = std::time::Instant::now();

        // 每次執行使用獨立的庫存帳
        let mut ledger = stock_snapshot.clone();
        let mut warnings = Vec::new();

        // Step 2: 方向判定與選卷
        tracing::debug!("Step 2: 選卷，裁片 {} 片", pieces.len());
        let piece_allocations: Vec<PieceAllocationRecord> = pieces
            .iter()
            .map(|piece| {
                let orientation = OrientationResolver::resolve(piece);
                let selection = self.selector.select(&orientation, &mut ledger);

                tracing::debug!(
                    "裁片 {}: 有效寬度 {}，用量 {}，布卷 {}，庫存 {}",
                    piece.id,
                    orientation.effective_width,
                    orientation.linear_consumption,
                    selection.roll_width,
                    selection.stock_used
                );

                if selection.width_mismatch {
                    warnings.push(AllocationWarning::warning(
                        piece.id.clone(),
                        format!(
                            "有效寬度 {} 超過所有布卷，改用 {}",
                            orientation.effective_width, selection.roll_width
                        ),
                    ));
                }

                PieceAllocationRecord {
                    piece_id: piece.id.clone(),
                    location: piece.location.clone(),
                    product: piece.product.clone(),
                    fabric: piece.fabric.clone(),
                    effective_width: orientation.effective_width,
                    linear_consumption: orientation.linear_consumption,
                    roll_width: selection.roll_width,
                    stock_used: selection.stock_used,
                    stock_drawn: selection.stock_drawn,
                    remaining_stock: selection.remaining_stock,
                    width_mismatch: selection.width_mismatch,
                }
            })
            .collect();

        // Step 3: 彙總
        tracing::debug!("Step 3: 同布料彙總");
        let mut consolidated_requirements = ConsolidationAggregator::aggregate(&piece_allocations);

        // Step 4: 採購決策
        tracing::debug!("Step 4: 採購決策");
        PurchaseDecisionEngine::apply_all(&mut consolidated_requirements, &self.config);
        let summary = PurchaseSummary::from_requirements(&consolidated_requirements);

        tracing::info!("布卷分配完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "彙總 {} 組，缺口 {} m，按公尺 {} m，整卷 {} 卷",
            consolidated_requirements.len(),
            summary.total_shortfall,
            summary.meters_by_meter,
            summary.rolls
        );

        AllocationResult {
            piece_allocations,
            consolidated_requirements,
            stock_ledger: ledger,
            summary,
            warnings,
        }
    }

    /// 多張生產單平行計算，每張各自複製庫存快照
    ///
    /// 結果順序與輸入相同，且與逐張計算完全一致。
    pub fn calculate_batch(
        &self,
        orders: &[Vec<Value>],
        stock_snapshot: &StockLedger,
    ) -> Vec<AllocationResult> {
        tracing::info!("平行計算 {} 張生產單", orders.len());

        orders
            .par_iter()
            .map(|records| self.calculate(records, stock_snapshot))
            .collect()
    }
}
