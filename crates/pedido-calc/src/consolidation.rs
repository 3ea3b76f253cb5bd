//! 同布料需求彙總

use pedido_core::{ConsolidatedRequirement, ConsolidationKey, PieceAllocationRecord};
use std::collections::HashMap;

/// 報表的布料類型順序
const FABRIC_TYPE_ORDER: [&str; 3] = ["screen", "blackout", "sheer"];

/// 需求彙總器
pub struct ConsolidationAggregator;

impl ConsolidationAggregator {
    /// 依（類型、型號、顏色、布卷寬度）彙總分配記錄
    ///
    /// 組別依首次出現的順序建立，最後依布料類型排序：
    /// Screen、Blackout、Sheer，其他類型依字母順序。同類型內保持首次出現順序。
    pub fn aggregate(records: &[PieceAllocationRecord]) -> Vec<ConsolidatedRequirement> {
        let mut index: HashMap<ConsolidationKey, usize> = HashMap::new();
        let mut groups: Vec<ConsolidatedRequirement> = Vec::new();

        for record in records {
            let key = ConsolidationKey::new(record.fabric.clone(), record.roll_width);
            let position = *index.entry(key.clone()).or_insert_with(|| {
                groups.push(ConsolidatedRequirement::new(key));
                groups.len() - 1
            });
            groups[position].add_allocation(record);
        }

        tracing::debug!("彙總組數: {}", groups.len());

        groups.sort_by_cached_key(|g| Self::fabric_type_rank(&g.fabric.fabric_type));
        groups
    }

    /// 排序鍵：已知類型依固定順序，其他類型排在後面並依名稱排序
    pub fn fabric_type_rank(fabric_type: &str) -> (usize, String) {
        let normalized = fabric_type.trim().to_lowercase();
        match FABRIC_TYPE_ORDER.iter().position(|t| *t == normalized) {
            Some(rank) => (rank, String::new()),
            None => (FABRIC_TYPE_ORDER.len(), normalized),
        }
    }
}
