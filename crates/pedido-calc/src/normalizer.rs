//! 裁片正規化
//!
//! 把生產單（levantamiento）中形狀不一的裁片記錄轉為 [`Piece`]。
//! 缺漏的尺寸一律為 0，缺漏的文字欄位為空字串；沒有布料類型的裁片直接捨棄。

use pedido_core::{FabricIdentity, Piece};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::AllocationWarning;

/// 正規化結果
#[derive(Debug, Clone, Default)]
pub struct NormalizedPieces {
    pub pieces: Vec<Piece>,
    pub warnings: Vec<AllocationWarning>,
    /// 因缺少布料類型而捨棄的裁片數
    pub dropped: usize,
}

/// 單一尺寸的上限（公尺），超過視為無效資料
pub const MAX_DIMENSION_METERS: Decimal = Decimal::ONE_THOUSAND;

/// 數值欄位的解析狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeterValue {
    Valid(Decimal),
    Missing,
    Invalid,
}

/// 裁片正規化器
pub struct PieceNormalizer;

impl PieceNormalizer {
    /// 正規化整張生產單
    pub fn normalize_all(records: &[Value]) -> NormalizedPieces {
        let mut result = NormalizedPieces::default();

        for (index, record) in records.iter().enumerate() {
            match Self::normalize(record, index + 1, &mut result.warnings) {
                Some(piece) => result.pieces.push(piece),
                None => result.dropped += 1,
            }
        }

        result
    }

    /// 正規化單一裁片，`position` 為 1 起算的序號（無 id 時作為裁片ID）
    pub fn normalize(
        record: &Value,
        position: usize,
        warnings: &mut Vec<AllocationWarning>,
    ) -> Option<Piece> {
        let id = record
            .get("id")
            .map(text)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| position.to_string());

        if !record.is_object() {
            tracing::warn!("裁片 {} 不是物件，捨棄", id);
            warnings.push(AllocationWarning::warning(
                id,
                "裁片記錄不是物件，已捨棄".to_string(),
            ));
            return None;
        }

        let fabric_type = record.get("materialTipo").map(text).unwrap_or_default();
        if fabric_type.is_empty() {
            tracing::warn!("裁片 {} 缺少布料類型，捨棄", id);
            warnings.push(AllocationWarning::warning(
                id,
                "缺少布料類型（materialTipo），已捨棄".to_string(),
            ));
            return None;
        }

        let width = Self::meters_field(record, "ancho", &id, warnings);
        let height = Self::meters_field(record, "alto", &id, warnings);

        let model = Self::text_field(record, "modelo", &id, warnings);
        let color = Self::text_field(record, "color", &id, warnings);

        let rotated = record.get("rotada").map(flag).unwrap_or(false);

        let mut piece = Piece::new(
            id,
            width,
            height,
            FabricIdentity::new(fabric_type, model, color),
        )
        .with_location(record.get("ubicacion").map(text).unwrap_or_default())
        .with_product(record.get("producto").map(text).unwrap_or_default())
        .with_rotated(rotated);

        if let Some(line_item) = record.get("partida").map(text).filter(|s| !s.is_empty()) {
            piece = piece.with_line_item(line_item);
        }

        Some(piece)
    }

    fn meters_field(
        record: &Value,
        field: &str,
        id: &str,
        warnings: &mut Vec<AllocationWarning>,
    ) -> Decimal {
        match parse_meters(record.get(field)) {
            MeterValue::Valid(value) => value,
            MeterValue::Missing => {
                tracing::warn!("裁片 {} 缺少 {}，以 0 計", id, field);
                warnings.push(AllocationWarning::warning(
                    id.to_string(),
                    format!("缺少 {}，以 0 計", field),
                ));
                Decimal::ZERO
            }
            MeterValue::Invalid => {
                tracing::warn!("裁片 {} 的 {} 無效，以 0 計", id, field);
                warnings.push(AllocationWarning::warning(
                    id.to_string(),
                    format!("{} 無效，以 0 計", field),
                ));
                Decimal::ZERO
            }
        }
    }

    fn text_field(
        record: &Value,
        field: &str,
        id: &str,
        warnings: &mut Vec<AllocationWarning>,
    ) -> String {
        let value = record.get(field).map(text).unwrap_or_default();
        if value.is_empty() {
            tracing::warn!("裁片 {} 缺少 {}，以空白計", id, field);
            warnings.push(AllocationWarning::info(
                id.to_string(),
                format!("缺少 {}", field),
            ));
        }
        value
    }
}

/// 文字欄位：字串去空白，數字轉字串，其餘為空
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// 旋轉旗標：布林、非零數字或 "true"/"1"/"si"/"sí"/"yes"
fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "si" | "sí" | "yes"
        ),
        _ => false,
    }
}

/// 公尺數：接受數字或字串（含小數逗號），負數或超過上限視為無效
fn parse_meters(value: Option<&Value>) -> MeterValue {
    let parsed = match value {
        None | Some(Value::Null) => return MeterValue::Missing,
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => return MeterValue::Missing,
        Some(Value::String(s)) => parse_decimal(s),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v >= Decimal::ZERO && v <= MAX_DIMENSION_METERS => MeterValue::Valid(v),
        _ => MeterValue::Invalid,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_normalize_complete_record() {
        let record = json!({
            "id": "LV-7",
            "ubicacion": "Sala",
            "producto": "Enrollable",
            "partida": "2",
            "ancho": 1.8,
            "alto": "2,30",
            "modelo": "SC-5",
            "color": "Blanco",
            "rotada": false,
            "materialTipo": "Screen"
        });
        let mut warnings = Vec::new();

        let piece = PieceNormalizer::normalize(&record, 1, &mut warnings).unwrap();

        assert_eq!(piece.id, "LV-7");
        assert_eq!(piece.location, "Sala");
        assert_eq!(piece.product, "Enrollable");
        assert_eq!(piece.line_item.as_deref(), Some("2"));
        assert_eq!(piece.width, dec!(1.8));
        assert_eq!(piece.height, dec!(2.30));
        assert_eq!(piece.fabric, FabricIdentity::new("Screen", "SC-5", "Blanco"));
        assert!(!piece.rotated);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_fabric_type_is_dropped() {
        let records = vec![
            json!({"ancho": 1.0, "alto": 2.0, "materialTipo": "Blackout"}),
            json!({"ancho": 1.0, "alto": 2.0}),
            json!({"ancho": 1.0, "alto": 2.0, "materialTipo": "   "}),
        ];

        let result = PieceNormalizer::normalize_all(&records);

        assert_eq!(result.pieces.len(), 1);
        assert_eq!(result.dropped, 2);
        assert_eq!(result.pieces[0].id, "1");
        assert!(result.warnings.iter().any(|w| w.piece_id == "2"));
        assert!(result.warnings.iter().any(|w| w.piece_id == "3"));
    }

    #[test]
    fn test_non_object_record_is_dropped() {
        let result = PieceNormalizer::normalize_all(&[json!("pieza"), json!(null)]);
        assert!(result.pieces.is_empty());
        assert_eq!(result.dropped, 2);
    }

    #[test]
    fn test_invalid_dimensions_default_to_zero() {
        let record = json!({
            "ancho": "abc",
            "alto": -1.2,
            "modelo": "BK-1",
            "color": "Gris",
            "materialTipo": "Blackout"
        });
        let mut warnings = Vec::new();

        let piece = PieceNormalizer::normalize(&record, 4, &mut warnings).unwrap();

        assert_eq!(piece.id, "4");
        assert_eq!(piece.width, Decimal::ZERO);
        assert_eq!(piece.height, Decimal::ZERO);
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| w.severity == crate::WarningSeverity::Warning));
    }

    #[test]
    fn test_missing_identity_fields_default_to_empty() {
        let record = json!({"ancho": 1.0, "alto": 1.0, "materialTipo": "Sheer"});
        let mut warnings = Vec::new();

        let piece = PieceNormalizer::normalize(&record, 1, &mut warnings).unwrap();

        assert_eq!(piece.fabric.model, "");
        assert_eq!(piece.fabric.color, "");
        assert_eq!(piece.location, "");
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| w.severity == crate::WarningSeverity::Info));
    }

    #[test]
    fn test_numeric_model_code_is_text() {
        let record = json!({"ancho": 1, "alto": 1, "modelo": 4010, "color": "Beige", "materialTipo": "Screen"});
        let mut warnings = Vec::new();

        let piece = PieceNormalizer::normalize(&record, 1, &mut warnings).unwrap();
        assert_eq!(piece.fabric.model, "4010");
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(1), true)]
    #[case(json!(0), false)]
    #[case(json!("true"), true)]
    #[case(json!("Sí"), true)]
    #[case(json!("si"), true)]
    #[case(json!("no"), false)]
    #[case(json!(null), false)]
    fn test_rotation_flag(#[case] raw: Value, #[case] expected: bool) {
        let record = json!({"ancho": 1, "alto": 2, "materialTipo": "Screen", "rotada": raw});
        let mut warnings = Vec::new();

        let piece = PieceNormalizer::normalize(&record, 1, &mut warnings).unwrap();
        assert_eq!(piece.rotated, expected);
    }

    #[rstest]
    #[case(json!(2.5), MeterValue::Valid(dec!(2.5)))]
    #[case(json!("1,75"), MeterValue::Valid(dec!(1.75)))]
    #[case(json!(" 3 "), MeterValue::Valid(dec!(3)))]
    #[case(json!(""), MeterValue::Missing)]
    #[case(json!(null), MeterValue::Missing)]
    #[case(json!("x"), MeterValue::Invalid)]
    #[case(json!(-0.5), MeterValue::Invalid)]
    #[case(json!([1]), MeterValue::Invalid)]
    #[case(json!("1000"), MeterValue::Valid(dec!(1000)))]
    #[case(json!("1000.01"), MeterValue::Invalid)]
    #[case(json!("1e28"), MeterValue::Invalid)]
    #[case(json!(1e300), MeterValue::Invalid)]
    fn test_parse_meters(#[case] raw: Value, #[case] expected: MeterValue) {
        assert_eq!(parse_meters(Some(&raw)), expected);
    }
}
