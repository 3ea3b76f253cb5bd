//! Lista de Pedido 示例：單張生產單的布卷分配與採購清單

use pedido::{AllocationConfig, PurchaseDecision, RollAllocator, StockLedger};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Lista de Pedido ===\n");

    let allocator = RollAllocator::new(AllocationConfig::new())?;

    // 倉庫庫存快照（寬度 → 公尺）
    let stock = StockLedger::from_snapshot([
        (Decimal::new(200, 2), Decimal::from(8)),
        (Decimal::new(250, 2), Decimal::new(45, 1)),
    ])?;

    let pieces = r#"[
        {"id": "1", "ubicacion": "Sala", "producto": "Enrollable", "ancho": 1.8, "alto": 2.3, "modelo": "SC-5", "color": "Blanco", "rotada": false, "materialTipo": "Screen"},
        {"id": "2", "ubicacion": "Recámara", "producto": "Enrollable", "ancho": 1.8, "alto": 2.3, "modelo": "SC-5", "color": "Blanco", "rotada": true, "materialTipo": "Screen"},
        {"id": "3", "ubicacion": "Estudio", "producto": "Blackout", "ancho": "2,40", "alto": "2,10", "modelo": "BK-1", "color": "Gris", "materialTipo": "Blackout"},
        {"id": "4", "ubicacion": "Comedor", "producto": "Sheer", "ancho": 3.5, "alto": 2.5, "modelo": "SH-2", "color": "Arena", "materialTipo": "Sheer"},
        {"id": "5", "ubicacion": "Baño", "producto": "Enrollable", "ancho": 0.9, "alto": 1.2}
    ]"#;

    let result = allocator.calculate_json(pieces, &stock)?;

    println!("Despiece:");
    for record in &result.piece_allocations {
        println!(
            "  - {} {}: ancho efectivo {}, ml {}, rollo {}{}{}",
            record.piece_id,
            record.location,
            record.effective_width,
            record.linear_consumption,
            record.roll_width,
            if record.stock_used { " (stock)" } else { "" },
            if record.width_mismatch { " [!]" } else { "" },
        );
    }

    println!("\nCompras:");
    for requirement in &result.consolidated_requirements {
        let purchase = match requirement.decision {
            PurchaseDecision::None => "sin compra".to_string(),
            PurchaseDecision::ByMeter => format!("{} ml", requirement.quantity),
            PurchaseDecision::ByRoll => format!(
                "{} rollo(s) ({} ml)",
                requirement.quantity, requirement.purchase_meters
            ),
        };
        println!(
            "  - {} @ {}: requerido {}, stock {}, faltante {} → {}",
            requirement.fabric,
            requirement.roll_width,
            requirement.total_meters_required,
            requirement.stock_meters_consumed,
            requirement.shortfall,
            purchase
        );
    }

    println!("\nStock final:");
    for (width, meters) in result.stock_ledger_final() {
        println!("  - {}: {} ml", width, meters);
    }

    if !result.warnings.is_empty() {
        println!("\nAvisos:");
        for warning in &result.warnings {
            println!("  - [{:?}] {}: {}", warning.severity, warning.piece_id, warning.message);
        }
    }

    Ok(())
}
