//! # Pedido
//!
//! 窗簾生產單「Lista de Pedido」的布卷分配與採購彙總引擎
//!
//! ```
//! use pedido::{AllocationConfig, RollAllocator, StockLedger};
//! use rust_decimal::Decimal;
//!
//! let allocator = RollAllocator::new(AllocationConfig::new()).unwrap();
//! let stock = StockLedger::from_snapshot([(Decimal::new(200, 2), Decimal::from(8))]).unwrap();
//! let pieces = serde_json::json!([
//!     {"ancho": 1.8, "alto": 2.3, "modelo": "SC-5", "color": "Blanco", "materialTipo": "Screen"}
//! ]);
//!
//! let result = allocator.calculate(pieces.as_array().unwrap(), &stock);
//! assert!(result.piece_allocations[0].stock_used);
//! ```

pub use pedido_calc::*;
pub use pedido_core::*;
