//! # Production Planning
//!
//! 生產建議服務：從目錄儲存讀取快照並計算各產品可生產數量與價值
//!
//! ```
//! use prodplan::{InMemoryCatalog, NewBomLine, NewProduct, NewRawMaterial, ProductionService};
//! use rust_decimal::Decimal;
//!
//! let mut catalog = InMemoryCatalog::new();
//! let chair = catalog
//!     .create_product(NewProduct::new("CHAIR".to_string(), "Chair".to_string(), Decimal::from(10)))
//!     .unwrap();
//! let wood = catalog
//!     .create_raw_material(NewRawMaterial::new("WOOD".to_string(), "Wood".to_string(), Decimal::from(100)))
//!     .unwrap();
//! catalog
//!     .create_bom_line(NewBomLine::new(chair.id, wood.id, Decimal::from(4)))
//!     .unwrap();
//!
//! let service = ProductionService::new(catalog);
//! let report = service.compute_production_suggestions().unwrap();
//! assert_eq!(report.products[0].quantity_possible, 25);
//! ```

pub use prodplan_calc::{compute_production_suggestions, FeasibilityEngine};
pub use prodplan_core::*;
pub use prodplan_store::{CatalogStore, InMemoryCatalog};

/// 生產建議服務
///
/// 目錄儲存由外部注入；服務本身不保存任何計算結果。
pub struct ProductionService<S: CatalogStore> {
    store: S,
    engine: FeasibilityEngine,
}

impl<S: CatalogStore> ProductionService<S> {
    /// 以預設配置創建服務
    pub fn new(store: S) -> Self {
        Self::with_config(store, SuggestionConfig::default())
    }

    /// 以指定配置創建服務
    pub fn with_config(store: S, config: SuggestionConfig) -> Self {
        Self {
            store,
            engine: FeasibilityEngine::new(config),
        }
    }

    /// 計算生產建議
    pub fn compute_production_suggestions(&self) -> Result<ProductionReport> {
        let snapshot = self.store.snapshot()?;
        self.engine.calculate(&snapshot).map_err(|err| {
            if err.is_snapshot_error() {
                tracing::warn!("快照不一致，生產建議計算中止: {}", err);
            } else {
                tracing::error!("生產建議計算失敗: {}", err);
            }
            err
        })
    }

    /// 計算生產建議並轉為 JSON
    pub fn production_suggestions_json(&self) -> Result<serde_json::Value> {
        let report = self.compute_production_suggestions()?;
        Ok(serde_json::to_value(&report)?)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn config(&self) -> &SuggestionConfig {
        self.engine.config()
    }
}
