//! # Production Planning Store
//!
//! 目錄儲存介面與記憶體實現（產品、原物料、BOM、庫存異動）

pub mod memory;

pub use memory::InMemoryCatalog;

use prodplan_core::{BomLine, CatalogSnapshot, Product, RawMaterial, Result};

/// 目錄儲存
///
/// 計算引擎只透過此介面讀取資料，不依賴任何全域狀態。
/// 各列表回傳完整集合，依ID遞增，不分頁也不過濾。
pub trait CatalogStore {
    fn list_products(&self) -> Result<Vec<Product>>;

    fn list_raw_materials(&self) -> Result<Vec<RawMaterial>>;

    fn list_bom_lines(&self) -> Result<Vec<BomLine>>;

    /// 讀取一致的快照
    fn snapshot(&self) -> Result<CatalogSnapshot> {
        Ok(CatalogSnapshot::new(
            self.list_products()?,
            self.list_raw_materials()?,
            self.list_bom_lines()?,
        ))
    }
}

/// 固定快照（測試或離線計算用）
impl CatalogStore for CatalogSnapshot {
    fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn list_raw_materials(&self) -> Result<Vec<RawMaterial>> {
        Ok(self.raw_materials.clone())
    }

    fn list_bom_lines(&self) -> Result<Vec<BomLine>> {
        Ok(self.bom_lines.clone())
    }

    fn snapshot(&self) -> Result<CatalogSnapshot> {
        Ok(self.clone())
    }
}
