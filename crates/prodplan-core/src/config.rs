//! 生產建議計算配置

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::Result;

/// 原物料分配策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// 各產品獨立計算（每個產品都看到完整庫存）
    #[default]
    Independent,

    /// 貪婪策略：單價高者優先，依序扣減共用原物料
    GreedyByValue,
}

/// 生產建議計算配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// 分配策略
    pub allocation_policy: AllocationPolicy,

    /// 總價值小數位數（None 表示不捨入）
    ///
    /// 預設為 2（捨入到分）。單價超過兩位小數時，`total_value` 會與
    /// `quantity_possible * unit_value` 的精確乘積不同，例如 0.333 × 3
    /// 報為 1.00 而非 0.999；總生產價值仍等於各捨入後總價值之和。
    /// 需要精確乘積時設為 `None`。
    pub value_scale: Option<u32>,

    /// 是否略過可生產數量為 0 的產品
    pub skip_unproducible: bool,
}

impl SuggestionConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            allocation_policy: AllocationPolicy::Independent,
            value_scale: Some(2),
            skip_unproducible: false,
        }
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：設置分配策略
    pub fn with_allocation_policy(mut self, policy: AllocationPolicy) -> Self {
        self.allocation_policy = policy;
        self
    }

    /// 建構器模式：設置總價值小數位數
    pub fn with_value_scale(mut self, scale: Option<u32>) -> Self {
        self.value_scale = scale;
        self
    }

    /// 建構器模式：設置是否略過無法生產的產品
    pub fn with_skip_unproducible(mut self, skip: bool) -> Self {
        self.skip_unproducible = skip;
        self
    }

    /// 依配置捨入金額（銀行家捨入）
    pub fn round_value(&self, value: Decimal) -> Decimal {
        match self.value_scale {
            Some(scale) => value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven),
            None => value,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self::new()
    }
}
