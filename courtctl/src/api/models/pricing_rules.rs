//! API request/response models for pricing rules.
//!
//! Rules are live configuration: the pricing engine re-reads the active set
//! on every computation, so edits here take effect on the next booking.

use crate::db::models::pricing_rules::PricingRuleDBResponse;
use crate::types::PricingRuleId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingRuleCreate {
    pub name: String,
    /// One of `PEAK_HOUR`, `WEEKEND`, `INDOOR`, or a future type. Unknown
    /// types are stored but never applied.
    pub rule_type: String,
    #[schema(value_type = f64)]
    pub multiplier: Decimal,
}

/// Partial update; omitted fields keep their current value.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingRuleUpdate {
    #[schema(value_type = Option<f64>)]
    pub multiplier: Option<Decimal>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingRuleResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PricingRuleId,
    pub name: String,
    pub rule_type: String,
    #[schema(value_type = f64)]
    pub multiplier: Decimal,
    pub is_active: bool,
}

impl From<PricingRuleDBResponse> for PricingRuleResponse {
    fn from(db: PricingRuleDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            rule_type: db.rule_type,
            multiplier: db.multiplier,
            is_active: db.is_active,
        }
    }
}
