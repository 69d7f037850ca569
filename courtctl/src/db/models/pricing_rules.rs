//! Database models for pricing rules.

use crate::api::models::pricing_rules::{PricingRuleCreate, PricingRuleUpdate};
use crate::types::PricingRuleId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Database request for creating a pricing rule
#[derive(Debug, Clone)]
pub struct PricingRuleCreateDBRequest {
    pub name: String,
    pub rule_type: String,
    pub multiplier: Decimal,
}

impl From<PricingRuleCreate> for PricingRuleCreateDBRequest {
    fn from(api: PricingRuleCreate) -> Self {
        Self {
            name: api.name,
            rule_type: api.rule_type,
            multiplier: api.multiplier,
        }
    }
}

/// Database request for a partial pricing rule update
#[derive(Debug, Clone)]
pub struct PricingRuleUpdateDBRequest {
    pub multiplier: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl From<PricingRuleUpdate> for PricingRuleUpdateDBRequest {
    fn from(api: PricingRuleUpdate) -> Self {
        Self {
            multiplier: api.multiplier,
            is_active: api.is_active,
        }
    }
}

/// Database response for a pricing rule
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PricingRuleDBResponse {
    pub id: PricingRuleId,
    pub name: String,
    pub rule_type: String,
    pub multiplier: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
