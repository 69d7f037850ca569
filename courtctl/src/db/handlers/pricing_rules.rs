//! Database repository for pricing rules.
//!
//! Rules are live configuration: the pricing engine calls
//! [`PricingRules::list_active`] on every computation rather than caching
//! the rule set, so administrative changes apply to the next booking.

use crate::db::errors::Result;
use crate::db::models::pricing_rules::{PricingRuleCreateDBRequest, PricingRuleDBResponse, PricingRuleUpdateDBRequest};
use crate::types::PricingRuleId;
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct PricingRules<'c> {
    db: &'c mut PgConnection,
}

impl<'c> PricingRules<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name, rule_type = %request.rule_type), err)]
    pub async fn create(&mut self, request: &PricingRuleCreateDBRequest) -> Result<PricingRuleDBResponse> {
        let rule = sqlx::query_as::<_, PricingRuleDBResponse>(
            r#"
            INSERT INTO pricing_rules (id, name, rule_type, multiplier)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, rule_type, multiplier, is_active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.rule_type)
        .bind(request.multiplier)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(rule)
    }

    /// The active rule set in a deterministic order (creation order, then
    /// id as a tie-break) so pricing evaluation is reproducible.
    #[instrument(skip(self), err)]
    pub async fn list_active(&mut self) -> Result<Vec<PricingRuleDBResponse>> {
        let rules = sqlx::query_as::<_, PricingRuleDBResponse>(
            r#"
            SELECT id, name, rule_type, multiplier, is_active, created_at
            FROM pricing_rules
            WHERE is_active
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rules)
    }

    #[instrument(skip(self), err)]
    pub async fn list_all(&mut self) -> Result<Vec<PricingRuleDBResponse>> {
        let rules = sqlx::query_as::<_, PricingRuleDBResponse>(
            r#"
            SELECT id, name, rule_type, multiplier, is_active, created_at
            FROM pricing_rules
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rules)
    }

    /// Partial update; `None` fields keep their current value. Returns
    /// `None` when the rule does not exist.
    #[instrument(skip(self, request), err)]
    pub async fn update(&mut self, id: PricingRuleId, request: &PricingRuleUpdateDBRequest) -> Result<Option<PricingRuleDBResponse>> {
        let rule = sqlx::query_as::<_, PricingRuleDBResponse>(
            r#"
            UPDATE pricing_rules
            SET multiplier = COALESCE($2, multiplier),
                is_active = COALESCE($3, is_active)
            WHERE id = $1
            RETURNING id, name, rule_type, multiplier, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(request.multiplier)
        .bind(request.is_active)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(rule)
    }
}
