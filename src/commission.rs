use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::PartnerRegistry;

pub const DEFAULT_AVG_COMMISSION_RATE: f64 = 0.07;
const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommissionError {
    #[error("partner {0} not found")]
    PartnerNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionData {
    pub partner_id: String,
    pub product_id: String,
    /// Total price, i.e. unit price times quantity.
    pub base_price: f64,
    pub commission_rate: f64,
    pub estimated_commission: f64,
    pub currency: String,
}

impl CommissionData {
    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueProjection {
    pub daily_revenue: f64,
    pub monthly_revenue: f64,
    pub yearly_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerPerformance {
    pub partner_id: String,
    pub total_commission: f64,
    pub order_count: usize,
}

/// Fails for partners missing from the registry.
pub fn calculate_commission(
    partners: &PartnerRegistry,
    partner_id: &str,
    base_price: f64,
    quantity: u32,
) -> Result<CommissionData, CommissionError> {
    let partner = partners
        .get(partner_id)
        .ok_or_else(|| CommissionError::PartnerNotFound(partner_id.to_string()))?;

    let total_price = base_price * quantity as f64;
    let estimated = total_price * partner.commission_rate;

    Ok(CommissionData {
        partner_id: partner_id.to_string(),
        product_id: String::new(),
        base_price: total_price,
        commission_rate: partner.commission_rate,
        estimated_commission: round2(estimated),
        currency: partner.currency.clone(),
    })
}

/// `conversion_rate` is a percentage (3.0 means 3%). Months are 30 days and
/// years 365 days.
pub fn daily_projection(
    avg_order_value: f64,
    daily_clicks: f64,
    conversion_rate: f64,
    avg_commission_rate: f64,
) -> RevenueProjection {
    let daily_orders = daily_clicks * (conversion_rate / 100.0);
    let daily_revenue = daily_orders * avg_order_value * avg_commission_rate;

    RevenueProjection {
        daily_revenue: round2(daily_revenue),
        monthly_revenue: round2(daily_revenue * DAYS_PER_MONTH),
        yearly_revenue: round2(daily_revenue * DAYS_PER_YEAR),
    }
}

pub fn top_performing_partners(records: &[CommissionData]) -> Vec<PartnerPerformance> {
    let mut stats: Vec<PartnerPerformance> = Vec::new();
    for record in records {
        match stats
            .iter_mut()
            .find(|entry| entry.partner_id == record.partner_id)
        {
            Some(entry) => {
                entry.total_commission += record.estimated_commission;
                entry.order_count += 1;
            }
            None => stats.push(PartnerPerformance {
                partner_id: record.partner_id.clone(),
                total_commission: record.estimated_commission,
                order_count: 1,
            }),
        }
    }

    stats.sort_by(|a, b| {
        b.total_commission
            .partial_cmp(&a.total_commission)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
