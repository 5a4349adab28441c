use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliatePartner {
    pub id: String,
    pub name: String,
    pub base_url: String,
    pub commission_rate: f64,
    pub tracking_param: String,
    pub currency: String,
    pub logo: String,
    pub trust_score: f64,
}

const UTM_TRACKING: &str = "utm_source=skincare_ai&utm_medium=affiliate";

/// Static partner reference data, looked up by partner id.
#[derive(Debug, Clone, Default)]
pub struct PartnerRegistry {
    partners: Vec<AffiliatePartner>,
}

impl PartnerRegistry {
    pub fn new(partners: Vec<AffiliatePartner>) -> Self {
        Self { partners }
    }

    pub fn builtin() -> Self {
        let partner = |id: &str, name: &str, base_url: &str, rate: f64, tracking: &str, trust: f64| {
            AffiliatePartner {
                id: id.to_string(),
                name: name.to_string(),
                base_url: base_url.to_string(),
                commission_rate: rate,
                tracking_param: tracking.to_string(),
                currency: "EUR".to_string(),
                logo: format!("/images/partners/{}-logo.png", id),
                trust_score: trust,
            }
        };

        Self::new(vec![
            partner("sephora", "Sephora", "https://www.sephora.fr", 0.07, UTM_TRACKING, 9.5),
            partner("nocibe", "Nocibé", "https://www.nocibe.fr", 0.08, UTM_TRACKING, 8.8),
            partner("amazon", "Amazon", "https://www.amazon.fr", 0.06, "tag=skincare_ai-21", 9.2),
            partner(
                "beauteprivee",
                "Beauté Privée",
                "https://www.beauteprivee.fr",
                0.10,
                UTM_TRACKING,
                8.5,
            ),
            partner(
                "feelunique",
                "Feelunique",
                "https://www.feelunique.com",
                0.08,
                UTM_TRACKING,
                8.7,
            ),
            partner(
                "iherb",
                "iHerb",
                "https://fr.iherb.com",
                0.09,
                "icode=SKINCARE_AI&rcode=SKINCARE_AI",
                9.0,
            ),
        ])
    }

    pub fn get(&self, partner_id: &str) -> Option<&AffiliatePartner> {
        self.partners.iter().find(|partner| partner.id == partner_id)
    }

    pub fn all(&self) -> &[AffiliatePartner] {
        &self.partners
    }
}
