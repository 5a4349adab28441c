use crate::catalog::{Product, ProductCategory, SkinConcern};

struct Entry {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    price: f64,
    image: &'static str,
    description: &'static str,
    category: ProductCategory,
    concerns: &'static [SkinConcern],
    ingredients: &'static [&'static str],
    rating: f64,
    review_count: u32,
    affiliate_url: &'static str,
    partner_id: &'static str,
    commission: f64,
    is_bestseller: bool,
    is_recommended: bool,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "cerave-foaming-cleanser",
        name: "Gel Nettoyant Moussant",
        brand: "CeraVe",
        price: 12.90,
        image: "/images/products/cerave-cleanser.jpg",
        description: "Gel nettoyant doux aux céramides essentielles",
        category: ProductCategory::Cleanser,
        concerns: &[SkinConcern::Oiliness, SkinConcern::Acne],
        ingredients: &["Ceramides", "Hyaluronic Acid", "Niacinamide"],
        rating: 4.5,
        review_count: 1247,
        affiliate_url: "https://www.sephora.fr/cerave-gel-nettoyant",
        partner_id: "sephora",
        commission: 0.90,
        is_bestseller: true,
        is_recommended: false,
    },
    Entry {
        id: "la-roche-posay-toleriane",
        name: "Toleriane Caring Wash",
        brand: "La Roche-Posay",
        price: 15.50,
        image: "/images/products/lrp-toleriane.jpg",
        description: "Soin lavant apaisant peaux sensibles",
        category: ProductCategory::Cleanser,
        concerns: &[SkinConcern::Sensitivity, SkinConcern::Redness],
        ingredients: &["Thermal Water", "Glycerin"],
        rating: 4.3,
        review_count: 892,
        affiliate_url: "https://www.nocibe.fr/la-roche-posay-toleriane",
        partner_id: "nocibe",
        commission: 1.24,
        is_bestseller: false,
        is_recommended: false,
    },
    Entry {
        id: "cerave-daily-moisturizer",
        name: "Crème Hydratante Quotidienne",
        brand: "CeraVe",
        price: 16.90,
        image: "/images/products/cerave-moisturizer.jpg",
        description: "Hydratation 24h avec céramides et acide hyaluronique",
        category: ProductCategory::Moisturizer,
        concerns: &[SkinConcern::Dryness],
        ingredients: &["Ceramides", "Hyaluronic Acid", "MVE Technology"],
        rating: 4.6,
        review_count: 2156,
        affiliate_url: "https://www.amazon.fr/cerave-creme-hydratante",
        partner_id: "amazon",
        commission: 1.01,
        is_bestseller: true,
        is_recommended: true,
    },
    Entry {
        id: "neutrogena-hydro-boost",
        name: "Hydro Boost Gel-Crème",
        brand: "Neutrogena",
        price: 14.99,
        image: "/images/products/neutrogena-hydroboost.jpg",
        description: "Gel-crème à l'acide hyaluronique",
        category: ProductCategory::Moisturizer,
        concerns: &[SkinConcern::Dryness, SkinConcern::Oiliness],
        ingredients: &["Hyaluronic Acid", "Glycerin"],
        rating: 4.4,
        review_count: 1834,
        affiliate_url: "https://www.beauteprivee.fr/neutrogena-hydro-boost",
        partner_id: "beauteprivee",
        commission: 1.50,
        is_bestseller: false,
        is_recommended: false,
    },
    Entry {
        id: "the-ordinary-niacinamide",
        name: "Niacinamide 10% + Zinc 1%",
        brand: "The Ordinary",
        price: 7.90,
        image: "/images/products/the-ordinary-niacinamide.jpg",
        description: "Sérum régulateur de sébum et anti-imperfections",
        category: ProductCategory::Serum,
        concerns: &[SkinConcern::Oiliness, SkinConcern::Acne, SkinConcern::Pores],
        ingredients: &["Niacinamide", "Zinc PCA"],
        rating: 4.2,
        review_count: 5647,
        affiliate_url: "https://www.feelunique.com/the-ordinary-niacinamide",
        partner_id: "feelunique",
        commission: 0.63,
        is_bestseller: true,
        is_recommended: false,
    },
    Entry {
        id: "mad-hippie-vitamin-c",
        name: "Vitamin C Serum",
        brand: "Mad Hippie",
        price: 33.99,
        image: "/images/products/mad-hippie-vitc.jpg",
        description: "Sérum vitamine C stabilisée + antioxydants",
        category: ProductCategory::Serum,
        concerns: &[SkinConcern::Aging, SkinConcern::Pigmentation],
        ingredients: &["Vitamin C", "Vitamin E", "Ferulic Acid"],
        rating: 4.7,
        review_count: 723,
        affiliate_url: "https://fr.iherb.com/mad-hippie-vitamin-c",
        partner_id: "iherb",
        commission: 3.06,
        is_bestseller: false,
        is_recommended: true,
    },
    Entry {
        id: "avene-fluide-spf50",
        name: "Fluide Minéral Teinté SPF50+",
        brand: "Avène",
        price: 24.50,
        image: "/images/products/avene-spf50.jpg",
        description: "Protection solaire très haute pour peaux sensibles",
        category: ProductCategory::Sunscreen,
        concerns: &[SkinConcern::Sensitivity, SkinConcern::Aging],
        ingredients: &["Zinc Oxide", "Titanium Dioxide", "Thermal Water"],
        rating: 4.5,
        review_count: 967,
        affiliate_url: "https://www.sephora.fr/avene-fluide-spf50",
        partner_id: "sephora",
        commission: 1.72,
        is_bestseller: false,
        is_recommended: true,
    },
];

pub fn products() -> Vec<Product> {
    ENTRIES
        .iter()
        .map(|entry| Product {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            brand: entry.brand.to_string(),
            price: entry.price,
            original_price: None,
            image: entry.image.to_string(),
            description: entry.description.to_string(),
            category: entry.category,
            skin_concerns: entry.concerns.to_vec(),
            ingredients: entry.ingredients.iter().map(|s| s.to_string()).collect(),
            rating: entry.rating,
            review_count: entry.review_count,
            affiliate_url: entry.affiliate_url.to_string(),
            partner_id: entry.partner_id.to_string(),
            commission: entry.commission,
            in_stock: true,
            is_bestseller: entry.is_bestseller,
            is_recommended: entry.is_recommended,
        })
        .collect()
}
