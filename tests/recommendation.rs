use skin_advisor::recommend::{
    infer_concerns, to_five_point, ConcernScores, RecommendationContext, RecommendationEngine,
};
use skin_advisor::{
    recommend, recommend_routine, Product, ProductCatalog, ProductCategory, SkinConcern, SkinScores,
};

fn product(id: &str, category: ProductCategory, concerns: &[SkinConcern]) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Produit {}", id),
        brand: "Test".to_string(),
        price: 20.0,
        original_price: None,
        image: String::new(),
        description: String::new(),
        category,
        skin_concerns: concerns.to_vec(),
        ingredients: Vec::new(),
        rating: 4.0,
        review_count: 100,
        affiliate_url: format!("https://shop.example/{}", id),
        partner_id: "sephora".to_string(),
        commission: 1.4,
        in_stock: true,
        is_bestseller: false,
        is_recommended: false,
    }
}

fn reference_scores() -> SkinScores {
    SkinScores {
        hydration: 75,
        sebum: 50,
        texture: 47,
        tone: 75,
        tolerance: 35,
    }
}

fn reference_context() -> RecommendationContext {
    RecommendationContext::from_parts(
        Some(&reference_scores()),
        Some(24),
        Some("Peau Mixte"),
        Vec::new(),
    )
}

fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|product| product.id.as_str()).collect()
}

#[test]
fn five_point_conversion_is_pinned() {
    assert_eq!(to_five_point(0), 1.0);
    assert_eq!(to_five_point(35), 2.0);
    assert_eq!(to_five_point(47), 3.0);
    assert_eq!(to_five_point(50), 3.0);
    assert_eq!(to_five_point(75), 4.0);
    assert_eq!(to_five_point(100), 5.0);
}

#[test]
fn reference_scores_infer_acne_and_sensitivity() {
    let scores = ConcernScores::from_skin_scores(&reference_scores());
    assert_eq!(
        infer_concerns(&scores),
        vec![SkinConcern::Acne, SkinConcern::Sensitivity]
    );
}

#[test]
fn sebum_level_rises_with_oiliness() {
    let perfect = SkinScores {
        hydration: 100,
        sebum: 100,
        texture: 100,
        tone: 100,
        tolerance: 100,
    };
    let levels = ConcernScores::from_skin_scores(&perfect);
    assert_eq!(levels.sebum, 1.0);
    assert!(infer_concerns(&levels).is_empty());

    let oily = SkinScores {
        sebum: 10,
        ..perfect
    };
    let levels = ConcernScores::from_skin_scores(&oily);
    assert_eq!(levels.sebum, 5.0);
    assert_eq!(infer_concerns(&levels), vec![SkinConcern::Oiliness]);

    let oily_and_rough = SkinScores {
        sebum: 20,
        texture: 40,
        ..perfect
    };
    assert_eq!(
        infer_concerns(&ConcernScores::from_skin_scores(&oily_and_rough)),
        vec![SkinConcern::Oiliness, SkinConcern::Acne]
    );
}

#[test]
fn client_scores_above_range_stay_on_the_five_point_scale() {
    let scores: SkinScores = serde_json::from_str(
        r#"{"hydration":250,"sebum":180,"texture":101.5,"tone":-20,"tolerance":99.6}"#,
    )
    .unwrap();
    let levels = ConcernScores::from_skin_scores(&scores);
    assert_eq!(levels.hydration, 5.0);
    assert_eq!(levels.sebum, 1.0);
    assert_eq!(levels.texture, 5.0);
    assert_eq!(levels.evenness, 1.0);
    assert_eq!(levels.tolerance, 5.0);
    assert_eq!(infer_concerns(&levels), vec![SkinConcern::Pigmentation]);
}

#[test]
fn missing_diagnosis_uses_neutral_context() {
    let context = RecommendationContext::from_parts(None, None, None, Vec::new());
    assert_eq!(context, RecommendationContext::default());
    assert_eq!(context.scores, ConcernScores::neutral());
    assert_eq!(context.skin_age, 25);
    assert_eq!(context.skin_type, "mixte");
    assert_eq!(infer_concerns(&context.scores), vec![SkinConcern::Acne]);
}

#[test]
fn matching_products_outrank_irrelevant_ones() {
    let catalog = ProductCatalog::new(vec![
        product("aging-cream", ProductCategory::Moisturizer, &[SkinConcern::Aging]),
        product("acne-gel", ProductCategory::Treatment, &[SkinConcern::Acne]),
    ]);
    let engine = RecommendationEngine::default();
    let ranked = engine.rank(&reference_context(), &catalog, None);

    assert_eq!(ranked[0].product.id, "acne-gel");
    assert_eq!(ranked[0].relevance_count, 1);
    assert!((ranked[0].score - 23.0).abs() < 1e-9);
    assert_eq!(ranked[1].relevance_count, 0);
    assert!((ranked[1].score - 0.9).abs() < 1e-9);
}

#[test]
fn output_never_exceeds_limit() {
    let catalog = ProductCatalog::new(
        (0..5)
            .map(|index| product(&format!("p{}", index), ProductCategory::Serum, &[SkinConcern::Acne]))
            .collect(),
    );
    let context = reference_context();
    assert_eq!(recommend(&context, &catalog, None, 2).len(), 2);
    assert_eq!(recommend(&context, &catalog, None, 0).len(), 0);
    assert_eq!(recommend(&context, &catalog, None, 50).len(), 5);
}

#[test]
fn out_of_stock_products_rank_last() {
    let mut sold_out = product("sold-out", ProductCategory::Serum, &[SkinConcern::Acne]);
    sold_out.in_stock = false;
    sold_out.rating = 5.0;
    sold_out.is_bestseller = true;
    let catalog = ProductCatalog::new(vec![
        sold_out,
        product("available", ProductCategory::Serum, &[SkinConcern::Acne]),
    ]);

    let ranked = RecommendationEngine::default().rank(&reference_context(), &catalog, None);
    assert_eq!(ranked[0].product.id, "available");
    assert_eq!(ranked[1].product.id, "sold-out");
    assert_eq!(ranked[1].score, 0.0);
}

#[test]
fn equal_scores_keep_catalog_order() {
    let catalog = ProductCatalog::new(vec![
        product("first", ProductCategory::Serum, &[SkinConcern::Sensitivity]),
        product("second", ProductCategory::Serum, &[SkinConcern::Sensitivity]),
        product("third", ProductCategory::Serum, &[SkinConcern::Sensitivity]),
    ]);
    let products = recommend(&reference_context(), &catalog, None, 6);
    assert_eq!(ids(&products), vec!["first", "second", "third"]);
}

#[test]
fn category_filter_applies_before_ranking() {
    let catalog = ProductCatalog::new(vec![
        product("gel", ProductCategory::Cleanser, &[SkinConcern::Acne]),
        product("serum", ProductCategory::Serum, &[SkinConcern::Acne]),
        product("cream", ProductCategory::Moisturizer, &[SkinConcern::Sensitivity]),
    ]);
    let products = recommend(&reference_context(), &catalog, Some(ProductCategory::Serum), 6);
    assert_eq!(ids(&products), vec!["serum"]);
}

#[test]
fn older_skin_gets_aging_bonus() {
    let catalog = ProductCatalog::new(vec![
        product("plain", ProductCategory::Moisturizer, &[SkinConcern::Acne]),
        product("anti-age", ProductCategory::Moisturizer, &[SkinConcern::Aging, SkinConcern::Acne]),
    ]);
    let young = RecommendationContext::from_parts(Some(&reference_scores()), Some(28), None, Vec::new());
    let older = RecommendationContext::from_parts(Some(&reference_scores()), Some(34), None, Vec::new());
    let engine = RecommendationEngine::default();

    let young_ranked = engine.rank(&young, &catalog, None);
    let older_ranked = engine.rank(&older, &catalog, None);
    assert!((young_ranked[0].score - young_ranked[1].score).abs() < 1e-9);
    assert_eq!(older_ranked[0].product.id, "anti-age");
    assert!((older_ranked[0].score - older_ranked[1].score - 15.0).abs() < 1e-9);
}

#[test]
fn routine_keeps_strong_actives_out_of_the_morning() {
    let mut retinol = product("retinol-serum", ProductCategory::Serum, &[SkinConcern::Acne]);
    retinol.ingredients = vec!["Retinol 0.3%".to_string()];
    retinol.rating = 5.0;
    let mut peel = product("bha-treatment", ProductCategory::Treatment, &[SkinConcern::Acne]);
    peel.ingredients = vec!["BHA".to_string()];
    let catalog = ProductCatalog::new(vec![
        retinol,
        peel,
        product("cleanser", ProductCategory::Cleanser, &[SkinConcern::Acne]),
        product("spf", ProductCategory::Sunscreen, &[SkinConcern::Sensitivity]),
        product("mask", ProductCategory::Mask, &[SkinConcern::Acne]),
    ]);

    let routine = recommend_routine(&reference_context(), &catalog);
    let morning = ids(&routine.morning);
    let evening = ids(&routine.evening);
    assert!(!morning.contains(&"retinol-serum"));
    assert!(morning.contains(&"cleanser"));
    assert!(morning.contains(&"spf"));
    assert!(evening.contains(&"retinol-serum"));
    assert!(evening.contains(&"bha-treatment"));
    assert!(!evening.contains(&"spf"));
    assert!(!morning.contains(&"mask") && !evening.contains(&"mask"));
}

#[test]
fn routine_buckets_can_share_products() {
    let catalog = ProductCatalog::new(vec![
        product("cleanser", ProductCategory::Cleanser, &[SkinConcern::Acne]),
        product("niacinamide-serum", ProductCategory::Serum, &[SkinConcern::Acne]),
        product("cream", ProductCategory::Moisturizer, &[SkinConcern::Sensitivity]),
    ]);

    let routine = recommend_routine(&reference_context(), &catalog);
    let morning = ids(&routine.morning);
    let evening = ids(&routine.evening);
    for id in ["cleanser", "niacinamide-serum", "cream"] {
        assert!(morning.contains(&id), "{} missing from morning", id);
        assert!(evening.contains(&id), "{} missing from evening", id);
    }
}

#[test]
fn routine_buckets_are_capped() {
    let catalog = ProductCatalog::new(
        (0..8)
            .map(|index| product(&format!("c{}", index), ProductCategory::Cleanser, &[SkinConcern::Acne]))
            .collect(),
    );
    let routine = recommend_routine(&reference_context(), &catalog);
    assert_eq!(routine.morning.len(), 4);
    assert_eq!(routine.evening.len(), 4);
}

#[test]
fn builtin_catalog_ranks_every_product() {
    let catalog = ProductCatalog::builtin();
    let ranked = RecommendationEngine::default().rank(&reference_context(), &catalog, None);
    assert_eq!(ranked.len(), catalog.len());
    assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
}
