// End-to-end activity tests against the in-memory store and a scripted
// price oracle.

use chrono::{Duration, Utc};
use uuid::Uuid;

use api_core::common::CoreError;
use api_core::domains::properties::activities::{
    create_property, delete_property, get_property, list_properties, list_saved_properties,
    save_property, unsave_property, update_property,
};
use api_core::domains::properties::models::{ListingKind, NewProperty, Property, PropertyPatch};
use api_core::domains::pricing::activities::predict_price;
use api_core::domains::properties::queries::PropertyFilters;
use api_core::kernel::{BaseListingStore, MockPriceOracle, TestDependencies};
use ml_client::{Prediction, PredictionRequest, PriceRange};

fn new_listing(kind: ListingKind, city: &str, price: i64, total_area: f64) -> NewProperty {
    NewProperty {
        kind,
        state: "Maharashtra".to_string(),
        city: city.to_string(),
        area: "Baner".to_string(),
        landmark: None,
        pincode: None,
        latitude: None,
        longitude: None,
        property_type: "apartment".to_string(),
        bhk_type: Some("2BHK".to_string()),
        total_area: Some(total_area),
        price: Some(price),
        total_floors: Some(10),
        property_floor: Some(4),
        age: None,
        furnishing: None,
        amenities: vec![],
        images: vec![],
    }
}

// =============================================================================
// Create + oracle enrichment
// =============================================================================

#[tokio::test]
async fn create_sale_listing_attaches_prediction() {
    let test_deps = TestDependencies::with_oracle(MockPriceOracle::new().with_prediction(
        Prediction {
            predicted_price: 8_200_000.0,
            confidence: 0.9,
            ai_score: 88.0,
            price_range: PriceRange {
                min: 7_400_000.0,
                max: 9_000_000.0,
            },
            market_position: "GREAT DEAL".to_string(),
        },
    ));
    let deps = test_deps.deps();

    let owner = Uuid::new_v4();
    let created = create_property(
        owner,
        new_listing(ListingKind::SellHouse, "Pune", 8_000_000, 1200.0),
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(created.predicted_price, Some(8_200_000.0));
    assert_eq!(created.ai_price_score, Some(88.0));
    let range = created.price_range.unwrap();
    assert_eq!(range.min, 7_400_000.0);
    assert_eq!(range.max, 9_000_000.0);
    assert_eq!(test_deps.price_oracle.call_count(), 1);

    // Enriched fields were persisted, not just echoed.
    let stored = test_deps
        .listings
        .find_by_id(created.id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.ai_score, Some(88.0));
}

#[tokio::test]
async fn create_succeeds_when_oracle_is_down() {
    let test_deps = TestDependencies::with_oracle(MockPriceOracle::new().failing());
    let deps = test_deps.deps();

    let created = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::SellLand, "Nashik", 3_000_000, 2400.0),
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(created.predicted_price, None);
    assert_eq!(created.ai_price_score, None);
    assert!(created.price_range.is_none());
    // Single attempt, no retry.
    assert_eq!(test_deps.price_oracle.call_count(), 1);

    // The listing itself is durable.
    let fetched = get_property(created.id.parse().unwrap(), &deps).await.unwrap();
    assert_eq!(fetched.city, "Nashik");
}

#[tokio::test]
async fn buy_listings_are_never_scored() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::BuyHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(test_deps.price_oracle.call_count(), 0);
}

#[tokio::test]
async fn create_derives_price_per_sqft() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let created = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::BuyHouse, "Pune", 10_000_000, 1450.0),
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(created.price_per_sqft, Some(6897));
}

// =============================================================================
// Direct prediction
// =============================================================================

#[tokio::test]
async fn direct_prediction_serves_fallback_when_oracle_is_down() {
    let test_deps = TestDependencies::with_oracle(MockPriceOracle::new().failing());
    let deps = test_deps.deps();

    let prediction = predict_price(
        &PredictionRequest {
            city: Some("Pune".to_string()),
            total_area: Some(1200.0),
            price: Some(2_000_000.0),
            ..Default::default()
        },
        &deps,
    )
    .await;

    assert_eq!(prediction.predicted_price, 2_000_000.0);
    assert_eq!(prediction.ai_score, 75.0);
    assert_eq!(prediction.confidence, 0.75);
    assert_eq!(prediction.price_range.min, 1_800_000.0);
    assert_eq!(prediction.price_range.max, 2_200_000.0);
    assert_eq!(prediction.market_position, "FAIR PRICE");

    // No asking price supplied: the fallback assumes its default base.
    let prediction = predict_price(&PredictionRequest::default(), &deps).await;
    assert_eq!(prediction.predicted_price, 5_000_000.0);
    assert_eq!(prediction.price_range.max, 5_500_000.0);
}

// =============================================================================
// Detail fetch / view counter
// =============================================================================

#[tokio::test]
async fn detail_fetch_increments_views_each_time() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let created = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::BuyHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();
    let id: Uuid = created.id.parse().unwrap();

    for _ in 0..3 {
        get_property(id, &deps).await.unwrap();
    }

    let stored = test_deps.listings.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.views, 3);
}

#[tokio::test]
async fn detail_fetch_of_missing_property_is_not_found() {
    let deps = TestDependencies::new().deps();
    assert!(matches!(
        get_property(Uuid::new_v4(), &deps).await,
        Err(CoreError::NotFound(_))
    ));
}

// =============================================================================
// Ownership
// =============================================================================

#[tokio::test]
async fn update_by_non_owner_is_forbidden_and_leaves_record_unchanged() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let created = create_property(
        owner,
        new_listing(ListingKind::BuyHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();
    let id: Uuid = created.id.parse().unwrap();

    let patch = PropertyPatch {
        price: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        update_property(id, intruder, patch, &deps).await,
        Err(CoreError::Forbidden(_))
    ));

    let stored = test_deps.listings.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.price, Some(5_000_000));
}

#[tokio::test]
async fn delete_by_non_owner_is_forbidden() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let owner = Uuid::new_v4();
    let created = create_property(
        owner,
        new_listing(ListingKind::BuyHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();
    let id: Uuid = created.id.parse().unwrap();

    assert!(matches!(
        delete_property(id, Uuid::new_v4(), &deps).await,
        Err(CoreError::Forbidden(_))
    ));
    assert!(test_deps.listings.find_by_id(id).await.unwrap().is_some());

    delete_property(id, owner, &deps).await.unwrap();
    assert!(test_deps.listings.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn update_repricing_rederives_price_per_sqft() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let owner = Uuid::new_v4();
    let created = create_property(
        owner,
        new_listing(ListingKind::BuyHouse, "Pune", 10_000_000, 1000.0),
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(created.price_per_sqft, Some(10_000));

    let patch = PropertyPatch {
        price: Some(12_000_000),
        ..Default::default()
    };
    let updated = update_property(created.id.parse().unwrap(), owner, patch, &deps)
        .await
        .unwrap();
    assert_eq!(updated.price_per_sqft, Some(12_000));
}

// =============================================================================
// Save / unsave
// =============================================================================

#[tokio::test]
async fn duplicate_save_conflicts_and_counts_once() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let principal = Uuid::new_v4();
    let created = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::SellHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();
    let id: Uuid = created.id.parse().unwrap();

    save_property(principal, id, &deps).await.unwrap();
    assert!(matches!(
        save_property(principal, id, &deps).await,
        Err(CoreError::Conflict(_))
    ));

    assert_eq!(test_deps.listings.saves_counter(id), Some(1));
}

#[tokio::test]
async fn unsave_of_never_saved_pair_is_not_found() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let created = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::BuyHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();
    let id: Uuid = created.id.parse().unwrap();

    assert!(matches!(
        unsave_property(Uuid::new_v4(), id, &deps).await,
        Err(CoreError::NotFound(_))
    ));
    assert_eq!(test_deps.listings.saves_counter(id), Some(0));
}

#[tokio::test]
async fn save_then_unsave_returns_counter_to_zero() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let principal = Uuid::new_v4();
    let created = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::BuyHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();
    let id: Uuid = created.id.parse().unwrap();

    save_property(principal, id, &deps).await.unwrap();
    assert_eq!(test_deps.listings.saves_counter(id), Some(1));

    unsave_property(principal, id, &deps).await.unwrap();
    assert_eq!(test_deps.listings.saves_counter(id), Some(0));
}

#[tokio::test]
async fn unsave_never_drives_counter_negative() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let principal = Uuid::new_v4();
    let created = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::BuyHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();
    let id: Uuid = created.id.parse().unwrap();

    save_property(principal, id, &deps).await.unwrap();
    // Counter drifted out-of-band; the decrement must still floor at zero.
    test_deps.listings.set_saves_counter(id, 0);

    unsave_property(principal, id, &deps).await.unwrap();
    assert_eq!(test_deps.listings.saves_counter(id), Some(0));
}

#[tokio::test]
async fn save_of_missing_property_is_not_found() {
    let deps = TestDependencies::new().deps();
    assert!(matches!(
        save_property(Uuid::new_v4(), Uuid::new_v4(), &deps).await,
        Err(CoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn saved_list_contains_saved_properties() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    let principal = Uuid::new_v4();
    let first = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::BuyHouse, "Pune", 5_000_000, 900.0),
        &deps,
    )
    .await
    .unwrap();
    let second = create_property(
        Uuid::new_v4(),
        new_listing(ListingKind::BuyHouse, "Mumbai", 9_000_000, 700.0),
        &deps,
    )
    .await
    .unwrap();

    save_property(principal, first.id.parse().unwrap(), &deps)
        .await
        .unwrap();
    save_property(principal, second.id.parse().unwrap(), &deps)
        .await
        .unwrap();

    let saved = list_saved_properties(principal, &deps).await.unwrap();
    assert_eq!(saved.len(), 2);
    let cities: Vec<&str> = saved.iter().map(|p| p.city.as_str()).collect();
    assert!(cities.contains(&"Pune"));
    assert!(cities.contains(&"Mumbai"));
}

// =============================================================================
// Search
// =============================================================================

fn stored_listing(city: &str, price: i64, active: bool, age_minutes: i64) -> Property {
    let created_at = Utc::now() - Duration::minutes(age_minutes);
    Property {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        kind: ListingKind::SellHouse,
        state: "Maharashtra".to_string(),
        city: city.to_string(),
        area: "Baner".to_string(),
        landmark: None,
        pincode: None,
        latitude: None,
        longitude: None,
        property_type: "apartment".to_string(),
        bhk_type: Some("2BHK".to_string()),
        total_area: Some(1000.0),
        price: Some(price),
        price_per_sqft: Some(price / 1000),
        total_floors: None,
        property_floor: None,
        age: None,
        furnishing: None,
        amenities: vec![],
        images: vec![],
        predicted_price: None,
        ai_score: None,
        price_range_min: None,
        price_range_max: None,
        is_verified: false,
        is_active: active,
        views: 0,
        saves: 0,
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn search_filters_and_paginates() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    for i in 0..25 {
        test_deps
            .listings
            .insert(stored_listing("Pune", 2_000_000 + i * 100_000, true, i))
            .await
            .unwrap();
    }
    test_deps
        .listings
        .insert(stored_listing("Mumbai", 9_000_000, true, 30))
        .await
        .unwrap();
    // Inactive listings are invisible regardless of filters.
    test_deps
        .listings
        .insert(stored_listing("Pune", 2_500_000, false, 31))
        .await
        .unwrap();

    let filters = PropertyFilters {
        city: Some("Pune".to_string()),
        page: Some("2".to_string()),
        limit: Some("10".to_string()),
        ..Default::default()
    };
    let page = list_properties(&filters, &deps).await.unwrap();

    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.pages, 3);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.properties.len(), 10);
    assert!(page.properties.iter().all(|p| p.city == "Pune"));

    // Newest first: page 2 of the minute-spaced series starts at the
    // eleventh-newest record.
    assert_eq!(
        page.properties.first().unwrap().price,
        Some(2_000_000 + 10 * 100_000)
    );
}

#[tokio::test]
async fn search_price_bounds() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    for (price, minutes) in [(1_000_000, 1), (2_000_000, 2), (3_000_000, 3)] {
        test_deps
            .listings
            .insert(stored_listing("Pune", price, true, minutes))
            .await
            .unwrap();
    }

    let filters = PropertyFilters {
        min_price: Some("1500000".to_string()),
        max_price: Some("2500000".to_string()),
        ..Default::default()
    };
    let page = list_properties(&filters, &deps).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.properties[0].price, Some(2_000_000));
}

#[tokio::test]
async fn search_rejects_malformed_numeric_filter() {
    let deps = TestDependencies::new().deps();

    let filters = PropertyFilters {
        state: Some("Karnataka".to_string()),
        min_price: Some("1000000".to_string()),
        max_price: Some("abc".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        list_properties(&filters, &deps).await,
        Err(CoreError::InvalidFilter(_))
    ));
}
