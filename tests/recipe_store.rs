//! Integration tests for the recipe store operations and derived views.

mod support;

use recipe_store::{
    generate_recommendations, DuplicateIdPolicy, Favorites, Recipe, RecipePatch, RecipeStore,
    StoreConfig, StoreError, StoreSnapshot,
};
use support::recipes::{abcd, ids, pasta, salad};

#[test]
fn search_narrows_and_clears() {
    let mut store = RecipeStore::new();
    store.add_recipe(pasta()).unwrap();
    store.add_recipe(salad()).unwrap();

    store.set_search_term("toma");
    assert_eq!(store.filtered_recipes(), &[pasta()]);

    store.set_search_term("");
    assert_eq!(store.filtered_recipes(), &[pasta(), salad()]);
}

#[test]
fn search_term_is_stored_verbatim() {
    let mut store = RecipeStore::new();
    store.set_recipes(vec![pasta(), salad()]).unwrap();

    store.set_search_term("   ");
    assert_eq!(store.search_term(), "   ");
    assert_eq!(ids(store.filtered_recipes()), vec![1, 2]);

    store.set_search_term("SALAD");
    assert_eq!(store.search_term(), "SALAD");
    assert_eq!(ids(store.filtered_recipes()), vec![2]);
}

#[test]
fn search_applies_to_later_writes() {
    let mut store = RecipeStore::new();
    store.set_search_term("soup");

    store.add_recipe(pasta()).unwrap();
    assert!(store.filtered_recipes().is_empty());

    store.add_recipe(Recipe::new(3, "Tomato Soup", "")).unwrap();
    assert_eq!(ids(store.filtered_recipes()), vec![3]);

    store
        .update_recipe(1, RecipePatch::new().description("Goes well with soup"))
        .unwrap();
    assert_eq!(ids(store.filtered_recipes()), vec![1, 3]);

    store.delete_recipe(3);
    assert_eq!(ids(store.filtered_recipes()), vec![1]);
}

#[test]
fn delete_leaves_dangling_favorite() {
    let mut store = RecipeStore::new();
    store.add_recipe(pasta()).unwrap();
    store.add_recipe(salad()).unwrap();
    store.add_favorite(1);
    store.add_favorite(2);

    assert!(store.delete_recipe(1));

    assert!(store.recipe(1).is_none());
    assert!(store.is_favorite(1));
    assert_eq!(store.favorites().as_slice(), &[1, 2]);
    assert_eq!(store.favorite_recipes(), vec![salad()]);
}

#[test]
fn update_merges_shallowly() {
    let mut store = RecipeStore::new();
    store.add_recipe(pasta()).unwrap();
    store.add_recipe(salad()).unwrap();

    let found = store
        .update_recipe(2, RecipePatch::new().description("Greens and nuts"))
        .unwrap();
    assert!(found);

    let updated = store.recipe(2).unwrap();
    assert_eq!(updated.title, "Salad");
    assert_eq!(updated.description, "Greens and nuts");
    assert_eq!(ids(store.recipes()), vec![1, 2]);
}

#[test]
fn update_patch_from_json() {
    let mut store = RecipeStore::new();
    store.add_recipe(pasta()).unwrap();

    let patch: RecipePatch = serde_json::from_str(r#"{"title":"Penne"}"#).unwrap();
    store.update_recipe(1, patch).unwrap();

    assert_eq!(store.recipe(1), Some(&Recipe::new(1, "Penne", "Tomato")));
}

#[test]
fn cold_start_recommendations() {
    let recipes = abcd();
    let result = generate_recommendations(&Favorites::new(), &recipes);
    assert_eq!(ids(&result), vec![1, 2, 3]);
}

#[test]
fn recommendations_exclude_favorites() {
    let mut store = RecipeStore::new();
    store.set_recipes(abcd()).unwrap();

    store.add_favorite(1);
    assert_eq!(ids(store.recommendations()), vec![2, 3, 4]);

    store.add_favorite(3);
    assert_eq!(ids(store.recommendations()), vec![2, 4]);

    store.remove_favorite(1);
    assert_eq!(ids(store.recommendations()), vec![1, 2, 4]);
}

#[test]
fn favorites_are_idempotent() {
    let mut store = RecipeStore::new();
    store.set_recipes(abcd()).unwrap();

    assert!(store.add_favorite(2));
    let after_first = store.state().clone();
    assert!(!store.add_favorite(2));
    assert_eq!(store.state(), &after_first);

    assert!(!store.remove_favorite(4));
    assert_eq!(store.state(), &after_first);
}

#[test]
fn favorites_may_reference_unknown_recipes() {
    let mut store = RecipeStore::new();
    store.set_recipes(abcd()).unwrap();

    assert!(store.add_favorite(99));
    assert!(store.is_favorite(99));
    assert!(store.favorite_recipes().is_empty());
    assert_eq!(ids(store.recommendations()), vec![1, 2, 3]);
}

#[test]
fn manual_refresh_matches_pure_function() {
    let config = StoreConfig::default().with_refresh_recommendations_on_write(false);
    let mut store = RecipeStore::with_config(config);
    store.add_favorite(2);
    store.set_recipes(abcd()).unwrap();

    assert!(store.recommendations().is_empty());

    let expected = generate_recommendations(store.favorites(), store.recipes());
    assert_eq!(store.generate_recommendations(), expected.as_slice());
    assert_eq!(ids(store.recommendations()), vec![1, 3, 4]);
}

#[test]
fn recommendation_limit_is_configurable() {
    let config = StoreConfig::default().with_recommendation_limit(1);
    let mut store = RecipeStore::with_config(config);
    store.set_recipes(abcd()).unwrap();

    assert_eq!(ids(store.recommendations()), vec![1]);
}

#[test]
fn bulk_load_from_json() {
    let mut store = RecipeStore::new();
    store
        .load_recipes_json(
            r#"[
                {"id": 10, "title": "Curry", "description": "Spicy"},
                {"id": 11, "title": "Bread"}
            ]"#,
        )
        .unwrap();

    assert_eq!(ids(store.recipes()), vec![10, 11]);
    assert_eq!(store.recipe(11).unwrap().description, "");

    let err = store.load_recipes_json("{not json").unwrap_err();
    assert!(matches!(err, StoreError::Serde(_)));
    assert_eq!(ids(store.recipes()), vec![10, 11]);
}

#[test]
fn bulk_load_with_replace_policy_keeps_last() {
    let config = StoreConfig::default().with_duplicate_ids(DuplicateIdPolicy::Replace);
    let mut store = RecipeStore::with_config(config);

    store
        .set_recipes(vec![pasta(), salad(), Recipe::new(1, "Penne", "Basil")])
        .unwrap();

    assert_eq!(ids(store.recipes()), vec![1, 2]);
    assert_eq!(store.recipe(1).unwrap().title, "Penne");
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut store = RecipeStore::new();
    store.set_recipes(abcd()).unwrap();
    store.set_search_term("recipe b");
    store.add_favorite(4);
    store.add_favorite(42);

    let json = serde_json::to_string(&store.snapshot()).unwrap();
    let restored = RecipeStore::from_json(&json, StoreConfig::default()).unwrap();

    assert_eq!(restored.state(), store.state());
    assert_eq!(ids(restored.filtered_recipes()), vec![2]);
    assert_eq!(ids(restored.recommendations()), vec![1, 2, 3]);
}

#[test]
fn snapshot_with_duplicate_ids_is_rejected() {
    let snapshot = StoreSnapshot {
        recipes: vec![pasta(), pasta()],
        ..StoreSnapshot::default()
    };

    let err = RecipeStore::from_snapshot(snapshot, StoreConfig::default()).unwrap_err();
    assert_eq!(err, StoreError::DuplicateId(1));
}

#[test]
fn partial_snapshot_json_uses_defaults() {
    let store = RecipeStore::from_json(
        r#"{"recipes": [{"id": 1, "title": "Pasta", "description": "Tomato"}]}"#,
        StoreConfig::default(),
    )
    .unwrap();

    assert_eq!(store.search_term(), "");
    assert!(store.favorites().is_empty());
    assert_eq!(store.filtered_recipes(), &[pasta()]);
}
