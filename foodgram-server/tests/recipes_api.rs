//! Recipe API integration tests: creation, validation, filtering, updates.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{recipe_payload, spawn};
use foodgram_server::db::repository::recipe;

#[tokio::test]
async fn create_requires_auth() {
    let app = spawn().await;
    let (status, body) = app.post("/api/recipes", None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn create_and_fetch_recipe() {
    let app = spawn().await;
    let (_author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Breakfast", "#E26C2D", "breakfast").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    let milk = app.seed_ingredient("Milk", "ml").await;

    let (status, body) = app
        .post(
            "/api/recipes",
            Some(&token),
            recipe_payload(&[tag.id], &[(eggs.id, 3), (milk.id, 200)]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["name"], "Omelette");
    assert_eq!(body["tags"][0]["slug"], "breakfast");
    assert_eq!(body["ingredients"][0]["name"], "Eggs");
    assert_eq!(body["ingredients"][0]["amount"], 3);
    assert_eq!(body["is_favorited"], false);
    assert_eq!(body["is_in_shopping_cart"], false);
    assert_eq!(body["author"]["username"], "chef");

    // One join row per distinct submitted ingredient
    let rows = recipe::ingredient_row_count(&app.state.pool, body["id"].as_i64().unwrap())
        .await
        .unwrap();
    assert_eq!(rows, 2);

    // The read endpoint renders the same representation, anonymously too
    let id = body["id"].as_i64().unwrap();
    let (status, fetched) = app.get(&format!("/api/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Omelette");
    assert_eq!(fetched["author"]["is_subscribed"], false);
}

#[tokio::test]
async fn create_rejects_empty_ingredients() {
    let app = spawn().await;
    let (_author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;

    let (status, body) = app
        .post("/api/recipes", Some(&token), recipe_payload(&[tag.id], &[]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["ingredients"].is_array());
}

#[tokio::test]
async fn create_rejects_unknown_ingredient_as_not_found() {
    let app = spawn().await;
    let (_author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;

    let (status, body) = app
        .post(
            "/api/recipes",
            Some(&token),
            recipe_payload(&[tag.id], &[(9999, 1)]),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
}

#[tokio::test]
async fn create_rejects_zero_amount_without_partial_insert() {
    let app = spawn().await;
    let (_author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    let milk = app.seed_ingredient("Milk", "ml").await;

    let (status, body) = app
        .post(
            "/api/recipes",
            Some(&token),
            recipe_payload(&[tag.id], &[(eggs.id, 2), (milk.id, 0)]),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    // The whole write is rejected; nothing was inserted
    let q = recipe::RecipeQuery {
        limit: 10,
        ..Default::default()
    };
    let (rows, count) = recipe::list(&app.state.pool, &q).await.unwrap();
    assert_eq!(count, 0);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn create_rejects_repeated_ingredients() {
    let app = spawn().await;
    let (_author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;

    let (status, body) = app
        .post(
            "/api/recipes",
            Some(&token),
            recipe_payload(&[tag.id], &[(eggs.id, 1), (eggs.id, 2)]),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["ingredients"].is_array());
}

#[tokio::test]
async fn update_replaces_tag_set() {
    let app = spawn().await;
    let (author, token) = app.seed_user("chef").await;
    let breakfast = app.seed_tag("Breakfast", "#E26C2D", "breakfast").await;
    let dinner = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;

    let id = app
        .seed_recipe(
            author.id,
            "Omelette",
            vec![breakfast.id, dinner.id],
            vec![(eggs.id, 3)],
        )
        .await;

    let (status, body) = app
        .request(
            "PATCH",
            &format!("/api/recipes/{id}"),
            Some(&token),
            Some(recipe_payload(&[dinner.id], &[(eggs.id, 3)])),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let tags = body["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["slug"], "dinner");
}

#[tokio::test]
async fn update_by_non_author_is_forbidden() {
    let app = spawn().await;
    let (author, _) = app.seed_user("chef").await;
    let (_other, other_token) = app.seed_user("rival").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;

    let id = app
        .seed_recipe(author.id, "Omelette", vec![tag.id], vec![(eggs.id, 3)])
        .await;

    let (status, body) = app
        .request(
            "PATCH",
            &format!("/api/recipes/{id}"),
            Some(&other_token),
            Some(recipe_payload(&[tag.id], &[(eggs.id, 1)])),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "E2001");

    let (status, _) = app
        .delete(&format!("/api/recipes/{id}"), Some(&other_token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn delete_by_author() {
    let app = spawn().await;
    let (author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    let id = app
        .seed_recipe(author.id, "Omelette", vec![tag.id], vec![(eggs.id, 3)])
        .await;

    let (status, _) = app.delete(&format!("/api/recipes/{id}"), Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tag_filter_selects_by_slug_membership() {
    let app = spawn().await;
    let (author, _) = app.seed_user("chef").await;
    let breakfast = app.seed_tag("Breakfast", "#E26C2D", "breakfast").await;
    let dinner = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;

    app.seed_recipe(author.id, "Omelette", vec![breakfast.id], vec![(eggs.id, 3)])
        .await;
    app.seed_recipe(author.id, "Roast", vec![dinner.id], vec![(eggs.id, 1)])
        .await;

    let (status, body) = app.get("/api/recipes?tags=breakfast", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "Omelette");

    // Repeated tags params widen the set
    let (_, body) = app.get("/api/recipes?tags=breakfast&tags=dinner", None).await;
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn anonymous_favorite_filter_is_a_no_op() {
    let app = spawn().await;
    let (author, _) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    app.seed_recipe(author.id, "Omelette", vec![tag.id], vec![(eggs.id, 3)])
        .await;
    app.seed_recipe(author.id, "Roast", vec![tag.id], vec![(eggs.id, 1)])
        .await;

    let (_, unfiltered) = app.get("/api/recipes", None).await;
    let (status, filtered) = app.get("/api/recipes?is_favorited=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered["count"], unfiltered["count"]);
}

#[tokio::test]
async fn listing_paginates_newest_first() {
    let app = spawn().await;
    let (author, _) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    for i in 0..8 {
        app.seed_recipe(
            author.id,
            &format!("Recipe {i}"),
            vec![tag.id],
            vec![(eggs.id, 1)],
        )
        .await;
    }

    let (status, body) = app.get("/api/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 8);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 6);
    assert!(body["next"].is_string());
    assert!(body["previous"].is_null());
    assert!(results[0]["id"].as_i64() > results[1]["id"].as_i64());

    let (_, page2) = app.get("/api/recipes?page=2", None).await;
    assert_eq!(page2["results"].as_array().unwrap().len(), 2);
    assert!(page2["previous"].is_string());
    assert!(page2["next"].is_null());

    let (_, small) = app.get("/api/recipes?limit=3", None).await;
    assert_eq!(small["results"].as_array().unwrap().len(), 3);

    // A page far past the data answers with an empty page, never an error
    let (status, far) = app.get("/api/recipes?page=4294967295", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(far["count"], 8);
    assert!(far["results"].as_array().unwrap().is_empty());
}
