//! Favorites, shopping cart and the shopping-list export.

mod common;

use axum::http::StatusCode;

use common::spawn;

#[tokio::test]
async fn favorite_round_trip() {
    let app = spawn().await;
    let (author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    let id = app
        .seed_recipe(author.id, "Omelette", vec![tag.id], vec![(eggs.id, 3)])
        .await;

    let (status, body) = app
        .request("POST", &format!("/api/recipes/{id}/favorite"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["id"].as_i64(), Some(id));
    assert_eq!(body["name"], "Omelette");
    assert_eq!(body["cooking_time"], 10);
    // Compact representation only
    assert!(body.get("ingredients").is_none());

    // The flag shows up in the read representation for this caller
    let (_, view) = app.get(&format!("/api/recipes/{id}"), Some(&token)).await;
    assert_eq!(view["is_favorited"], true);

    // Repeating the request is a conflict, not a second row
    let (status, body) = app
        .request("POST", &format!("/api/recipes/{id}/favorite"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    let (status, _) = app
        .delete(&format!("/api/recipes/{id}/favorite"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Removing again reports the absence
    let (status, _) = app
        .delete(&format!("/api/recipes/{id}/favorite"), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, view) = app.get(&format!("/api/recipes/{id}"), Some(&token)).await;
    assert_eq!(view["is_favorited"], false);
}

#[tokio::test]
async fn favoriting_unknown_recipe_is_not_found() {
    let app = spawn().await;
    let (_user, token) = app.seed_user("chef").await;

    let (status, _) = app
        .request("POST", "/api/recipes/42/favorite", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cart_duplicate_is_conflict() {
    let app = spawn().await;
    let (author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    let id = app
        .seed_recipe(author.id, "Omelette", vec![tag.id], vec![(eggs.id, 3)])
        .await;

    let uri = format!("/api/recipes/{id}/shopping_cart");
    let (status, _) = app.request("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app.request("POST", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shopping_list_sums_shared_ingredients() {
    let app = spawn().await;
    let (author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    let milk = app.seed_ingredient("Milk", "ml").await;

    // Two cart recipes share Eggs; the export aggregates to one line
    let omelette = app
        .seed_recipe(
            author.id,
            "Omelette",
            vec![tag.id],
            vec![(eggs.id, 2), (milk.id, 200)],
        )
        .await;
    let cake = app
        .seed_recipe(author.id, "Cake", vec![tag.id], vec![(eggs.id, 3)])
        .await;

    for id in [omelette, cake] {
        let (status, _) = app
            .request(
                "POST",
                &format!("/api/recipes/{id}/shopping_cart"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, disposition, body) = app
        .get_raw("/api/recipes/download_shopping_cart", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(disposition.contains("shopping_list.txt"), "{disposition}");
    assert_eq!(body, "Shopping list:\n Eggs - 5(pcs)\n Milk - 200(ml)\n");
}

#[tokio::test]
async fn shopping_list_requires_auth() {
    let app = spawn().await;
    let (status, _, _) = app.get_raw("/api/recipes/download_shopping_cart", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cart_filter_only_shows_marked_recipes() {
    let app = spawn().await;
    let (author, token) = app.seed_user("chef").await;
    let tag = app.seed_tag("Dinner", "#00FF00", "dinner").await;
    let eggs = app.seed_ingredient("Eggs", "pcs").await;
    let in_cart = app
        .seed_recipe(author.id, "Omelette", vec![tag.id], vec![(eggs.id, 2)])
        .await;
    app.seed_recipe(author.id, "Roast", vec![tag.id], vec![(eggs.id, 1)])
        .await;

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/recipes/{in_cart}/shopping_cart"),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app
        .get("/api/recipes?is_in_shopping_cart=1", Some(&token))
        .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["id"].as_i64(), Some(in_cart));
    assert_eq!(body["results"][0]["is_in_shopping_cart"], true);
}
