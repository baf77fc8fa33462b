//! Shared scaffolding for the API tests: an in-memory server state, a router,
//! request helpers and seed data.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use foodgram_server::auth::JwtConfig;
use foodgram_server::db::models::{Ingredient, RecipeWrite, Tag, User};
use foodgram_server::db::repository::{ingredient, recipe, tag, user};
use foodgram_server::{Config, Server, ServerState};

pub struct TestApp {
    pub state: ServerState,
    pub router: Router,
    _media: tempfile::TempDir,
}

pub async fn spawn() -> TestApp {
    let media = tempfile::tempdir().unwrap();
    let config = Config {
        work_dir: media.path().to_string_lossy().into_owned(),
        http_port: 0,
        database_path: ":memory:".to_string(),
        media_dir: media.path().join("media").to_string_lossy().into_owned(),
        shopping_list_filename: "shopping_list.txt".to_string(),
        page_size: 6,
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".to_string(),
            expiration_minutes: 60,
            issuer: "foodgram-server".to_string(),
            audience: "foodgram-clients".to_string(),
        },
        environment: "test".to_string(),
    };

    let state = ServerState::for_tests(config).await.unwrap();
    let router = Server::build_router(state.clone());

    TestApp {
        state,
        router,
        _media: media,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let request = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request("POST", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", uri, token, None).await
    }

    /// Raw GET keeping headers and the unparsed body (for the export endpoint)
    pub async fn get_raw(&self, uri: &str, token: Option<&str>) -> (StatusCode, String, String) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (
            status,
            disposition,
            String::from_utf8_lossy(&bytes).into_owned(),
        )
    }

    // ── Seed data ───────────────────────────────────────────────────

    /// Create a user directly and mint a token for it
    pub async fn seed_user(&self, name: &str) -> (User, String) {
        let hash = foodgram_server::auth::password::hash("sup3r-secret").unwrap();
        let u = user::create(
            &self.state.pool,
            &format!("{name}@example.com"),
            name,
            "Test",
            "User",
            &hash,
        )
        .await
        .unwrap();
        let token = self.state.jwt.generate_token(u.id, &u.username).unwrap();
        (u, token)
    }

    pub async fn seed_tag(&self, name: &str, color: &str, slug: &str) -> Tag {
        tag::create(&self.state.pool, name, color, slug).await.unwrap()
    }

    pub async fn seed_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        ingredient::create(&self.state.pool, name, unit).await.unwrap()
    }

    /// Create a recipe through the repository (skipping handler validation)
    pub async fn seed_recipe(
        &self,
        author_id: i64,
        name: &str,
        tags: Vec<i64>,
        ingredients: Vec<(i64, i64)>,
    ) -> i64 {
        let write = RecipeWrite {
            ingredients: ingredients
                .into_iter()
                .map(|(id, amount)| foodgram_server::db::models::IngredientAmountWrite {
                    id,
                    amount,
                })
                .collect(),
            tags,
            image: None,
            name: name.to_string(),
            text: "Mix and cook.".to_string(),
            cooking_time: 10,
        };
        recipe::create(&self.state.pool, author_id, &write, None)
            .await
            .unwrap()
            .id
    }
}

/// Recipe write payload as the API receives it
pub fn recipe_payload(tags: &[i64], ingredients: &[(i64, i64)]) -> Value {
    json!({
        "name": "Omelette",
        "text": "Whisk and fry.",
        "cooking_time": 5,
        "tags": tags,
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({"id": id, "amount": amount}))
            .collect::<Vec<_>>(),
    })
}
