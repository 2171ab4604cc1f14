use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use serde_json::json;

// Shared test context
struct TestContext {
    client: reqwest::Client,
    base_url: String,
}

static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const IMAGE_BYTES: &[u8] = b"fake image bytes for upload tests";

impl TestContext {
    fn new() -> Self {
        dotenvy::dotenv().ok();

        Self {
            client: CLIENT.clone(),
            base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    /// Logs in with the bootstrap admin and returns `(token, admin_id)`.
    async fn login(&self) -> (String, String) {
        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();

        assert_eq!(
            response.status().as_u16(),
            200,
            "Admin login failed; run the create_admin binary first"
        );

        let body: serde_json::Value = response.json().await.unwrap();
        (
            body["token"].as_str().unwrap().to_string(),
            body["admin"]["id"].as_str().unwrap().to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn contains_id(list: &Value, id: &str) -> bool {
        list.as_array()
            .map(|items| items.iter().any(|item| item["id"] == id))
            .unwrap_or(false)
    }

    async fn create_category(context: &TestContext, token: &str, name: &str) -> Value {
        let response = context
            .client
            .post(format!("{}/api/categories", context.base_url))
            .bearer_auth(token)
            .json(&json!({
                "name": name,
                "description": "Created by the integration suite"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 201, "Category create failed");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Category created");
        body["category"].clone()
    }

    async fn create_product(
        context: &TestContext,
        token: &str,
        category_id: &str,
        name: &str,
        price: f64,
    ) -> Value {
        let response = context
            .client
            .post(format!("{}/api/products", context.base_url))
            .bearer_auth(token)
            .json(&json!({
                "name": name,
                "description": format!("{} from the integration suite", name),
                "price": price,
                "category": category_id,
                "stock": 4
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 201, "Product create failed");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Product created");
        body["product"].clone()
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_health_index_and_fallback() {
        let context = TestContext::new();

        // Step 1: Health report
        let health = context
            .client
            .get(format!("{}/health", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(health.status().as_u16(), 200);
        let health_body: Value = health.json().await.unwrap();
        assert_eq!(health_body["status"], "OK");
        assert_eq!(health_body["database"], "Connected");
        assert!(health_body["environment"].is_string());
        assert!(health_body["timestamp"].is_string());

        // Step 2: API index
        let index = context
            .client
            .get(format!("{}/", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(index.status().as_u16(), 200);
        let index_body: Value = index.json().await.unwrap();
        assert_eq!(index_body["endpoints"]["categories"], "/api/categories");
        assert_eq!(index_body["endpoints"]["upload"], "/api/upload");

        // Step 3: Unmatched routes fall back to JSON
        let missing = context
            .client
            .get(format!("{}/no/such/route", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status().as_u16(), 404);
        let missing_body: Value = missing.json().await.unwrap();
        assert_eq!(missing_body["message"], "Route not found");
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_admin_login_and_verify() {
        let context = TestContext::new();
        let (token, admin_id) = context.login().await;

        // The issued token identifies the admin on /verify
        let response = context
            .client
            .get(format!("{}/api/auth/verify", context.base_url))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["admin"]["id"], admin_id.as_str());
        assert!(body["admin"]["username"].is_string());
        assert!(
            body["admin"].get("password").is_none(),
            "password digest must never be exposed"
        );
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_login_failures_are_indistinguishable() {
        let context = TestContext::new();

        let wrong_password = context
            .client
            .post(format!("{}/api/auth/login", context.base_url))
            .json(&json!({ "username": "admin", "password": "definitely-wrong" }))
            .send()
            .await
            .unwrap();
        assert_eq!(wrong_password.status().as_u16(), 401);
        let wrong_password_body: Value = wrong_password.json().await.unwrap();

        let unknown_user = context
            .client
            .post(format!("{}/api/auth/login", context.base_url))
            .json(&json!({ "username": "nobody-here", "password": "definitely-wrong" }))
            .send()
            .await
            .unwrap();
        assert_eq!(unknown_user.status().as_u16(), 401);
        let unknown_user_body: Value = unknown_user.json().await.unwrap();

        // The same message for both failure causes
        assert_eq!(wrong_password_body["message"], "Invalid username or password");
        assert_eq!(wrong_password_body["message"], unknown_user_body["message"]);
        assert!(wrong_password_body.get("token").is_none());
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_missing_and_invalid_tokens() {
        let context = TestContext::new();

        let missing = context
            .client
            .get(format!("{}/api/auth/verify", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status().as_u16(), 401);
        let missing_body: Value = missing.json().await.unwrap();
        assert_eq!(missing_body["message"], "Authorization required");

        let garbage = context
            .client
            .get(format!("{}/api/auth/verify", context.base_url))
            .bearer_auth("not.a.token")
            .send()
            .await
            .unwrap();
        assert_eq!(garbage.status().as_u16(), 401);
        let garbage_body: Value = garbage.json().await.unwrap();
        assert_eq!(garbage_body["message"], "Invalid token");
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_expired_tokens_are_rejected() {
        let context = TestContext::new();

        let Ok(secret) = std::env::var("JWT_SECRET") else {
            eprintln!("JWT_SECRET not set; skipping expiry check");
            return;
        };

        let (_, admin_id) = context.login().await;

        #[derive(serde::Serialize)]
        struct Claims {
            sub: String,
            iat: i64,
            exp: i64,
        }

        let mint = |exp_offset: i64| {
            let now = chrono::Utc::now().timestamp();
            jsonwebtoken::encode(
                &jsonwebtoken::Header::default(),
                &Claims {
                    sub: admin_id.clone(),
                    iat: now,
                    exp: now + exp_offset,
                },
                &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
            )
            .unwrap()
        };

        // A token past its expiry is rejected, with no grace window
        let expired = context
            .client
            .get(format!("{}/api/auth/verify", context.base_url))
            .bearer_auth(mint(-30))
            .send()
            .await
            .unwrap();
        assert_eq!(expired.status().as_u16(), 401);

        // A token within its lifetime is accepted even near the boundary
        let near_expiry = context
            .client
            .get(format!("{}/api/auth/verify", context.base_url))
            .bearer_auth(mint(5))
            .send()
            .await
            .unwrap();
        assert_eq!(near_expiry.status().as_u16(), 200);
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_unauthenticated_writes_do_not_mutate() {
        let context = TestContext::new();
        let marker = format!("ghost{}", TestContext::get_timestamp());

        let before: Value = context
            .client
            .get(format!(
                "{}/api/products?search={}",
                context.base_url, marker
            ))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(before.as_array().unwrap().is_empty());

        let response = context
            .client
            .post(format!("{}/api/products", context.base_url))
            .json(&json!({
                "name": format!("{} should not exist", marker),
                "description": "Unauthenticated write",
                "price": 10.0,
                "category": "1f4fe627-51ea-4c11-b8ad-0cd06953ba30"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);

        let after: Value = context
            .client
            .get(format!(
                "{}/api/products?search={}",
                context.base_url, marker
            ))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(
            after.as_array().unwrap().is_empty(),
            "rejected write must not change the catalog"
        );
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_category_crud_roundtrip() {
        let context = TestContext::new();
        let (token, _) = context.login().await;
        let timestamp = TestContext::get_timestamp();

        // Step 1: Create two categories; the later one must list first
        let first = create_category(&context, &token, &format!("Chairs {}", timestamp)).await;
        let second = create_category(&context, &token, &format!("Tables {}", timestamp)).await;

        let list: Value = context
            .client
            .get(format!("{}/api/categories", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let ids: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|category| category["id"].as_str())
            .collect();
        let first_pos = ids.iter().position(|id| *id == first["id"]).unwrap();
        let second_pos = ids.iter().position(|id| *id == second["id"]).unwrap();
        assert!(second_pos < first_pos, "listing must be newest first");

        // Step 2: Fetch by id without authentication
        let fetched = context
            .client
            .get(format!(
                "{}/api/categories/{}",
                context.base_url,
                first["id"].as_str().unwrap()
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(fetched.status().as_u16(), 200);
        let fetched_body: Value = fetched.json().await.unwrap();
        assert_eq!(fetched_body["name"], first["name"]);

        // Step 3: Rename, then clear the image via an explicit null
        let updated = context
            .client
            .put(format!(
                "{}/api/categories/{}",
                context.base_url,
                first["id"].as_str().unwrap()
            ))
            .bearer_auth(&token)
            .json(&json!({ "name": format!("Armchairs {}", timestamp), "image": null }))
            .send()
            .await
            .unwrap();
        assert_eq!(updated.status().as_u16(), 200);
        let updated_body: Value = updated.json().await.unwrap();
        assert_eq!(updated_body["message"], "Category updated");
        assert_eq!(
            updated_body["category"]["name"],
            format!("Armchairs {}", timestamp).as_str()
        );
        assert!(updated_body["category"]["image"].is_null());

        // Step 4: Delete, and confirm the id is gone
        for id in [first["id"].as_str().unwrap(), second["id"].as_str().unwrap()] {
            let deleted = context
                .client
                .delete(format!("{}/api/categories/{}", context.base_url, id))
                .bearer_auth(&token)
                .send()
                .await
                .unwrap();
            assert_eq!(deleted.status().as_u16(), 200);
            let deleted_body: Value = deleted.json().await.unwrap();
            assert_eq!(deleted_body["message"], "Category deleted");
        }

        let gone = context
            .client
            .get(format!(
                "{}/api/categories/{}",
                context.base_url,
                first["id"].as_str().unwrap()
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(gone.status().as_u16(), 404);
        let gone_body: Value = gone.json().await.unwrap();
        assert_eq!(gone_body["message"], "Category not found");
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_empty_category_name_is_rejected() {
        let context = TestContext::new();
        let (token, _) = context.login().await;

        let response = context
            .client
            .post(format!("{}/api/categories", context.base_url))
            .bearer_auth(&token)
            .json(&json!({ "name": "   ", "description": "blank name" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_product_lifecycle_and_partial_updates() {
        let context = TestContext::new();
        let (token, _) = context.login().await;
        let timestamp = TestContext::get_timestamp();

        let category =
            create_category(&context, &token, &format!("Workshop {}", timestamp)).await;
        let category_id = category["id"].as_str().unwrap();

        // Step 1: Create with optional attributes
        let created = context
            .client
            .post(format!("{}/api/products", context.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "name": format!("Workbench {}", timestamp),
                "description": "Solid beech workbench",
                "price": 420.0,
                "category": category_id,
                "stock": 2,
                "material": "Beech",
                "dimensions": { "width": 180.0, "height": 90.0, "depth": 60.0 }
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(created.status().as_u16(), 201);
        let created_body: Value = created.json().await.unwrap();
        let product = &created_body["product"];
        let product_id = product["id"].as_str().unwrap();
        assert_eq!(product["category"]["name"], category["name"]);
        assert_eq!(product["dimensions"]["width"], 180.0);

        // Step 2: Detail embeds the category description
        let detail: Value = context
            .client
            .get(format!("{}/api/products/{}", context.base_url, product_id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(detail["category"]["description"].is_string());

        // Step 3: A price-only patch leaves everything else alone
        let repriced: Value = context
            .client
            .put(format!("{}/api/products/{}", context.base_url, product_id))
            .bearer_auth(&token)
            .json(&json!({ "price": 399.0 }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(repriced["message"], "Product updated");
        assert_eq!(repriced["product"]["price"], 399.0);
        assert_eq!(repriced["product"]["material"], "Beech");

        // Step 4: Explicit null clears a nullable attribute
        let cleared: Value = context
            .client
            .put(format!("{}/api/products/{}", context.base_url, product_id))
            .bearer_auth(&token)
            .json(&json!({ "material": null }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(cleared["product"]["material"].is_null());

        // Step 5: A dimensions patch replaces the whole group
        let resized: Value = context
            .client
            .put(format!("{}/api/products/{}", context.base_url, product_id))
            .bearer_auth(&token)
            .json(&json!({ "dimensions": { "width": 200.0 } }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(resized["product"]["dimensions"]["width"], 200.0);
        assert!(resized["product"]["dimensions"]["height"].is_null());

        // Step 6: Deactivation hides it from listings but not direct fetch
        let deactivated = context
            .client
            .put(format!("{}/api/products/{}", context.base_url, product_id))
            .bearer_auth(&token)
            .json(&json!({ "isActive": false }))
            .send()
            .await
            .unwrap();
        assert_eq!(deactivated.status().as_u16(), 200);

        let listing: Value = context
            .client
            .get(format!("{}/api/products", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(!contains_id(&listing, product_id));

        let direct = context
            .client
            .get(format!("{}/api/products/{}", context.base_url, product_id))
            .send()
            .await
            .unwrap();
        assert_eq!(direct.status().as_u16(), 200);

        // Step 7: Delete, then the id yields 404
        let deleted = context
            .client
            .delete(format!("{}/api/products/{}", context.base_url, product_id))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(deleted.status().as_u16(), 200);

        let missing = context
            .client
            .delete(format!("{}/api/products/{}", context.base_url, product_id))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status().as_u16(), 404);
        let missing_body: Value = missing.json().await.unwrap();
        assert_eq!(missing_body["message"], "Product not found");

        context
            .client
            .delete(format!("{}/api/categories/{}", context.base_url, category_id))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_product_filters() {
        let context = TestContext::new();
        let (token, _) = context.login().await;
        let timestamp = TestContext::get_timestamp();
        let marker = format!("mrk{}", timestamp);

        let category = create_category(&context, &token, &format!("Filters {}", timestamp)).await;
        let category_id = category["id"].as_str().unwrap();

        let cheap = create_product(
            &context,
            &token,
            category_id,
            &format!("{} oak bench", marker),
            150.0,
        )
        .await;
        let pricey = create_product(
            &context,
            &token,
            category_id,
            &format!("{} OAK armoire", marker),
            950.0,
        )
        .await;
        let cheap_id = cheap["id"].as_str().unwrap();
        let pricey_id = pricey["id"].as_str().unwrap();

        let list = |query: String| {
            let client = context.client.clone();
            let url = format!("{}/api/products?{}", context.base_url, query);
            async move {
                let response = client.get(url).send().await.unwrap();
                assert_eq!(response.status().as_u16(), 200);
                response.json::<Value>().await.unwrap()
            }
        };

        // Price bounds are inclusive
        let min_filtered = list(format!("minPrice=500&search={}", marker)).await;
        assert!(!contains_id(&min_filtered, cheap_id));
        assert!(contains_id(&min_filtered, pricey_id));

        let max_filtered = list(format!("maxPrice=150&search={}", marker)).await;
        assert!(contains_id(&max_filtered, cheap_id));
        assert!(!contains_id(&max_filtered, pricey_id));

        // Search is case-insensitive across name and description
        let searched = list(format!("search={}", "oAk")).await;
        assert!(contains_id(&searched, cheap_id));
        assert!(contains_id(&searched, pricey_id));

        // Category narrows to its own products
        let by_category = list(format!("category={}", category_id)).await;
        assert!(contains_id(&by_category, cheap_id));
        assert!(contains_id(&by_category, pricey_id));

        // Filters combine conjunctively
        let combined = list(format!(
            "category={}&search={}&minPrice=151&maxPrice=1000",
            category_id, marker
        ))
        .await;
        assert!(!contains_id(&combined, cheap_id));
        assert!(contains_id(&combined, pricey_id));

        for id in [cheap_id, pricey_id] {
            context
                .client
                .delete(format!("{}/api/products/{}", context.base_url, id))
                .bearer_auth(&token)
                .send()
                .await
                .unwrap();
        }
        context
            .client
            .delete(format!("{}/api/categories/{}", context.base_url, category_id))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running server and PostgreSQL"]
    async fn test_image_uploads() {
        use reqwest::multipart::{Form, Part};

        let context = TestContext::new();
        let (token, _) = context.login().await;

        // Step 1: Single upload serves the stored bytes back
        let part = Part::bytes(IMAGE_BYTES.to_vec())
            .file_name("chair.png")
            .mime_str("image/png")
            .unwrap();
        let response = context
            .client
            .post(format!("{}/api/upload/single", context.base_url))
            .bearer_auth(&token)
            .multipart(Form::new().part("image", part))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Image uploaded");
        let image_url = body["imageUrl"].as_str().unwrap();
        assert!(image_url.starts_with("/uploads/"));
        assert!(image_url.ends_with(".png"));

        let served = context
            .client
            .get(format!("{}{}", context.base_url, image_url))
            .send()
            .await
            .unwrap();
        assert_eq!(served.status().as_u16(), 200);
        assert_eq!(served.bytes().await.unwrap().as_ref(), IMAGE_BYTES);

        // Step 2: Multiple upload returns one URL per file
        let mut form = Form::new();
        for index in 0..3 {
            let part = Part::bytes(IMAGE_BYTES.to_vec())
                .file_name(format!("detail-{}.jpg", index))
                .mime_str("image/jpeg")
                .unwrap();
            form = form.part("images", part);
        }
        let multi: Value = context
            .client
            .post(format!("{}/api/upload/multiple", context.base_url))
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(multi["message"], "Images uploaded");
        assert_eq!(multi["imageUrls"].as_array().unwrap().len(), 3);

        // Step 3: No files means 400, not an empty success
        for route in ["single", "multiple"] {
            let empty = context
                .client
                .post(format!("{}/api/upload/{}", context.base_url, route))
                .bearer_auth(&token)
                .multipart(Form::new().text("note", "no files here"))
                .send()
                .await
                .unwrap();
            assert_eq!(empty.status().as_u16(), 400);
            let empty_body: Value = empty.json().await.unwrap();
            assert_eq!(empty_body["message"], "No file uploaded");
        }

        // Step 4: More than five files is rejected
        let mut oversized = Form::new();
        for index in 0..6 {
            let part = Part::bytes(IMAGE_BYTES.to_vec())
                .file_name(format!("extra-{}.jpg", index))
                .mime_str("image/jpeg")
                .unwrap();
            oversized = oversized.part("images", part);
        }
        let too_many = context
            .client
            .post(format!("{}/api/upload/multiple", context.base_url))
            .bearer_auth(&token)
            .multipart(oversized)
            .send()
            .await
            .unwrap();
        assert_eq!(too_many.status().as_u16(), 400);
    }
}
