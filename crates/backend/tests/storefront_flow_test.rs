// tests/storefront_flow_test.rs

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use backend::shared::config::parse_config;
use backend::shared::data::db::connect_in_memory;
use backend::system::auth::jwt::generate_access_token;
use backend::system::state::AppState;

const SECRET: &str = "integration-secret";

async fn create_test_app(commerce_enabled: bool) -> Router {
    let mut config = parse_config(&format!(
        "[database]\npath = \"unused.db\"\n[security]\nsecret = \"{}\"\n",
        SECRET
    ))
    .unwrap();
    config.commerce.enabled = commerce_enabled;
    let conn = connect_in_memory().await.unwrap();
    let state = AppState::new(config, conn).unwrap();
    backend::routes::configure_routes(state)
}

fn admin_token() -> String {
    generate_access_token(SECRET, "7", "admin", true).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, location, String::from_utf8(body.to_vec()).unwrap())
}

fn admin_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", admin_token()))
        .body(Body::empty())
        .unwrap()
}

fn admin_json(uri: &str, json: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", admin_token()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn admin_form(uri: &str, fields: &[(&str, &str)], autosave: bool) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        // Browser session: token in the cookie
        .header(header::COOKIE, format!("wcs_admin_token={}", admin_token()))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if autosave {
        builder = builder.header("X-WCS-Autosave", "1");
    }
    builder.body(Body::from(body)).unwrap()
}

fn extract_nonce(html: &str) -> String {
    let marker = r#"name="product_cat_nonce" value=""#;
    let start = html.find(marker).expect("nonce field rendered") + marker.len();
    html[start..start + 10].to_string()
}

fn activation_ids(html: &str) -> Vec<String> {
    let marker = "var swiper_configs = ";
    let start = html.find(marker).expect("activation payload") + marker.len();
    let end = start + html[start..].find(";\n").unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_str(&html[start..end]).unwrap();
    entries
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let app = create_test_app(true).await;

    let (status, _, _) = send(
        &app,
        Request::builder().uri("/api/pages").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let customer = generate_access_token(SECRET, "9", "customer", false).unwrap();
    let (status, _, _) = send(
        &app,
        Request::builder()
            .uri("/admin/product-categories/new")
            .header(header::AUTHORIZATION, format!("Bearer {}", customer))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, body) = send(&app, admin_get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_category_image_flow_to_storefront() {
    let app = create_test_app(true).await;

    // Media library entry
    let (status, _, body) = send(
        &app,
        admin_json(
            "/api/media",
            serde_json::json!({
                "fileName": "2024/shoes.jpg",
                "thumbFileName": "2024/shoes-150x150.jpg",
                "mimeType": "image/jpeg"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let attachment: serde_json::Value = serde_json::from_str(&body).unwrap();
    let attachment_id = attachment["id"].as_i64().unwrap().to_string();

    // Create screen carries the meta section and a nonce
    let (status, _, html) = send(&app, admin_get("/admin/product-categories/new")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<label for="wcs_slider_image">Slider Image</label>"#));
    let nonce = extract_nonce(&html);

    let (status, location, _) = send(
        &app,
        admin_form(
            "/admin/product-categories",
            &[
                ("name", "Shoes"),
                ("product_cat_nonce", &nonce),
                ("wcs_slider_image", &attachment_id),
            ],
            false,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let edit_uri = location.unwrap();
    let category_id: i64 = edit_uri
        .trim_start_matches("/admin/product-categories/")
        .trim_end_matches("/edit")
        .parse()
        .unwrap();

    let (_, _, html) = send(&app, admin_get(&edit_uri)).await;
    assert!(html.contains(r#"value="Shoes""#));
    assert!(html.contains(r#"src="/uploads/2024/shoes-150x150.jpg""#));
    assert!(html.contains(r#"class="wcs_upload_image_button_wcs_slider_image button""#));
    assert_eq!(html.matches(r#"id="wcs-media-picker-js""#).count(), 1);

    // Picker choices
    let (status, _, body) = send(&app, admin_get("/api/media/images")).await;
    assert_eq!(status, StatusCode::OK);
    let images: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(images[0]["id"].as_i64().unwrap().to_string(), attachment_id);
    assert_eq!(images[0]["thumbnailUrl"], "/uploads/2024/shoes-150x150.jpg");

    // Forged nonce: redirected like a normal save, meta untouched
    let update_uri = format!("/admin/product-categories/{}", category_id);
    let (status, _, _) = send(
        &app,
        admin_form(
            &update_uri,
            &[("name", "Shoes"), ("product_cat_nonce", "0000000000"), ("wcs_slider_image", "")],
            false,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    // Autosave never touches meta
    let (status, _, _) = send(
        &app,
        admin_form(
            &update_uri,
            &[("name", "Shoes"), ("product_cat_nonce", &nonce), ("wcs_slider_image", "")],
            true,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, _, html) = send(&app, admin_get(&edit_uri)).await;
    assert!(html.contains(&format!(r#"name="wcs_slider_image" value="{}""#, attachment_id)));

    // Storefront page with two sliders
    let content = format!(
        r#"<p>Welcome</p>[wcs_category_slider category="{id},x,-3" id="top"][wcs_category_slider category="{id}"]"#,
        id = category_id
    );
    let (status, _, _) = send(
        &app,
        admin_json(
            "/api/pages",
            serde_json::json!({"slug": "home", "title": "Home", "content": content}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, html) = send(
        &app,
        Request::builder().uri("/pages/home").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<p>Welcome</p>"));
    assert_eq!(html.matches(r#"<img src="/uploads/2024/shoes.jpg">"#).count(), 2);
    assert!(html.contains(
        r#"<a class="button category-button" href="http://127.0.0.1:3000/product-category/shoes/">Show more</a>"#
    ));
    assert_eq!(html.matches(r#"id="swiper-css""#).count(), 1);
    assert_eq!(html.matches(r#"id="wcs-swiper-activation-js""#).count(), 1);

    let ids = activation_ids(&html);
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0], "wcs-swiper-container-top");
    for id in &ids {
        assert!(html.contains(&format!(
            r#"<div id="{}" class="swiper-container wcs-swiper-container">"#,
            id
        )));
    }
}

#[tokio::test]
async fn test_inactive_commerce_leaves_content_verbatim() {
    let app = create_test_app(false).await;

    let (status, _, _) = send(
        &app,
        admin_json(
            "/api/pages",
            serde_json::json!({
                "slug": "home",
                "title": "Home",
                "content": "<p>[wcs_category_slider category=\"1\"]</p>"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, public) = send(
        &app,
        Request::builder().uri("/pages/home").body(Body::empty()).unwrap(),
    )
    .await;
    assert!(public.contains(r#"<p>[wcs_category_slider category="1"]</p>"#));
    assert!(!public.contains("swiper_configs"));
    assert!(!public.contains("swiper-bundle"));
    assert!(!public.contains("notice-error"));

    let (_, _, as_admin) = send(&app, admin_get("/pages/home")).await;
    assert!(as_admin.contains(r#"<div class="notice notice-error">"#));

    let (_, _, notices) = send(&app, admin_get("/admin/notices")).await;
    assert!(notices.contains("requires the commerce catalog"));

    let (_, _, form) = send(&app, admin_get("/admin/product-categories/new")).await;
    assert!(!form.contains("wcs_slider_image"));
    assert!(!form.contains("wcs-media-picker-js"));
}
