//! Storefront cart through the HTTP surface, with the cart carried in the
//! visitor's session.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;

use gemvault_integration_tests::{
    StorefrontHarness, body_json, body_text, set_cookie_for, stone,
};

#[tokio::test]
async fn test_new_visitor_has_empty_cart() {
    let mut shop = StorefrontHarness::new();
    let cart = shop.cart().await;

    assert_eq!(cart["lines"], json!([]));
    assert_eq!(cart["total_items"], json!(0));
    assert_eq!(cart["total_price"], json!("0"));
    assert_eq!(cart["is_open"], json!(false));
}

#[tokio::test]
async fn test_add_update_remove_scenario() {
    let mut shop = StorefrontHarness::new();

    shop.post_json("/cart/add", &stone("7", "1250.00")).await;
    let cart = shop.post_json("/cart/add", &stone("7", "1250.00")).await;
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["quantity"], json!(2));
    assert_eq!(cart["total_items"], json!(2));
    assert_eq!(cart["total_price"], json!("2500.00"));

    let cart = shop
        .post_json("/cart/update", &json!({ "id": "7", "quantity": 3 }))
        .await;
    assert_eq!(cart["lines"][0]["quantity"], json!(3));
    assert_eq!(cart["total_price"], json!("3750.00"));

    let cart = shop.post_json("/cart/remove", &json!({ "id": "7" })).await;
    assert_eq!(cart["lines"], json!([]));
    assert_eq!(cart["total_items"], json!(0));

    // Persisted, not just echoed.
    let cart = shop.cart().await;
    assert_eq!(cart["total_items"], json!(0));
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let mut shop = StorefrontHarness::new();
    shop.post_json("/cart/add", &stone("1", "100")).await;
    shop.post_json("/cart/add", &stone("2", "200")).await;

    let cart = shop
        .post_json("/cart/update", &json!({ "id": "1", "quantity": 0 }))
        .await;
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(cart["lines"][0]["id"], json!("2"));

    let cart = shop
        .post_json("/cart/update", &json!({ "id": "2", "quantity": -4 }))
        .await;
    assert_eq!(cart["lines"], json!([]));
}

#[tokio::test]
async fn test_unknown_ids_are_no_ops() {
    let mut shop = StorefrontHarness::new();
    let before = shop.post_json("/cart/add", &stone("1", "100")).await;

    let after_remove = shop.post_json("/cart/remove", &json!({ "id": "404" })).await;
    assert_eq!(after_remove, before);

    let after_update = shop
        .post_json("/cart/update", &json!({ "id": "404", "quantity": 5 }))
        .await;
    assert_eq!(after_update, before);
}

#[tokio::test]
async fn test_lines_keep_insertion_order() {
    let mut shop = StorefrontHarness::new();
    shop.post_json("/cart/add", &stone("b", "10")).await;
    shop.post_json("/cart/add", &stone("a", "20")).await;
    let cart = shop.post_json("/cart/add", &stone("b", "10")).await;

    let ids: Vec<&str> = cart["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["b", "a"]);
}

#[tokio::test]
async fn test_visibility_toggles() {
    let mut shop = StorefrontHarness::new();

    assert_eq!(shop.post("/cart/open").await["is_open"], json!(true));
    assert_eq!(shop.post("/cart/open").await["is_open"], json!(true));
    assert_eq!(shop.post("/cart/toggle").await["is_open"], json!(false));
    assert_eq!(shop.post("/cart/toggle").await["is_open"], json!(true));
    assert_eq!(shop.post("/cart/close").await["is_open"], json!(false));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut alice = StorefrontHarness::new();
    alice.post_json("/cart/add", &stone("7", "100")).await;

    let mut bob = alice.other_visitor();
    assert_eq!(bob.cart().await["total_items"], json!(0));
    assert_eq!(alice.cart().await["total_items"], json!(1));
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let mut shop = StorefrontHarness::new();
    let response = shop
        .send(Method::POST, "/cart/add", Some(&stone("7", "100")))
        .await;

    let set_cookie = set_cookie_for(&response, "gemvault_session").unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_count_fragment() {
    let mut shop = StorefrontHarness::new();
    shop.post_json("/cart/add", &stone("1", "100")).await;
    shop.post_json("/cart/add", &stone("1", "100")).await;
    shop.post_json("/cart/add", &stone("2", "100")).await;

    let response = shop.send(Method::GET, "/cart/count", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(">3</span>"));
}

#[tokio::test]
async fn test_checkout_summary() {
    let mut shop = StorefrontHarness::new();

    let response = shop.send(Method::GET, "/checkout/summary", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await, json!({ "error": "Cart is empty" }));

    shop.post_json("/cart/add", &stone("1", "100.00")).await;
    shop.post_json("/cart/add", &stone("2", "250.50")).await;
    shop.post_json("/cart/update", &json!({ "id": "1", "quantity": 2 }))
        .await;

    let response = shop.send(Method::GET, "/checkout/summary", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["lines"][0]["line_total"], json!("200.00"));
    assert_eq!(summary["lines"][1]["line_total"], json!("250.50"));
    assert_eq!(summary["total_items"], json!(3));
    assert_eq!(summary["total_price"], json!("450.50"));
}

#[tokio::test]
async fn test_malformed_add_is_rejected() {
    let mut shop = StorefrontHarness::new();
    let response = shop
        .send(Method::POST, "/cart/add", Some(&json!({ "id": "1" })))
        .await;
    assert!(response.status().is_client_error());

    let response = shop
        .send(Method::POST, "/cart/add", Some(&stone("1", "-5")))
        .await;
    assert!(response.status().is_client_error());
    assert_eq!(shop.cart().await["total_items"], json!(0));
}

#[tokio::test]
async fn test_price_cap_and_max_quantity_keep_cart_usable() {
    let mut shop = StorefrontHarness::new();

    let response = shop
        .send(
            Method::POST,
            "/cart/add",
            Some(&stone("7", "100000000000000000000")),
        )
        .await;
    assert!(response.status().is_client_error());
    assert_eq!(shop.cart().await["total_items"], json!(0));

    shop.post_json("/cart/add", &stone("7", "1000000000")).await;
    let cart = shop
        .post_json("/cart/update", &json!({ "id": "7", "quantity": 4_000_000_000_u64 }))
        .await;
    assert_eq!(cart["total_items"], json!(4_000_000_000_u64));
    assert_eq!(cart["total_price"], json!("4000000000000000000"));

    // Later reads of the same session still work.
    assert_eq!(shop.cart().await["total_price"], json!("4000000000000000000"));
    let response = shop.send(Method::GET, "/checkout/summary", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = shop.send(Method::GET, "/cart/count", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
