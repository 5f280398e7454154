mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn landing_page_is_html() -> Result<()> {
    let server = common::start_server().await?;

    let res = reqwest::get(server.url("/")).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "unexpected content type {}", content_type);
    assert_eq!(res.text().await?, "<h1>Code challenge</h1>");

    Ok(())
}

#[tokio::test]
async fn list_restaurants_own_fields_only() -> Result<()> {
    let server = common::start_server().await?;

    let res = reqwest::get(server.url("/restaurants")).await?;
    assert_eq!(res.status(), StatusCode::OK, "expected 200 OK, got {}", res.status());

    let body = res.json::<Value>().await?;
    let restaurants = body.as_array().expect("body should be an array");
    assert_eq!(restaurants.len(), 3, "unexpected body: {}", body);
    for restaurant in restaurants {
        let keys: Vec<&String> = restaurant.as_object().expect("object").keys().collect();
        assert_eq!(keys.len(), 3, "unexpected keys in {}", restaurant);
        assert!(restaurant.get("restaurant_pizzas").is_none());
    }

    Ok(())
}

#[tokio::test]
async fn show_restaurant_nests_pizza_without_back_reference() -> Result<()> {
    let server = common::start_server().await?;

    let res = reqwest::get(server.url("/restaurants/1")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Karen's Pizza Shack");

    let entries = body["restaurant_pizzas"].as_array().expect("restaurant_pizzas array");
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry["restaurant_id"], 1);
    assert!(entry.get("restaurant").is_none(), "join row must not embed its restaurant");
    assert_eq!(entry["pizza"]["id"], entry["pizza_id"]);
    assert!(entry["pizza"].get("restaurant_pizzas").is_none());

    Ok(())
}

#[tokio::test]
async fn show_missing_restaurant_is_404() -> Result<()> {
    let server = common::start_server().await?;

    let res = reqwest::get(server.url("/restaurants/4040")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Restaurant not found"}));

    Ok(())
}

#[tokio::test]
async fn delete_restaurant_cascades() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client.delete(server.url("/restaurants/2")).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await?.is_empty());

    let res = client.get(server.url("/restaurants/2")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Restaurant not found"}));

    let res = client.delete(server.url("/restaurants/2")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let service = server.service().await?;
    let orphans: Vec<_> = service
        .list_restaurant_pizzas()
        .await?
        .into_iter()
        .filter(|rp| rp.restaurant_id == 2)
        .collect();
    assert!(orphans.is_empty(), "join rows left behind: {:?}", orphans);

    Ok(())
}
