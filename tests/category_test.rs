mod common;

use serde_json::Value;

#[tokio::test]
async fn list_categories_includes_seeded_ones() {
    let app = common::spawn_app().await;
    let id_a = common::seed_category(&app.db, "Deep Conversations").await;
    let id_b = common::seed_category(&app.db, "Book Nook").await;

    let resp = app
        .client
        .get(app.url("/categories"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["success"].as_bool().unwrap());

    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&(id_a as i64)));
    assert!(ids.contains(&(id_b as i64)));
}

#[tokio::test]
async fn get_category_returns_its_fields() {
    let app = common::spawn_app().await;
    let id = common::seed_category(&app.db, "Quiet Hobbies").await;

    let resp = app
        .client
        .get(app.url(&format!("/categories/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["id"].as_i64().unwrap(), id as i64);
    assert!(data["name"].as_str().unwrap().starts_with("Quiet Hobbies"));
    assert_eq!(data["description"], "A quiet place to talk");
    assert_eq!(data["icon"], "🌿");
    assert_eq!(data["color"], "green");
    assert_eq!(data["threadCount"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn get_unknown_category_is_404() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/categories/999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn threads_for_a_category_with_none_is_an_empty_list() {
    let app = common::spawn_app().await;
    let id = common::seed_category(&app.db, "Untouched").await;

    let resp = app
        .client
        .get(app.url(&format!("/categories/{}/threads", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
