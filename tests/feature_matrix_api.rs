mod common;

use common::json;

#[tokio::test]
async fn premium_matrix_shows_exports() {
    let app = common::spawn_app_without_database().await;

    let response = reqwest::get(app.url("/api/feature-matrix/plan/premium"))
        .await
        .expect("request");
    assert!(response.status().is_success());

    let body = json(response).await;
    assert_eq!(body["item"]["plan"], "premium");
    assert_eq!(body["item"]["dashboard"]["exportPDF"], "shown");
    assert_eq!(body["item"]["navMenu"]["navSatellite"], "shown");
    assert_eq!(body["meta"]["recognized"], true);
}

#[tokio::test]
async fn unknown_plan_gets_free_matrix() {
    let app = common::spawn_app_without_database().await;

    let body = json(
        reqwest::get(app.url("/api/feature-matrix/plan/platinum"))
            .await
            .expect("request"),
    )
    .await;

    assert_eq!(body["item"]["plan"], "free");
    assert_eq!(body["item"]["dashboard"]["exportPDF"], "paywall");
    assert_eq!(body["meta"]["recognized"], false);
}

#[tokio::test]
async fn legacy_plan_name_is_an_alias() {
    let app = common::spawn_app_without_database().await;

    let body = json(
        reqwest::get(app.url("/api/feature-matrix/plan/Enterprise"))
            .await
            .expect("request"),
    )
    .await;

    assert_eq!(body["item"]["plan"], "premium");
}

#[tokio::test]
async fn single_feature_lookup() {
    let app = common::spawn_app_without_database().await;

    let body = json(
        reqwest::get(app.url("/api/feature-matrix/plan/basic/satelliteScan"))
            .await
            .expect("request"),
    )
    .await;
    assert_eq!(body["item"]["state"], "not_shown");
    assert_eq!(body["item"]["visible"], false);

    let body = json(
        reqwest::get(app.url("/api/feature-matrix/plan/free/assetManager"))
            .await
            .expect("request"),
    )
    .await;
    assert_eq!(body["item"]["state"], "sample_data");
    assert_eq!(body["item"]["interactive"], true);
}

#[tokio::test]
async fn unknown_feature_is_not_shown() {
    let app = common::spawn_app_without_database().await;

    let body = json(
        reqwest::get(app.url("/api/feature-matrix/plan/premium/holodeck"))
            .await
            .expect("request"),
    )
    .await;
    assert_eq!(body["item"]["state"], "not_shown");
}

#[tokio::test]
async fn feature_registry_lists_every_key() {
    let app = common::spawn_app_without_database().await;

    let body = json(
        reqwest::get(app.url("/api/feature-matrix/features"))
            .await
            .expect("request"),
    )
    .await;

    let list = body["list"].as_array().expect("list");
    assert_eq!(list.len(), civicdesk::models::FeatureKey::ALL.len());
    assert!(list
        .iter()
        .any(|feature| feature["key"] == "exportCSV" && feature["group"] == "dashboard"));
    assert_eq!(body["meta"]["plans"].as_array().map(Vec::len), Some(6));
}
