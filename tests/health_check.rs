mod common;

#[tokio::test]
async fn health_check_works() {
    let app = common::spawn_app_without_database().await;

    let response = reqwest::Client::new()
        .get(app.url("/health_check"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body = common::json(response).await;
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn readiness_reports_unreachable_database() {
    let app = common::spawn_app_without_database().await;

    let response = reqwest::Client::new()
        .get(app.url("/health_check/ready"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 503);
    let body = common::json(response).await;
    assert_eq!(body["meta"]["database"], "down");
}

#[tokio::test]
async fn readiness_with_database() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = reqwest::Client::new()
        .get(app.url("/health_check/ready"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
}
