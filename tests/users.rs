mod common;

use civicdesk::models::UserRole;
use common::{json, TestApp};
use serde_json::json;

async fn organization(app: &TestApp, slug: &str) -> i64 {
    let response = reqwest::Client::new()
        .post(app.url("/api/admin/organizations"))
        .bearer_auth(app.admin_token())
        .json(&json!({ "name": slug, "slug": slug }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);
    json(response).await["id"].as_i64().unwrap()
}

async fn add_user(app: &TestApp, organization_id: i64, email: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(app.url("/api/admin/users"))
        .bearer_auth(app.admin_token())
        .json(&json!({
            "organization_id": organization_id,
            "email": email,
            "full_name": "Edna Krabappel",
            "role": "staff",
        }))
        .send()
        .await
        .expect("request")
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let id = organization(&app, "springfield-elementary").await;

    let response = add_user(&app, id, "edna@springfield.gov").await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(json(response).await["item"]["email"], "edna@springfield.gov");

    // emails are compared after normalisation
    let response = add_user(&app, id, "  Edna@Springfield.gov ").await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn user_for_missing_organization_conflicts() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = add_user(&app, 4242, "nobody@springfield.gov").await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn admin_cannot_delete_own_account() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let organization_id = organization(&app, "town-hall").await;

    let response = add_user(&app, organization_id, "mayor@springfield.gov").await;
    let user_id = json(response).await["id"].as_i64().unwrap();

    let principal = civicdesk::models::Principal {
        subject: user_id.to_string(),
        email: "mayor@springfield.gov".to_string(),
        role: UserRole::Admin,
        organization_id: Some(organization_id as i32),
    };
    let claims =
        civicdesk::helpers::jwt::JwtClaims::new(&principal, chrono::Duration::minutes(5));
    let own_token =
        civicdesk::helpers::jwt::encode(&claims, &app.settings.auth.jwt_secret).unwrap();

    let response = client
        .delete(app.url(&format!("/api/admin/users/{}", user_id)))
        .bearer_auth(own_token)
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 400);

    // another admin may delete the account
    let response = client
        .delete(app.url(&format!("/api/admin/users/{}", user_id)))
        .bearer_auth(app.admin_token())
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .get(app.url(&format!("/api/admin/users/{}", user_id)))
        .bearer_auth(app.admin_token())
        .send()
        .await
        .expect("request");
    assert_eq!(response.status().as_u16(), 404);
}
