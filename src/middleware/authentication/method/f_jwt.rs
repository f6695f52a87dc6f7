use crate::configuration::Settings;
use crate::helpers::jwt;
use crate::middleware::authentication::get_header;
use actix_web::dev::ServiceRequest;
use actix_web::{web, HttpMessage};
use std::sync::Arc;

#[tracing::instrument(name = "Authenticate with JWT", skip(req))]
pub fn try_jwt(req: &mut ServiceRequest) -> Result<bool, String> {
    let authorization = match get_header::<String>(req, "authorization")? {
        Some(authorization) => authorization,
        None => return Ok(false),
    };

    let token = jwt::extract_bearer_token(&authorization)?;

    let secret = req
        .app_data::<web::Data<Settings>>()
        .map(|settings| settings.auth.jwt_secret.clone())
        .ok_or_else(|| {
            tracing::error!("settings are not registered as app data");
            "Authentication is not configured".to_string()
        })?;

    let claims = jwt::decode(token, &secret).map_err(|err| {
        tracing::debug!("JWT rejected: {}", err);
        "Invalid token".to_string()
    })?;

    if let Err(err) = jwt::validate_expiration(&claims) {
        tracing::warn!("JWT validation failed: {}", err);
        return Err("Token expired".to_string());
    }

    let principal = claims.principal();
    tracing::info!(
        subject = %principal.subject,
        role = ?principal.role,
        "JWT authentication successful"
    );

    if req.extensions_mut().insert(Arc::new(principal)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(true)
}
