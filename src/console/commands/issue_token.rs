use crate::configuration::get_configuration;
use crate::helpers::jwt::{self, JwtClaims};
use crate::models::{Principal, UserRole};

/// Signs a bearer token with the configured secret, for operators and local
/// testing.
pub struct IssueTokenCommand {
    principal: Principal,
    ttl_minutes: Option<i64>,
}

impl IssueTokenCommand {
    pub fn new(
        subject: String,
        email: String,
        role: UserRole,
        organization_id: Option<i32>,
        ttl_minutes: Option<i64>,
    ) -> Self {
        Self {
            principal: Principal {
                subject,
                email,
                role,
                organization_id,
            },
            ttl_minutes,
        }
    }
}

impl crate::console::commands::CallableTrait for IssueTokenCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = get_configuration()?;
        let ttl = self.ttl_minutes.unwrap_or(settings.auth.token_ttl_minutes);

        let claims = JwtClaims::new(&self.principal, chrono::Duration::minutes(ttl));
        let token = jwt::encode(&claims, &settings.auth.jwt_secret)?;
        println!("{}", token);

        Ok(())
    }
}
