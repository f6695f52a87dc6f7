use crate::db;
use crate::models::{Organization, OrganizationStatus, Plan, User, UserRole, UserStatus};
use chrono::Utc;

/// Lowercase ASCII slug with single dashes, e.g. `City of Springfield` ->
/// `city-of-springfield`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Creates the first organization on the premium plan together with its
/// admin user.
#[tracing::instrument(name = "Bootstrap admin.", skip(pool))]
pub async fn bootstrap_admin(
    pool: &sqlx::PgPool,
    organization_name: &str,
    email: &str,
    full_name: &str,
) -> Result<(Organization, User), String> {
    let slug = slugify(organization_name);
    if slug.len() < 2 {
        return Err(format!(
            "Organization name {:?} does not produce a usable slug",
            organization_name
        ));
    }

    let organization = Organization {
        name: organization_name.trim().to_string(),
        slug,
        plan: Plan::Premium,
        status: OrganizationStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        ..Default::default()
    };
    let organization = db::organization::insert(pool, organization)
        .await
        .map_err(|err| err.to_string())?;

    let user = User {
        organization_id: organization.id,
        email: email.trim().to_lowercase(),
        full_name: full_name.trim().to_string(),
        role: UserRole::Admin,
        status: UserStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        ..Default::default()
    };
    let user = db::user::insert(pool, user)
        .await
        .map_err(|err| err.to_string())?;

    Ok((organization, user))
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugs() {
        assert_eq!(slugify("City of Springfield"), "city-of-springfield");
        assert_eq!(slugify("  Shelbyville, IL!! "), "shelbyville-il");
        assert_eq!(slugify("--"), "");
    }
}
