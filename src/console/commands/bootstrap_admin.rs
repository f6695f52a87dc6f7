use crate::configuration::get_configuration;
use crate::services::bootstrap;
use actix_web::rt;

pub struct BootstrapAdminCommand {
    organization: String,
    email: String,
    name: String,
}

impl BootstrapAdminCommand {
    pub fn new(organization: String, email: String, name: String) -> Self {
        Self {
            organization,
            email,
            name,
        }
    }
}

impl crate::console::commands::CallableTrait for BootstrapAdminCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async move {
            let settings = get_configuration()?;
            let db_pool = super::connect(&settings).await?;

            let (organization, user) =
                bootstrap::bootstrap_admin(&db_pool, &self.organization, &self.email, &self.name)
                    .await
                    .map_err(|err| {
                        eprintln!("Bootstrap failed: {}", err);
                        err
                    })?;

            println!(
                "Created organization {} ({}) on the {} plan",
                organization.id, organization.slug, organization.plan
            );
            println!("Created admin user {} <{}>", user.id, user.email);

            Ok(())
        })
    }
}
