use crate::configuration::get_configuration;
use actix_web::rt;

pub struct MigrateCommand;

impl MigrateCommand {
    pub fn new() -> Self {
        Self
    }
}

impl crate::console::commands::CallableTrait for MigrateCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async move {
            let settings = get_configuration()?;
            let db_pool = super::connect(&settings).await?;

            sqlx::migrate!("./migrations").run(&db_pool).await?;
            println!("Migrations applied to {}", settings.database.database_name);

            Ok(())
        })
    }
}
