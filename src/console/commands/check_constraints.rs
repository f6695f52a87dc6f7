use crate::configuration::get_configuration;
use crate::services::constraints;
use actix_web::rt;

pub struct CheckConstraintsCommand;

impl CheckConstraintsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl crate::console::commands::CallableTrait for CheckConstraintsCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async move {
            let settings = get_configuration()?;
            let db_pool = super::connect(&settings).await?;

            let violations = constraints::check(&db_pool).await?;
            for violation in &violations {
                let level = if violation.is_error() { "error" } else { "warning" };
                println!("{}: {}", level, violation);
            }

            let errors = violations.iter().filter(|v| v.is_error()).count();
            if errors > 0 {
                return Err(format!("{} constraint violation(s) found", errors).into());
            }

            println!("No constraint violations found");
            Ok(())
        })
    }
}
