use crate::configuration::get_configuration;
use crate::feature_matrix::{FeatureMatrix, Resolver};
use crate::models::Plan;

/// Prints the resolved matrix of one plan.
pub struct MatrixCommand {
    plan: String,
    json: bool,
}

impl MatrixCommand {
    pub fn new(plan: String, json: bool) -> Self {
        Self { plan, json }
    }

    fn resolver() -> Resolver {
        match get_configuration() {
            Ok(settings) => Resolver::default().with_overrides(&settings.feature_matrix.overrides),
            Err(err) => {
                eprintln!("warning: configuration not loaded ({}), using built-in rules", err);
                Resolver::default()
            }
        }
    }

    pub fn render_table(matrix: &FeatureMatrix) -> String {
        let mut out = format!("plan: {} (matrix v{})\n", matrix.plan, matrix.version);
        for (key, state) in matrix.iter() {
            out.push_str(&format!(
                "{:<16}{:<12}{}\n",
                key.as_str(),
                format!("{:?}", key.group()).to_lowercase(),
                state
            ));
        }
        out
    }
}

impl crate::console::commands::CallableTrait for MatrixCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let plan = Plan::parse(&self.plan).ok_or_else(|| {
            format!(
                "unknown plan {:?}, expected one of: {}",
                self.plan,
                Plan::ALL.map(|plan| plan.as_str()).join(", ")
            )
        })?;

        let matrix = Self::resolver().matrix(plan);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&matrix)?);
        } else {
            print!("{}", Self::render_table(&matrix));
        }

        Ok(())
    }
}
