use civicdesk::console::commands::{
    BootstrapAdminCommand, CallableTrait, CheckConstraintsCommand, IssueTokenCommand,
    MatrixCommand, MigrateCommand,
};
use civicdesk::models::UserRole;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "console", about = "civicdesk maintenance commands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Role {
    Admin,
    Manager,
    Staff,
    Viewer,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => UserRole::Admin,
            Role::Manager => UserRole::Manager,
            Role::Staff => UserRole::Staff,
            Role::Viewer => UserRole::Viewer,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Create the first organization (premium plan) and its admin user
    BootstrapAdmin {
        #[arg(long)]
        organization: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    /// Report data the schema cannot guard against
    CheckConstraints,
    /// Print the resolved feature matrix of a plan
    Matrix {
        plan: String,
        #[arg(long)]
        json: bool,
    },
    /// Sign a bearer token with the configured secret
    IssueToken {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_enum, default_value = "viewer")]
        role: Role,
        #[arg(long)]
        organization_id: Option<i32>,
        #[arg(long)]
        ttl_minutes: Option<i64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    get_command(cli).call()
}

fn get_command(cli: Cli) -> Box<dyn CallableTrait> {
    match cli.command {
        Commands::Migrate => Box::new(MigrateCommand::new()),
        Commands::BootstrapAdmin {
            organization,
            email,
            name,
        } => Box::new(BootstrapAdminCommand::new(organization, email, name)),
        Commands::CheckConstraints => Box::new(CheckConstraintsCommand::new()),
        Commands::Matrix { plan, json } => Box::new(MatrixCommand::new(plan, json)),
        Commands::IssueToken {
            subject,
            email,
            role,
            organization_id,
            ttl_minutes,
        } => Box::new(IssueTokenCommand::new(
            subject,
            email,
            role.into(),
            organization_id,
            ttl_minutes,
        )),
    }
}
