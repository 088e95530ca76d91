use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use nexus_core::UserRole;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "nexus-cli", version, about = "Nexus CRM CLI")]
struct Cli {
    /// Role to log in as (owner or sales); defaults to session.default_role
    #[arg(long, global = true)]
    role: Option<UserRole>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lead pipeline
    Lead {
        #[command(subcommand)]
        action: commands::lead::LeadAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Dashboard counters and open tasks
    Dashboard,
    /// Current role, greeting and available views
    Session,
    /// Suggestions for a status/priority pair
    Suggest {
        /// Lead status (New, "In Progress", Closed, Lost)
        #[arg(long)]
        status: nexus_core::LeadStatus,
        /// Lead priority (Low, Medium, High, Urgent)
        #[arg(long)]
        priority: nexus_core::LeadPriority,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NEXUS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Lead { .. } => "lead",
        Commands::Task { .. } => "task",
        Commands::Dashboard => "dashboard",
        Commands::Session => "session",
        Commands::Suggest { .. } => "suggest",
        Commands::Config { .. } => "config",
        Commands::Completions { .. } => "completions",
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let role = cli.role;
    tracing::debug!(?role, command = command_name(&cli.command), "dispatching");
    let result = match cli.command {
        Commands::Lead { action } => commands::lead::run(action, role),
        Commands::Task { action } => commands::task::run(action, role),
        Commands::Dashboard => commands::dashboard::run(role),
        Commands::Session => commands::dashboard::session(role),
        Commands::Suggest { status, priority } => commands::suggest::run(status, priority),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "nexus-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
