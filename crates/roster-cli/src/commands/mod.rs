//! Command handlers, one module per entity subcommand tree.

use roster_db::service::RosterService;

use crate::cli::Commands;

pub mod category;
pub mod course;
pub mod department;
pub mod faculty;
pub mod program;
pub mod school;
pub mod term;
pub mod workload;

pub async fn dispatch(command: Commands, svc: &RosterService, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::School { action } => school::handle(action, svc, json).await,
        Commands::Department { action } => department::handle(action, svc, json).await,
        Commands::Program { action } => program::handle(action, svc, json).await,
        Commands::Course { action } => course::handle(action, svc, json).await,
        Commands::Workload { action } => workload::handle(action, svc, json).await,
        Commands::Faculty { action } => faculty::handle(action, svc, json).await,
        Commands::Term { action } => term::handle(action, svc, json).await,
        Commands::Category { action } => category::handle(action, svc, json).await,
    }
}
