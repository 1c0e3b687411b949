use roster_db::service::RosterService;

use crate::cli::subcommands::SchoolCommands;
use crate::output::{output, output_delete, output_lookup};

pub async fn handle(action: SchoolCommands, svc: &RosterService, json: bool) -> anyhow::Result<()> {
    match action {
        SchoolCommands::Add { name } => {
            let school = svc.add_school(&name).await?;
            output(&school, json)
        }
        SchoolCommands::List => {
            let schools = svc.list_schools().await?;
            output(&schools, json)
        }
        SchoolCommands::Get { id } => {
            let school = svc.get_school(id).await?;
            output_lookup(school.as_ref(), json)
        }
        SchoolCommands::Find { name } => {
            let school = svc.get_school_by_name(&name).await?;
            output_lookup(school.as_ref(), json)
        }
        SchoolCommands::Delete { id } => {
            let deleted = svc.delete_school(id).await?;
            output_delete(deleted, json)
        }
    }
}
