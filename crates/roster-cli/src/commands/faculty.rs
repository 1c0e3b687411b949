use roster_db::service::RosterService;

use crate::cli::subcommands::FacultyCommands;
use crate::output::{output, output_delete, output_lookup};

pub async fn handle(
    action: FacultyCommands,
    svc: &RosterService,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        FacultyCommands::Add {
            email,
            first,
            last,
            phone,
            category,
        } => {
            let member = svc.add_faculty(&email, &first, &last, &phone, category).await?;
            output(&member, json)
        }
        FacultyCommands::List => {
            let members = svc.list_faculty().await?;
            output(&members, json)
        }
        FacultyCommands::Get { email } => {
            let member = svc.get_faculty(&email).await?;
            output_lookup(member.as_ref(), json)
        }
        FacultyCommands::Delete { email } => {
            let deleted = svc.delete_faculty(&email).await?;
            output_delete(deleted, json)
        }
    }
}
