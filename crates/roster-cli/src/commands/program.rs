use roster_db::service::RosterService;

use crate::cli::subcommands::ProgramCommands;
use crate::output::{output, output_delete, output_lookup};

pub async fn handle(
    action: ProgramCommands,
    svc: &RosterService,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        ProgramCommands::Add { name, department } => {
            let program = svc.add_program(&name, department).await?;
            output(&program, json)
        }
        ProgramCommands::List => {
            let programs = svc.list_programs().await?;
            output(&programs, json)
        }
        ProgramCommands::Get { id } => {
            let program = svc.get_program(id).await?;
            output_lookup(program.as_ref(), json)
        }
        ProgramCommands::Show { name } => {
            let bundle = svc.get_program_by_name(&name).await?;
            output_lookup(bundle.as_ref(), json)
        }
        ProgramCommands::Delete { id } => {
            let deleted = svc.delete_program(id).await?;
            output_delete(deleted, json)
        }
    }
}
