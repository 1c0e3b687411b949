use roster_db::service::RosterService;

use crate::cli::subcommands::TermCommands;
use crate::output::{output, output_delete, output_lookup};

pub async fn handle(action: TermCommands, svc: &RosterService, json: bool) -> anyhow::Result<()> {
    match action {
        TermCommands::Add { name, start, end } => {
            let term = svc.add_term(&name, start, end).await?;
            output(&term, json)
        }
        TermCommands::List => {
            let terms = svc.list_terms().await?;
            output(&terms, json)
        }
        TermCommands::Get { id } => {
            let term = svc.get_term(id).await?;
            output_lookup(term.as_ref(), json)
        }
        TermCommands::Names => {
            let map = svc.term_name_map().await;
            output(&map, json)
        }
        TermCommands::Delete { id } => {
            let deleted = svc.delete_term(id).await?;
            output_delete(deleted, json)
        }
    }
}
