use roster_db::service::RosterService;

use crate::cli::subcommands::CategoryCommands;
use crate::output::{output, output_delete, output_lookup};

pub async fn handle(
    action: CategoryCommands,
    svc: &RosterService,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        CategoryCommands::Add {
            min,
            max,
            start,
            end,
        } => {
            let category = svc.add_category(min, max, start, end).await?;
            output(&category, json)
        }
        CategoryCommands::List => {
            let categories = svc.list_categories().await?;
            output(&categories, json)
        }
        CategoryCommands::Get { id } => {
            let category = svc.get_category(id).await?;
            output_lookup(category.as_ref(), json)
        }
        CategoryCommands::Delete { id } => {
            let deleted = svc.delete_category(id).await?;
            output_delete(deleted, json)
        }
    }
}
