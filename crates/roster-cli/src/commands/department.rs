use roster_db::service::RosterService;

use crate::cli::subcommands::DepartmentCommands;
use crate::output::{output, output_delete, output_lookup};

pub async fn handle(
    action: DepartmentCommands,
    svc: &RosterService,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        DepartmentCommands::Add { name, school } => {
            let department = svc.add_department(&name, school).await?;
            output(&department, json)
        }
        DepartmentCommands::List => {
            let departments = svc.list_departments().await?;
            output(&departments, json)
        }
        DepartmentCommands::Get { id } => {
            let department = svc.get_department(id).await?;
            output_lookup(department.as_ref(), json)
        }
        DepartmentCommands::Find { name } => {
            let department = svc.get_department_by_name(&name).await?;
            output_lookup(department.as_ref(), json)
        }
        DepartmentCommands::Delete { id } => {
            let deleted = svc.delete_department(id).await?;
            output_delete(deleted, json)
        }
    }
}
