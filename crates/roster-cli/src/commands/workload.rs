use roster_core::enums::CourseType;
use roster_db::service::RosterService;

use crate::cli::subcommands::WorkloadCommands;
use crate::output::{output, output_delete, output_lookup};

pub async fn handle(
    action: WorkloadCommands,
    svc: &RosterService,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        WorkloadCommands::Add {
            course,
            faculty,
            section,
            hours,
            course_type,
        } => {
            let course_type = CourseType::parse(&course_type).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown course type '{course_type}' (expected lecture, lab, seminar, or online)"
                )
            })?;
            let workload = svc
                .add_workload(course, &faculty, &section, hours, course_type)
                .await?;
            output(&workload, json)
        }
        WorkloadCommands::List { faculty } => {
            let workloads = match faculty {
                Some(email) => svc.workloads_by_faculty(&email).await?,
                None => svc.list_workloads().await?,
            };
            output(&workloads, json)
        }
        WorkloadCommands::Get { id } => {
            let workload = svc.get_workload(id).await?;
            output_lookup(workload.as_ref(), json)
        }
        WorkloadCommands::Delete { id } => {
            let deleted = svc.delete_workload(id).await?;
            output_delete(deleted, json)
        }
    }
}
