use roster_db::service::RosterService;

use crate::cli::subcommands::CourseCommands;
use crate::output::{output, output_delete, output_lookup};

pub async fn handle(action: CourseCommands, svc: &RosterService, json: bool) -> anyhow::Result<()> {
    match action {
        CourseCommands::Add {
            name,
            program,
            hours,
            term,
        } => {
            let course = svc.add_course(&name, hours, program, term).await?;
            output(&course, json)
        }
        CourseCommands::List { program } => {
            let courses = match program {
                Some(program_id) => svc.courses_by_program(program_id).await?,
                None => svc.list_courses().await?,
            };
            output(&courses, json)
        }
        CourseCommands::Get { id } => {
            let course = svc.get_course(id).await?;
            output_lookup(course.as_ref(), json)
        }
        CourseCommands::Show { id } => {
            let bundle = svc.get_course_with_workloads(id).await?;
            output_lookup(bundle.as_ref(), json)
        }
        CourseCommands::Delete { id } => {
            let deleted = svc.delete_course(id).await?;
            output_delete(deleted, json)
        }
    }
}
