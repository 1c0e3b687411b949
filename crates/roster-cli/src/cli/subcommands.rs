use chrono::NaiveDate;
use clap::Subcommand;

/// One subcommand tree per entity.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// School commands.
    School {
        #[command(subcommand)]
        action: SchoolCommands,
    },
    /// Department commands.
    Department {
        #[command(subcommand)]
        action: DepartmentCommands,
    },
    /// Program-of-study commands.
    Program {
        #[command(subcommand)]
        action: ProgramCommands,
    },
    /// Course commands.
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },
    /// Workload commands.
    Workload {
        #[command(subcommand)]
        action: WorkloadCommands,
    },
    /// Faculty commands.
    Faculty {
        #[command(subcommand)]
        action: FacultyCommands,
    },
    /// Term commands.
    Term {
        #[command(subcommand)]
        action: TermCommands,
    },
    /// Workload category commands.
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum SchoolCommands {
    /// Create a school.
    Add { name: String },
    /// List schools.
    List,
    /// Get a school by id.
    Get { id: i64 },
    /// Find a school by name.
    Find { name: String },
    /// Delete a school.
    Delete { id: i64 },
}

#[derive(Clone, Debug, Subcommand)]
pub enum DepartmentCommands {
    /// Create a department under a school.
    Add {
        name: String,
        #[arg(long)]
        school: i64,
    },
    /// List departments.
    List,
    /// Get a department by id.
    Get { id: i64 },
    /// Find a department by name.
    Find { name: String },
    /// Delete a department.
    Delete { id: i64 },
}

#[derive(Clone, Debug, Subcommand)]
pub enum ProgramCommands {
    /// Create a program under a department.
    Add {
        name: String,
        #[arg(long)]
        department: i64,
    },
    /// List programs.
    List,
    /// Get a program by id.
    Get { id: i64 },
    /// Show a program by name, with its courses.
    Show { name: String },
    /// Delete a program.
    Delete { id: i64 },
}

#[derive(Clone, Debug, Subcommand)]
pub enum CourseCommands {
    /// Create a course under a program.
    Add {
        name: String,
        #[arg(long)]
        program: i64,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        term: Option<i64>,
    },
    /// List courses, optionally for one program.
    List {
        #[arg(long)]
        program: Option<i64>,
    },
    /// Get a course by id.
    Get { id: i64 },
    /// Show a course by id, with its workload assignments.
    Show { id: i64 },
    /// Delete a course.
    Delete { id: i64 },
}

#[derive(Clone, Debug, Subcommand)]
pub enum WorkloadCommands {
    /// Assign a faculty member to a course section.
    Add {
        #[arg(long)]
        course: i64,
        #[arg(long)]
        faculty: String,
        #[arg(long)]
        section: String,
        #[arg(long)]
        hours: Option<f64>,
        /// lecture, lab, seminar, or online
        #[arg(long = "type", value_name = "TYPE")]
        course_type: String,
    },
    /// List workloads, optionally for one faculty member.
    List {
        #[arg(long)]
        faculty: Option<String>,
    },
    /// Get a workload by id.
    Get { id: i64 },
    /// Delete a workload.
    Delete { id: i64 },
}

#[derive(Clone, Debug, Subcommand)]
pub enum FacultyCommands {
    /// Register a faculty member.
    Add {
        email: String,
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        category: Option<i64>,
    },
    /// List faculty.
    List,
    /// Get a faculty member by email.
    Get { email: String },
    /// Delete a faculty member.
    Delete { email: String },
}

#[derive(Clone, Debug, Subcommand)]
pub enum TermCommands {
    /// Create a term.
    Add {
        name: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// List terms.
    List,
    /// Get a term by id.
    Get { id: i64 },
    /// Print the id-to-name map, from whichever term table this store has.
    Names,
    /// Delete a term.
    Delete { id: i64 },
}

#[derive(Clone, Debug, Subcommand)]
pub enum CategoryCommands {
    /// Create a workload category band.
    Add {
        #[arg(long)]
        min: f64,
        #[arg(long)]
        max: f64,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    /// List workload categories.
    List,
    /// Get a workload category by id.
    Get { id: i64 },
    /// Delete a workload category.
    Delete { id: i64 },
}
