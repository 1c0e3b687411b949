//! Entity structs for all Roster domain objects.
//!
//! Each entity maps to a table in the libSQL database. Surrogate ids are
//! `i64` rowid aliases; faculty members are identified by email instead.
//! All structs derive `Serialize`/`Deserialize` for JSON output.

mod category;
mod course;
mod department;
mod faculty;
mod program;
mod school;
mod term;
mod workload;

pub use category::WorkloadCategory;
pub use course::Course;
pub use department::Department;
pub use faculty::Faculty;
pub use program::ProgramOfStudy;
pub use school::School;
pub use term::Term;
pub use workload::Workload;
