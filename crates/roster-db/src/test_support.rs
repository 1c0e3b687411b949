//! Shared test utilities: in-memory services and the schema generations
//! the drift tests exercise. Used by this crate's unit tests and its
//! integration tests, hence public.

pub mod fixtures {
    use crate::RosterDb;
    use crate::service::RosterService;

    /// In-memory service owning the current schema generation.
    pub async fn test_service() -> RosterService {
        RosterService::new_local(":memory:").await.unwrap()
    }

    /// In-memory service over a hand-built store (no migrations run), the
    /// way a drifted deployment would be attached.
    pub async fn drifted_service(ddl: &str) -> RosterService {
        let db = RosterDb::attach_local(":memory:").await.unwrap();
        db.conn().execute_batch(ddl).await.unwrap();
        RosterService::from_db(db)
    }

    /// Legacy import generation: singular `term` table, TEXT hour columns,
    /// course ids without a real PRIMARY KEY, no foreign keys.
    pub const GENERATION_A_DDL: &str = "
        CREATE TABLE schools (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE departments (id INTEGER PRIMARY KEY, name TEXT NOT NULL, school_id INTEGER NOT NULL);
        CREATE TABLE programs (id INTEGER PRIMARY KEY, name TEXT NOT NULL, department_id INTEGER NOT NULL);
        CREATE TABLE term (id INTEGER, name TEXT);
        CREATE TABLE courses (id INTEGER, name TEXT, hours TEXT, program_id INTEGER, term_id INTEGER);
        CREATE TABLE workloads (id INTEGER, course_id INTEGER, faculty_email TEXT, section TEXT, hours TEXT, course_type TEXT);
        CREATE TABLE faculty (email TEXT PRIMARY KEY, first_name TEXT, last_name TEXT, phone_number TEXT, workload_category_id INTEGER);
    ";

    /// Next generation: the term link has moved to the workload rows and
    /// `courses.term_id` is gone.
    pub const GENERATION_C_DDL: &str = "
        CREATE TABLE schools (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE departments (id INTEGER PRIMARY KEY, name TEXT NOT NULL, school_id INTEGER NOT NULL REFERENCES schools(id));
        CREATE TABLE programs (id INTEGER PRIMARY KEY, name TEXT NOT NULL, department_id INTEGER NOT NULL REFERENCES departments(id));
        CREATE TABLE terms (id INTEGER PRIMARY KEY, name TEXT NOT NULL, start_date TEXT NOT NULL, end_date TEXT NOT NULL);
        CREATE TABLE courses (id INTEGER PRIMARY KEY, name TEXT NOT NULL, hours REAL, program_id INTEGER NOT NULL REFERENCES programs(id));
        CREATE TABLE workload_categories (id INTEGER PRIMARY KEY, minimum_hours REAL NOT NULL, maximum_hours REAL NOT NULL, start_date TEXT NOT NULL, end_date TEXT NOT NULL);
        CREATE TABLE faculty (email TEXT PRIMARY KEY, first_name TEXT NOT NULL, last_name TEXT NOT NULL, phone_number TEXT NOT NULL, workload_category_id INTEGER REFERENCES workload_categories(id));
        CREATE TABLE workloads (id INTEGER PRIMARY KEY, course_id INTEGER NOT NULL REFERENCES courses(id), faculty_email TEXT NOT NULL REFERENCES faculty(email), section TEXT NOT NULL, hours REAL, course_type TEXT NOT NULL, term_id INTEGER REFERENCES terms(id));
    ";

    /// Mid-migration snapshot: `courses.term_id` already dropped, but the
    /// terms table and `workloads.term_id` don't exist yet. Course reads
    /// must still return names and hours.
    pub const MID_MIGRATION_DDL: &str = "
        CREATE TABLE schools (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE departments (id INTEGER PRIMARY KEY, name TEXT NOT NULL, school_id INTEGER NOT NULL);
        CREATE TABLE programs (id INTEGER PRIMARY KEY, name TEXT NOT NULL, department_id INTEGER NOT NULL);
        CREATE TABLE courses (id INTEGER PRIMARY KEY, name TEXT NOT NULL, hours REAL, program_id INTEGER NOT NULL);
        CREATE TABLE workloads (id INTEGER PRIMARY KEY, course_id INTEGER NOT NULL, faculty_email TEXT NOT NULL, section TEXT NOT NULL, hours REAL, course_type TEXT NOT NULL);
    ";
}
