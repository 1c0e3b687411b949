use clap::Parser;

pub mod subcommands;

pub use subcommands::Commands;

/// Top-level CLI parser for the `roster` binary.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Roster - faculty course and workload records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database file path (overrides config)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Open the store without migrating it (schema owned by another deployment)
    #[arg(long, global = true)]
    pub attach: bool,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub db: Option<String>,
    pub attach: bool,
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            db: self.db.clone(),
            attach: self.attach,
            json: self.json,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{CourseCommands, SchoolCommands, TermCommands};
    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["roster", "--json", "--db", "/tmp/r.db", "school", "list"])
            .expect("cli should parse");

        assert!(cli.json);
        assert_eq!(cli.db.as_deref(), Some("/tmp/r.db"));
        assert!(matches!(
            cli.command,
            Commands::School {
                action: SchoolCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["roster", "school", "list", "--attach", "--verbose"])
            .expect("cli should parse");

        assert!(cli.attach);
        assert!(cli.verbose);
    }

    #[test]
    fn course_add_parses_optional_links() {
        let cli = Cli::try_parse_from([
            "roster", "course", "add", "Databases", "--program", "3", "--hours", "3.5",
        ])
        .expect("cli should parse");

        let Commands::Course {
            action:
                CourseCommands::Add {
                    name,
                    program,
                    hours,
                    term,
                },
        } = cli.command
        else {
            panic!("expected course add");
        };
        assert_eq!(name, "Databases");
        assert_eq!(program, 3);
        assert_eq!(hours, Some(3.5));
        assert_eq!(term, None);
    }

    #[test]
    fn course_show_parses_id() {
        let cli = Cli::try_parse_from(["roster", "course", "show", "42"])
            .expect("cli should parse");

        assert!(matches!(
            cli.command,
            Commands::Course {
                action: CourseCommands::Show { id: 42 }
            }
        ));
    }

    #[test]
    fn term_add_parses_iso_dates() {
        let cli = Cli::try_parse_from([
            "roster",
            "term",
            "add",
            "Fall 2025",
            "--start",
            "2025-08-25",
            "--end",
            "2025-12-12",
        ])
        .expect("cli should parse");

        let Commands::Term {
            action: TermCommands::Add { start, end, .. },
        } = cli.command
        else {
            panic!("expected term add");
        };
        assert!(start < end);
    }

    #[test]
    fn term_add_rejects_garbage_dates() {
        let parsed = Cli::try_parse_from([
            "roster", "term", "add", "Fall", "--start", "soon", "--end", "later",
        ]);
        assert!(parsed.is_err());
    }
}
