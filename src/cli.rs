// src/cli.rs

use clap::Parser;

/// Turns directory trees into plain-text digests, one output file per task.
///
/// With no arguments, digest-runner ingests the current directory into
/// `be-lumbung-mesari.txt` inside it, replacing any previous digest. Files with
/// a `.env` extension are always left out.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read the task list from a JSON file: [{"source": DIR, "output": FILE}, ...].
    #[arg(short = 't', long = "tasks", value_name = "FILE")]
    pub tasks_file: Option<String>,

    /// Directory used by the default task instead of the current directory.
    #[arg(short = 'b', long, value_name = "DIR", conflicts_with = "tasks_file")]
    pub base_dir: Option<String>,

    /// Stop at the first failed task and skip the rest.
    ///
    /// Without this flag every task runs even after a failure, and each failed
    /// task is listed on stderr once the batch ends (exit code 1).
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub fail_fast: bool,

    /// Maximum file size to include (e.g., "1M", "512k"). Defaults to 10 MiB.
    #[arg(short = 'm', long, value_name = "BYTES")]
    pub max_size: Option<String>,

    /// Do not respect .gitignore, .ignore, or other VCS ignore files.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_gitignore: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_is_valid() {
        let cli = Cli::try_parse_from(["digest-runner"]).unwrap();
        assert!(cli.tasks_file.is_none());
        assert!(cli.base_dir.is_none());
        assert!(!cli.fail_fast);
    }

    #[test]
    fn test_base_dir_conflicts_with_tasks_file() {
        let result = Cli::try_parse_from(["digest-runner", "-t", "tasks.json", "-b", "."]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fail_fast_help_describes_default() {
        use clap::CommandFactory;

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("--fail-fast"));
        assert!(help.contains("Without this flag every task runs"));
    }
}
