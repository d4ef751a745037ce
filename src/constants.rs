// src/constants.rs

/// File name of the output produced by the default task.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "be-lumbung-mesari.txt";

/// The single exclusion rule passed to the ingestor for every task.
pub const ENV_EXCLUDE_PATTERN: &str = "*.env";

/// Files larger than this are left out of a digest unless overridden.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Patterns the bundled ingestor always skips, in addition to per-call exclusions.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "dist",
    "__pycache__",
    ".venv",
    "venv",
    ".idea",
    ".vscode",
    ".DS_Store",
    "*.pyc",
    "*.pyo",
    "*.class",
    "*.o",
    "*.so",
    "*.dll",
    "*.exe",
];

/// Line drawn above and below every `FILE:` header in a digest.
pub const FILE_SEPARATOR: &str = "================================================";

/// Heading of the tree section in a digest.
pub const TREE_HEADER: &str = "Directory structure:";

/// Placeholder written instead of the content of a binary file.
pub const BINARY_PLACEHOLDER: &str = "[Binary file]";

/// Rough characters-per-token ratio used for the token estimate.
pub const CHARS_PER_TOKEN: usize = 4;
