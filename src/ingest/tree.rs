//! Directory tree rendering for the `Directory structure:` section.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// One directory level of a digest tree.
///
/// Files and subdirectories are kept in separate sorted maps, so every level
/// lists its files first and its subdirectories after, each alphabetically.
/// Names are keyed by their raw `OsString`; lossy conversion only happens when
/// rendering, so distinct non-UTF-8 names never collapse into one entry.
#[derive(Debug, Default)]
pub struct DirNode {
    files: BTreeMap<OsString, PathBuf>,
    dirs: BTreeMap<OsString, DirNode>,
}

impl DirNode {
    /// Builds a tree from file paths relative to the root.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut root = DirNode::default();
        for path in paths {
            root.insert(path);
        }
        root
    }

    fn insert(&mut self, path: &Path) {
        let names: Vec<OsString> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_os_string()),
                _ => None,
            })
            .collect();
        let Some((file_name, dirs)) = names.split_last() else {
            return;
        };
        let mut node = self;
        for dir in dirs {
            node = node.dirs.entry(dir.clone()).or_default();
        }
        node.files.insert(file_name.clone(), path.to_path_buf());
    }

    /// Number of files anywhere in the tree.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.dirs.values().map(DirNode::file_count).sum::<usize>()
    }

    /// The original relative paths, in the order they appear in the rendered tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use digest_runner::ingest::tree::DirNode;
    /// use std::path::{Path, PathBuf};
    ///
    /// let paths = [Path::new("src/main.rs"), Path::new("README.md"), Path::new("Cargo.toml")];
    /// let tree = DirNode::from_paths(paths);
    /// assert_eq!(
    ///     tree.ordered_files(),
    ///     vec![
    ///         PathBuf::from("Cargo.toml"),
    ///         PathBuf::from("README.md"),
    ///         PathBuf::from("src/main.rs"),
    ///     ]
    /// );
    /// ```
    pub fn ordered_files(&self) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(self.file_count());
        self.collect_files(&mut out);
        out
    }

    fn collect_files(&self, out: &mut Vec<PathBuf>) {
        out.extend(self.files.values().cloned());
        for child in self.dirs.values() {
            child.collect_files(out);
        }
    }

    /// Renders the tree with box-drawing connectors under a `root_name/` line.
    pub fn render(&self, root_name: &str) -> String {
        let mut out = format!("└── {}/\n", root_name);
        self.render_children("    ", &mut out);
        out
    }

    fn render_children(&self, prefix: &str, out: &mut String) {
        let total = self.files.len() + self.dirs.len();
        let mut index = 0;

        for name in self.files.keys() {
            index += 1;
            let connector = if index == total { "└── " } else { "├── " };
            out.push_str(prefix);
            out.push_str(connector);
            out.push_str(&name.to_string_lossy());
            out.push('\n');
        }

        for (name, child) in &self.dirs {
            index += 1;
            let is_last = index == total;
            out.push_str(prefix);
            out.push_str(if is_last { "└── " } else { "├── " });
            out.push_str(&name.to_string_lossy());
            out.push_str("/\n");
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            child.render_children(&child_prefix, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(paths: &[&str]) -> DirNode {
        DirNode::from_paths(paths.iter().map(Path::new))
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(DirNode::default().render("repo"), "└── repo/\n");
    }

    #[test]
    fn test_render_nested() {
        let tree = tree_of(&["src/main.rs", "README.md", "src/util/io.rs", "docs/guide.md"]);
        let expected = "\
└── repo/
    ├── README.md
    ├── docs/
    │   └── guide.md
    └── src/
        ├── main.rs
        └── util/
            └── io.rs
";
        assert_eq!(tree.render("repo"), expected);
    }

    #[test]
    fn test_ordered_files_matches_render_order() {
        let tree = tree_of(&["b/z.rs", "a.txt", "b/a.rs", "c/d/e.md"]);
        assert_eq!(
            tree.ordered_files(),
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b/a.rs"),
                PathBuf::from("b/z.rs"),
                PathBuf::from("c/d/e.md"),
            ]
        );
        assert_eq!(tree.file_count(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_stay_distinct() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let first = Path::new(OsStr::from_bytes(b"a\xff.txt"));
        let second = Path::new(OsStr::from_bytes(b"a\xfe.txt"));
        let tree = DirNode::from_paths([first, second]);

        assert_eq!(tree.file_count(), 2);
        assert_eq!(
            tree.ordered_files(),
            vec![second.to_path_buf(), first.to_path_buf()]
        );
        assert_eq!(tree.render("repo").matches("a\u{fffd}.txt").count(), 2);
    }
}
