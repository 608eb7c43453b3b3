#[cfg(test)]
pub mod test {
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};

    use crate::resolve::Probe;

    /// In-memory filesystem. Adding a file also adds its ancestor directories.
    #[derive(Debug, Default)]
    pub struct MemProbe {
        files: HashSet<PathBuf>,
        dirs: HashSet<PathBuf>,
    }

    impl MemProbe {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(mut self, path: &str) -> Self {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent() {
                self.add_dir(parent);
            }
            self.files.insert(path);
            self
        }

        pub fn with_dir(mut self, path: &str) -> Self {
            self.add_dir(Path::new(path));
            self
        }

        fn add_dir(&mut self, path: &Path) {
            for ancestor in path.ancestors() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    impl Probe for MemProbe {
        fn is_file(&self, path: &Path) -> bool {
            self.files.contains(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(path)
        }
    }

    #[test]
    fn file_implies_parent_dirs() {
        let probe = MemProbe::new().with_file("/opt/site/controlDict");
        assert!(probe.is_file(Path::new("/opt/site/controlDict")));
        assert!(probe.is_dir(Path::new("/opt/site")));
        assert!(probe.is_dir(Path::new("/opt")));
        assert!(!probe.is_dir(Path::new("/opt/site/controlDict")));
    }
}
