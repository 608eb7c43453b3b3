use std::path::{Path, PathBuf};

use crate::candidates::{self, Layout};
use crate::env::ProjectEnv;
use crate::error::EtcFileError;
use crate::identity::{Identity, VersionSource};
use crate::report::Outcome;
use crate::resolve::{self, Probe, Request};
use crate::types::SearchMode;

/// Entry point for building a [`Locator`].
pub struct EtcFile;

impl EtcFile {
    pub fn builder() -> EtcFileBuilder {
        EtcFileBuilder::new()
    }
}

/// Builder for the installation identity and its candidate directories.
///
/// Every input is optional: the project directory is found from the running
/// executable, the prefix is its parent, the version comes from the directory
/// name, and the home directory from the platform.
///
/// A version from the settings only renames the per-version directories; an
/// explicit [`version`](Self::version) also moves the installation directory.
#[derive(Debug, Clone)]
pub struct EtcFileBuilder {
    project: String,
    project_dir: Option<PathBuf>,
    prefix: Option<PathBuf>,
    version: Option<String>,
    default_version: Option<String>,
    site: Option<PathBuf>,
    home: Option<PathBuf>,
    detect_home: bool,
    mode: SearchMode,
}

impl EtcFileBuilder {
    fn new() -> Self {
        Self {
            project: "OpenFOAM".to_string(),
            project_dir: None,
            prefix: None,
            version: None,
            default_version: None,
            site: None,
            home: None,
            detect_home: true,
            mode: SearchMode::default(),
        }
    }

    /// Seed the builder from resolved project settings.
    pub fn settings(mut self, env: &ProjectEnv) -> Self {
        self.project = env.project.clone();
        self.project_dir = env.project_dir.clone().or(self.project_dir);
        self.default_version = env.version.clone().or(self.default_version);
        self.site = env.site.clone().or(self.site);
        if let Some(mode) = env.mode {
            self.mode = mode;
        }
        self
    }

    /// Project name (default `OpenFOAM`).
    pub fn project(mut self, name: &str) -> Self {
        self.project = name.to_string();
        self
    }

    /// Project installation directory.
    pub fn project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// Installation prefix (default: parent of the project directory).
    pub fn prefix(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prefix = Some(dir.into());
        self
    }

    /// Version override. The project directory name is reassembled around it.
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Group/site directory (default `<prefix>/site`).
    pub fn site(mut self, dir: impl Into<PathBuf>) -> Self {
        self.site = Some(dir.into());
        self
    }

    /// User home directory (default: the platform's).
    pub fn home(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home = Some(dir.into());
        self
    }

    /// Search without a user tier unless [`home`](Self::home) is given.
    pub fn no_home_detection(mut self) -> Self {
        self.detect_home = false;
        self
    }

    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    fn effective_project_dir(&self) -> Result<PathBuf, EtcFileError> {
        if let Some(dir) = &self.project_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe().map_err(|_| EtcFileError::ProjectDirUnknown)?;
        project_dir_of_exe(&exe).ok_or(EtcFileError::ProjectDirUnknown)
    }

    fn effective_home(&self) -> Option<PathBuf> {
        if let Some(home) = &self.home {
            return Some(home.clone());
        }
        if !self.detect_home {
            return None;
        }
        directories::UserDirs::new().map(|user| user.home_dir().to_path_buf())
    }

    /// Resolve the identity and candidate directories.
    pub fn build(self) -> Result<Locator, EtcFileError> {
        let project_dir = self.effective_project_dir()?;
        let dir_name = project_dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(EtcFileError::ProjectDirUnknown)?;
        let prefix = match &self.prefix {
            Some(prefix) => prefix.clone(),
            None => project_dir
                .parent()
                .map(Path::to_path_buf)
                .ok_or(EtcFileError::ProjectDirUnknown)?,
        };

        let source = match (&self.version, &self.default_version) {
            (Some(version), _) => VersionSource::Override(version),
            (None, Some(version)) => VersionSource::Default(version),
            (None, None) => VersionSource::Decoded,
        };
        let identity =
            Identity::resolve(dir_name, &self.project.to_lowercase(), source, &prefix)?;
        let layout = Layout {
            home: self.effective_home(),
            user_namespace: format!(".{}", self.project),
            site: self.site.clone(),
        };
        let dirs = candidates::build(&identity, &layout, self.mode)?;

        Ok(Locator { identity, dirs })
    }
}

/// `<project>/bin/<exe>` → `<project>`; a binary outside `bin/` lives in the
/// project directory itself.
fn project_dir_of_exe(exe: &Path) -> Option<PathBuf> {
    let bin_dir = exe.parent()?;
    if bin_dir.file_name().is_some_and(|name| name == "bin") {
        bin_dir.parent().map(Path::to_path_buf)
    } else {
        Some(bin_dir.to_path_buf())
    }
}

/// A resolved installation and its ordered candidate directories.
#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    identity: Identity,
    dirs: Vec<PathBuf>,
}

impl Locator {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Candidate directories, highest priority first.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn resolve(&self, request: &Request, probe: &impl Probe) -> Outcome {
        resolve::resolve(&self.dirs, request, probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env;
    use crate::report::Status;
    use crate::resolve::{OsProbe, Operation};
    use std::fs;
    use tempfile::TempDir;

    fn builder() -> EtcFileBuilder {
        EtcFile::builder()
            .project_dir("/opt/OpenFOAM-2.3.1")
            .home("/home/u")
    }

    fn mode(s: &str) -> SearchMode {
        s.parse().unwrap()
    }

    #[test]
    fn defaults_from_project_dir() {
        let locator = builder().build().unwrap();
        let id = locator.identity();
        assert_eq!(id.version(), "2.3.1");
        assert_eq!(id.prefix(), Path::new("/opt"));
        assert_eq!(locator.candidates().len(), 5);
        assert_eq!(
            locator.candidates()[0],
            PathBuf::from("/home/u/.OpenFOAM/2.3.1")
        );
    }

    #[test]
    fn prefix_override_moves_project_dir() {
        let locator = builder().prefix("/usr/local").mode(mode("o")).build().unwrap();
        assert_eq!(
            locator.candidates(),
            &[PathBuf::from("/usr/local/OpenFOAM-2.3.1/etc")]
        );
    }

    #[test]
    fn version_override_reassembles() {
        let locator = builder().version("2.4.0").mode(mode("go")).build().unwrap();
        assert_eq!(
            locator.candidates(),
            &[
                PathBuf::from("/opt/site/2.4.0"),
                PathBuf::from("/opt/site"),
                PathBuf::from("/opt/OpenFOAM-2.4.0/etc"),
            ]
        );
    }

    #[test]
    fn project_name_sets_namespace_and_token() {
        let locator = EtcFile::builder()
            .project("Foam")
            .project_dir("/usr/lib/foam17")
            .home("/home/u")
            .mode(mode("uo"))
            .build()
            .unwrap();
        assert_eq!(locator.identity().version(), "1.7");
        assert_eq!(
            locator.candidates(),
            &[
                PathBuf::from("/home/u/.Foam/1.7"),
                PathBuf::from("/home/u/.Foam"),
                PathBuf::from("/usr/lib/foam17/etc"),
            ]
        );
    }

    #[test]
    fn settings_seed_the_builder() {
        let settings = env::resolve(
            None,
            vec![
                ("WM_PROJECT_DIR".to_string(), "/opt/OpenFOAM-2.3.1".to_string()),
                ("WM_PROJECT_SITE".to_string(), "/srv/site".to_string()),
                ("FOAM_CONFIG_MODE".to_string(), "g".to_string()),
            ],
        )
        .unwrap();
        let locator = EtcFile::builder()
            .settings(&settings)
            .no_home_detection()
            .build()
            .unwrap();
        assert_eq!(
            locator.candidates(),
            &[PathBuf::from("/srv/site/2.3.1"), PathBuf::from("/srv/site")]
        );
    }

    #[test]
    fn settings_version_keeps_installation_dir() {
        let settings = env::resolve(
            None,
            vec![
                ("WM_PROJECT_DIR".to_string(), "/opt/OpenFOAM-2.4.0".to_string()),
                ("WM_PROJECT_VERSION".to_string(), "2.3.1".to_string()),
            ],
        )
        .unwrap();
        let locator = EtcFile::builder()
            .settings(&settings)
            .no_home_detection()
            .mode(mode("go"))
            .build()
            .unwrap();
        assert_eq!(locator.identity().version(), "2.3.1");
        assert_eq!(
            locator.candidates(),
            &[
                PathBuf::from("/opt/site/2.3.1"),
                PathBuf::from("/opt/site"),
                PathBuf::from("/opt/OpenFOAM-2.4.0/etc"),
            ]
        );
    }

    #[test]
    fn explicit_version_beats_settings_version() {
        let settings = env::resolve(
            None,
            vec![("WM_PROJECT_VERSION".to_string(), "2.3.1".to_string())],
        )
        .unwrap();
        let locator = builder()
            .settings(&settings)
            .version("2.5")
            .mode(mode("o"))
            .build()
            .unwrap();
        assert_eq!(locator.identity().version(), "2.5");
        assert_eq!(locator.candidates(), &[PathBuf::from("/opt/OpenFOAM-2.5/etc")]);
    }

    #[test]
    fn later_mode_call_overrides_settings() {
        let settings = env::resolve(
            None,
            vec![("FOAM_CONFIG_MODE".to_string(), "g".to_string())],
        )
        .unwrap();
        let locator = builder().settings(&settings).mode(mode("o")).build().unwrap();
        assert_eq!(locator.candidates().len(), 1);
    }

    #[test]
    fn unknown_naming_fails_build() {
        let result = EtcFile::builder()
            .project_dir("/opt/something")
            .home("/home/u")
            .build();
        assert!(matches!(
            result,
            Err(EtcFileError::UnknownNamingConvention { name }) if name == "something"
        ));
    }

    #[test]
    fn root_project_dir_is_unknown() {
        let result = EtcFile::builder().project_dir("/").build();
        assert!(matches!(result, Err(EtcFileError::ProjectDirUnknown)));
    }

    #[test]
    fn exe_in_bin_maps_to_project() {
        assert_eq!(
            project_dir_of_exe(Path::new("/opt/OpenFOAM-2.3.1/bin/etcfile")),
            Some(PathBuf::from("/opt/OpenFOAM-2.3.1"))
        );
        assert_eq!(
            project_dir_of_exe(Path::new("/opt/OpenFOAM-2.3.1/etcfile")),
            Some(PathBuf::from("/opt/OpenFOAM-2.3.1"))
        );
    }

    // --- against a real directory tree ---

    #[test]
    fn group_only_file_found_under_ugo_not_under_u() {
        let root = TempDir::new().unwrap();
        let home = root.path().join("home");
        let project = root.path().join("OpenFOAM-2.3.1");
        fs::create_dir_all(home.join(".OpenFOAM")).unwrap();
        fs::create_dir_all(project.join("etc")).unwrap();
        fs::create_dir_all(root.path().join("site")).unwrap();
        fs::write(root.path().join("site").join("prefs.sh"), "").unwrap();

        let request = Request::new(Operation::Resolve {
            file_name: "prefs.sh".into(),
        });

        let all = EtcFile::builder()
            .project_dir(&project)
            .home(&home)
            .build()
            .unwrap()
            .resolve(&request, &OsProbe);
        assert_eq!(all.status, Status::Found);
        assert_eq!(all.paths, vec![root.path().join("site").join("prefs.sh")]);

        let user_only = EtcFile::builder()
            .project_dir(&project)
            .home(&home)
            .mode(mode("u"))
            .build()
            .unwrap()
            .resolve(&request, &OsProbe);
        assert_eq!(user_only.status, Status::NotFound);
        assert_eq!(user_only.status.exit_code(), 2);
    }

    #[test]
    fn version_dir_beats_plain_user_dir() {
        let root = TempDir::new().unwrap();
        let home = root.path().join("home");
        let user = home.join(".OpenFOAM");
        fs::create_dir_all(user.join("2.3.1")).unwrap();
        fs::write(user.join("controlDict"), "").unwrap();
        fs::write(user.join("2.3.1").join("controlDict"), "").unwrap();

        let request = Request::new(Operation::Resolve {
            file_name: "controlDict".into(),
        });
        let outcome = EtcFile::builder()
            .project_dir(root.path().join("OpenFOAM-2.3.1"))
            .home(&home)
            .build()
            .unwrap()
            .resolve(&request, &OsProbe);
        assert_eq!(outcome.paths, vec![user.join("2.3.1").join("controlDict")]);
    }
}
