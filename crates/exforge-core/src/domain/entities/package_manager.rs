use std::path::Path;

use super::plan::CommandLine;

/// The external package manager, addressed by program name.
///
/// Argument shapes are npm's: `init -y`, `i <deps>`, `i -D <deps>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    program: String,
}

impl PackageManager {
    pub const DEFAULT_PROGRAM: &'static str = "npm";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Create a default manifest in `cwd`.
    pub fn bootstrap(&self, cwd: &Path) -> CommandLine {
        CommandLine::new(&self.program, ["init", "-y"], cwd)
    }

    /// Install runtime dependencies.
    pub fn install(&self, packages: &[String], cwd: &Path) -> CommandLine {
        let args = std::iter::once("i").chain(packages.iter().map(String::as_str));
        CommandLine::new(&self.program, args, cwd)
    }

    /// Install development-only dependencies.
    pub fn install_dev(&self, packages: &[String], cwd: &Path) -> CommandLine {
        let args = ["i", "-D"]
            .into_iter()
            .chain(packages.iter().map(String::as_str));
        CommandLine::new(&self.program, args, cwd)
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_npm_argument_shapes() {
        let pm = PackageManager::default();
        let cwd = Path::new("app");

        assert_eq!(pm.bootstrap(cwd).to_string(), "npm init -y");
        assert_eq!(
            pm.install(&["express".into(), "pg".into()], cwd).to_string(),
            "npm i express pg"
        );
        assert_eq!(
            pm.install_dev(&["nodemon".into()], cwd).to_string(),
            "npm i -D nodemon"
        );
        assert_eq!(pm.bootstrap(cwd).cwd, cwd);
    }

    #[test]
    fn program_is_configurable() {
        let pm = PackageManager::new("/opt/node/bin/npm");
        assert_eq!(pm.bootstrap(Path::new(".")).program, "/opt/node/bin/npm");
    }
}
