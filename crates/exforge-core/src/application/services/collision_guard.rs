//! Collision guard - refuses to scaffold over anything that already exists.

use std::path::Path;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    error::ExforgeResult,
};

/// Checks the target root before any side effect happens.
pub struct CollisionGuard<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> CollisionGuard<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Fails with `AlreadyExists` when anything is present at `root`,
    /// whether a directory, a file or a dangling link.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn check(&self, root: &Path) -> ExforgeResult<()> {
        if self.filesystem.exists(root) {
            debug!("Target root already present");
            return Err(ApplicationError::AlreadyExists {
                path: root.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    #[test]
    fn free_root_passes() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(Path::new("demo-api")))
            .times(1)
            .return_const(false);

        assert!(CollisionGuard::new(&fs).check(Path::new("demo-api")).is_ok());
    }

    #[test]
    fn existing_root_is_a_collision() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir().never();
        fs.expect_write_file().never();

        let err = CollisionGuard::new(&fs)
            .check(Path::new("demo-api"))
            .unwrap_err();

        assert!(err.is_collision());
        assert!(matches!(
            err,
            crate::error::ExforgeError::Application(ApplicationError::AlreadyExists { ref path })
                if *path == PathBuf::from("demo-api")
        ));
    }
}
