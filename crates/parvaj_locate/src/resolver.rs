//! Dependency ordering for analysis.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use parvaj_common::UnitName;
use tracing::debug;

use crate::error::LocateError;
use crate::locator::UnitLocator;
use crate::patterns;

/// Computes the ordered list of files needed to analyze a starting file.
///
/// Dependencies of a file always come before the file itself, so the result
/// can be handed to the analyzer as-is. Each file appears once.
pub struct DependencyResolver<'l, 'c> {
    locator: &'l mut UnitLocator<'c>,
}

impl<'l, 'c> DependencyResolver<'l, 'c> {
    /// Creates a resolver looking units up through `locator`.
    pub fn new(locator: &'l mut UnitLocator<'c>) -> Self {
        Self { locator }
    }

    /// Resolves the dependencies of `start`, ending with `start` itself.
    ///
    /// A reference back to a file that is still being expanded (a cycle,
    /// including a file referencing its own unit) is emitted at that point
    /// without being expanded again.
    pub fn resolve(&mut self, start: &Path) -> Result<Vec<PathBuf>, LocateError> {
        let start = start.canonicalize().map_err(|e| LocateError::Io {
            path: start.to_path_buf(),
            source: e,
        })?;

        let mut emitted = Vec::new();
        let mut ancestors = vec![start.clone()];
        self.visit(&start, &mut ancestors, &mut emitted)?;
        emitted.push(start);

        let mut seen = HashSet::new();
        emitted.retain(|path| seen.insert(path.clone()));
        Ok(emitted)
    }

    /// Locates `name` and resolves the file declaring it.
    pub fn resolve_unit(&mut self, name: &UnitName) -> Result<Vec<PathBuf>, LocateError> {
        let path = self.locator.find(name)?;
        self.resolve(&path)
    }

    /// Appends the dependencies of `file` to `emitted`, post-order.
    /// `ancestors` is the chain of files currently being expanded, `file`
    /// included.
    fn visit(
        &mut self,
        file: &Path,
        ancestors: &mut Vec<PathBuf>,
        emitted: &mut Vec<PathBuf>,
    ) -> Result<(), LocateError> {
        let content = std::fs::read(file).map_err(|e| LocateError::Io {
            path: file.to_path_buf(),
            source: e,
        })?;

        for name in patterns::referenced_units(&content) {
            let dep = self.locator.find(&name)?;
            if ancestors.contains(&dep) {
                debug!(
                    "cycle: {} references '{name}' in {}",
                    file.display(),
                    dep.display()
                );
                emitted.push(dep);
                continue;
            }

            ancestors.push(dep.clone());
            self.visit(&dep, ancestors, emitted)?;
            ancestors.pop();
            emitted.push(dep);
        }
        Ok(())
    }
}
