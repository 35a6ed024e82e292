//! `parvaj deps`: print the files a unit needs, in analysis order.

use std::path::{Path, PathBuf};

use parvaj_cache::CacheStore;
use parvaj_common::UnitName;
use parvaj_locate::{DependencyResolver, LocateError, UnitLocator};
use serde::Serialize;

use crate::project::{open_cache, project_root};
use crate::{DepsArgs, GlobalArgs, ReportFormat};

#[derive(Serialize)]
struct DepsReport<'a> {
    unit: &'a str,
    files: &'a [PathBuf],
}

/// Runs the `parvaj deps` command.
pub fn run(args: &DepsArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let root = project_root(global)?;
    let mut cache = open_cache(&root)?;
    let unit = UnitName::new(&args.unit);

    let resolved = resolve_order(&root, &mut cache, &unit);
    cache.save()?;
    let files = resolved?;

    println!("{}", render(&unit, &files, args.format)?);
    Ok(0)
}

/// Locates `unit` and resolves the files it depends on, itself last.
pub fn resolve_order(
    root: &Path,
    cache: &mut CacheStore,
    unit: &UnitName,
) -> Result<Vec<PathBuf>, LocateError> {
    let mut locator = UnitLocator::new(root, cache)?;
    let files = DependencyResolver::new(&mut locator).resolve_unit(unit)?;
    tracing::debug!(
        "resolved {} file(s) for '{unit}', scanned {}",
        files.len(),
        locator.files_scanned()
    );
    Ok(files)
}

fn render(
    unit: &UnitName,
    files: &[PathBuf],
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        ReportFormat::Json => serde_json::to_string_pretty(&DepsReport {
            unit: unit.as_str(),
            files,
        }),
    }
}
