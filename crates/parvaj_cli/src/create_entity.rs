//! `parvaj create-entity`: generate a source or unit-test entity file.

use parvaj_scaffold::{EntityKind, EntityScaffold};

use crate::project::project_root;
use crate::{CreateEntityArgs, GlobalArgs};

/// Runs the `parvaj create-entity` command.
pub fn run(args: &CreateEntityArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let kind: EntityKind = args.entity_type.parse()?;
    let scaffold = EntityScaffold {
        root: project_root(global)?,
        kind,
        entity_name: args.entity_name.clone(),
        group: args.group_name.clone(),
        architecture: args.architecture_name.clone(),
    };

    let path = scaffold.create()?;
    if !global.quiet {
        eprintln!("File created successfully: {}", path.display());
    }
    Ok(0)
}
