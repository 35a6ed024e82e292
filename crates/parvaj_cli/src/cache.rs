//! `parvaj cache`: inspect or reset the unit location cache.

use parvaj_locate::UnitLocator;

use crate::project::{open_cache, project_root};
use crate::{CacheAction, GlobalArgs};

/// Runs the `parvaj cache` command.
pub fn run(action: &CacheAction, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let root = project_root(global)?;
    let mut cache = open_cache(&root)?;

    match action {
        CacheAction::Path => println!("{}", cache.path().display()),
        CacheAction::List { scan } => {
            if *scan {
                let found = UnitLocator::new(&root, &mut cache)?.find_all_units()?;
                cache.save()?;
                if !global.quiet {
                    eprintln!("Scanned {} unit(s).", found.len());
                }
            }
            for (name, record) in cache.records() {
                println!("{name}\t{}\t{}", record.kind, record.path.display());
            }
        }
        CacheAction::Clear => {
            let count = cache.len();
            cache.clear();
            cache.save()?;
            if !global.quiet {
                eprintln!("Cleared {count} cached unit(s).");
            }
        }
    }
    Ok(0)
}
