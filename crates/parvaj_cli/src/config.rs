//! `parvaj config`: get or set a global option.

use parvaj_config::ConfigStore;

use crate::{ConfigArgs, GlobalArgs};

/// Runs the `parvaj config` command.
pub fn run(args: &ConfigArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut store = ConfigStore::load_default()?;
    if let Some(output) = apply(&mut store, args)? {
        println!("{output}");
    } else if !global.quiet {
        eprintln!("Set {} in {}", args.name, store.path().display());
    }
    Ok(0)
}

/// Prints the value when no new value is given; otherwise sets and saves it.
fn apply(store: &mut ConfigStore, args: &ConfigArgs) -> Result<Option<String>, parvaj_config::ConfigError> {
    match &args.value {
        None => store.get(&args.name).map(Some),
        Some(value) => {
            store.set(&args.name, value)?;
            store.save()?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str, value: Option<&str>) -> ConfigArgs {
        ConfigArgs {
            name: name.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn set_then_get() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut store = ConfigStore::load(&path).unwrap();
        assert_eq!(apply(&mut store, &args("ghdl.version", Some("2"))).unwrap(), None);

        let mut reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(
            apply(&mut reloaded, &args("ghdl.version", None)).unwrap().as_deref(),
            Some("2")
        );
    }

    #[test]
    fn unknown_option_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = ConfigStore::load(tmp.path().join("config.toml")).unwrap();
        assert!(apply(&mut store, &args("ghdl.colour", None)).is_err());
    }
}
