//! Command-line option rendering and user simulation options.

use crate::error::RunnerError;

/// Option keys set by the runner itself, which users may not override.
pub const RESERVED_KEYS: &[&str] = &["workdir", "vcd", "wave", "o"];

/// Renders `(key, value)` pairs as command-line arguments.
///
/// A one-character key becomes `-k` followed by the value as a separate
/// argument; a longer key becomes `--key=value`, or `--key` without a value.
pub fn build_options<K, V>(options: &[(K, Option<V>)]) -> Vec<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut args = Vec::with_capacity(options.len());
    for (key, value) in options {
        let key = key.as_ref();
        let value: Option<&str> = value.as_ref().map(|v| v.as_ref());
        if key.chars().count() == 1 {
            args.push(format!("-{key}"));
            if let Some(value) = value {
                args.push(value.to_string());
            }
        } else {
            match value {
                Some(value) => args.push(format!("--{key}={value}")),
                None => args.push(format!("--{key}")),
            }
        }
    }
    args
}

/// Extra options passed to the simulation run, in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationOptions {
    entries: Vec<(String, Option<String>)>,
}

impl SimulationOptions {
    /// Parses `key=value` (or bare `key`) strings, without leading dashes.
    ///
    /// A key given twice keeps its first position and last value.
    pub fn parse<I, S>(raw: I) -> Result<Self, RunnerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(String, Option<String>)> = Vec::new();
        for option in raw {
            let option = option.as_ref();
            let (key, value) = match option.split_once('=') {
                Some((key, value)) => (key, Some(value.to_string())),
                None => (option, None),
            };

            if key.is_empty() || key.starts_with('-') {
                return Err(RunnerError::InvalidOption {
                    option: option.to_string(),
                    reason: "expected 'key=value' without leading dashes".to_string(),
                });
            }
            if RESERVED_KEYS.contains(&key) {
                return Err(RunnerError::InvalidOption {
                    option: option.to_string(),
                    reason: format!("'{key}' is set by parvaj itself"),
                });
            }

            match entries.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key.to_string(), value)),
            }
        }
        Ok(Self { entries })
    }

    /// The parsed `(key, value)` pairs.
    pub fn entries(&self) -> &[(String, Option<String>)] {
        &self.entries
    }

    /// Returns `true` if no options were given.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_keys() {
        let args = build_options(&[
            ("workdir", Some("build")),
            ("o", Some("build/tb")),
            ("a", None),
            ("stats", None),
        ]);
        assert_eq!(args, ["--workdir=build", "-o", "build/tb", "-a", "--stats"]);
    }

    #[test]
    fn parses_user_options_in_order() {
        let opts = SimulationOptions::parse(["stop-time=3ns", "ieee-asserts=disable", "stats"]).unwrap();
        assert_eq!(
            opts.entries(),
            [
                ("stop-time".to_string(), Some("3ns".to_string())),
                ("ieee-asserts".to_string(), Some("disable".to_string())),
                ("stats".to_string(), None),
            ]
        );
    }

    #[test]
    fn no_options_is_empty() {
        assert!(SimulationOptions::parse(std::iter::empty::<&str>()).unwrap().is_empty());
        assert!(!SimulationOptions::parse(["stats"]).unwrap().is_empty());
    }

    #[test]
    fn value_may_contain_equals() {
        let opts = SimulationOptions::parse(["gHEIGHT=a=b"]).unwrap();
        assert_eq!(opts.entries()[0].1.as_deref(), Some("a=b"));
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let opts = SimulationOptions::parse(["stop-time=1ns", "stats", "stop-time=5ns"]).unwrap();
        assert_eq!(opts.entries().len(), 2);
        assert_eq!(opts.entries()[0].1.as_deref(), Some("5ns"));
    }

    #[test]
    fn reserved_keys_rejected() {
        for raw in ["workdir=x", "vcd=a.vcd", "wave=a.ghw", "o=out"] {
            assert!(matches!(
                SimulationOptions::parse([raw]),
                Err(RunnerError::InvalidOption { .. })
            ));
        }
    }

    #[test]
    fn dashed_or_empty_keys_rejected() {
        assert!(SimulationOptions::parse(["--stop-time=1ns"]).is_err());
        assert!(SimulationOptions::parse(["=1ns"]).is_err());
    }
}
