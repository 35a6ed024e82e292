//! Error types for external tool invocation.

use std::path::PathBuf;

/// Errors from locating or running external tools.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The executable is not on `PATH`.
    #[error("could not find '{name}' executable")]
    ExecutableNotFound {
        /// The executable name searched for.
        name: String,
    },

    /// The process ran but exited unsuccessfully.
    #[error("{program} failed{}:\n{output}", exit_suffix(.code))]
    ProcessFailed {
        /// The program that was run.
        program: String,
        /// Exit code, if the process exited normally.
        code: Option<i32>,
        /// Captured stderr, or stdout when stderr was empty.
        output: String,
    },

    /// The process could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// The program that was run.
        program: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A filesystem operation around a run failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The waveform format is neither `vcd` nor `ghw`.
    #[error("invalid waveform type '{0}'")]
    InvalidWaveformFormat(String),

    /// A user simulation option cannot be passed through.
    #[error("invalid simulation option '{option}': {reason}")]
    InvalidOption {
        /// The option as given.
        option: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No option profile exists for this analyzer major version.
    #[error("unsupported GHDL version {0}")]
    UnsupportedVersion(u32),

    /// The analyzer's version banner could not be understood.
    #[error("could not detect GHDL version from output: {0}")]
    VersionDetection(String),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {c}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = RunnerError::ExecutableNotFound {
            name: "gtkwave".to_string(),
        };
        assert_eq!(format!("{err}"), "could not find 'gtkwave' executable");
    }

    #[test]
    fn display_process_failed_with_code() {
        let err = RunnerError::ProcessFailed {
            program: "ghdl".to_string(),
            code: Some(1),
            output: "decoder.vhd:3:1: entity 'x' not found".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "ghdl failed with exit code 1:\ndecoder.vhd:3:1: entity 'x' not found"
        );
    }

    #[test]
    fn display_process_failed_by_signal() {
        let err = RunnerError::ProcessFailed {
            program: "ghdl".to_string(),
            code: None,
            output: String::new(),
        };
        assert_eq!(format!("{err}"), "ghdl failed:\n");
    }

    #[test]
    fn display_unsupported_version() {
        assert_eq!(
            format!("{}", RunnerError::UnsupportedVersion(7)),
            "unsupported GHDL version 7"
        );
    }

    #[test]
    fn display_invalid_waveform() {
        assert_eq!(
            format!("{}", RunnerError::InvalidWaveformFormat("fst".to_string())),
            "invalid waveform type 'fst'"
        );
    }
}
