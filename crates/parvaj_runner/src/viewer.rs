//! Opening waveforms in a viewer.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::RunnerError;
use crate::options::build_options;
use crate::process::{find_executable, run};
use crate::waveform::WaveformFormat;

/// Executable name looked up on `PATH` when no command line is configured.
pub const GTKWAVE_EXECUTABLE: &str = "gtkwave";

/// How waveforms are opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    /// `gtkwave [-o] <wave>`, with `-o` (optimize) for VCD input.
    Gtkwave(PathBuf),
    /// A user-configured command; the waveform path is appended.
    Custom(Vec<String>),
}

impl Viewer {
    /// Uses `cmdline` when configured, otherwise finds `gtkwave` on `PATH`.
    ///
    /// The configured command line is split on whitespace.
    pub fn from_config(cmdline: Option<&str>) -> Result<Self, RunnerError> {
        let words: Vec<String> = cmdline
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            Ok(Viewer::Gtkwave(find_executable(GTKWAVE_EXECUTABLE)?))
        } else {
            Ok(Viewer::Custom(words))
        }
    }

    /// The program and arguments that open `wave`.
    pub fn command(&self, wave: &Path, format: WaveformFormat) -> (PathBuf, Vec<OsString>) {
        match self {
            Viewer::Gtkwave(executable) => {
                let flags: &[(&str, Option<&str>)] = match format {
                    WaveformFormat::Vcd => &[("o", None)],
                    WaveformFormat::Ghw => &[],
                };
                let mut args: Vec<OsString> =
                    build_options(flags).into_iter().map(OsString::from).collect();
                args.push(wave.as_os_str().to_os_string());
                (executable.clone(), args)
            }
            Viewer::Custom(words) => {
                let (program, rest) = match words.split_first() {
                    Some((program, rest)) => (PathBuf::from(program), rest),
                    None => (PathBuf::from(GTKWAVE_EXECUTABLE), &[][..]),
                };
                let mut args: Vec<OsString> = rest.iter().map(OsString::from).collect();
                args.push(wave.as_os_str().to_os_string());
                (program, args)
            }
        }
    }

    /// Opens `wave` and waits for the viewer to exit.
    pub fn open(&self, wave: &Path, format: WaveformFormat) -> Result<(), RunnerError> {
        let (program, args) = self.command(wave, format);
        info!("opening {} with {}", wave.display(), program.display());
        run(&program, args)?;
        Ok(())
    }
}
