//! Waveform output formats.

use std::fmt;
use std::str::FromStr;

use crate::error::RunnerError;

/// The waveform file produced by a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaveformFormat {
    /// Value Change Dump, written with `--vcd=`.
    #[default]
    Vcd,
    /// GHDL's native format, written with `--wave=`.
    Ghw,
}

impl WaveformFormat {
    /// The file extension, which is also the name used on the command line.
    pub fn extension(self) -> &'static str {
        match self {
            WaveformFormat::Vcd => "vcd",
            WaveformFormat::Ghw => "ghw",
        }
    }

    /// The simulation option that selects this format.
    pub(crate) fn option_key(self) -> &'static str {
        match self {
            WaveformFormat::Vcd => "vcd",
            WaveformFormat::Ghw => "wave",
        }
    }
}

impl FromStr for WaveformFormat {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vcd" => Ok(WaveformFormat::Vcd),
            "ghw" => Ok(WaveformFormat::Ghw),
            _ => Err(RunnerError::InvalidWaveformFormat(s.to_string())),
        }
    }
}

impl fmt::Display for WaveformFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
