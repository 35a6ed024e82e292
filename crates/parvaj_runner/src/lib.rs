//! Wrappers around the external analyzer, elaborator, and waveform viewer.
//!
//! The `ghdl` analyzer/elaborator is driven through [`Ghdl`], whose option
//! differences between releases are captured by [`GhdlProfile`]. Waveforms
//! are opened with [`Viewer`]. All processes run to completion with their
//! output captured; a non-zero exit becomes [`RunnerError::ProcessFailed`].

#![warn(missing_docs)]

pub mod error;
pub mod ghdl;
pub mod options;
pub mod process;
pub mod viewer;
pub mod waveform;

pub use error::RunnerError;
pub use ghdl::{detect_version, Ghdl, GhdlProfile, GHDL_EXECUTABLE};
pub use options::{build_options, SimulationOptions};
pub use process::find_executable;
pub use viewer::Viewer;
pub use waveform::WaveformFormat;
