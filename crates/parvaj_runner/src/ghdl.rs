//! The `ghdl` analyzer and elaborator.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use parvaj_common::UnitName;
use regex::Regex;
use tracing::{debug, info};

use crate::error::RunnerError;
use crate::options::{build_options, SimulationOptions};
use crate::process::run;
use crate::waveform::WaveformFormat;

/// Executable name looked up on `PATH`.
pub const GHDL_EXECUTABLE: &str = "ghdl";

static VERSION_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^GHDL\s+(\d+)\.(\S+)").expect("version banner pattern is valid")
});

/// Supported `ghdl` major releases.
///
/// Every release takes the same analyze and elab-run options, including
/// `-o <workdir>/<unit>` for the elaborated binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhdlProfile {
    /// 0.x releases.
    V0,
    /// 1.x releases.
    V1,
    /// 2.x releases.
    V2,
    /// 3.x releases.
    V3,
}

impl GhdlProfile {
    /// Selects the profile for a major version.
    pub fn from_major(major: u32) -> Result<Self, RunnerError> {
        match major {
            0 => Ok(GhdlProfile::V0),
            1 => Ok(GhdlProfile::V1),
            2 => Ok(GhdlProfile::V2),
            3 => Ok(GhdlProfile::V3),
            other => Err(RunnerError::UnsupportedVersion(other)),
        }
    }

    /// The major version this profile stands for.
    pub fn major(self) -> u32 {
        match self {
            GhdlProfile::V0 => 0,
            GhdlProfile::V1 => 1,
            GhdlProfile::V2 => 2,
            GhdlProfile::V3 => 3,
        }
    }
}

/// A `ghdl` installation bound to a work directory.
#[derive(Debug, Clone)]
pub struct Ghdl {
    executable: PathBuf,
    profile: GhdlProfile,
    workdir: PathBuf,
}

impl Ghdl {
    /// Uses the given executable.
    pub fn new(executable: PathBuf, profile: GhdlProfile, workdir: impl Into<PathBuf>) -> Self {
        Self {
            executable,
            profile,
            workdir: workdir.into(),
        }
    }

    /// Creates the work directory and its parents.
    pub fn ensure_workdir(&self) -> Result<(), RunnerError> {
        std::fs::create_dir_all(&self.workdir).map_err(|e| RunnerError::Io {
            path: self.workdir.clone(),
            source: e,
        })
    }

    /// Analyzes `files` in the given order.
    pub fn analyze(&self, files: &[PathBuf]) -> Result<(), RunnerError> {
        info!("analyzing {} file(s)", files.len());
        run(&self.executable, self.analyze_args(files))?;
        Ok(())
    }

    /// Elaborates and runs `unit`, returning the waveform written.
    pub fn elab_run(
        &self,
        unit: &UnitName,
        format: WaveformFormat,
        options: &SimulationOptions,
    ) -> Result<PathBuf, RunnerError> {
        info!("elaborating and running {unit} with ghdl {}.x", self.profile.major());
        if !options.is_empty() {
            debug!("simulation options: {:?}", options.entries());
        }
        let output = run(&self.executable, self.elab_run_args(unit, format, options))?;
        if !output.trim().is_empty() {
            debug!("simulation output:\n{}", output.trim_end());
        }
        Ok(self.waveform_path(unit, format))
    }

    /// `<workdir>/<unit>.<ext>`
    pub fn waveform_path(&self, unit: &UnitName, format: WaveformFormat) -> PathBuf {
        self.workdir
            .join(format!("{}.{}", unit.as_str(), format.extension()))
    }

    /// Arguments for `ghdl -a`.
    pub fn analyze_args(&self, files: &[PathBuf]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-a".into()];
        args.extend(
            build_options(&[("workdir", Some(self.workdir_arg()))])
                .into_iter()
                .map(OsString::from),
        );
        args.extend(files.iter().map(|f| f.as_os_str().to_os_string()));
        args
    }

    /// Arguments for `ghdl --elab-run`.
    pub fn elab_run_args(
        &self,
        unit: &UnitName,
        format: WaveformFormat,
        options: &SimulationOptions,
    ) -> Vec<OsString> {
        let binary = self.workdir.join(unit.as_str());
        let general = [
            ("workdir".to_string(), Some(self.workdir_arg())),
            ("o".to_string(), Some(binary.display().to_string())),
        ];

        let wave = self.waveform_path(unit, format);
        let mut simulation = vec![(
            format.option_key().to_string(),
            Some(wave.display().to_string()),
        )];
        simulation.extend(options.entries().iter().cloned());

        let mut args: Vec<OsString> = vec!["--elab-run".into()];
        args.extend(build_options(&general).into_iter().map(OsString::from));
        args.push(unit.as_str().into());
        args.extend(build_options(&simulation).into_iter().map(OsString::from));
        args
    }

    fn workdir_arg(&self) -> String {
        self.workdir.display().to_string()
    }
}

/// Runs `<executable> --version` and returns the major version and the full
/// version string.
pub fn detect_version(executable: &Path) -> Result<(u32, String), RunnerError> {
    let banner = run(executable, ["--version"])?;
    parse_version(&banner).ok_or_else(|| {
        RunnerError::VersionDetection(banner.lines().next().unwrap_or_default().to_string())
    })
}

/// Parses a `GHDL <major>.<rest>` banner line.
pub fn parse_version(banner: &str) -> Option<(u32, String)> {
    let caps = VERSION_BANNER.captures(banner)?;
    let major = caps[1].parse().ok()?;
    Some((major, format!("{}.{}", &caps[1], &caps[2])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghdl(profile: GhdlProfile) -> Ghdl {
        Ghdl::new(PathBuf::from("/usr/bin/ghdl"), profile, "build")
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn profiles_by_major() {
        for major in 0..=3 {
            assert_eq!(GhdlProfile::from_major(major).unwrap().major(), major);
        }
        assert!(matches!(
            GhdlProfile::from_major(4),
            Err(RunnerError::UnsupportedVersion(4))
        ));
    }

    #[test]
    fn analyze_passes_files_in_order() {
        let files = [PathBuf::from("/p/util-pkg.vhd"), PathBuf::from("/p/decoder.vhd")];
        assert_eq!(
            strings(ghdl(GhdlProfile::V3).analyze_args(&files)),
            ["-a", "--workdir=build", "/p/util-pkg.vhd", "/p/decoder.vhd"]
        );
    }

    #[test]
    fn elab_run_with_output_path() {
        let opts = SimulationOptions::parse(["stop-time=3ns"]).unwrap();
        let args = ghdl(GhdlProfile::V2).elab_run_args(
            &UnitName::new("test_decoder"),
            WaveformFormat::Vcd,
            &opts,
        );
        assert_eq!(
            strings(args),
            [
                "--elab-run",
                "--workdir=build",
                "-o",
                "build/test_decoder",
                "test_decoder",
                "--vcd=build/test_decoder.vcd",
                "--stop-time=3ns",
            ]
        );
    }

    #[test]
    fn every_profile_passes_output_path() {
        for profile in [GhdlProfile::V0, GhdlProfile::V1, GhdlProfile::V2, GhdlProfile::V3] {
            let args = ghdl(profile).elab_run_args(
                &UnitName::new("tb"),
                WaveformFormat::Ghw,
                &SimulationOptions::default(),
            );
            assert_eq!(
                strings(args),
                ["--elab-run", "--workdir=build", "-o", "build/tb", "tb", "--wave=build/tb.ghw"],
                "{profile:?}"
            );
        }
    }

    #[test]
    fn waveform_path_uses_format_extension() {
        let g = ghdl(GhdlProfile::V1);
        assert_eq!(
            g.waveform_path(&UnitName::new("TB"), WaveformFormat::Ghw),
            PathBuf::from("build/tb.ghw")
        );
    }

    #[test]
    fn ensure_workdir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let g = Ghdl::new(PathBuf::from("ghdl"), GhdlProfile::V3, tmp.path().join("a/b"));
        g.ensure_workdir().unwrap();
        assert!(tmp.path().join("a/b").is_dir());
    }

    #[test]
    fn parses_version_banners() {
        let modern = "GHDL 3.0.0 (Ubuntu 3.0.0+dfsg-1) [Dunoon edition]\n Compiled with GNAT\n";
        assert_eq!(parse_version(modern), Some((3, "3.0.0".to_string())));
        let old = "GHDL 0.37 (Debian 0.37+dfsg-1) [Dunoon edition]\n";
        assert_eq!(parse_version(old), Some((0, "0.37".to_string())));
        assert_eq!(parse_version("ghdl: command not found"), None);
    }
}
