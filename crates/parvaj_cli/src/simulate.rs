//! `parvaj simulate`: analyze, elaborate, run and view a test bench.
//!
//! Resolves every file the test bench depends on, analyzes them in order with
//! GHDL, elab-runs the test bench to produce a waveform, and opens the
//! waveform in GTKWave. The unit cache is saved as soon as resolution ends,
//! so a failing GHDL run does not lose the scan results.

use std::path::{Path, PathBuf};

use parvaj_common::UnitName;
use parvaj_config::ConfigStore;
use parvaj_runner::{
    detect_version, find_executable, Ghdl, GhdlProfile, SimulationOptions, Viewer, WaveformFormat,
    GHDL_EXECUTABLE,
};

use crate::deps::resolve_order;
use crate::project::{open_cache, project_root};
use crate::{GlobalArgs, SimulateArgs};

/// Runs the `parvaj simulate` command.
pub fn run(args: &SimulateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let root = project_root(global)?;
    let format: WaveformFormat = args.waveform.parse()?;
    let options = SimulationOptions::parse(&args.options)?;
    let unit = UnitName::new(&args.test_bench);

    let mut cache = open_cache(&root)?;
    let resolved = resolve_order(&root, &mut cache, &unit);
    cache.save()?;
    let files = resolved?;

    let mut config = ConfigStore::load_default()?;
    let executable = find_executable(GHDL_EXECUTABLE)?;
    let profile = ghdl_profile(&mut config, &executable, global)?;
    let ghdl = Ghdl::new(executable, profile, resolve_workdir(&root, &args.workdir));
    ghdl.ensure_workdir()?;

    if !global.quiet {
        eprintln!("Analyzing files...");
    }
    ghdl.analyze(&files)?;

    if !global.quiet {
        eprintln!("Elab-running the test...");
    }
    let wave = ghdl.elab_run(&unit, format, &options)?;

    if args.no_view {
        if !global.quiet {
            eprintln!("Waveform written to {}", wave.display());
        }
        return Ok(0);
    }

    if !global.quiet {
        eprintln!("Opening the results in GTKWave...");
    }
    let viewer = Viewer::from_config(config.config().gtkwave.cmdline.as_deref())?;
    viewer.open(&wave, format)?;
    Ok(0)
}

/// Returns the configured GHDL profile, detecting and storing the version
/// first if it was never set.
fn ghdl_profile(
    config: &mut ConfigStore,
    executable: &Path,
    global: &GlobalArgs,
) -> Result<GhdlProfile, Box<dyn std::error::Error>> {
    if let Some(major) = config.config().ghdl.version {
        return Ok(GhdlProfile::from_major(major)?);
    }

    if !global.quiet {
        eprintln!("GHDL version not set, auto-detecting...");
    }
    let (major, full) = detect_version(executable)?;
    let profile = GhdlProfile::from_major(major)?;
    if !global.quiet {
        eprintln!("Detected GHDL version: {full}");
    }

    config.config_mut().ghdl.version = Some(major);
    config.save()?;
    Ok(profile)
}

/// A relative work directory is taken relative to the project root.
fn resolve_workdir(root: &Path, workdir: &Path) -> PathBuf {
    if workdir.is_absolute() {
        workdir.to_path_buf()
    } else {
        root.join(workdir)
    }
}
