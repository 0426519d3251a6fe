use crate::constants::{DRIVER_CRATES, TARGET};
use anyhow::{Context, Result};
use std::process::Command;

pub fn build_all_drivers(features: Option<&str>, release: bool) -> Result<()> {
    for package in DRIVER_CRATES {
        println!("Building {}...", package);
        build_driver(package, features, release)?;
    }

    Ok(())
}

fn build_driver(
    package: &str,
    features: Option<&str>,
    release: bool,
) -> Result<()> {
    let mut cargo_build = Command::new("cargo");
    cargo_build
        .arg("build")
        .arg("--package")
        .arg(package)
        .arg("--target")
        .arg(TARGET);

    if release {
        cargo_build.arg("--release");
    }

    if let Some(features) = features {
        cargo_build.args(["--features", features]);
    }

    let status = cargo_build
        .status()
        .with_context(|| format!("Failed to build {}", package))?;

    if !status.success() {
        anyhow::bail!("Build failed for {}", package);
    }

    Ok(())
}
