//! Provenance for `solve --out`: a `<result>.provenance.json` file next to
//! each result, holding enough to rerun the solve and compare.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Build identity; printed by `report` and embedded in every sidecar.
#[derive(Debug, Serialize)]
pub struct Build {
    pub code_rev: String,
    pub linprog2d_version: &'static str,
    pub cli_version: &'static str,
}

impl Build {
    pub fn current() -> Self {
        Self {
            code_rev: code_rev(),
            linprog2d_version: linprog2d::VERSION,
            cli_version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// One solve: inputs, the seed actually used, and the outcome.
#[derive(Debug, Serialize)]
pub struct Sidecar<'a> {
    pub build: Build,
    pub objective: [f64; 2],
    pub input: &'a Path,
    pub rows: usize,
    pub seed: u64,
    pub status: &'static str,
    pub result: &'a Path,
}

/// `dir/name.json` -> `dir/name.provenance.json`.
pub fn sidecar_path(result: &Path) -> PathBuf {
    result.with_extension("provenance.json")
}

/// Write the sidecar next to `sidecar.result`; returns its path.
pub fn write(sidecar: &Sidecar<'_>) -> Result<PathBuf> {
    let path = sidecar_path(sidecar.result);
    let bytes = serde_json::to_vec_pretty(sidecar)?;
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_result() {
        assert_eq!(
            sidecar_path(Path::new("runs/barn.json")),
            Path::new("runs/barn.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("runs/out")),
            Path::new("runs/out.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_solve_inputs() {
        let dir = tempdir().unwrap();
        let result = dir.path().join("r.json");
        let input = dir.path().join("p.csv");
        let sidecar = Sidecar {
            build: Build::current(),
            objective: [-5.0, 10.0],
            input: &input,
            rows: 7,
            seed: 42,
            status: "edge",
            result: &result,
        };
        let path = write(&sidecar).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["objective"][0], -5.0);
        assert_eq!(parsed["rows"], 7);
        assert_eq!(parsed["seed"], 42);
        assert_eq!(parsed["status"], "edge");
        assert_eq!(parsed["build"]["linprog2d_version"], linprog2d::VERSION);
        assert!(!parsed["build"]["code_rev"].as_str().unwrap().is_empty());
    }
}
