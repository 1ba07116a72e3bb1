//! Phase 3: Writing to Disk
//!
//! This is the final phase of the `envmeta` pipeline. It materializes an
//! aggregation into the output directory.
//!
//! ## Process
//!
//! 1.  **Select**: the record of the aggregated environment is looked up in
//!     the merged `environments` dataset. A missing record fails the phase
//!     before anything touches the disk.
//!
//! 2.  **Create Directory**: the output directory is created when absent.
//!
//! 3.  **Write**: `current_environment.json` receives the selected record and
//!     `<dataset>.json` receives each merged dataset, all pretty-printed with
//!     a two-space indent. Existing files are overwritten wholesale.
//!
//! Writes are not synchronized; callers serialize runs that share an output
//! directory.

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;

use super::orchestrator::AggregatedDatasets;
use crate::config::json_file_name;
use crate::dataset::DatasetKind;
use crate::defaults::CURRENT_ENVIRONMENT_FILENAME;
use crate::error::{Error, Result};

/// Write `aggregated` into `output_path`.
pub fn execute(aggregated: &AggregatedDatasets, output_path: &Path) -> Result<()> {
    let current = aggregated
        .current_environment()
        .ok_or_else(|| Error::UnknownEnvironment {
            name: aggregated.environment().to_string(),
            path: output_path.join(json_file_name(DatasetKind::Environments.name())),
        })?;

    fs::create_dir_all(output_path).map_err(|source| Error::Write {
        path: output_path.to_path_buf(),
        source,
    })?;

    write_pretty(&output_path.join(CURRENT_ENVIRONMENT_FILENAME), current)?;

    for (kind, dataset) in aggregated.iter() {
        let file = output_path.join(json_file_name(kind.name()));
        info!("Creating file {}", file.display());
        write_pretty(&file, dataset)?;
    }

    Ok(())
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
