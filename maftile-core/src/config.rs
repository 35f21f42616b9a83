//! Tiler configuration
//!
//! Supports loading configuration from TOML or JSON files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::coords::GenomicInterval;
use crate::error::{MafError, MafResult};
use crate::io::fasta::FastaRangeReader;
use crate::tiler::{ReferenceSource, Tiler};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilerConfig {
    /// Species to tile, in output order; the first is the reference species
    #[serde(default)]
    pub species: Vec<String>,

    /// Display names for the FASTA headers
    #[serde(default)]
    pub species_map: BTreeMap<String, String>,

    /// Reference sequence used for columns no block covers
    #[serde(default)]
    pub reference: Option<ReferenceConfig>,

    /// Remove all-gap columns from filtered blocks before tiling
    #[serde(default = "default_true")]
    pub remove_gaps: bool,

    /// Drop columns where the reference row has a gap; off keeps insertions
    #[serde(default = "default_true")]
    pub strip_ref_gaps: bool,
}

/// Where reference bases come from: a FASTA file or an inline sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub sequence: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for TilerConfig {
    fn default() -> Self {
        Self {
            species: Vec::new(),
            species_map: BTreeMap::new(),
            reference: None,
            remove_gaps: true,
            strip_ref_gaps: true,
        }
    }
}

impl TilerConfig {
    /// Load configuration from a `.toml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading tiler configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: TilerConfig = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.species.is_empty() {
            bail!("Configuration must list at least one species");
        }
        Ok(())
    }

    /// Build a tiler for `interval`, opening the reference source if configured
    pub fn build_tiler(&self, interval: GenomicInterval) -> MafResult<Tiler> {
        let mut tiler = Tiler::new(interval, self.species.clone())
            .with_species_map(self.species_map.clone())
            .with_remove_gaps(self.remove_gaps)
            .with_strip_ref_gaps(self.strip_ref_gaps);
        if let Some(reference) = &self.reference {
            tiler = tiler.with_reference(reference.open()?);
        }
        Ok(tiler)
    }
}

impl ReferenceConfig {
    /// Open the configured source; exactly one of `path` and `sequence` must be set
    pub fn open(&self) -> MafResult<ReferenceSource> {
        match (&self.path, &self.sequence) {
            (Some(path), None) => {
                let reader = FastaRangeReader::open(path)?;
                Ok(ReferenceSource::Reader(Box::new(reader)))
            }
            (None, Some(sequence)) => Ok(ReferenceSource::Text(sequence.clone())),
            (Some(_), Some(_)) => Err(MafError::unhandled_source(
                "both a reference path and an inline sequence were given",
            )),
            (None, None) => Err(MafError::unhandled_source(
                "reference names neither a path nor an inline sequence",
            )),
        }
    }
}
