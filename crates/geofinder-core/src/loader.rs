// crates/geofinder-core/src/loader.rs
use crate::error::{GeoError, Result};
use crate::memory::{Dataset, MemoryGazetteer};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Opens a dataset file. `.gz` files are decompressed on the fly.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");

    #[cfg(feature = "compact")]
    {
        if gzipped {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
    }

    #[cfg(not(feature = "compact"))]
    {
        if gzipped {
            return Err(GeoError::InvalidData(format!(
                "{} is gzip-compressed; enable the `compact` feature",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

impl Dataset {
    /// Reads a `{ "countries": [...], "places": [...] }` document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a dataset from `.json` or `.json.gz`.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(open_stream(path)?)?;
        tracing::info!(
            path = %path.display(),
            countries = dataset.countries.len(),
            places = dataset.places.len(),
            "dataset read"
        );
        Ok(dataset)
    }
}

impl MemoryGazetteer {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::from_dataset(Dataset::from_json_str(json)?))
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_dataset(Dataset::load_from_path(path)?))
    }
}
