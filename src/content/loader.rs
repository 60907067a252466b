//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::{DataFile, SCHEMA_VERSION};
use super::registry::ContentRegistry;
use crate::actions::{ActionTuning, Loadout};

pub const LOADOUTS_FILE: &str = "loadouts.ron";
pub const TUNING_FILE: &str = "action_tuning.ron";

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("failed to load {file}: IO error: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load {file}: parse error: {message}")]
    Parse { file: String, message: String },
    #[error("{file}: schema version {found}, expected {expected}")]
    Schema {
        file: String,
        found: u32,
        expected: u32,
    },
    #[error("{file}: loadout '{id}' declared twice")]
    DuplicateId { file: String, id: String },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: path.display().to_string(),
        source,
    })
}

/// Parse a single RON struct (not wrapped in DataFile).
pub fn parse_single<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError::Parse {
            file: file.to_string(),
            message: e.to_string(),
        })
}

/// Parse a DataFile<T> wrapper and check its schema version.
pub fn parse_data_file<T>(file: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = parse_single(file, contents)?;
    if data.schema_version != SCHEMA_VERSION {
        return Err(ContentLoadError::Schema {
            file: file.to_string(),
            found: data.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(data.items)
}

pub fn parse_loadouts(file: &str, contents: &str) -> Result<ContentRegistry, ContentLoadError> {
    let mut registry = ContentRegistry::default();
    for loadout in parse_data_file::<Loadout>(file, contents)? {
        let id = loadout.id.clone();
        if registry.loadouts.insert(id.clone(), loadout).is_some() {
            return Err(ContentLoadError::DuplicateId {
                file: file.to_string(),
                id,
            });
        }
    }
    Ok(registry)
}

/// Load all content from assets/data/*.ron.
/// Returns errors for any files that fail to load.
pub fn load_all_content(
    base_path: &Path,
) -> Result<(ContentRegistry, ActionTuning), Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let loadouts_path = base_path.join(LOADOUTS_FILE);
    let registry = match read(&loadouts_path)
        .and_then(|contents| parse_loadouts(&loadouts_path.display().to_string(), &contents))
    {
        Ok(registry) => registry,
        Err(e) => {
            errors.push(e);
            ContentRegistry::default()
        }
    };

    let tuning_path = base_path.join(TUNING_FILE);
    let tuning = match read(&tuning_path)
        .and_then(|contents| parse_single(&tuning_path.display().to_string(), &contents))
    {
        Ok(tuning) => tuning,
        Err(e) => {
            errors.push(e);
            ActionTuning::default()
        }
    };

    if errors.is_empty() {
        Ok((registry, tuning))
    } else {
        Err(errors)
    }
}
