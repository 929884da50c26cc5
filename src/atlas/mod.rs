//! Atlas document: the JSON list of named quad regions written by Export and
//! read back by Import.

mod io;

pub use io::{AtlasIoState, AtlasPlugin, ExportAtlasRequest, ImportAtlasRequest};

use std::path::{Path, PathBuf};

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// One quad as it appears in the atlas document.
///
/// `center` is the quad's pivot, `pixel_min`/`pixel_max` its unpadded bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedQuad {
    pub name: String,
    #[serde(with = "wire_vec2")]
    pub center: Vec2,
    #[serde(with = "wire_vec2")]
    pub pixel_min: Vec2,
    #[serde(with = "wire_vec2")]
    pub pixel_max: Vec2,
}

#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid atlas document: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("could not serialize atlas: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// `{"x": .., "y": ..}` objects on the wire instead of glam's `[x, y]` arrays.
mod wire_vec2 {
    use bevy::math::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct WireVec2 {
        x: f32,
        y: f32,
    }

    pub fn serialize<S: Serializer>(value: &Vec2, serializer: S) -> Result<S::Ok, S::Error> {
        WireVec2 {
            x: value.x,
            y: value.y,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
        let wire = WireVec2::deserialize(deserializer)?;
        Ok(Vec2::new(wire.x, wire.y))
    }
}

pub fn parse_document(json: &str) -> Result<Vec<ExportedQuad>, AtlasError> {
    serde_json::from_str(json).map_err(AtlasError::Parse)
}

/// Serialize with a four-space indent.
pub fn to_json(entries: &[ExportedQuad]) -> Result<String, AtlasError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries
        .serialize(&mut serializer)
        .map_err(AtlasError::Serialize)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn read_document(path: &Path) -> Result<Vec<ExportedQuad>, AtlasError> {
    let json = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&json)
}

pub fn write_document(path: &Path, entries: &[ExportedQuad]) -> Result<(), AtlasError> {
    let json = to_json(entries)?;
    std::fs::write(path, json).map_err(|source| AtlasError::Io {
        path: path.to_path_buf(),
        source,
    })
}
