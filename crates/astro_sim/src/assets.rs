//! Model metadata loading and verification
//!
//! The asset collaborator stores each mesh as three sibling files: a
//! `.met` text file (counts and checksums), a `.ix` file of raw
//! little-endian `u32` indices, and a `.nv` file of raw `f32` vertex
//! data (normal + position, six floats per vertex). The simulation never
//! inspects geometry; it loads the buffers, verifies the checksums, and
//! hands the data to the renderer. Any failure is fatal at startup.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::AssetError;
use crate::frame::MeshKind;

/// Raw model buffers plus their source prefix
#[derive(Debug, Clone)]
pub struct ModelData {
    /// File prefix this model was loaded from
    pub prefix: String,

    /// Triangle-list index data
    pub indices: Vec<u32>,

    /// Interleaved normal + position vertex data
    pub vertices: Vec<f32>,
}

/// Counts and checksums parsed from a `.met` file
#[derive(Debug, Default)]
struct Metadata {
    index_count: usize,
    vertex_count: usize,
    index_sum: String,
    vertex_sum: String,
}

/// XOR-fold checksum over strided index pairs, mixing the second word's
/// halves so transposed entries change the sum
fn index_checksum(indices: &[u32]) -> u32 {
    let mut sum = 0u32;
    let mut i = 0;
    while i + 1 < indices.len() {
        sum ^= indices[i];
        sum ^= indices[i + 1] >> 16;
        sum ^= indices[i + 1] << 16;
        i += 64;
    }
    sum
}

/// XOR-fold checksum over strided vertex float bit patterns
fn vertex_checksum(vertices: &[f32]) -> u32 {
    let mut sum = 0u32;
    let mut i = 0;
    while i < vertices.len() {
        sum ^= vertices[i].to_bits();
        i += 64;
    }
    sum
}

fn parse_metadata(path: &Path) -> Result<Metadata, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut meta = Metadata::default();
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else { continue };
        let value = tokens.next().unwrap_or("");
        match key {
            "indexcount:" => {
                meta.index_count = value.parse().map_err(|_| AssetError::Metadata {
                    path: path.display().to_string(),
                    reason: format!("bad index count {value:?}"),
                })?;
            }
            "vertexcount:" => {
                meta.vertex_count = value.parse().map_err(|_| AssetError::Metadata {
                    path: path.display().to_string(),
                    reason: format!("bad vertex count {value:?}"),
                })?;
            }
            "indexsum:" => meta.index_sum = value.to_string(),
            "vertexsum:" => meta.vertex_sum = value.to_string(),
            _ => {}
        }
    }
    if meta.index_count == 0 || meta.vertex_count == 0 {
        return Err(AssetError::Metadata {
            path: path.display().to_string(),
            reason: "missing index or vertex count".to_string(),
        });
    }
    Ok(meta)
}

fn read_u32_file(path: &Path, expected: usize) -> Result<Vec<u32>, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let actual = bytes.len() / 4;
    if actual < expected {
        return Err(AssetError::ShortRead {
            path: path.display().to_string(),
            expected,
            actual,
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .take(expected)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn read_f32_file(path: &Path, expected: usize) -> Result<Vec<f32>, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let actual = bytes.len() / 4;
    if actual < expected {
        return Err(AssetError::ShortRead {
            path: path.display().to_string(),
            expected,
            actual,
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .take(expected)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Load and verify one model from its file prefix
///
/// `prefix` is the model path minus extension: `data/model/player1` reads
/// `player1.met`, `player1.ix`, and `player1.nv`.
pub fn load_model(prefix: &Path) -> Result<ModelData, AssetError> {
    let met_path = prefix.with_extension("met");
    let meta = parse_metadata(&met_path)?;

    let ix_path = prefix.with_extension("ix");
    let indices = read_u32_file(&ix_path, meta.index_count)?;

    let nv_path = prefix.with_extension("nv");
    let vertices = read_f32_file(&nv_path, meta.vertex_count)?;

    let ix_actual = format!("{:x}", index_checksum(&indices));
    if ix_actual != meta.index_sum {
        return Err(AssetError::ChecksumMismatch {
            kind: "index",
            path: ix_path.display().to_string(),
            expected: meta.index_sum,
            actual: ix_actual,
        });
    }
    let nv_actual = format!("{:x}", vertex_checksum(&vertices));
    if nv_actual != meta.vertex_sum {
        return Err(AssetError::ChecksumMismatch {
            kind: "vertex",
            path: nv_path.display().to_string(),
            expected: meta.vertex_sum,
            actual: nv_actual,
        });
    }

    info!(
        "Loaded model {} - {} indices - {} vertices",
        prefix.display(),
        indices.len(),
        vertices.len()
    );
    Ok(ModelData {
        prefix: prefix.display().to_string(),
        indices,
        vertices,
    })
}

/// The five game meshes, loaded together at startup
#[derive(Debug)]
pub struct ModelSet {
    player: ModelData,
    projectile: ModelData,
    asteroid: ModelData,
    blast: ModelData,
    bounds: ModelData,
}

impl ModelSet {
    /// Load every game mesh from `base/data/model/`
    pub fn load(base: &Path) -> Result<Self, AssetError> {
        let dir = base.join("data").join("model");
        Ok(Self {
            player: load_model(&dir.join("player1"))?,
            projectile: load_model(&dir.join("projectile1"))?,
            asteroid: load_model(&dir.join("asteroid1"))?,
            blast: load_model(&dir.join("blast2"))?,
            bounds: load_model(&dir.join("bounds1"))?,
        })
    }

    /// The model backing a draw-call mesh kind
    #[must_use]
    pub fn get(&self, kind: MeshKind) -> &ModelData {
        match kind {
            MeshKind::Player => &self.player,
            MeshKind::Projectile => &self.projectile,
            MeshKind::Asteroid => &self.asteroid,
            MeshKind::Blast => &self.blast,
            MeshKind::Bounds => &self.bounds,
        }
    }
}
