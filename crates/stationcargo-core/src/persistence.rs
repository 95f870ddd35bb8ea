//! Save/load for the economy state.
//!
//! Uses bincode for compact binary serialization. Catalog and settings are
//! configuration, not state, so they are not part of the snapshot.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use stationcargo_logic::catalog::CargoOrder;
use stationcargo_logic::exports::ExportLedger;

/// Version number for the save format (increment when the format changes).
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the economy state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoSave {
    pub version: u32,
    pub credits: i64,
    /// `ShuttleStatus` as u8.
    pub status: u8,
    pub fly_time: f32,
    pub dispatch_log: String,
    pub current_category: Option<usize>,
    pub cart: Vec<CargoOrder>,
    pub confirmed_orders: Vec<CargoOrder>,
    pub exports: ExportLedger,
}

/// Write a snapshot to a writer.
pub fn save_economy<W: Write>(writer: W, save: &CargoSave) -> Result<(), SaveError> {
    bincode::serialize_into(writer, save)?;
    Ok(())
}

/// Read a snapshot from a reader, checking the format version.
pub fn load_economy<R: Read>(reader: R) -> Result<CargoSave, SaveError> {
    let save: CargoSave = bincode::deserialize_from(reader)?;
    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }
    Ok(save)
}

/// Errors that can occur during save/load.
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
    /// Stored shuttle status byte is not a known state.
    BadStatus(u8),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::BadStatus(val) => write!(f, "Unknown shuttle status in save: {}", val),
        }
    }
}

impl std::error::Error for SaveError {}
