//! The binary module format.
//!
//! A `.gmod` file is a single self-checking record:
//!
//! ```text
//! magic "GMOD" | version u32 BE | varint uncompressed len |
//! varint compressed len | zstd(bincode(Module)) | crc32 u32 BE |
//! blake3 checksum of all preceding bytes (32 bytes)
//! ```
//!
//! The CRC covers the compressed payload; the trailing checksum covers the
//! whole record. Both are verified on read before the payload is decoded.

use std::path::Path;

use crate::error::{ModuleError, ModuleResult};
use crate::module::Module;

pub const MAGIC: &[u8; 4] = b"GMOD";
pub const FORMAT_VERSION: u32 = 1;

const ZSTD_LEVEL: i32 = 3;
const CHECKSUM_LEN: usize = 32;
// magic + version + two one-byte varints + crc + checksum
const MIN_LEN: usize = 4 + 4 + 1 + 1 + 4 + CHECKSUM_LEN;

/// Encode a module into the binary format.
pub fn module_to_bytes(module: &Module) -> ModuleResult<Vec<u8>> {
    let payload =
        bincode::serialize(module).map_err(|e| ModuleError::Codec(e.to_string()))?;
    let compressed = zstd::encode_all(payload.as_slice(), ZSTD_LEVEL)
        .map_err(|e| ModuleError::CompressionFailed(e.to_string()))?;

    let mut data = Vec::with_capacity(compressed.len() + MIN_LEN);
    data.extend_from_slice(MAGIC);
    data.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
    encode_varint(&mut data, payload.len() as u64);
    encode_varint(&mut data, compressed.len() as u64);
    data.extend_from_slice(&compressed);
    data.extend_from_slice(&crc32fast::hash(&compressed).to_be_bytes());

    let checksum = *blake3::hash(&data).as_bytes();
    data.extend_from_slice(&checksum);
    Ok(data)
}

/// Decode a module from the binary format, verifying checksum, CRC, and
/// declared sizes.
pub fn module_from_bytes(data: &[u8]) -> ModuleResult<Module> {
    if data.len() < MIN_LEN {
        return Err(ModuleError::CorruptModule {
            reason: "module data too short".into(),
        });
    }
    if &data[0..4] != MAGIC {
        return Err(ModuleError::InvalidMagic {
            expected: String::from_utf8_lossy(MAGIC).into(),
            actual: String::from_utf8_lossy(&data[0..4]).into(),
        });
    }
    let version = u32::from_be_bytes(data[4..8].try_into().unwrap());
    if version != FORMAT_VERSION {
        return Err(ModuleError::UnsupportedVersion(version));
    }

    let body_end = data.len() - CHECKSUM_LEN;
    let expected_checksum: [u8; CHECKSUM_LEN] = data[body_end..].try_into().unwrap();
    let actual_checksum = *blake3::hash(&data[..body_end]).as_bytes();
    if actual_checksum != expected_checksum {
        return Err(ModuleError::ChecksumMismatch);
    }

    let mut pos = 8;
    let (uncompressed_size, consumed) = decode_varint(&data[pos..body_end])?;
    pos += consumed;
    let (compressed_size, consumed) = decode_varint(&data[pos..body_end])?;
    pos += consumed;

    let end = pos + compressed_size as usize;
    if end + 4 > body_end {
        return Err(ModuleError::CorruptModule {
            reason: "compressed payload extends beyond module".into(),
        });
    }
    let compressed = &data[pos..end];

    let expected_crc = u32::from_be_bytes(data[end..end + 4].try_into().unwrap());
    if crc32fast::hash(compressed) != expected_crc {
        return Err(ModuleError::CrcMismatch);
    }

    let payload = zstd::decode_all(compressed)
        .map_err(|e| ModuleError::DecompressionFailed(e.to_string()))?;
    if payload.len() != uncompressed_size as usize {
        return Err(ModuleError::CorruptModule {
            reason: format!(
                "size mismatch: declared {uncompressed_size}, got {}",
                payload.len()
            ),
        });
    }

    bincode::deserialize(&payload).map_err(|e| ModuleError::Codec(e.to_string()))
}

/// Write a module to disk in the binary format.
pub fn write_module(module: &Module, path: &Path) -> ModuleResult<()> {
    let data = module_to_bytes(module)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Read a module from disk.
pub fn read_module(path: &Path) -> ModuleResult<Module> {
    let data = std::fs::read(path)?;
    module_from_bytes(&data)
}

fn encode_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

fn decode_varint(data: &[u8]) -> ModuleResult<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for (i, &byte) in data.iter().enumerate() {
        if shift >= 64 {
            return Err(ModuleError::CorruptModule {
                reason: "varint overflow".into(),
            });
        }
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }
    Err(ModuleError::CorruptModule {
        reason: "truncated varint".into(),
    })
}
