use serde::{Deserialize, Serialize};

use crate::types::GameMode;

const MAGIC: &[u8; 4] = b"OTST";
const VERSION: u32 = 1;
// magic + version + crc32
const HEADER_SIZE: usize = 12;
// three u32 counters + one mode byte
const PAYLOAD_SIZE: usize = 13;

/// Win/loss/draw tallies from the human player's perspective.
/// Updated on solo game over only; duo games never touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub last_mode: GameMode,
}

impl Default for StatsRecord {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            draws: 0,
            last_mode: GameMode::Solo,
        }
    }
}

impl StatsRecord {
    /// Serialize to the persisted blob format: magic, version, CRC32
    /// of the payload, then the little-endian payload itself.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
        payload.extend_from_slice(&self.wins.to_le_bytes());
        payload.extend_from_slice(&self.losses.to_le_bytes());
        payload.extend_from_slice(&self.draws.to_le_bytes());
        payload.push(self.last_mode.to_byte());

        let crc = crc32fast::hash(&payload);
        let mut out = Vec::with_capacity(HEADER_SIZE + PAYLOAD_SIZE);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    /// Deserialize a persisted blob, validating framing and checksum.
    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        if data.len() != HEADER_SIZE + PAYLOAD_SIZE {
            return Err(format!(
                "stats blob has wrong length: expected {}, got {}",
                HEADER_SIZE + PAYLOAD_SIZE,
                data.len()
            ));
        }

        if &data[0..4] != MAGIC {
            return Err("invalid stats magic (expected OTST)".to_string());
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(format!(
                "unsupported stats version: expected {VERSION}, got {version}"
            ));
        }

        let expected_crc = read_u32_le(data, 8);
        let payload = &data[HEADER_SIZE..];
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(format!(
                "CRC32 mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"
            ));
        }

        Ok(Self {
            wins: read_u32_le(payload, 0),
            losses: read_u32_le(payload, 4),
            draws: read_u32_le(payload, 8),
            last_mode: GameMode::from_byte(payload[12])?,
        })
    }

    /// Startup path: missing or corrupt storage degrades to zeroed
    /// in-memory tallies instead of interrupting play.
    pub fn load_or_default(data: Option<&[u8]>) -> Self {
        data.and_then(|bytes| Self::from_bytes(bytes).ok())
            .unwrap_or_default()
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatsRecord {
        StatsRecord {
            wins: 12,
            losses: 7,
            draws: 3,
            last_mode: GameMode::Duo,
        }
    }

    #[test]
    fn round_trips_through_the_blob_format() {
        let record = sample();

        let restored = StatsRecord::from_bytes(&record.to_bytes()).expect("must parse");

        assert_eq!(restored, record);
    }

    #[test]
    fn rejects_invalid_magic() {
        let mut bytes = sample().to_bytes();
        bytes[0] = b'X';

        let err = StatsRecord::from_bytes(&bytes).unwrap_err();
        assert!(err.contains("magic"));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut bytes = sample().to_bytes();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());

        let err = StatsRecord::from_bytes(&bytes).unwrap_err();
        assert!(err.contains("version"));
    }

    #[test]
    fn rejects_crc_mismatch() {
        let mut bytes = sample().to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let err = StatsRecord::from_bytes(&bytes).unwrap_err();
        assert!(err.contains("CRC32"));
    }

    #[test]
    fn rejects_truncated_blob() {
        let mut bytes = sample().to_bytes();
        bytes.pop();

        let err = StatsRecord::from_bytes(&bytes).unwrap_err();
        assert!(err.contains("length"));
    }

    #[test]
    fn load_or_default_degrades_to_zeros() {
        assert_eq!(StatsRecord::load_or_default(None), StatsRecord::default());
        assert_eq!(
            StatsRecord::load_or_default(Some(b"garbage")),
            StatsRecord::default()
        );

        let bytes = sample().to_bytes();
        assert_eq!(StatsRecord::load_or_default(Some(&bytes)), sample());
    }
}
