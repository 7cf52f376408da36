use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{DecodeError, Engine as _};
use log::{debug, warn};

use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::lap::LapRecord;

/// size of one lap record in the blob
pub const RECORD_SIZE: usize = 52;

/// lap times from the feed are only trusted below this value
pub const MAX_LAP_TIME_MS: i64 = 600_000;

const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// # raw lap record
/// one 52 byte little endian record as it is stored in the blob. only the lap
/// number, the sectors, and the lap time end up in a `LapRecord`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RawLap {
    pub competitor_id: i32,
    pub lap_id: i32,
    pub lap_number: i32,
    pub race_lap_number: i32,
    pub lap_pos: i32,
    pub sector1: i32,
    pub sector2: i32,
    pub sector3: i32,
    pub lap_time_ms: i32,
    pub timestamp_low: u32,
    pub timestamp_high: u32,
    pub lap_flags: i32,
    pub sector4: i32,
}

impl RawLap {
    /// # read a record
    /// read one record from the start of `bytes`
    ///
    /// ## Returns
    /// * `Result<RawLap, String>` - the record, or the field that could not be read
    pub fn read(bytes: &[u8]) -> Result<RawLap, String> {
        let mut cursor = 0usize;

        Ok(RawLap {
            competitor_id: read_i32_le(bytes, &mut cursor, "competitor_id")?,
            lap_id: read_i32_le(bytes, &mut cursor, "lap_id")?,
            lap_number: read_i32_le(bytes, &mut cursor, "lap_number")?,
            race_lap_number: read_i32_le(bytes, &mut cursor, "race_lap_number")?,
            lap_pos: read_i32_le(bytes, &mut cursor, "lap_pos")?,
            sector1: read_i32_le(bytes, &mut cursor, "sector1")?,
            sector2: read_i32_le(bytes, &mut cursor, "sector2")?,
            sector3: read_i32_le(bytes, &mut cursor, "sector3")?,
            lap_time_ms: read_i32_le(bytes, &mut cursor, "lap_time_ms")?,
            timestamp_low: read_u32_le(bytes, &mut cursor, "timestamp_low")?,
            timestamp_high: read_u32_le(bytes, &mut cursor, "timestamp_high")?,
            lap_flags: read_i32_le(bytes, &mut cursor, "lap_flags")?,
            sector4: read_i32_le(bytes, &mut cursor, "sector4")?,
        })
    }

    /// write the record in the blob layout
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let fields: [[u8; 4]; 13] = [
            self.competitor_id.to_le_bytes(),
            self.lap_id.to_le_bytes(),
            self.lap_number.to_le_bytes(),
            self.race_lap_number.to_le_bytes(),
            self.lap_pos.to_le_bytes(),
            self.sector1.to_le_bytes(),
            self.sector2.to_le_bytes(),
            self.sector3.to_le_bytes(),
            self.lap_time_ms.to_le_bytes(),
            self.timestamp_low.to_le_bytes(),
            self.timestamp_high.to_le_bytes(),
            self.lap_flags.to_le_bytes(),
            self.sector4.to_le_bytes(),
        ];

        let mut bytes = [0u8; RECORD_SIZE];
        for (chunk, field) in bytes.chunks_exact_mut(4).zip(fields.iter()) {
            chunk.copy_from_slice(field);
        }
        bytes
    }

    /// # to lap record
    /// apply the sector and lap time rules to the raw values.
    /// the start lap never has a lap time or a first sector.
    ///
    /// ## Returns
    /// * `Option<LapRecord>` - none when the lap number is negative
    pub fn to_lap_record(&self) -> Option<LapRecord> {
        let lap_number = u32::try_from(self.lap_number).ok()?;

        let sector2 = TimeHelper::optional_millis(i64::from(self.sector2));
        let sector3 = TimeHelper::optional_millis(i64::from(self.sector3));
        let sector4 = TimeHelper::optional_millis(i64::from(self.sector4));

        if lap_number == 0 {
            return Some(LapRecord {
                lap_number,
                lap_time: None,
                sector1: None,
                sector2,
                sector3,
                sector4,
            });
        }

        Some(LapRecord {
            lap_number,
            lap_time: TimeHelper::optional_millis(self.lap_time()),
            sector1: TimeHelper::optional_millis(i64::from(self.sector1)),
            sector2,
            sector3,
            sector4,
        })
    }

    /// the lap time of the feed, or the sum of the sectors when it is out of range
    fn lap_time(&self) -> i64 {
        let lap_time = i64::from(self.lap_time_ms);
        if lap_time > 0 && lap_time < MAX_LAP_TIME_MS {
            return lap_time;
        }

        [self.sector1, self.sector2, self.sector3, self.sector4]
            .iter()
            .map(|sector| i64::from(*sector))
            .sum()
    }
}

pub struct BinaryLaps {}

impl BinaryLaps {
    /// # decode binary laps
    /// decode the base64 lap blob of a competitor. the blob is a sequence of
    /// fixed size records, trailing bytes that do not fill a record are dropped.
    /// a bad record is skipped without affecting the others.
    ///
    /// ## Arguments
    /// * `blob` - the base64 encoded lap records
    ///
    /// ## Returns
    /// * `Vec<LapRecord>` - the laps sorted by lap number, without duplicates
    pub fn decode(blob: &str) -> Vec<LapRecord> {
        let bytes = BinaryLaps::decode_base64(blob);

        let remainder = bytes.len() % RECORD_SIZE;
        if remainder != 0 {
            debug!(target:"parsers/binary_laps:decode", "dropping {} trailing bytes", remainder);
        }

        let mut laps: Vec<LapRecord> = bytes
            .chunks_exact(RECORD_SIZE)
            .enumerate()
            .filter_map(|(index, chunk)| match RawLap::read(chunk) {
                Ok(raw) => {
                    let lap = raw.to_lap_record();
                    if lap.is_none() {
                        debug!(target:"parsers/binary_laps:decode", "record {} has negative lap number {}, skipping", index, raw.lap_number);
                    }
                    lap
                }
                Err(field) => {
                    debug!(target:"parsers/binary_laps:decode", "record {} could not be read at {}, skipping", index, field);
                    None
                }
            })
            .collect();

        laps.sort_by_key(|lap| lap.lap_number);
        laps.dedup_by_key(|lap| lap.lap_number);

        laps
    }

    /// # decode base64
    /// decode as much of the blob as possible. whitespace is ignored and
    /// padding is optional. when an invalid symbol is found everything before
    /// it is still decoded.
    fn decode_base64(blob: &str) -> Vec<u8> {
        let cleaned: String = blob.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        if cleaned.is_empty() {
            return Vec::new();
        }

        let error = match LENIENT_BASE64.decode(&cleaned) {
            Ok(bytes) => return bytes,
            Err(error) => error,
        };

        let valid_symbols = match error {
            DecodeError::InvalidByte(offset, _) | DecodeError::InvalidLastSymbol(offset, _) => offset,
            _ => cleaned.len(),
        };
        let prefix_len = valid_symbols - valid_symbols % 4;

        warn!(target:"parsers/binary_laps:decode", "invalid base64 in lap blob, decoding the first {} symbols. (error: {})", prefix_len, error);

        match LENIENT_BASE64.decode(&cleaned.as_bytes()[..prefix_len]) {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(target:"parsers/binary_laps:decode", "could not decode lap blob. (error: {})", error);
                Vec::new()
            }
        }
    }
}

fn read_array<const N: usize>(bytes: &[u8], cursor: &mut usize, field: &str) -> Result<[u8; N], String> {
    let end = cursor.checked_add(N).ok_or_else(|| field.to_string())?;
    let raw: [u8; N] = bytes
        .get(*cursor..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| field.to_string())?;
    *cursor = end;
    Ok(raw)
}

fn read_i32_le(bytes: &[u8], cursor: &mut usize, field: &str) -> Result<i32, String> {
    Ok(i32::from_le_bytes(read_array::<4>(bytes, cursor, field)?))
}

fn read_u32_le(bytes: &[u8], cursor: &mut usize, field: &str) -> Result<u32, String> {
    Ok(u32::from_le_bytes(read_array::<4>(bytes, cursor, field)?))
}
