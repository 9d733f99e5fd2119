//! Length-prefixed payloads returned through a pointer.

use super::{Result, WireError};

/// Size of the big-endian length header.
pub const HEADER_LEN: usize = 4;

/// Frame `payload` behind its 4-byte big-endian length.
pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(payload.len()).map_err(|_| WireError::PayloadTooLarge(payload.len()))?;
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Read the header and return exactly the payload it announces.
///
/// Bytes past the announced length are not part of the payload.
pub fn decode(frame: &[u8]) -> Result<&[u8]> {
    let Some((header, rest)) = frame.split_first_chunk::<HEADER_LEN>() else {
        return Err(WireError::Truncated {
            expected: HEADER_LEN,
            actual: frame.len(),
        });
    };

    let len = u32::from_be_bytes(*header) as usize;
    rest.get(..len).ok_or(WireError::Truncated {
        expected: HEADER_LEN + len,
        actual: frame.len(),
    })
}
