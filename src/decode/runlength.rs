//! RunLengthDecode.

use crate::error::{Error, Result};

/// Length byte 0..=127 copies the next n+1 bytes, 129..=255 repeats the next
/// byte 257-n times, 128 ends the data.
pub(crate) fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut i = 0;

    while i < input.len() {
        let length = input[i];
        i += 1;

        match length {
            0..=127 => {
                let count = length as usize + 1;
                let literal = input.get(i..i + count).ok_or_else(|| {
                    Error::ImageDecode(format!(
                        "RunLengthDecode: literal run of {} bytes overruns input",
                        count
                    ))
                })?;
                output.extend_from_slice(literal);
                i += count;
            }
            128 => break,
            129..=255 => {
                let byte = *input.get(i).ok_or_else(|| {
                    Error::ImageDecode("RunLengthDecode: missing repeated byte".to_string())
                })?;
                i += 1;
                output.resize(output.len() + (257 - length as usize), byte);
            }
        }
    }

    Ok(output)
}
