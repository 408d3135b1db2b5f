//! TIFF and PNG predictors for Flate/LZW streams.

use lopdf::Dictionary;

use crate::error::{Error, Result};

/// `/DecodeParms` values relevant to decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeParams {
    /// 1 = none, 2 = TIFF, 10..=15 = PNG
    pub predictor: i64,
    /// Color components per sample
    pub colors: usize,
    /// Bits per color component
    pub bits_per_component: usize,
    /// Samples per row
    pub columns: usize,
    /// LZW code width switch (`/EarlyChange`)
    pub early_change: bool,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            predictor: 1,
            colors: 1,
            bits_per_component: 8,
            columns: 1,
            early_change: true,
        }
    }
}

impl DecodeParams {
    /// Read parameters from a `/DecodeParms` dictionary, keeping defaults for
    /// absent or ill-typed entries.
    pub fn from_dict(dict: &Dictionary) -> Self {
        let int = |key: &[u8]| dict.get(key).ok().and_then(|o| o.as_i64().ok());
        let defaults = Self::default();

        Self {
            predictor: int(b"Predictor").unwrap_or(defaults.predictor),
            colors: positive(int(b"Colors")).unwrap_or(defaults.colors),
            bits_per_component: positive(int(b"BitsPerComponent"))
                .unwrap_or(defaults.bits_per_component),
            columns: positive(int(b"Columns")).unwrap_or(defaults.columns),
            early_change: int(b"EarlyChange").map_or(true, |v| v != 0),
        }
    }

    /// Bits in one pixel.
    fn pixel_bits(&self) -> Result<usize> {
        self.colors
            .checked_mul(self.bits_per_component)
            .filter(|&bits| bits > 0)
            .ok_or_else(|| {
                Error::ImageDecode(format!(
                    "predictor pixel size out of range ({} colors x {} bits)",
                    self.colors, self.bits_per_component
                ))
            })
    }

    fn row_bytes(&self) -> Result<usize> {
        self.pixel_bits()?
            .checked_mul(self.columns)
            .map(|bits| bits.div_ceil(8))
            .filter(|&len| len > 0)
            .ok_or_else(|| {
                Error::ImageDecode(format!(
                    "predictor row size out of range ({} columns)",
                    self.columns
                ))
            })
    }

    fn pixel_bytes(&self) -> Result<usize> {
        Ok(self.pixel_bits()?.div_ceil(8))
    }
}

fn positive(value: Option<i64>) -> Option<usize> {
    value
        .filter(|&v| v > 0)
        .and_then(|v| usize::try_from(v).ok())
}

/// Undo the predictor named in `params`.
pub fn decode_predictor(data: &[u8], params: &DecodeParams) -> Result<Vec<u8>> {
    match params.predictor {
        1 => Ok(data.to_vec()),
        2 => decode_tiff(data, params),
        10..=15 => decode_png(data, params),
        other => Err(Error::ImageDecode(format!("unsupported predictor {}", other))),
    }
}

fn decode_tiff(data: &[u8], params: &DecodeParams) -> Result<Vec<u8>> {
    if params.bits_per_component != 8 {
        return Err(Error::ImageDecode(format!(
            "TIFF predictor with {} bits per component",
            params.bits_per_component
        )));
    }

    let row_len = params.row_bytes()?;
    let bpp = params.pixel_bytes()?;
    let mut output = data.to_vec();

    for row in output.chunks_mut(row_len) {
        for i in bpp..row.len() {
            row[i] = row[i].wrapping_add(row[i - bpp]);
        }
    }
    Ok(output)
}

fn decode_png(data: &[u8], params: &DecodeParams) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let row_len = params.row_bytes()?;
    let bpp = params.pixel_bytes()?;
    // Rows are padded up to `row_len`, so a row longer than the stream would
    // allocate out of proportion to the input.
    if row_len >= data.len() {
        return Err(Error::ImageDecode(format!(
            "predictor row of {} bytes exceeds {}-byte stream",
            row_len,
            data.len()
        )));
    }
    let stride = row_len + 1;

    let mut output = Vec::with_capacity(data.len() / stride * row_len);
    let mut previous = vec![0u8; row_len];

    // A short final row is padded rather than dropped.
    for chunk in data.chunks(stride) {
        let tag = chunk[0];
        let mut row = chunk[1..].to_vec();
        row.resize(row_len, 0);

        match tag {
            0 => {}
            1 => {
                for i in bpp..row_len {
                    row[i] = row[i].wrapping_add(row[i - bpp]);
                }
            }
            2 => {
                for i in 0..row_len {
                    row[i] = row[i].wrapping_add(previous[i]);
                }
            }
            3 => {
                for i in 0..row_len {
                    let left = if i >= bpp { row[i - bpp] } else { 0 };
                    let avg = ((u16::from(left) + u16::from(previous[i])) / 2) as u8;
                    row[i] = row[i].wrapping_add(avg);
                }
            }
            4 => {
                for i in 0..row_len {
                    let left = if i >= bpp { row[i - bpp] } else { 0 };
                    let up_left = if i >= bpp { previous[i - bpp] } else { 0 };
                    row[i] = row[i].wrapping_add(paeth(left, previous[i], up_left));
                }
            }
            other => {
                return Err(Error::ImageDecode(format!(
                    "invalid PNG predictor tag {}",
                    other
                )))
            }
        }

        output.extend_from_slice(&row);
        previous = row;
    }

    Ok(output)
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = i16::from(a) + i16::from(b) - i16::from(c);
    let pa = (p - i16::from(a)).abs();
    let pb = (p - i16::from(b)).abs();
    let pc = (p - i16::from(c)).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
