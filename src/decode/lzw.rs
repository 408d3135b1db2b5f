//! LZWDecode.
//!
//! PDF LZW is MSB-first with 9..12 bit codes, clear code 256 and EOD 257.
//! `EarlyChange` 1 (the default) widens the code one entry early, which is
//! exactly the TIFF size switch in `weezl`.

use weezl::{decode::Decoder, BitOrder};

use crate::error::{Error, Result};

pub(crate) fn decode(input: &[u8], early_change: bool) -> Result<Vec<u8>> {
    let mut decoder = if early_change {
        Decoder::with_tiff_size_switch(BitOrder::Msb, 8)
    } else {
        Decoder::new(BitOrder::Msb, 8)
    };

    decoder
        .decode(input)
        .map_err(|e| Error::ImageDecode(format!("LZWDecode: {:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weezl::encode::Encoder;

    #[test]
    fn test_early_change_stream() {
        let data: Vec<u8> = (0..2000u32).map(|i| (i % 7) as u8 * 31).collect();
        let packed = Encoder::with_tiff_size_switch(BitOrder::Msb, 8)
            .encode(&data)
            .unwrap();
        assert_eq!(decode(&packed, true).unwrap(), data);
    }

    #[test]
    fn test_late_change_stream() {
        let data = b"-----A---B-----A---B-----A---B".to_vec();
        let packed = Encoder::new(BitOrder::Msb, 8).encode(&data).unwrap();
        assert_eq!(decode(&packed, false).unwrap(), data);
    }
}
