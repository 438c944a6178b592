use crate::encoder::Encoded;
use crate::error::Error;

/// The assembled memory image: raw bytes laid out from the origin, plus
/// the resolved entry point if one was exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub origin: u16,
    pub export: Option<u16>,
    pub bytes: Vec<u8>,
}

/// Concatenate encoded instructions in source order.
pub fn build(origin: u16, export: Option<u16>, code: &[Encoded]) -> Result<Image, Error> {
    let mut bytes = Vec::new();
    for encoded in code {
        bytes.extend_from_slice(&encoded.bytes);
    }
    if origin as usize + bytes.len() > 0x1_0000 {
        return Err(Error::ImageOverflow {
            origin,
            len: bytes.len(),
        });
    }
    Ok(Image {
        origin,
        export,
        bytes,
    })
}
