use std::string::{FromUtf8Error, FromUtf16Error};
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Specific error details regarding `UTF` text decoding.
#[derive(Error, Debug)]
pub enum UtfError {
    /// UTF-16 data (detected by its byte order mark) has an odd byte count.
    #[error("UTF-16 data needs to contain an even amount of bytes")]
    UnevenByteCount,
    /// Invalid UTF-8 data.
    #[error(transparent)]
    InvalidUtf8(FromUtf8Error),
    /// Invalid UTF-16 data.
    #[error(transparent)]
    InvalidUtf16(FromUtf16Error),
}

/// Converts UTF-16 data (with a BOM) into UTF-8 and strips a UTF-8 BOM,
/// leaving any other data untouched.
pub(crate) fn into_utf8(data: Vec<u8>) -> Result<Vec<u8>, UtfError> {
    if is_utf16(&data) {
        from_utf16(&data).map(String::into_bytes)
    } else if data.starts_with(UTF8_BOM) {
        Ok(data[UTF8_BOM.len()..].to_vec())
    } else {
        Ok(data)
    }
}

/// Decodes text content; the byte order mark is never part of the result.
pub(crate) fn into_utf8_str(data: Vec<u8>) -> Result<String, UtfError> {
    if is_utf16(&data) {
        from_utf16(&data)
    } else {
        let mut string = String::from_utf8(data).map_err(UtfError::InvalidUtf8)?;
        if string.starts_with('\u{FEFF}') {
            string.drain(..'\u{FEFF}'.len_utf8());
        }
        Ok(string)
    }
}

/// Checks if a UTF-16 byte order mark (BOM) exists
fn is_utf16(data: &[u8]) -> bool {
    data.starts_with(b"\xFF\xFE") || data.starts_with(b"\xFE\xFF")
}

fn from_utf16(data: &[u8]) -> Result<String, UtfError> {
    // Determine byte order for little endian (le) and big endian (be)
    let endian = if data.starts_with(b"\xFF") {
        u16::from_le_bytes
    } else {
        u16::from_be_bytes
    };

    let utf16 = data[2..]
        .chunks(2)
        .map(|chunk| chunk.try_into().map(endian))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| UtfError::UnevenByteCount)?;

    String::from_utf16(utf16.as_ref()).map_err(UtfError::InvalidUtf16)
}
