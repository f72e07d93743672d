use crate::core::constants::KEY_SEPARATOR;
use crate::core::grid::CellIndices;
use crate::error::PixelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encodes cell indices as a key.
///
/// # Format
///
/// Three lower-case hexadecimal integers joined by `-`, without padding:
///
/// | Field       | Description                                   |
/// |-------------|-----------------------------------------------|
/// | divisions   | Number of latitude bands of the grid          |
/// | lat_index   | Band index, counted north from the south pole |
/// | lon_index   | Column index, counted east from -180°         |
///
/// # Example
/// ```
/// use earthpixel_rs::{CellIndices, encode_key};
///
/// let key = encode_key(&CellIndices { divisions: 360, lat_index: 180, lon_index: 406 });
/// assert_eq!(key, "168-b4-196");
/// ```
pub fn encode_key(indices: &CellIndices) -> String {
    format!(
        "{:x}{sep}{:x}{sep}{:x}",
        indices.divisions,
        indices.lat_index,
        indices.lon_index,
        sep = KEY_SEPARATOR
    )
}

/// Decodes a key back into its cell indices.
///
/// Accepts upper- or lower-case hex digits. Anything other than exactly three
/// non-empty hex fields is rejected, as is a field that overflows `u64`.
///
/// # Errors
///
/// - [`PixelError::MalformedKey`] - The key does not match `^[0-9a-f]+-[0-9a-f]+-[0-9a-f]+$`
pub fn decode_key(key: &str) -> Result<CellIndices, PixelError> {
    let malformed = || PixelError::MalformedKey(key.to_string());

    let mut fields = key.split(KEY_SEPARATOR).map(|field| {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        u64::from_str_radix(field, 16).map_err(|_| malformed())
    });

    let divisions = fields.next().ok_or_else(malformed)??;
    let lat_index = fields.next().ok_or_else(malformed)??;
    let lon_index = fields.next().ok_or_else(malformed)??;
    if fields.next().is_some() {
        return Err(malformed());
    }

    Ok(CellIndices {
        divisions,
        lat_index,
        lon_index,
    })
}

/// A cell key in its canonical lower-case form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellKey(String);

impl CellKey {
    pub fn encode(indices: &CellIndices) -> Self {
        CellKey(encode_key(indices))
    }

    pub fn decode(&self) -> Result<CellIndices, PixelError> {
        decode_key(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CellKey {
    type Err = PixelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_key(s).map(|indices| CellKey::encode(&indices))
    }
}

impl TryFrom<String> for CellKey {
    type Error = PixelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellKey> for String {
    fn from(key: CellKey) -> Self {
        key.0
    }
}

impl AsRef<str> for CellKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CellKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
