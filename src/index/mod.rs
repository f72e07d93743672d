mod key;

pub use key::{CellKey, decode_key, encode_key};
