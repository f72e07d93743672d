/// Broad category of a [`PixelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested width or unit could not produce a grid.
    Construction,
    /// A coordinate was rejected before quantization.
    Validation,
    /// A cell key could not be decoded or describes no possible cell.
    MalformedKey,
    /// The fixed-point scale cannot represent the full longitude range exactly.
    InternalPrecision,
}

/// Error type for earthpixel-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelError {
    /// The width is not a finite positive number.
    InvalidWidth(String),
    /// The width unit is neither `meters` nor `degrees`.
    InvalidUnit(String),
    /// The width, in degrees, exceeds the 45° cap.
    WidthTooLarge(f64),
    /// The width, in degrees, is below the smallest supported resolution.
    WidthTooSmall(f64),
    /// The latitude division count lies outside the supported range.
    InvalidDivisions(u64),
    /// The coordinate input is not a structured record.
    NotAnObject,
    /// A coordinate field is missing or does not convert to a finite number.
    NotANumber(&'static str),
    /// A coordinate field lies outside its geographic range.
    OutOfRange { field: &'static str, value: f64 },
    /// The key is not three hyphen-separated hex integers, or names an impossible cell.
    MalformedKey(String),
    /// `360 * precision` would exceed the exact-integer range of `f64`.
    Precision(i64),
}

impl PixelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PixelError::InvalidWidth(_)
            | PixelError::InvalidUnit(_)
            | PixelError::WidthTooLarge(_)
            | PixelError::WidthTooSmall(_)
            | PixelError::InvalidDivisions(_) => ErrorKind::Construction,
            PixelError::NotAnObject
            | PixelError::NotANumber(_)
            | PixelError::OutOfRange { .. } => ErrorKind::Validation,
            PixelError::MalformedKey(_) => ErrorKind::MalformedKey,
            PixelError::Precision(_) => ErrorKind::InternalPrecision,
        }
    }
}

impl std::fmt::Display for PixelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelError::InvalidWidth(w) => write!(f, "Width must be a positive number: {}", w),
            PixelError::InvalidUnit(u) => write!(f, "Unknown width unit: {}", u),
            PixelError::WidthTooLarge(w) => {
                write!(f, "Width must be at most 45 degrees, got {}", w)
            }
            PixelError::WidthTooSmall(w) => write!(f, "Width too small: {} degrees", w),
            PixelError::InvalidDivisions(d) => {
                write!(f, "Unsupported number of latitude divisions: {}", d)
            }
            PixelError::NotAnObject => write!(f, "Location must be an object"),
            PixelError::NotANumber(field) => write!(f, "{} must be a number", field),
            PixelError::OutOfRange { field, value } => {
                write!(f, "{} out of range: {}", field, value)
            }
            PixelError::MalformedKey(key) => write!(f, "Key is malformed: {}", key),
            PixelError::Precision(p) => write!(f, "Cannot handle precision {}", p),
        }
    }
}

impl std::error::Error for PixelError {}
