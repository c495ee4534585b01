//! # PSGC Code Arithmetic
//!
//! A PSGC code is a 9-digit, left-significant identifier. The leading
//! digits name the containing units:
//!
//! ```text
//!   1 3 | 3 9 | 0 1 | 0 0 1
//!   reg | prov/dist | city/mun/submun | barangay
//! ```
//!
//! An ancestor code is obtained by keeping the first 2, 4 or 6 digits and
//! right-padding with `'0'` back to nine characters. Whether that ancestor
//! actually exists is a set-membership question answered by the hierarchy
//! builder, not by this module.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fixed width of every PSGC code.
pub const CODE_WIDTH: usize = 9;

/// A validated 9-digit PSGC code.
///
/// # Validation
///
/// Exactly [`CODE_WIDTH`] ASCII digits. No trimming or left-padding is
/// applied: a code that lost its leading zero upstream is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PsgcCode(String);

impl PsgcCode {
    /// Create a code from a string, validating width and digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedCode`] if the input is not
    /// exactly nine ASCII digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let len = s.chars().count();
        if len != CODE_WIDTH {
            return Err(ValidationError::MalformedCode {
                reason: format!("expected {CODE_WIDTH} characters, got {len}"),
                value: s,
            });
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ValidationError::MalformedCode {
                reason: format!("non-digit character {c:?}"),
                value: s,
            });
        }
        Ok(Self(s))
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The deepest level of the hierarchy this code addresses, inferred
    /// from where its trailing zeros begin.
    pub fn depth(&self) -> CodeDepth {
        let digits = self.0.as_bytes();
        let zero_tail = |from: usize| digits[from..].iter().all(|&b| b == b'0');
        if zero_tail(2) {
            CodeDepth::Region
        } else if zero_tail(4) {
            CodeDepth::ProvinceOrDistrict
        } else if zero_tail(6) {
            CodeDepth::Locality
        } else {
            CodeDepth::Barangay
        }
    }
}

impl TryFrom<String> for PsgcCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PsgcCode> for String {
    fn from(code: PsgcCode) -> Self {
        code.0
    }
}

impl AsRef<str> for PsgcCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PsgcCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many leading digits of a code identify a containing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CodeDepth {
    /// First 2 digits.
    Region,
    /// First 4 digits. Provinces and districts share this code space.
    ProvinceOrDistrict,
    /// First 6 digits. Cities, municipalities and sub-municipalities.
    Locality,
    /// All 9 digits.
    Barangay,
}

impl CodeDepth {
    /// Number of significant leading digits at this depth.
    pub fn significant_digits(self) -> usize {
        match self {
            Self::Region => 2,
            Self::ProvinceOrDistrict => 4,
            Self::Locality => 6,
            Self::Barangay => CODE_WIDTH,
        }
    }
}

/// Truncate `code` to the significant digits of `depth` and right-pad with
/// `'0'` back to [`CODE_WIDTH`].
///
/// Total on every valid code.
pub fn ancestor_prefix(code: &PsgcCode, depth: CodeDepth) -> PsgcCode {
    let keep = depth.significant_digits();
    let mut padded = String::with_capacity(CODE_WIDTH);
    padded.push_str(&code.0[..keep]);
    padded.extend(std::iter::repeat('0').take(CODE_WIDTH - keep));
    PsgcCode(padded)
}
