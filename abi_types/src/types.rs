use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/* Array nesting accepted by `ParamType::parse` */
pub const DEFAULT_MAX_DEPTH: usize = 32;

/* Widest integer and fixed-bytes types, in bits and bytes */
pub const MAX_INTEGER_BITS: usize = 256;
pub const MAX_FIXED_BYTES: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    #[error("unsupported type '{0}'")]
    Unsupported(String),

    #[error("tuple types not supported")]
    Tuple,

    #[error("invalid width {width} for {kind} in '{signature}'")]
    InvalidWidth {
        kind: &'static str,
        width: usize,
        signature: String,
    },

    #[error("invalid array length '{length}' in '{signature}'")]
    InvalidArrayLength { length: String, signature: String },

    #[error("array nesting in '{signature}' exceeds {max_depth} levels")]
    TooDeep { signature: String, max_depth: usize },
}

/// Parsed contract ABI type signature.
///
/// Array suffixes nest outward: `uint256[2][]` is a dynamic array whose
/// elements are `uint256[2]`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Hash)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParamType {
    Address,
    Bool,
    String,
    Bytes,
    FixedBytes {
        size: usize,
    },
    Uint {
        bits: usize,
    },
    Int {
        bits: usize,
    },
    Array {
        element: Box<ParamType>,
    },
    FixedArray {
        element: Box<ParamType>,
        length: usize,
    },
}

impl ParamType {
    /// Parse a type signature, allowing up to [`DEFAULT_MAX_DEPTH`] array levels.
    pub fn parse(signature: &str) -> Result<Self, TypeParseError> {
        Self::parse_with_max_depth(signature, DEFAULT_MAX_DEPTH)
    }

    /// Parse a type signature, rejecting more than `max_depth` array levels.
    pub fn parse_with_max_depth(signature: &str, max_depth: usize) -> Result<Self, TypeParseError> {
        let signature = signature.trim();
        parse_nested(signature, signature, max_depth, max_depth)
    }

    /* Dynamic types are referenced through an offset word in the head */
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::String | ParamType::Bytes | ParamType::Array { .. } => true,
            ParamType::FixedArray { element, .. } => element.is_dynamic(),
            _ => false,
        }
    }

    /* Number of 32-byte head slots this type occupies inside a tuple */
    pub fn head_slots(&self) -> usize {
        match self {
            ParamType::FixedArray { element, length } if !self.is_dynamic() => {
                length.saturating_mul(element.head_slots())
            }
            _ => 1,
        }
    }

    /* Number of array levels wrapped around the elementary type */
    pub fn depth(&self) -> usize {
        match self {
            ParamType::Array { element } | ParamType::FixedArray { element, .. } => {
                1 + element.depth()
            }
            _ => 0,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::String => write!(f, "string"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::FixedBytes { size } => write!(f, "bytes{size}"),
            ParamType::Uint { bits } => write!(f, "uint{bits}"),
            ParamType::Int { bits } => write!(f, "int{bits}"),
            ParamType::Array { element } => write!(f, "{element}[]"),
            ParamType::FixedArray { element, length } => write!(f, "{element}[{length}]"),
        }
    }
}

impl FromStr for ParamType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/* Strip one trailing array suffix per level, then parse the elementary type */
fn parse_nested(
    current: &str,
    signature: &str,
    depth_left: usize,
    max_depth: usize,
) -> Result<ParamType, TypeParseError> {
    if current.starts_with('(') || current.starts_with("tuple") {
        return Err(TypeParseError::Tuple);
    }

    let Some(body) = current.strip_suffix(']') else {
        return parse_elementary(current, signature);
    };
    let open = body
        .rfind('[')
        .ok_or_else(|| TypeParseError::Unsupported(signature.to_string()))?;
    if depth_left == 0 {
        return Err(TypeParseError::TooDeep {
            signature: signature.to_string(),
            max_depth,
        });
    }

    let element = Box::new(parse_nested(&body[..open], signature, depth_left - 1, max_depth)?);
    let length = &body[open + 1..];
    if length.is_empty() {
        return Ok(ParamType::Array { element });
    }

    match parse_decimal(length) {
        Some(length) if length > 0 => Ok(ParamType::FixedArray { element, length }),
        _ => Err(TypeParseError::InvalidArrayLength {
            length: length.to_string(),
            signature: signature.to_string(),
        }),
    }
}

fn parse_elementary(name: &str, signature: &str) -> Result<ParamType, TypeParseError> {
    match name {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        _ => {}
    }

    let unsupported = || TypeParseError::Unsupported(signature.to_string());

    if let Some(width) = name.strip_prefix("bytes") {
        let size = parse_decimal(width).ok_or_else(unsupported)?;
        if !(1..=MAX_FIXED_BYTES).contains(&size) {
            return Err(TypeParseError::InvalidWidth {
                kind: "bytes",
                width: size,
                signature: signature.to_string(),
            });
        }
        return Ok(ParamType::FixedBytes { size });
    }

    let (kind, width) = if let Some(width) = name.strip_prefix("uint") {
        ("uint", width)
    } else if let Some(width) = name.strip_prefix("int") {
        ("int", width)
    } else {
        return Err(unsupported());
    };

    let bits = if width.is_empty() {
        MAX_INTEGER_BITS
    } else {
        parse_decimal(width).ok_or_else(unsupported)?
    };
    if bits == 0 || bits > MAX_INTEGER_BITS || bits % 8 != 0 {
        return Err(TypeParseError::InvalidWidth {
            kind,
            width: bits,
            signature: signature.to_string(),
        });
    }

    Ok(if kind == "uint" {
        ParamType::Uint { bits }
    } else {
        ParamType::Int { bits }
    })
}

/* Plain ASCII digits only: no sign, no separators */
fn parse_decimal(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
