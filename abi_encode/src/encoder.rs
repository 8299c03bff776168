/* Head/tail encoder for tuples and arrays */

use crate::errors::{EncodeError, EncodeResult};
use crate::primitive;
use crate::word::{usize_word, Word, WORD_SIZE};
use abi_types::{ArgumentValue, ParamType};
use tracing::trace;

/* Result of encoding one value */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /* In-place words of a static value; empty for dynamic values */
    pub head: Vec<u8>,

    /* Length-prefixed payload of a dynamic value; empty for static values */
    pub tail: Vec<u8>,

    /* Whether the enclosing tuple must reference this value through an offset */
    pub dynamic: bool,
}

impl Encoding {
    fn word(word: Word) -> Self {
        Self::inline(word.to_vec())
    }

    fn inline(head: Vec<u8>) -> Self {
        Self {
            head,
            tail: Vec::new(),
            dynamic: false,
        }
    }

    fn deferred(tail: Vec<u8>) -> Self {
        Self {
            head: Vec::new(),
            tail,
            dynamic: true,
        }
    }

    /* Bytes this value occupies in the enclosing head region */
    pub fn head_len(&self) -> usize {
        if self.dynamic {
            WORD_SIZE
        } else {
            self.head.len()
        }
    }
}

/// Encode `values` as a tuple of `types`.
///
/// The two lists must have equal length. The result is the head region
/// followed by the tail payloads of the dynamic positions.
pub fn encode_params(types: &[ParamType], values: &[ArgumentValue]) -> EncodeResult<Vec<u8>> {
    let types: Vec<&ParamType> = types.iter().collect();
    encode_tuple(&types, values)
}

/// Parse each signature, then encode like [`encode_params`].
pub fn encode_signatures<S: AsRef<str>>(
    signatures: &[S],
    values: &[ArgumentValue],
) -> EncodeResult<Vec<u8>> {
    if signatures.len() != values.len() {
        return Err(EncodeError::ArityMismatch {
            expected: signatures.len(),
            actual: values.len(),
        });
    }
    let types = signatures
        .iter()
        .map(|signature| ParamType::parse(signature.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    encode_params(&types, values)
}

/// Encode a single value against its type.
///
/// Static values come back with their head words filled in. Dynamic values
/// come back with an empty head; the enclosing tuple writes their offset.
pub fn encode_value(ty: &ParamType, value: &ArgumentValue) -> EncodeResult<Encoding> {
    match ty {
        ParamType::Address => primitive::encode_address(ty, value).map(Encoding::word),
        ParamType::Bool => primitive::encode_bool(value).map(Encoding::word),
        ParamType::Uint { bits } => primitive::encode_uint(ty, *bits, value).map(Encoding::word),
        ParamType::Int { bits } => primitive::encode_int(ty, *bits, value).map(Encoding::word),
        ParamType::FixedBytes { size } => {
            primitive::encode_fixed_bytes(ty, *size, value).map(Encoding::word)
        }
        ParamType::Bytes => primitive::encode_bytes(ty, value).map(Encoding::deferred),
        ParamType::String => primitive::encode_string(ty, value).map(Encoding::deferred),
        ParamType::Array { element } => {
            let items = sequence_items(ty, value)?;
            let mut tail = usize_word(items.len()).to_vec();
            tail.extend(encode_tuple(&vec![element.as_ref(); items.len()], items)?);
            Ok(Encoding::deferred(tail))
        }
        ParamType::FixedArray { element, length } => {
            let items = sequence_items(ty, value)?;
            if items.len() != *length {
                return Err(EncodeError::LengthMismatch {
                    ty: ty.to_string(),
                    expected: *length,
                    actual: items.len(),
                });
            }
            let body = encode_tuple(&vec![element.as_ref(); *length], items)?;
            if element.is_dynamic() {
                Ok(Encoding::deferred(body))
            } else {
                Ok(Encoding::inline(body))
            }
        }
    }
}

fn sequence_items<'v>(ty: &ParamType, value: &'v ArgumentValue) -> EncodeResult<&'v [ArgumentValue]> {
    match value {
        ArgumentValue::Sequence(items) => Ok(items),
        other => Err(EncodeError::invalid(
            ty,
            format!("expected a sequence, got {}", other.kind()),
        )),
    }
}

/* Offsets written here are relative to the start of this tuple's head */
fn encode_tuple(types: &[&ParamType], values: &[ArgumentValue]) -> EncodeResult<Vec<u8>> {
    if types.len() != values.len() {
        return Err(EncodeError::ArityMismatch {
            expected: types.len(),
            actual: values.len(),
        });
    }

    let encodings = types
        .iter()
        .zip(values)
        .map(|(ty, value)| encode_value(ty, value))
        .collect::<EncodeResult<Vec<_>>>()?;

    let head_size: usize = encodings.iter().map(Encoding::head_len).sum();
    debug_assert_eq!(
        head_size,
        types.iter().map(|ty| ty.head_slots() * WORD_SIZE).sum::<usize>()
    );
    let tail_size: usize = encodings.iter().map(|e| e.tail.len()).sum();

    let mut out = Vec::with_capacity(head_size + tail_size);
    let mut offset = head_size;
    for encoding in &encodings {
        if encoding.dynamic {
            out.extend_from_slice(&usize_word(offset));
            offset += encoding.tail.len();
        } else {
            out.extend_from_slice(&encoding.head);
        }
    }
    for encoding in encodings.iter().filter(|e| e.dynamic) {
        out.extend_from_slice(&encoding.tail);
    }

    trace!(positions = types.len(), head_size, tail_size, "encoded tuple");
    Ok(out)
}
