/* Constructor Argument Encoding Library
 *
 * This library encodes constructor arguments into the contract ABI head/tail
 * layout: typed values are matched against parsed type signatures and laid
 * out as 32-byte words, with dynamic payloads referenced through offsets.
 */

pub mod constructor;
pub mod encoder;
pub mod errors;
mod primitive;
pub mod word;

pub use constructor::{
    encode_constructor_args, extract_constructor_inputs, ConstructorEncoder, EncoderConfig,
};
pub use encoder::{encode_params, encode_signatures, encode_value, Encoding};
pub use errors::{EncodeError, EncodeResult};
pub use word::{Word, WORD_SIZE};

pub use abi_types;
