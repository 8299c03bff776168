/* 32-byte word helpers */

/// Size of one ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// One head slot, length field or offset field.
pub type Word = [u8; WORD_SIZE];

/* Big-endian length or offset word */
pub fn usize_word(value: usize) -> Word {
    let mut word = [0u8; WORD_SIZE];
    let bytes = (value as u64).to_be_bytes();
    word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    word
}

/* Right-align `bytes` in a word; `None` if it does not fit */
pub fn left_pad(bytes: &[u8]) -> Option<Word> {
    let start = WORD_SIZE.checked_sub(bytes.len())?;
    let mut word = [0u8; WORD_SIZE];
    word[start..].copy_from_slice(bytes);
    Some(word)
}

/* Left-align `bytes` in a word; `None` if it does not fit */
pub fn right_pad(bytes: &[u8]) -> Option<Word> {
    if bytes.len() > WORD_SIZE {
        return None;
    }
    let mut word = [0u8; WORD_SIZE];
    word[..bytes.len()].copy_from_slice(bytes);
    Some(word)
}

/* Copy `bytes` and zero-fill up to the next word boundary */
pub fn pad_to_words(bytes: &[u8]) -> Vec<u8> {
    let padded_len = bytes.len().div_ceil(WORD_SIZE) * WORD_SIZE;
    let mut padded = Vec::with_capacity(padded_len);
    padded.extend_from_slice(bytes);
    padded.resize(padded_len, 0);
    padded
}

/* Length word followed by the word-padded payload */
pub fn length_prefixed(payload: &[u8]) -> Vec<u8> {
    let mut out = usize_word(payload.len()).to_vec();
    out.extend(pad_to_words(payload));
    out
}
