use xxhash_rust::xxh3::xxh3_128;

/// Content hash rendered as lowercase hex, used for `[hash]` placeholders in
/// output filenames. Stable across machines and builds of the same content.
pub fn xxhash_hex(input: &[u8]) -> String {
  let hash = xxh3_128(input).to_le_bytes();
  let mut out = String::with_capacity(hash.len() * 2);
  for byte in hash {
    out.push(char::from_digit(u32::from(byte >> 4), 16).unwrap_or('0'));
    out.push(char::from_digit(u32::from(byte & 0x0f), 16).unwrap_or('0'));
  }
  out
}

/// The truncated form emitted into filenames.
pub fn xxhash_short(input: &[u8], len: usize) -> String {
  let mut hex = xxhash_hex(input);
  hex.truncate(len);
  hex
}

#[test]
fn test_xxhash_hex() {
  assert_eq!(xxhash_hex(b"hello").len(), 32);
  assert_eq!(xxhash_short(b"hello", 8).len(), 8);
  // Deterministic across runs.
  assert_eq!(xxhash_hex(b"hello"), xxhash_hex(b"hello"));
  assert_ne!(xxhash_hex(b"hello"), xxhash_hex(b"hello!"));
}
