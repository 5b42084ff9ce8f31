use carekit_hash::{fnv1a_64, FNV_OFFSET_BASIS, FNV_PRIME};

#[test]
fn parameters() {
    assert_eq!(FNV_OFFSET_BASIS, 0xcbf29ce484222325);
    assert_eq!(FNV_PRIME, 0x100000001b3);
}

#[test]
fn empty_input_is_offset_basis() {
    assert_eq!(fnv1a_64(""), FNV_OFFSET_BASIS);
}

#[test]
fn reference_vectors() {
    assert_eq!(fnv1a_64("a"), 0xaf63dc4c8601ec8c);
    assert_eq!(fnv1a_64("foobar"), 0x85944171f73967e8);
}

#[test]
fn hashes_utf16_code_units() {
    // Surrogate pair: two code units, not four UTF-8 bytes.
    assert_eq!(fnv1a_64("\u{1F600}"), 0xe5e45a0a241b88d8);
    assert_eq!(fnv1a_64("\"遅刻\""), 0x1b4a085f92b76219);
}
