//! Codeword-level round-trip checks for the compactor's Set A/B/C data
//! encoding, using a small hand-written decoder restricted to the inverse of
//! the `(byte+64)%96` / `byte-32` / digit-pair formulas in §4.2. This is not a
//! symbology decoder (out of scope per §1) — it only proves the forward
//! mappings for plain, shift/latch-free runs are invertible, per the
//! testable-properties note in SPEC_FULL.md §8 item 1.

use dotcode::compact::find_data_words;
use dotcode::CompactMode;

/// Decode an all-Set-C message: every codeword is a two-digit value.
fn decode_set_c_digits(codewords: &[i32]) -> String {
    codewords.iter().map(|&v| format!("{v:02}")).collect()
}

/// Decode a message that opens with a single Set-B latch (106) followed
/// entirely by plain Set-B data codewords (`byte - 32`).
fn decode_latched_set_b(codewords: &[i32]) -> String {
    assert_eq!(codewords[0], 106, "expected a Set B latch codeword first");
    codewords[1..]
        .iter()
        .map(|&v| (v + 32) as u8 as char)
        .collect()
}

#[test]
fn even_digit_run_round_trips_through_set_c_pairs() {
    let message = b"12345678";
    let (cw, mode) = find_data_words(message, false).unwrap();
    assert_eq!(mode, CompactMode::SetC);
    assert_eq!(cw, vec![12, 34, 56, 78]);
    assert_eq!(decode_set_c_digits(&cw), "12345678");
}

#[test]
fn another_even_digit_run_round_trips() {
    let message = b"00998877";
    let (cw, _) = find_data_words(message, false).unwrap();
    assert_eq!(decode_set_c_digits(&cw), "00998877");
}

#[test]
fn plain_ascii_word_round_trips_through_set_b_latch() {
    // "Hello" has AheadA == 1 (only 'H' is a Set A datum) and AheadB == 5,
    // so the compactor latches (106) rather than shifting, then every byte
    // becomes a plain Set B datum (`byte - 32`).
    let message = b"Hello";
    let (cw, mode) = find_data_words(message, false).unwrap();
    assert_eq!(mode, CompactMode::SetB);
    assert_eq!(cw[0], 106);
    assert_eq!(cw.len(), 6);
    assert_eq!(decode_latched_set_b(&cw), "Hello");
}

#[test]
fn longer_ascii_sentence_round_trips_through_set_b_latch() {
    let message = b"wxyz!@$%12";
    // Digits 1 and 2 trailing the word don't form a favorable `TryC` run
    // (length 1 after the letters, which never beats starting one token
    // later), so the whole message stays inside the Set B latch.
    let (cw, _) = find_data_words(message, false).unwrap();
    assert_eq!(cw[0], 106);
    assert_eq!(decode_latched_set_b(&cw), "wxyz!@$%12");
}
