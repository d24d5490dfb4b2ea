//! Bounded look-ahead helpers used to decide which compaction mode consumes
//! the most input per emitted codeword. Grounded in `AheadA`/`AheadB`/
//! `AheadC`/`TryC`/`DatumA`/`DatumB`/`CrLf`/`DigitPair`/`SeventeenTen`/`ECI`
//! from `original_source/DotEncod.c`.

use super::tokens::{at, is_digit, is_fncx, FNC2};

/// Count of consecutive digit tokens starting at `pos`.
pub fn n_digits(tokens: &[i32], pos: usize) -> usize {
    let mut n = 0;
    while is_digit(at(tokens, pos, n)) {
        n += 1;
    }
    n
}

pub fn datum_a(c: i32) -> bool {
    (0..=95).contains(&c) || is_fncx(c)
}

pub fn datum_b(c: i32, past_first_datum: bool) -> bool {
    (32..=127).contains(&c)
        || (past_first_datum && (c == 9 || (28..=30).contains(&c)))
        || is_fncx(c)
}

pub fn cr_lf(tokens: &[i32], pos: usize) -> bool {
    at(tokens, pos, 0) == 13 && at(tokens, pos, 1) == 10
}

pub fn digit_pair(tokens: &[i32], pos: usize) -> bool {
    is_digit(at(tokens, pos, 0)) && is_digit(at(tokens, pos, 1))
}

pub fn seventeen_ten(tokens: &[i32], pos: usize) -> bool {
    n_digits(tokens, pos) >= 10
        && at(tokens, pos, 0) == b'1' as i32
        && at(tokens, pos, 1) == b'7' as i32
        && at(tokens, pos, 8) == b'1' as i32
        && at(tokens, pos, 9) == b'0' as i32
}

/// If `tokens[pos]` starts an ECI designator (`FNC2` + 6 digits), returns its
/// decoded value; the designator is always exactly 7 tokens wide.
pub fn eci(tokens: &[i32], pos: usize) -> Option<i64> {
    if at(tokens, pos, 0) == FNC2 && n_digits(tokens, pos + 1) >= 6 {
        let mut v: i64 = 0;
        for n in 1..=6 {
            v = v * 10 + (at(tokens, pos, n) - b'0' as i32) as i64;
        }
        Some(v)
    } else {
        None
    }
}

/// How many input tokens Code Set C would consume starting at `pos`, walking
/// digit pairs, the 17-digit-10 shorthand, and FNC escapes.
pub fn ahead_c(tokens: &[i32], pos: usize) -> usize {
    let mut n = 0;
    let mut p = pos;
    loop {
        let x = n;
        if seventeen_ten(tokens, p) {
            p += 10;
            n += 4;
            continue;
        }
        if digit_pair(tokens, p) {
            p += 2;
            n += 1;
            continue;
        }
        if is_fncx(at(tokens, p, 0)) {
            p += 1;
            n += 1;
            continue;
        }
        if n <= x {
            break;
        }
    }
    n
}

/// Code Set C is favorable at `pos` only if it strictly beats starting one
/// token later (i.e. there is a real run of digits here, not a stray pair).
pub fn try_c(tokens: &[i32], pos: usize) -> usize {
    if is_digit(at(tokens, pos, 0)) {
        let n = ahead_c(tokens, pos);
        if n > ahead_c(tokens, pos + 1) {
            return n;
        }
    }
    0
}

pub fn ahead_a(tokens: &[i32], pos: usize) -> usize {
    let mut n = 0;
    let mut p = pos;
    loop {
        let x = n;
        // Mirrors the reference's `do { ... } while (n > x)`: a favorable
        // digit run here means Set A's lookahead stops without advancing,
        // which in a do-while falls straight through to the failed
        // condition check. `break` (not `continue`) is the correct
        // translation — `n`/`p` are unchanged, so re-entering the loop
        // would spin forever on the same position.
        if try_c(tokens, p) >= 2 {
            break;
        }
        if let Some(v) = eci(tokens, p) {
            p += 7;
            n += if v <= 49 { 2 } else { 4 };
            continue;
        }
        if datum_a(at(tokens, p, 0)) {
            p += 1;
            n += 1;
            continue;
        }
        if n <= x {
            break;
        }
    }
    n
}

pub fn ahead_b(tokens: &[i32], pos: usize, past_first_datum: bool) -> usize {
    let mut n = 0;
    let mut p = pos;
    loop {
        let x = n;
        // See the matching comment in `ahead_a`: this must be `break`, not
        // `continue`, to mirror the reference's do-while termination.
        if try_c(tokens, p) >= 2 {
            break;
        }
        if let Some(v) = eci(tokens, p) {
            p += 7;
            n += if v <= 49 { 2 } else { 4 };
            continue;
        }
        if cr_lf(tokens, p) {
            p += 2;
            n += 1;
            continue;
        }
        if datum_b(at(tokens, p, 0), past_first_datum) {
            p += 1;
            n += 1;
            continue;
        }
        if n <= x {
            break;
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::tokens::expand;

    #[test]
    fn ahead_c_counts_digit_pairs() {
        let t = expand(b"123456", false).unwrap();
        assert_eq!(ahead_c(&t, 0), 3);
    }

    #[test]
    fn ahead_c_recognizes_seventeen_ten_shorthand() {
        let t = expand(b"1710104030", false).unwrap();
        assert_eq!(ahead_c(&t, 0), 4);
    }

    #[test]
    fn try_c_requires_favorable_start() {
        let t = expand(b"a12345", false).unwrap();
        // starting at the digit run directly is favorable
        assert!(try_c(&t, 1) >= 2);
        // starting one token early (on a letter) never counts as C
        assert_eq!(try_c(&t, 0), 0);
    }

    #[test]
    fn ahead_a_counts_printable_low_ascii() {
        let t = expand(b"Hello", false).unwrap();
        assert_eq!(ahead_a(&t, 0), 5);
    }

    #[test]
    fn ahead_b_counts_crlf_as_one_unit() {
        let t = expand(b"a\r\nb", false).unwrap();
        assert_eq!(ahead_b(&t, 0, false), 3);
    }

    #[test]
    fn ahead_a_stops_at_a_favorable_digit_run_without_hanging() {
        // "123456" is a 6-digit run: pairing from here yields 3 full pairs,
        // pairing from one token later yields only 2, so TryC is favorable
        // and AheadA must stop counting right at the digit run (returning 2,
        // for just "AB") instead of looping forever on a stalled position.
        let t = expand(b"AB123456", false).unwrap();
        assert_eq!(ahead_a(&t, 0), 2);
    }

    #[test]
    fn ahead_b_stops_at_a_favorable_digit_run_without_hanging() {
        let t = expand(b"ab123456", false).unwrap();
        assert_eq!(ahead_b(&t, 0, false), 2);
    }

    #[test]
    fn eci_parses_six_digit_designator() {
        let mut msg = vec![b'#', b'2'];
        msg.extend_from_slice(b"001234");
        let t = expand(&msg, false).unwrap();
        assert_eq!(eci(&t, 0), Some(1234));
    }
}
