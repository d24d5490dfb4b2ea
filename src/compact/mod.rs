//! Message compaction (§4.2): turns a token stream into DotCode codewords by
//! walking a Code-128-style state machine with four subsets (A, B, C,
//! Binary). Grounded end-to-end in `FindDataWords` and its helpers in
//! `original_source/DotEncod.c`.

mod binary;
mod lookahead;
mod state;
mod tokens;

pub use state::CompactMode;

use crate::error::Result;
use binary::{bin_add, bin_finish};
use lookahead::{ahead_a, ahead_b, datum_a, datum_b, digit_pair, eci, n_digits, seventeen_ten, try_c};
use state::{CompactorState, InsideMacro};
use tokens::{at, expand, is_binary, is_fncx, CR, END, EOT, FNC1, FNC2, FNC3, GS, LF, RS};

/// Compact `message` into DotCode data codewords.
///
/// Returns the codewords plus the mode the compactor ended in (needed by the
/// caller to decide how padding should begin — see [`add_pads`]).
pub fn find_data_words(message: &[u8], literal: bool) -> Result<(Vec<i32>, CompactMode)> {
    let tokens = expand(message, literal)?;
    let mut state = CompactorState::new();
    let mut pos = 0usize;

    while at(&tokens, pos, 0) < END {
        loop {
            handle_macro_trailer(&tokens, &mut pos, &mut state);
            if at(&tokens, pos, 0) >= END {
                break;
            }
            let repeat = match state.mode {
                CompactMode::SetA => compact_set_a(&tokens, &mut pos, &mut state),
                CompactMode::SetB => compact_set_b(&tokens, &mut pos, &mut state),
                CompactMode::SetC => compact_set_c(&tokens, &mut pos, &mut state),
                CompactMode::Binary => compact_binary(&tokens, &mut pos, &mut state),
            };
            if !repeat {
                break;
            }
        }
        state.tick_shift();
    }
    if state.mode == CompactMode::Binary {
        bin_finish(&mut state);
    }
    let final_mode = state.mode;
    Ok((state.out, final_mode))
}

/// Suppress the `RS EOT [FNC3]` / `EOT [FNC3]` trailer of a GS1 Macro once
/// its header has been swallowed. Grounded in the `InsideMacro` checks at
/// the top of the reference's main loop.
fn handle_macro_trailer(tokens: &[i32], pos: &mut usize, state: &mut CompactorState) {
    match state.inside_macro {
        InsideMacro::Form1
            if at(tokens, *pos, 0) == RS
                && at(tokens, *pos, 1) == EOT
                && (at(tokens, *pos, 2) == FNC3 || at(tokens, *pos, 2) == END) =>
        {
            *pos += 2;
            state.inside_macro = InsideMacro::None;
        }
        InsideMacro::Form2
            if at(tokens, *pos, 0) == EOT && (at(tokens, *pos, 1) == FNC3 || at(tokens, *pos, 1) == END) =>
        {
            *pos += 1;
            state.inside_macro = InsideMacro::None;
        }
        _ => {}
    }
}

fn bin_shift(state: &mut CompactorState, c: i32) {
    if c < 160 {
        state.store(110);
        state.store_datum(c - 64);
    } else {
        state.store(111);
        state.store_datum(c - 160);
    }
}

/// Emits codeword 108 plus an ECI designator when one follows; returns the
/// number of tokens consumed. Grounded in `StoreFNC2`.
fn store_fnc2(tokens: &[i32], pos: usize, state: &mut CompactorState) -> usize {
    state.store(108);
    if let Some(v) = eci(tokens, pos) {
        if v < 40 {
            state.store(v as i32);
            state.consume_shift_for_eci(1);
        } else {
            let j = v - 40;
            state.store((j / 12769 + 40) as i32);
            state.store(((j / 113) % 113) as i32);
            state.store((j % 113) as i32);
            state.consume_shift_for_eci(3);
        }
        7
    } else {
        1
    }
}

fn compact_set_a(tokens: &[i32], pos: &mut usize, state: &mut CompactorState) -> bool {
    let c = at(tokens, *pos, 0);

    let i = try_c(tokens, *pos);
    if i >= 2 {
        if i <= 4 {
            state.store(101 + i as i32);
            state.shift_to(CompactMode::SetC, i as i32);
        } else {
            state.store(106);
            state.latch_to(CompactMode::SetC);
        }
        return true;
    }
    if (0..=95).contains(&c) {
        state.store_datum((c + 64) % 96);
        *pos += 1;
        return false;
    }
    if c == FNC1 {
        state.store(107);
        *pos += 1;
        return false;
    }
    if c == FNC2 {
        *pos += store_fnc2(tokens, *pos, state);
        return false;
    }
    if c == FNC3 {
        state.store(109);
        *pos += 1;
        if state.past_first_datum {
            state.mode = CompactMode::SetC;
        }
        return false;
    }
    if c > 127 {
        if datum_a(at(tokens, *pos, 1)) {
            bin_shift(state, c);
            *pos += 1;
        } else {
            state.store(112);
            state.latch_to(CompactMode::Binary);
        }
        return false;
    }
    let i = ahead_b(tokens, *pos, state.past_first_datum);
    if i <= 6 {
        state.store(95 + i as i32);
        state.shift_to(CompactMode::SetB, i as i32);
    } else {
        state.store(102);
        state.latch_to(CompactMode::SetB);
    }
    true
}

fn compact_set_b(tokens: &[i32], pos: &mut usize, state: &mut CompactorState) -> bool {
    let c = at(tokens, *pos, 0);

    let i = try_c(tokens, *pos);
    if i >= 2 {
        if i <= 4 {
            state.store(101 + i as i32);
            state.shift_to(CompactMode::SetC, i as i32);
        } else {
            state.store(106);
            state.latch_to(CompactMode::SetC);
        }
        return true;
    }
    if (32..=127).contains(&c) {
        state.store_datum(c - 32);
        *pos += 1;
        return false;
    }
    if c == CR && at(tokens, *pos, 1) == LF {
        state.store_datum(96);
        *pos += 2;
        return false;
    }
    if state.past_first_datum {
        if c == 9 {
            state.store_datum(97);
            *pos += 1;
            return false;
        }
        if (28..=30).contains(&c) {
            state.store_datum(98 + c - 28);
            *pos += 1;
            return false;
        }
    }
    if c == FNC1 {
        state.store(107);
        *pos += 1;
        return false;
    }
    if c == FNC2 {
        *pos += store_fnc2(tokens, *pos, state);
        return false;
    }
    if c == FNC3 {
        state.store(109);
        *pos += 1;
        if state.past_first_datum {
            state.mode = CompactMode::SetC;
        }
        return false;
    }
    if c > 127 {
        if datum_b(at(tokens, *pos, 1), state.past_first_datum) {
            bin_shift(state, c);
            *pos += 1;
        } else {
            state.store(112);
            state.latch_to(CompactMode::Binary);
        }
        return false;
    }
    if ahead_a(tokens, *pos) == 1 {
        state.store(101);
        state.shift_to(CompactMode::SetA, 1);
    } else {
        state.store(102);
        state.latch_to(CompactMode::SetA);
    }
    true
}

/// Detects and consumes a GS1 Macro header (`[)>RSddGS...RSEOT[FNC3]`) at the
/// very start of the message. Returns `true` if it handled the header (the
/// caller must stop processing this iteration without repeating), mirroring
/// the reference's `if (InsideMacro) break;`.
fn try_macro_header(tokens: &[i32], pos: &mut usize, state: &mut CompactorState) -> bool {
    if state.past_first_datum
        || at(tokens, *pos, 0) != b'[' as i32
        || at(tokens, *pos, 1) != b')' as i32
        || at(tokens, *pos, 2) != b'>' as i32
        || at(tokens, *pos, 3) != RS
        || !digit_pair(tokens, *pos + 4)
    {
        return false;
    }

    let mut m = *pos + 7;
    while at(tokens, m, 0) != FNC3 && at(tokens, m, 0) != END {
        m += 1;
    }
    if at(tokens, m - 1, 0) != EOT {
        return false;
    }

    state.store(106);
    state.latch_to(CompactMode::SetB);
    let id = (at(tokens, *pos, 4) - b'0' as i32) * 10 + (at(tokens, *pos, 5) - b'0' as i32);

    if at(tokens, *pos, 6) == GS && at(tokens, m - 2, 0) == RS {
        match id {
            5 => state.store_datum(97),
            6 => state.store_datum(98),
            12 => state.store_datum(99),
            _ => {}
        }
        if state.past_first_datum {
            state.inside_macro = InsideMacro::Form1;
            *pos += 7;
        }
    }
    if !state.past_first_datum {
        state.store_datum(100);
        state.store(id);
        state.inside_macro = InsideMacro::Form2;
        *pos += 6;
    }
    true
}

fn compact_set_c(tokens: &[i32], pos: &mut usize, state: &mut CompactorState) -> bool {
    if try_macro_header(tokens, pos, state) {
        return false;
    }

    let c = at(tokens, *pos, 0);

    if n_digits(tokens, *pos) >= 2 {
        if seventeen_ten(tokens, *pos) {
            state.store_datum(100);
            store_digit_pair(tokens, *pos + 2, state);
            store_digit_pair(tokens, *pos + 4, state);
            store_digit_pair(tokens, *pos + 6, state);
            *pos += 10;
        } else {
            store_digit_pair(tokens, *pos, state);
            *pos += 2;
        }
        return false;
    }
    if c == FNC1 {
        state.store(107);
        *pos += 1;
        return false;
    }
    if c == FNC2 {
        *pos += store_fnc2(tokens, *pos, state);
        return false;
    }
    if c == FNC3 {
        state.store(109);
        *pos += 1;
        return false;
    }
    if c > 127 {
        if digit_pair(tokens, *pos + 1) {
            bin_shift(state, c);
            *pos += 1;
        } else {
            state.store(112);
            state.latch_to(CompactMode::Binary);
        }
        return false;
    }
    let i = ahead_a(tokens, *pos);
    let j = ahead_b(tokens, *pos, state.past_first_datum);
    if i > j {
        state.store(101);
        state.latch_to(CompactMode::SetA);
    } else if j <= 4 {
        state.store(101 + j as i32);
        state.shift_to(CompactMode::SetB, j as i32);
    } else {
        state.store(106);
        state.latch_to(CompactMode::SetB);
    }
    true
}

fn store_digit_pair(tokens: &[i32], pos: usize, state: &mut CompactorState) {
    let v = (at(tokens, pos, 0) - b'0' as i32) * 10 + (at(tokens, pos, 1) - b'0' as i32);
    state.store_datum(v);
}

fn compact_binary(tokens: &[i32], pos: &mut usize, state: &mut CompactorState) -> bool {
    let c = at(tokens, *pos, 0);

    let i = try_c(tokens, *pos);
    if i >= 2 {
        bin_finish(state);
        if i <= 7 {
            state.store(101 + i as i32);
            state.shift_to(CompactMode::SetC, i as i32);
        } else {
            state.store(111);
            state.latch_to(CompactMode::SetC);
        }
        return true;
    }

    if let Some(v) = eci(tokens, *pos) {
        let follow = at(tokens, *pos, 7);
        if is_binary(follow) || follow == END {
            if v < 256 {
                bin_add(state, 256);
                bin_add(state, v as i32);
            } else if v < 65563 {
                bin_add(state, 257);
                bin_add(state, (v >> 8) as i32);
                bin_add(state, (v & 0xff) as i32);
            } else {
                bin_add(state, 258);
                bin_add(state, (v >> 16) as i32);
                bin_add(state, ((v >> 8) & 0xff) as i32);
                bin_add(state, (v & 0xff) as i32);
            }
            *pos += 7;
            return false;
        }
    }

    let looks_binary = !is_fncx(c)
        && (is_binary(c)
            || is_binary(at(tokens, *pos, 1))
            || is_binary(at(tokens, *pos, 2))
            || is_binary(at(tokens, *pos, 3))
            || (eci(tokens, *pos + 1).is_some() && is_binary(at(tokens, *pos, 8))));
    if looks_binary {
        bin_add(state, c);
        *pos += 1;
        return false;
    }

    bin_finish(state);
    if c != END {
        if c == FNC3 {
            state.store(112);
            state.latch_to(CompactMode::SetC);
            return false;
        }
        if ahead_a(tokens, *pos) > ahead_b(tokens, *pos, state.past_first_datum) {
            state.store(109);
            state.latch_to(CompactMode::SetA);
        } else {
            state.store(110);
            state.latch_to(CompactMode::SetB);
        }
    }
    false
}

/// Appends `n` pad codewords after the `nd` data codewords in `cw`. When the
/// compactor finished in Binary mode, the first pad is a Set-C latch (109)
/// rather than the usual filler value. Grounded in `AddPads`.
pub fn add_pads(cw: &mut Vec<i32>, final_mode: CompactMode, mut n: usize) {
    if final_mode == CompactMode::Binary {
        cw.push(109);
        n -= 1;
    }
    for _ in 0..n {
        cw.push(106);
    }
}
