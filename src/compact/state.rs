//! Compactor state: the mutable context threaded through message compaction,
//! replacing the reference encoder's process-global `mode`/`PastFirstDatum`/
//! `InsideMacro`/`Base103`/`bincnt` with an explicit struct (§3.1).

/// Which Code-128-style subset is currently consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactMode {
    SetA,
    SetB,
    SetC,
    Binary,
}

/// Which GS1 Macro header form (if any) is currently being suppressed from
/// the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsideMacro {
    None,
    /// `[)>RSddGS...RSEOT` form: header consumed, trailer still to come.
    Form1,
    /// `[)>RSdd...EOT` form (pre-first-datum variant): only the trailing EOT remains.
    Form2,
}

/// Mutable state threaded through [`super::find_data_words`].
///
/// `nshift`/`backto` mirror the reference's plain `int nshift`/`backto`
/// pair rather than a cleaner `Option<ShiftState>`: `nshift` is signed and
/// can be driven negative by an ECI escape consumed mid-shift (`StoreFNC2`),
/// at which point it never again lands on exactly zero and the shift never
/// reverts. That is a property of the reference encoder, not a bug we get to
/// fix — see DESIGN.md.
pub struct CompactorState {
    pub mode: CompactMode,
    pub nshift: i32,
    pub backto: CompactMode,
    pub past_first_datum: bool,
    pub inside_macro: InsideMacro,
    /// Base-259-to-base-103 accumulator for Binary mode (6 base-103 digits).
    pub base103: [i32; 6],
    pub bincnt: usize,
    pub out: Vec<i32>,
}

impl CompactorState {
    pub fn new() -> Self {
        CompactorState {
            mode: CompactMode::SetC,
            nshift: 0,
            backto: CompactMode::SetC,
            past_first_datum: false,
            inside_macro: InsideMacro::None,
            base103: [0; 6],
            bincnt: 0,
            out: Vec::new(),
        }
    }

    pub fn store(&mut self, codeword: i32) {
        self.out.push(codeword);
    }

    pub fn store_datum(&mut self, codeword: i32) {
        self.out.push(codeword);
        self.past_first_datum = true;
    }

    /// Temporarily switch to `target` for `n` datums, recording the mode to
    /// snap back to once the shift count reaches zero.
    pub fn shift_to(&mut self, target: CompactMode, n: i32) {
        self.backto = self.mode;
        self.mode = target;
        self.nshift = n;
    }

    pub fn latch_to(&mut self, target: CompactMode) {
        self.mode = target;
    }

    /// `StoreFNC2`'s extra decrement: only applied while a shift is active.
    pub fn consume_shift_for_eci(&mut self, amount: i32) {
        if self.nshift != 0 {
            self.nshift -= amount;
        }
    }

    /// Called once per real datum processed (not per internal repeat); ticks
    /// down an in-progress shift and restores the prior mode exactly when the
    /// count lands on zero.
    pub fn tick_shift(&mut self) {
        if self.nshift != 0 {
            self.nshift -= 1;
            if self.nshift == 0 {
                self.mode = self.backto;
            }
        }
    }
}

impl Default for CompactorState {
    fn default() -> Self {
        Self::new()
    }
}
