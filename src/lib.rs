//! DotCode symbology encoder core.
//!
//! Turns an arbitrary byte message into the dot-matrix bitmap described by
//! the AIM DotCode specification: message compaction into codewords
//! (Code-128-style Sets A/B/C plus Binary), Reed-Solomon protection over
//! GF(113), symbol sizing, dot placement, and mask selection. Presentation
//! concerns (CLI parsing, BMP/ASCII rendering, quiet zones, dot shape) are
//! left to callers; this crate only produces a packed-bit [`Bitmap`].
//!
//! Grounded end-to-end in `DotCodeEncode()` from `original_source/DotEncod.c`.

pub mod bitmap;
pub mod compact;
pub mod error;
pub mod gf;
pub mod patterns;
pub mod placement;
pub mod scoring;
pub mod sizing;
pub mod tracing_init;

pub use bitmap::Bitmap;
pub use compact::CompactMode;
pub use error::{EncodeError, Result};
pub use sizing::Geometry;

use compact::{add_pads, find_data_words};
use sizing::size_symbol;

/// Hard limit on input message length (§3).
pub const MAX_MESSAGE_LEN: usize = 4000;

/// The four structural mask multipliers a symbol may be built with (§4.6).
const MASK_VALUES: [i32; 4] = [0, 3, 7, 17];

/// Mask indices tried in reference order: highest index first.
const MASK_ORDER: [usize; 4] = [3, 2, 1, 0];

/// The loose parameters of the reference `DotCodeEncode()` call, packaged
/// into one struct (§6, §9).
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Caller height hint; see §4.4 sizing rules. `0` means "unconstrained".
    pub height: i32,
    /// Caller width hint; see §4.4 sizing rules. `0` means "unconstrained".
    pub width: i32,
    /// If true, `#`-escape processing is disabled and every byte is literal.
    pub literal: bool,
    /// `None` runs the mask search (§4.6); `Some(0..=7)` forces a variant.
    pub mask_override: Option<u8>,
    /// If false, only sizing is performed; the bitmap is left unpopulated.
    pub fill: bool,
    /// Enables the threshold short-circuit in mask search.
    pub fast: bool,
    /// Emits sizing/compaction/mask-search milestones via `tracing`.
    pub show: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            height: 0,
            width: 0,
            literal: false,
            mask_override: None,
            fill: true,
            fast: false,
            show: false,
        }
    }
}

/// The filled (or, when `fill` is false, merely sized) symbol.
#[derive(Debug, Clone)]
pub struct EncodeResult {
    pub bitmap: Bitmap,
    pub rows: usize,
    pub cols: usize,
}

/// Encode `message` into a DotCode symbol.
///
/// See [`EncodeOptions`] for the knobs and §4-§7 of the design notes for the
/// exact sizing/compaction/mask-search semantics this mirrors.
pub fn encode(message: &[u8], options: EncodeOptions) -> Result<EncodeResult> {
    if message.len() > MAX_MESSAGE_LEN {
        return Err(EncodeError::InputTooLarge { len: message.len() });
    }

    let (mut cw, final_mode) = find_data_words(message, options.literal)?;
    let nd = cw.len();

    // Mirrors the reference's `CW = malloc(LEN<<4 + 4)` sizing assumption.
    if nd > 16 * message.len() + 4 {
        return Err(EncodeError::InternalOverflow {
            bound: 16 * message.len() + 4,
        });
    }

    let nc_estimate = nd / 2 + 3;
    if options.show {
        tracing::debug!(nd, nc_estimate, "message compacted");
    } else {
        tracing::trace!(nd, nc_estimate, "message compacted");
    }

    let geometry = size_symbol(nd, nc_estimate, options.height, options.width)?;
    if options.show {
        tracing::debug!(rows = geometry.rows, cols = geometry.cols, "symbol sized");
    } else {
        tracing::trace!(rows = geometry.rows, cols = geometry.cols, "symbol sized");
    }

    if !options.fill {
        return Ok(EncodeResult {
            bitmap: Bitmap::new(geometry.rows, geometry.cols),
            rows: geometry.rows,
            cols: geometry.cols,
        });
    }

    let dots = (geometry.rows * geometry.cols) / 2;
    let mut nw = (dots.saturating_sub(2)) / 9;
    if nw % 3 == 2 {
        nw -= 1;
    }
    let nc = nw / 3 + 2;
    let nd_final = nw - nc;

    if nd_final < nd {
        return Err(EncodeError::InternalOverflow { bound: nd_final });
    }
    if nd_final > nd {
        add_pads(&mut cw, final_mode, nd_final - nd);
    }
    tracing::trace!(nd_final, nc, "padded to symbol capacity");

    // Builds the RS-protected codeword array (mask index + data + checks)
    // for `mask_index`, without placing it on the lattice yet.
    let build_wd = |mask_index: usize| -> Vec<i32> {
        let mv = MASK_VALUES[mask_index];
        let mut wd = vec![0i32; nd_final + 1 + nc];
        wd[0] = mask_index as i32;
        for (i, &c) in cw.iter().enumerate() {
            wd[i + 1] = (c + i as i32 * mv).rem_euclid(gf::GF);
        }
        gf::rs_encode(&mut wd, nd_final + 1, nc);
        wd
    };
    let place = |wd: &[i32], corner_lit: bool| -> Bitmap {
        let mut bm = placement::fill_dot_array(geometry.rows, geometry.cols, wd);
        if corner_lit {
            placement::light_all_corners(&mut bm);
        }
        bm
    };

    let top_mask = if let Some(forced) = options.mask_override.filter(|&m| m <= 7) {
        forced
    } else {
        let threshold = dots as i64;
        let mut top_score = i64::MIN;
        let mut top_mask: u8 = MASK_ORDER[0] as u8;

        'search: for &m in &MASK_ORDER {
            let wd = build_wd(m);
            let score = scoring::score(&place(&wd, false));
            if score > top_score {
                top_score = score;
                top_mask = m as u8;
                if options.fast && top_score > threshold {
                    break 'search;
                }
            }
            if options.fast {
                let score_c = scoring::score(&place(&wd, true));
                if score_c > top_score {
                    top_score = score_c;
                    top_mask = m as u8 + 4;
                    if top_score > threshold {
                        break 'search;
                    }
                }
            }
        }

        if !options.fast && top_score <= threshold {
            for &m in &MASK_ORDER {
                let wd = build_wd(m);
                let score_c = scoring::score(&place(&wd, true));
                if score_c > top_score {
                    top_score = score_c;
                    top_mask = m as u8 + 4;
                }
            }
        }

        if options.show {
            tracing::debug!(mask = top_mask, score = top_score, "mask selected");
        }
        top_mask
    };

    let base = (top_mask % 4) as usize;
    let wd = build_wd(base);
    let bitmap = place(&wd, top_mask >= 4);

    Ok(EncodeResult {
        bitmap,
        rows: geometry.rows,
        cols: geometry.cols,
    })
}
