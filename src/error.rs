//! Error types for DotCode encoding.

use snafu::Snafu;

/// Everything that can go wrong while turning a message into a symbol.
#[derive(Debug, Snafu)]
pub enum EncodeError {
    /// `#` followed by anything other than `#` or `0`..`3` (non-literal mode only)
    #[snafu(display("message_string contains a malformed '#' escape at byte {position}"))]
    MalformedEscape {
        /// byte offset of the `#` that started the bad escape
        position: usize,
    },

    /// message exceeds the 4000-byte input limit
    #[snafu(display("message is {len} bytes, exceeds the 4000-byte limit"))]
    InputTooLarge {
        /// the offending length
        len: usize,
    },

    /// requested exact geometry (negative height/width) cannot be satisfied
    #[snafu(display("requested geometry {height}x{width} is impossible for this message"))]
    GeometryImpossible {
        /// requested height
        height: i32,
        /// requested width
        width: i32,
    },

    /// sizing converged on a geometry too small to hold the codewords
    #[snafu(display(
        "sizing produced a {rows}x{cols} symbol, too small for {codewords} codewords"
    ))]
    InputTooLargeForGeometry {
        /// rows chosen by sizing
        rows: usize,
        /// cols chosen by sizing
        cols: usize,
        /// number of codewords (nw+1) that must fit
        codewords: usize,
    },

    /// the codeword buffer's conservative `16*L + 4` bound was exceeded; this is a bug
    #[snafu(display("codeword buffer overflowed its allocated bound ({bound} codewords)"))]
    InternalOverflow {
        /// the bound that was exceeded
        bound: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EncodeError>;
