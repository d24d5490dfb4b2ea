//! Encodes a single message and prints a textual summary of the resulting
//! bitmap. Not a CLI: argument parsing, BMP output, and ASCII plotting are
//! external collaborators, out of scope for this crate.

use dotcode::{encode, EncodeOptions};

fn main() {
    dotcode::tracing_init::init_tracing();

    let message = b"HELLO DOTCODE";
    let options = EncodeOptions {
        show: true,
        ..EncodeOptions::default()
    };

    match encode(message, options) {
        Ok(result) => {
            println!(
                "encoded {} bytes into a {}x{} symbol ({} dots printed)",
                message.len(),
                result.rows,
                result.cols,
                result.bitmap.count_ones()
            );
        }
        Err(err) => {
            eprintln!("encoding failure — check input parameters: {err}");
        }
    }
}
