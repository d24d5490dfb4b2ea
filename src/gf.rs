//! Reed-Solomon error-correction encoding over GF(113).
//!
//! Grounded in `rsencode()` from the reference `DotEncod.c`: a GF(113) code
//! with prime modulus (primitive element) 3, interleaved across sub-streams
//! when the total codeword count exceeds `GF - 1`.

/// Size of the Galois field.
pub const GF: i32 = 113;
/// Prime modulus / primitive element of the field.
pub const PM: i32 = 3;

/// Append `nc` Reed-Solomon check codewords to the `nd` data codewords already
/// occupying the front of `wd`. `wd` must have room for at least `nd + nc`
/// entries; entries `nd..nd+nc` are overwritten.
///
/// Values entering and leaving `wd` are always in `0..GF`.
pub fn rs_encode(wd: &mut [i32], nd: usize, nc: usize) {
    let nw = nd + nc;
    let step = (nw + GF as usize - 2) / (GF as usize - 1);

    // Roots only need to be computed once, sized for the largest sub-stream.
    let mut root = vec![0i32; GF as usize];
    root[0] = 1;

    for start in 0..step {
        let nd_s = div_ceil(nd as i64 - start as i64, step as i64).max(0) as usize;
        let nw_s = div_ceil(nw as i64 - start as i64, step as i64).max(0) as usize;
        let nc_s = nw_s - nd_s;

        if start == 0 {
            for i in 1..=(nc_s + 1) {
                root[i] = (PM * root[i - 1]) % GF;
            }
        }

        // Generator polynomial of order nc_s.
        let mut c = vec![0i32; nc_s + 1];
        c[0] = 1;
        for i in 1..=nc_s {
            for j in (1..=nc_s).rev() {
                c[j] = (GF + c[j] - (root[i] * c[j - 1]) % GF) % GF;
            }
        }

        for i in nd_s..nw_s {
            wd[start + i * step] = 0;
        }
        for i in 0..nd_s {
            let k = (wd[start + i * step] + wd[start + nd_s * step]) % GF;
            for j in 0..nc_s.saturating_sub(1) {
                wd[start + (nd_s + j) * step] = (GF - (c[j + 1] * k) % GF
                    + wd[start + (nd_s + j + 1) * step])
                    % GF;
            }
            if nc_s > 0 {
                wd[start + (nd_s + nc_s - 1) * step] = (GF - (c[nc_s] * k) % GF) % GF;
            }
        }
        for i in nd_s..nw_s {
            wd[start + i * step] = (GF - wd[start + i * step]) % GF;
        }
    }
}

fn div_ceil(a: i64, b: i64) -> i64 {
    if a <= 0 {
        0
    } else {
        (a + b - 1) / b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_are_in_field_range() {
        let mut wd = vec![0i32; 20];
        for (i, w) in wd.iter_mut().take(10).enumerate() {
            *w = (i as i32 * 7) % GF;
        }
        rs_encode(&mut wd, 10, 5);
        for &v in &wd[..15] {
            assert!((0..GF).contains(&v));
        }
    }

    #[test]
    fn all_zero_data_gives_all_zero_checks() {
        let mut wd = vec![0i32; 10];
        rs_encode(&mut wd, 5, 5);
        assert!(wd.iter().all(|&v| v == 0));
    }

    #[test]
    fn deterministic() {
        let mut wd1 = vec![0i32; 200];
        let mut wd2 = vec![0i32; 200];
        for i in 0..130 {
            wd1[i] = (i as i32 * 13 + 3) % GF;
            wd2[i] = wd1[i];
        }
        rs_encode(&mut wd1, 130, 60);
        rs_encode(&mut wd2, 130, 60);
        assert_eq!(wd1, wd2);
    }

    #[test]
    fn interleaving_path_runs_for_large_symbols() {
        // nd + nc > GF - 1 forces step > 1.
        let mut wd = vec![0i32; 140];
        for (i, w) in wd.iter_mut().take(100).enumerate() {
            *w = (i as i32 * 5 + 1) % GF;
        }
        rs_encode(&mut wd, 100, 40);
        for &v in &wd[..140] {
            assert!((0..GF).contains(&v));
        }
    }
}
