//! Permutations of the 2 x (N/2) slot matrix.

/// Canonical column offset in [0, n_cols).
pub fn canonical_offset(k: i64, n_cols: usize) -> usize {
    k.rem_euclid(n_cols as i64) as usize
}

/// Rotates both rows left by `k` columns: `out[r][j] = a[r][(j + k) mod n_cols]`.
pub fn rotate_columns(a: &[u64], k: usize, out: &mut [u64]) {
    let n_cols: usize = a.len() >> 1;
    let k: usize = k % n_cols;
    (0..2).for_each(|row| {
        let src: &[u64] = &a[row * n_cols..(row + 1) * n_cols];
        let dst: &mut [u64] = &mut out[row * n_cols..(row + 1) * n_cols];
        dst[..n_cols - k].copy_from_slice(&src[k..]);
        dst[n_cols - k..].copy_from_slice(&src[..k]);
    });
}

/// Swaps the two rows.
pub fn swap_rows(a: &[u64], out: &mut [u64]) {
    let n_cols: usize = a.len() >> 1;
    out[..n_cols].copy_from_slice(&a[n_cols..]);
    out[n_cols..].copy_from_slice(&a[..n_cols]);
}

pub fn swap_rows_inplace(a: &mut [u64]) {
    let n_cols: usize = a.len() >> 1;
    a.rotate_left(n_cols);
}
