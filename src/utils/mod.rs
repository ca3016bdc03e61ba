// -------------------------------------------------------------------------------
// Common, Resuable Functions
// -------------------------------------------------------------------------------

/// Splits `len` items into at most `n` contiguous (offset, len) chunks, in order.
/// The last chunk absorbs the remainder. Never produces more chunks than items.
pub fn split_offsets(len: usize, n: usize) -> Vec<(usize, usize)> {
    let n = n.min(len).max(1);
    if n == 1 {
        vec![(0, len)]
    } else {
        let chunk_size = len / n;
        (0..n)
            .map(|partition| {
                let offset = partition * chunk_size;
                let len = if partition == (n - 1) {
                    len - offset
                } else {
                    chunk_size
                };
                (offset, len)
            })
            .collect()
    }
}
