//src/chunks.rs

/// Split `items` into at most `chunk_count` consecutive, disjoint chunks.
///
/// Balances by item count only:
/// - `len <= chunk_count`: one singleton chunk per item.
/// - `len / chunk_count > 1`: consecutive groups of exactly `len / chunk_count`
///   items (the last group may be shorter, so the chunk count can exceed
///   `chunk_count` by one).
/// - otherwise: the first `len % chunk_count + 1` items together, then one
///   singleton chunk per remaining item.
///
/// Concatenating the result in order always reproduces `items`.
/// A `chunk_count` of zero is treated as one.
pub fn partition<T>(items: Vec<T>, chunk_count: usize) -> Vec<Vec<T>> {
    let chunk_count = chunk_count.max(1);
    let len = items.len();

    if len <= chunk_count {
        return items.into_iter().map(|item| vec![item]).collect();
    }

    let n = len / chunk_count;
    let m = len % chunk_count;

    let mut chunks = Vec::with_capacity(chunk_count + 1);
    let mut iter = items.into_iter().peekable();
    if n > 1 {
        while iter.peek().is_some() {
            chunks.push(iter.by_ref().take(n).collect());
        }
    } else {
        chunks.push(iter.by_ref().take(m + 1).collect());
        chunks.extend(iter.map(|item| vec![item]));
    }
    chunks
}
