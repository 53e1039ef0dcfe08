/// All `n`-element subsets of `source`, keeping the source order inside each
/// subset. Subsets containing `source[0]` come first.
pub fn combinations<T: Clone>(source: &[T], n: usize) -> Vec<Vec<T>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    if n > source.len() {
        return Vec::new();
    }
    if n == source.len() {
        return vec![source.to_vec()];
    }
    if n == 1 {
        return source.iter().map(|item| vec![item.clone()]).collect();
    }

    let Some((head, tail)) = source.split_first() else {
        return Vec::new();
    };
    let mut out: Vec<Vec<T>> = combinations(tail, n - 1)
        .into_iter()
        .map(|rest| {
            let mut subset = Vec::with_capacity(n);
            subset.push(head.clone());
            subset.extend(rest);
            subset
        })
        .collect();
    out.extend(combinations(tail, n));
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/ruggedness/combinations.rs"]
mod tests;
