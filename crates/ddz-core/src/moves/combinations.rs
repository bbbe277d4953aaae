/// Every `k`-element subset of `items`, in lexicographic index order.
pub fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let mut output = Vec::new();
    if k > items.len() {
        return output;
    }
    let mut current = Vec::with_capacity(k);
    generate(items, k, 0, &mut current, &mut output);
    output
}

fn generate<T: Copy>(
    items: &[T],
    k: usize,
    start: usize,
    current: &mut Vec<T>,
    output: &mut Vec<Vec<T>>,
) {
    if current.len() == k {
        output.push(current.clone());
        return;
    }

    let remaining = k - current.len();
    for idx in start..=items.len() - remaining {
        current.push(items[idx]);
        generate(items, k, idx + 1, current, output);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_pairs_in_order() {
        let combos = combinations(&[3, 6, 16], 2);
        assert_eq!(combos, vec![vec![3, 6], vec![3, 16], vec![6, 16]]);
    }

    #[test]
    fn empty_selection_yields_single_empty_set() {
        assert_eq!(combinations(&[1, 2], 0), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn oversized_selection_yields_nothing() {
        assert!(combinations(&[1, 2], 3).is_empty());
    }
}
