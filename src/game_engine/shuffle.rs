use rand::Rng;

/// In-place Fisher-Yates shuffle driven by `rng`.
///
/// Every permutation is equally likely, unlike sorting with a random
/// comparator.
pub fn shuffle<T, R: Rng>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffled copy of `0..n`.
pub fn permutation<R: Rng>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..n).collect();
    shuffle(rng, &mut idx);
    idx
}

/// Uniform index into a collection of `len` items; `None` when empty.
pub fn pick_index<R: Rng>(rng: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}
