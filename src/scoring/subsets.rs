/// Iterator over subsets of `n` indexed items, yielded as bitmasks in ascending order
/// and filtered to those holding between `min` and `max` members.
///
/// Bit `i` set means item `i` is in the subset. Supports up to 31 items.
pub struct SubsetMasks {
    next: u32,
    end: u32,
    min: u32,
    max: u32,
}

impl SubsetMasks {
    /// Every subset of `n` items with at least `min` members.
    pub fn at_least(n: usize, min: usize) -> Self {
        Self::sized(n, min, n)
    }

    /// Every subset of `n` items with exactly `k` members.
    pub fn exactly(n: usize, k: usize) -> Self {
        Self::sized(n, k, k)
    }

    fn sized(n: usize, min: usize, max: usize) -> Self {
        let n = n.min(31) as u32;
        Self { next: 0, end: 1u32 << n, min: min as u32, max: max as u32 }
    }
}

impl Iterator for SubsetMasks {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.end {
            let mask = self.next;
            self.next += 1;
            let size = mask.count_ones();
            if size >= self.min && size <= self.max {
                return Some(mask);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((self.end - self.next) as usize))
    }
}

/// Items of `items` selected by `mask`.
pub fn members<T>(mask: u32, items: &[T]) -> impl Iterator<Item = &T> + '_ {
    items.iter().enumerate().filter(move |(i, _)| mask & (1u32 << *i) != 0).map(|(_, t)| t)
}
