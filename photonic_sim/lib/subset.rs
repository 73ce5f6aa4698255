//! Enumeration of the non-empty subsets of `{0, ..., n - 1}`.

use crate::error::{ Error, Result };

/// Iterator over all 2<sup>*n*</sup> − 1 non-empty subsets of
/// `{0, ..., n - 1}`.
///
/// Subsets are produced in increasing order of their bitmask, `1` through
/// `2^n - 1`, where bit `k` of the mask marks membership of index `k`. Each
/// subset lists its indices in ascending order.
#[derive(Clone, Debug)]
pub struct Subsets {
    n: usize,
    iter: std::ops::Range<u64>,
}

impl Subsets {
    /// Create a new iterator over the non-empty subsets of an `n`-element
    /// index set.
    ///
    /// Fails if `n` is zero or too large for the mask to fit in 64 bits.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::invalid("subset enumeration requires n >= 1"));
        }
        if n >= u64::BITS as usize {
            return Err(Error::invalid(
                format!("cannot enumerate subsets of {} elements", n)
            ));
        }
        Ok(Self { n, iter: 1 .. 1_u64 << n })
    }

    /// Return the size of the underlying index set.
    pub fn n(&self) -> usize { self.n }

    /// Collect all subsets eagerly.
    pub fn all(n: usize) -> Result<Vec<Vec<usize>>> {
        Ok(Self::new(n)?.collect())
    }
}

/// Unpack the indices set in `mask`, in ascending order.
pub(crate) fn mask_indices(mask: u64, n: usize)
    -> impl Iterator<Item = usize> + Clone
{
    (0..n).filter(move |k| mask & (1_u64 << *k) != 0)
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|mask| mask_indices(mask, self.n).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.iter.size_hint() }
}

impl ExactSizeIterator for Subsets { }

#[cfg(test)]
mod test {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn counts_and_uniqueness() {
        for n in 1..=10 {
            let subsets = Subsets::all(n).unwrap();
            assert_eq!(subsets.len(), (1 << n) - 1);
            let distinct: FxHashSet<Vec<usize>>
                = subsets.iter().cloned().collect();
            assert_eq!(distinct.len(), subsets.len());
            for s in subsets.iter() {
                assert!(!s.is_empty());
                assert!(s.windows(2).all(|w| w[0] < w[1]));
                assert!(s.iter().all(|k| *k < n));
            }
        }
    }

    #[test]
    fn bitmask_order() {
        let subsets = Subsets::all(3).unwrap();
        assert_eq!(
            subsets,
            vec![
                vec![0],
                vec![1],
                vec![0, 1],
                vec![2],
                vec![0, 2],
                vec![1, 2],
                vec![0, 1, 2],
            ],
        );
    }

    #[test]
    fn rejects_empty_index_set() {
        assert!(matches!(Subsets::new(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(Subsets::new(64), Err(Error::InvalidArgument(_))));
    }
}
