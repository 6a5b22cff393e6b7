use crate::communication::Count;

/// How a flat buffer of elements is split across the ranks of a world.
///
/// Every rank derives the same partition from the same shape, so the
/// coordinator and the receiving ranks agree on counts and offsets
/// without communicating them.
///
/// ```
/// use matmax::partition::Partition;
///
/// let partition = Partition::new(7, 3);
/// assert_eq!(partition.counts(), &[3, 2, 2]);
/// assert_eq!(partition.displacements(), &[0, 3, 5]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    counts: Vec<Count>,
    displacements: Vec<Count>,
}

impl Partition {
    /// Splits `num_elements` as evenly as possible: every rank gets
    /// `num_elements / num_ranks` elements and the first
    /// `num_elements % num_ranks` ranks get one more.
    ///
    /// `num_ranks` must be positive.
    pub fn new(num_elements: usize, num_ranks: usize) -> Self {
        let base = num_elements / num_ranks;
        let remainder = num_elements % num_ranks;
        let counts: Vec<Count> = (0..num_ranks)
            .map(|rank| (base + usize::from(rank < remainder)) as Count)
            .collect();
        let displacements = displacements(&counts);
        Self {
            counts,
            displacements,
        }
    }

    pub fn counts(&self) -> &[Count] {
        &self.counts
    }

    /// Offset of each rank's slice in the undivided buffer.
    pub fn displacements(&self) -> &[Count] {
        &self.displacements
    }
}

/// Exclusive prefix sum of `counts`.
pub fn displacements(counts: &[Count]) -> Vec<Count> {
    counts
        .iter()
        .scan(0, |acc, &x| {
            let tmp = *acc;
            *acc += x;
            Some(tmp)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::displacements;
    use super::Partition;

    fn check_invariants(num_elements: usize, num_ranks: usize) {
        let partition = Partition::new(num_elements, num_ranks);
        let counts = partition.counts();
        assert_eq!(counts.len(), num_ranks);
        assert_eq!(counts.iter().sum::<i32>() as usize, num_elements);
        assert!(counts.iter().max().unwrap() - counts.iter().min().unwrap() <= 1);
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
        let displacements = partition.displacements();
        assert_eq!(displacements[0], 0);
        for rank in 1..num_ranks {
            assert_eq!(
                displacements[rank],
                displacements[rank - 1] + counts[rank - 1]
            );
        }
    }

    #[test]
    fn counts_are_balanced_and_cover_every_element() {
        for num_ranks in 1..12 {
            for num_elements in 0..50 {
                check_invariants(num_elements, num_ranks);
            }
        }
    }

    #[test]
    fn more_ranks_than_elements() {
        let partition = Partition::new(1, 4);
        assert_eq!(partition.counts(), &[1, 0, 0, 0]);
        assert_eq!(partition.displacements(), &[0, 1, 1, 1]);
    }

    #[test]
    fn no_elements_at_all() {
        let partition = Partition::new(0, 3);
        assert_eq!(partition.counts(), &[0, 0, 0]);
        assert_eq!(partition.displacements(), &[0, 0, 0]);
    }

    #[test]
    fn prefix_sum() {
        assert_eq!(displacements(&[3, 2, 2]), &[0, 3, 5]);
        assert_eq!(displacements(&[]), Vec::<i32>::new());
    }
}
