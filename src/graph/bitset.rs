use super::*;
use bitvec::prelude::*;
use std::fmt::{self, Debug, Formatter};

/// Fixed-capacity set of nodes with cached cardinality. Backs the adjacency
/// rows of [`ZykovGraph`] and the candidate sets of the clique search.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct BitSet {
    cardinality: NumNodes,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter_set_bits()).finish()
    }
}

impl BitSet {
    pub fn new(size: NumNodes) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size as usize],
        }
    }

    pub fn new_all_set(size: NumNodes) -> Self {
        Self {
            cardinality: size,
            bit_vec: bitvec![1; size as usize],
        }
    }

    pub fn new_with_bits_set(size: NumNodes, bits: impl IntoIterator<Item = Node>) -> Self {
        let mut result = Self::new(size);
        for u in bits {
            result.set_bit(u);
        }
        result
    }

    /// Number of bits (set or unset) the set can hold
    pub fn len(&self) -> NumNodes {
        self.bit_vec.len() as NumNodes
    }

    /// Number of set bits
    pub fn cardinality(&self) -> NumNodes {
        self.cardinality
    }

    pub fn is_empty(&self) -> bool {
        self.cardinality == 0
    }

    pub fn get_bit(&self, u: Node) -> bool {
        self.bit_vec[u as usize]
    }

    /// Sets bit `u` and returns *true* exactly if it was unset before
    pub fn set_bit(&mut self, u: Node) -> bool {
        let changed = !self.bit_vec.replace(u as usize, true);
        self.cardinality += changed as NumNodes;
        changed
    }

    /// Clears bit `u` and returns *true* exactly if it was set before
    pub fn clear_bit(&mut self, u: Node) -> bool {
        let changed = self.bit_vec.replace(u as usize, false);
        self.cardinality -= changed as NumNodes;
        changed
    }

    pub fn iter_set_bits(&self) -> impl Iterator<Item = Node> + '_ {
        self.bit_vec.iter_ones().map(|i| i as Node)
    }

    /// Smallest index whose bit is unset, or `None` if all bits are set
    pub fn first_unset_bit(&self) -> Option<Node> {
        self.bit_vec.iter_zeros().next().map(|i| i as Node)
    }

    /// Cardinality of the intersection without materializing it
    pub fn and_cardinality(&self, other: &Self) -> NumNodes {
        debug_assert_eq!(self.len(), other.len());
        self.bit_vec
            .as_raw_slice()
            .iter()
            .zip(other.bit_vec.as_raw_slice())
            .map(|(a, b)| (a & b).count_ones())
            .sum::<u32>() as NumNodes
    }

    pub fn intersection(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a & b)
    }

    /// All bits of `self` that are unset in `other`
    pub fn difference(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a & !b)
    }

    fn combine(&self, other: &Self, op: impl Fn(usize, usize) -> usize) -> Self {
        debug_assert_eq!(self.len(), other.len());
        let mut bit_vec = self.bit_vec.clone();

        for (word, &other_word) in bit_vec
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bit_vec.as_raw_slice())
        {
            *word = op(*word, other_word);
        }

        let cardinality = bit_vec.count_ones() as NumNodes;
        Self {
            cardinality,
            bit_vec,
        }
    }
}
