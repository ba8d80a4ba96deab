use crate::error::FloorplanError;
use rand::Rng;
use rand::seq::SliceRandom;

/// Two permutations of the block indices plus inverse maps kept in
/// lock-step, giving O(1) relative-order queries.
///
/// Invariant: `first` and `second` are always bijections over `0..n`, and
/// `pos_in_first[first[p]] == p` (likewise for `second`) after every
/// mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencePair {
    first: Vec<u32>,
    second: Vec<u32>,
    pos_in_first: Vec<u32>,
    pos_in_second: Vec<u32>,
}

impl SequencePair {
    pub fn identity(n: usize) -> Self {
        let seq: Vec<u32> = (0..n as u32).collect();
        Self {
            first: seq.clone(),
            second: seq.clone(),
            pos_in_first: seq.clone(),
            pos_in_second: seq,
        }
    }

    pub fn random(n: usize, rng: &mut impl Rng) -> Self {
        let mut sp = Self::identity(n);
        sp.first.shuffle(rng);
        sp.second.shuffle(rng);
        sp.rebuild_inverse_maps();
        sp
    }

    /// Builds a pair from explicit permutations. Test and replay helper.
    pub fn from_sequences(first: Vec<u32>, second: Vec<u32>) -> Result<Self, FloorplanError> {
        let n = first.len();
        let mut sp = Self {
            first,
            second,
            pos_in_first: vec![0; n],
            pos_in_second: vec![0; n],
        };
        if sp.second.len() != n {
            return Err(FloorplanError::CorruptSequencePair(
                "sequence lengths differ".to_string(),
            ));
        }
        sp.rebuild_inverse_maps();
        sp.validate()?;
        Ok(sp)
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn first(&self) -> &[u32] {
        &self.first
    }

    pub fn second(&self) -> &[u32] {
        &self.second
    }

    #[inline]
    pub fn pos_first(&self, id: u32) -> u32 {
        self.pos_in_first[id as usize]
    }

    #[inline]
    pub fn pos_second(&self, id: u32) -> u32 {
        self.pos_in_second[id as usize]
    }

    /// Swaps the positions of blocks `a` and `b` in the first sequence only.
    pub fn swap_first(&mut self, a: u32, b: u32) {
        let pa = self.pos_in_first[a as usize] as usize;
        let pb = self.pos_in_first[b as usize] as usize;
        self.first.swap(pa, pb);
        self.pos_in_first.swap(a as usize, b as usize);
    }

    /// Swaps `a` and `b` in both sequences: a full transposition of the two
    /// blocks' roles in the packing.
    pub fn swap_both(&mut self, a: u32, b: u32) {
        self.swap_first(a, b);
        self.swap_second(a, b);
    }

    fn swap_second(&mut self, a: u32, b: u32) {
        let pa = self.pos_in_second[a as usize] as usize;
        let pb = self.pos_in_second[b as usize] as usize;
        self.second.swap(pa, pb);
        self.pos_in_second.swap(a as usize, b as usize);
    }

    fn rebuild_inverse_maps(&mut self) {
        for (p, &id) in self.first.iter().enumerate() {
            self.pos_in_first[id as usize] = p as u32;
        }
        for (p, &id) in self.second.iter().enumerate() {
            self.pos_in_second[id as usize] = p as u32;
        }
    }

    /// Checks the bijection and inverse-map invariants. A failure here means
    /// the move generator corrupted the search state; callers must abort.
    pub fn validate(&self) -> Result<(), FloorplanError> {
        let n = self.first.len();
        if self.second.len() != n || self.pos_in_first.len() != n || self.pos_in_second.len() != n {
            return Err(FloorplanError::CorruptSequencePair(
                "container lengths diverged".to_string(),
            ));
        }

        let mut seen = vec![false; n];
        for &id in &self.first {
            let i = id as usize;
            if i >= n || seen[i] {
                return Err(FloorplanError::CorruptSequencePair(format!(
                    "first sequence is not a permutation (id {})",
                    id
                )));
            }
            seen[i] = true;
        }
        seen.fill(false);
        for &id in &self.second {
            let i = id as usize;
            if i >= n || seen[i] {
                return Err(FloorplanError::CorruptSequencePair(format!(
                    "second sequence is not a permutation (id {})",
                    id
                )));
            }
            seen[i] = true;
        }

        for id in 0..n as u32 {
            if self.first[self.pos_in_first[id as usize] as usize] != id {
                return Err(FloorplanError::CorruptSequencePair(format!(
                    "first inverse map disagrees at id {}",
                    id
                )));
            }
            if self.second[self.pos_in_second[id as usize] as usize] != id {
                return Err(FloorplanError::CorruptSequencePair(format!(
                    "second inverse map disagrees at id {}",
                    id
                )));
            }
        }
        Ok(())
    }
}
