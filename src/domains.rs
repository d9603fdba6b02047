//! The candidate words of each slot.

use bit_set::BitSet;

use crate::{Crossword, VarToken};

/// One set of candidate word ids per slot.  Iteration follows the
/// word list order.
#[derive(Clone, Debug)]
pub(crate) struct Domains {
    sets: Vec<BitSet>,
}

impl Domains {
    /// Every slot starts with the whole word list.
    pub(crate) fn new(crossword: &Crossword) -> Self {
        let all: BitSet = (0..crossword.num_words()).collect();
        Domains {
            sets: vec![all; crossword.variables().len()],
        }
    }

    pub(crate) fn len(&self, var: VarToken) -> usize {
        self.sets[var.index()].len()
    }

    pub(crate) fn is_empty(&self, var: VarToken) -> bool {
        self.sets[var.index()].is_empty()
    }

    pub(crate) fn iter(&self, var: VarToken) -> impl Iterator<Item = usize> + '_ {
        self.sets[var.index()].iter()
    }

    /// Keep only the candidates for which `keep` holds.  Returns
    /// whether any were removed.
    pub(crate) fn retain<F>(&mut self, var: VarToken, mut keep: F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        let set = &mut self.sets[var.index()];
        let discard = set.iter().filter(|&word| !keep(word)).collect::<Vec<_>>();
        for &word in discard.iter() {
            set.remove(word);
        }

        !discard.is_empty()
    }

    /// Reduce a slot to a single candidate.
    pub(crate) fn restrict(&mut self, var: VarToken, word: usize) {
        let set = &mut self.sets[var.index()];
        set.clear();
        set.insert(word);
    }

    /// Drop the candidates that do not fit their slot's length.
    pub(crate) fn enforce_node_consistency(&mut self, crossword: &Crossword) {
        for var in crossword.tokens() {
            let length = crossword[var].length;
            if self.retain(var, |word| crossword.word(word).len() == length) {
                log::trace!("{}: {} candidates of length {}", crossword[var], self.len(var), length);
            }
        }
    }
}
