//! Partial and complete fills, and the rules they must obey.

use std::collections::{BTreeMap, HashSet};
use std::ops;

use crate::{Crossword, Variable};

/// A dictionary mapping crossword slots to the words placed in them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assignment {
    words: BTreeMap<Variable, String>,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment {
            words: BTreeMap::new(),
        }
    }

    /// Place a word in a slot, returning the word it replaces.
    pub fn insert<S: Into<String>>(&mut self, var: Variable, word: S) -> Option<String> {
        self.words.insert(var, word.into())
    }

    pub fn get(&self, var: &Variable) -> Option<&str> {
        self.words.get(var).map(String::as_str)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.words.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &str)> {
        self.words.iter().map(|(var, word)| (var, word.as_str()))
    }

    /// Check whether every slot of the crossword has a word.
    pub fn is_complete(&self, crossword: &Crossword) -> bool {
        crossword.variables().iter().all(|var| self.contains(var))
    }

    /// Check the placed words against the crossword's rules: each word
    /// fits its slot, no word is used twice, and crossing slots agree
    /// on their shared letter.
    ///
    /// Only the assigned slots are checked, so a partial fill may be
    /// consistent.
    pub fn is_consistent(&self, crossword: &Crossword) -> bool {
        let mut used = HashSet::new();
        for (var, word) in self.words.iter() {
            if word.chars().count() != var.length || !used.insert(word.as_str()) {
                return false;
            }
        }

        for (x, wx) in self.words.iter() {
            let Some(tx) = crossword.token(x) else {
                continue;
            };

            for ty in crossword.neighbors(tx) {
                if let (Some(wy), Some((ox, oy))) = (self.get(&crossword[ty]), crossword.overlap(tx, ty)) {
                    if !letters_agree(wx, ox, wy, oy) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Check whether placing `word` in `var` keeps a consistent
    /// assignment consistent.  Only the new placement is checked.
    pub fn admits(&self, crossword: &Crossword, var: &Variable, word: &str) -> bool {
        if word.chars().count() != var.length {
            return false;
        }

        if self.words.iter().any(|(other, used)| other != var && used == word) {
            return false;
        }

        let Some(tx) = crossword.token(var) else {
            return true;
        };

        crossword.neighbors(tx).all(|ty| {
            match (self.get(&crossword[ty]), crossword.overlap(tx, ty)) {
                (Some(wy), Some((ox, oy))) => letters_agree(word, ox, wy, oy),
                _ => true,
            }
        })
    }
}

impl ops::Index<&Variable> for Assignment {
    type Output = str;

    /// Get the word placed in a slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot has not been assigned.
    fn index(&self, var: &Variable) -> &str {
        self.get(var).expect("unassigned")
    }
}

fn letters_agree(x: &str, ox: usize, y: &str, oy: usize) -> bool {
    x.chars().nth(ox) == y.chars().nth(oy)
}
