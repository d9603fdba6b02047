//! The crossword's geometry and word list.

use bit_set::BitSet;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::ops;
use std::path::Path;

use crate::{Assignment, Direction, Error, Overlap, VarToken, Variable, XwResult};

/// A word from the word list, with its letters split out for offset
/// lookups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Word {
    pub(crate) text: String,
    pub(crate) letters: Vec<char>,
}

/// The crossword to be filled.
#[derive(Debug)]
pub struct Crossword {
    height: usize,
    width: usize,

    // Which cells are fillable, padded to `width` columns.
    structure: Vec<Vec<bool>>,

    // The word list, without duplicates, in first-seen order.  A
    // word's position is its id.
    words: Vec<Word>,

    // The slots, in grid scan order.  A slot's position is its token.
    variables: Vec<Variable>,
    tokens: HashMap<Variable, VarToken>,

    // Only crossing pairs are present, keyed in both orders.
    overlaps: HashMap<(VarToken, VarToken), Overlap>,
    neighbors: Vec<BitSet>,
}

/*--------------------------------------------------------------*/

impl Word {
    fn new(text: String) -> Self {
        let letters = text.chars().collect();
        Word { text, letters }
    }

    pub(crate) fn len(&self) -> usize {
        self.letters.len()
    }
}

/*--------------------------------------------------------------*/

impl Crossword {
    /// Build a crossword from its fillable cells and a word list.
    ///
    /// Rows shorter than the widest row are padded with blocked
    /// cells.  Duplicate words are dropped, keeping the first.
    ///
    /// # Examples
    ///
    /// ```
    /// let crossword = crossword_solver::Crossword::new(
    ///     vec![vec![true, true, true]],
    ///     ["CAT", "DOG"],
    /// );
    /// assert_eq!(crossword.variables().len(), 1);
    /// ```
    pub fn new<I, S>(structure: Vec<Vec<bool>>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let height = structure.len();
        let width = structure.iter().map(Vec::len).max().unwrap_or(0);
        let structure: Vec<Vec<bool>> = structure
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        let mut seen = HashSet::new();
        let words: Vec<Word> = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| seen.insert(word.clone()))
            .map(Word::new)
            .collect();

        let variables = find_variables(&structure);
        let tokens = variables
            .iter()
            .enumerate()
            .map(|(idx, &var)| (var, VarToken(idx)))
            .collect();
        let (overlaps, neighbors) = find_overlaps(&variables);

        log::debug!(
            "crossword {}x{}: {} variables, {} crossings, {} words",
            height,
            width,
            variables.len(),
            overlaps.len() / 2,
            words.len()
        );

        Crossword {
            height,
            width,
            structure,
            words,
            variables,
            tokens,
            overlaps,
            neighbors,
        }
    }

    /// Build a crossword from the text forms of its structure and word
    /// list.
    ///
    /// A structure cell is fillable if it is `_`.  Words are one per
    /// line and are upper-cased; blank lines are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// let crossword = crossword_solver::Crossword::parse("___\n#_#\n#_#\n", "cat\nart\n");
    /// assert_eq!(crossword.variables().len(), 2);
    /// assert_eq!(crossword.words().collect::<Vec<_>>(), ["CAT", "ART"]);
    /// ```
    pub fn parse(structure: &str, words: &str) -> Self {
        let structure = structure
            .lines()
            .map(|line| line.chars().map(|c| c == '_').collect())
            .collect();
        let words = words
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_uppercase);

        Crossword::new(structure, words)
    }

    /// Read the structure and word list files, see `parse`.
    pub fn open<P, Q>(structure: P, words: Q) -> XwResult<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let structure = read(structure.as_ref())?;
        let words = read(words.as_ref())?;
        Ok(Crossword::parse(&structure, &words))
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at row `i`, column `j` may hold a letter.
    pub fn is_fillable(&self, i: usize, j: usize) -> bool {
        self.structure
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(false)
    }

    /// The slots, in grid scan order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The tokens of all slots, in the same order as `variables`.
    pub fn tokens(&self) -> impl Iterator<Item = VarToken> {
        (0..self.variables.len()).map(VarToken)
    }

    /// Look up the token of a slot, or None if the slot is not part of
    /// this crossword.
    pub fn token(&self, var: &Variable) -> Option<VarToken> {
        self.tokens.get(var).copied()
    }

    /// The de-duplicated word list, in its original order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| word.text.as_str())
    }

    pub(crate) fn num_words(&self) -> usize {
        self.words.len()
    }

    pub(crate) fn word(&self, id: usize) -> &Word {
        &self.words[id]
    }

    /// The letter offsets at which `x` and `y` cross, or None if they
    /// do not.
    pub fn overlap(&self, x: VarToken, y: VarToken) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// The slots crossing `var`.
    pub fn neighbors(&self, var: VarToken) -> impl Iterator<Item = VarToken> + '_ {
        let VarToken(idx) = var;
        self.neighbors[idx].iter().map(VarToken)
    }

    /// Lay out the letters of an assignment on the grid.  Blocked and
    /// unassigned cells are None.
    pub fn letter_grid(&self, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
        let mut letters = vec![vec![None; self.width]; self.height];
        for (var, word) in assignment.iter() {
            for ((i, j), c) in var.cells().zip(word.chars()) {
                if let Some(cell) = letters.get_mut(i).and_then(|row| row.get_mut(j)) {
                    *cell = Some(c);
                }
            }
        }

        letters
    }
}

impl ops::Index<VarToken> for Crossword {
    type Output = Variable;

    fn index(&self, var: VarToken) -> &Variable {
        let VarToken(idx) = var;
        &self.variables[idx]
    }
}

/*--------------------------------------------------------------*/

/// Scan the grid for maximal runs of fillable cells.  Single cells are
/// not slots.
fn find_variables(structure: &[Vec<bool>]) -> Vec<Variable> {
    let mut variables = Vec::new();

    for (i, row) in structure.iter().enumerate() {
        for (j, &open) in row.iter().enumerate() {
            if !open {
                continue;
            }

            if j == 0 || !row[j - 1] {
                let length = row[j..].iter().take_while(|&&c| c).count();
                if length > 1 {
                    variables.push(Variable::new(i, j, Direction::Across, length));
                }
            }

            if i == 0 || !structure[i - 1][j] {
                let length = structure[i..].iter().take_while(|r| r[j]).count();
                if length > 1 {
                    variables.push(Variable::new(i, j, Direction::Down, length));
                }
            }
        }
    }

    variables
}

/// Determine which slots cross, and where.
fn find_overlaps(variables: &[Variable]) -> (HashMap<(VarToken, VarToken), Overlap>, Vec<BitSet>) {
    let mut cells: HashMap<(usize, usize), Vec<(usize, usize)>> = HashMap::new();
    for (idx, var) in variables.iter().enumerate() {
        for (offset, cell) in var.cells().enumerate() {
            cells.entry(cell).or_default().push((idx, offset));
        }
    }

    let mut overlaps = HashMap::new();
    let mut neighbors = vec![BitSet::new(); variables.len()];
    for sharing in cells.values() {
        for &(x, ox) in sharing.iter() {
            for &(y, oy) in sharing.iter() {
                if x != y {
                    overlaps.entry((VarToken(x), VarToken(y))).or_insert((ox, oy));
                    neighbors[x].insert(y);
                }
            }
        }
    }

    (overlaps, neighbors)
}

fn read(path: &Path) -> XwResult<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
