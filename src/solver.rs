//! The solver's state and search.

use std::cell::Cell;
use std::cmp::Reverse;
use std::fmt;

use crate::arc;
use crate::domains::Domains;
use crate::{Assignment, Crossword, Overlap, VarToken, XwResult};

/// Tuning for the search.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SolverOptions {
    /// After each guess, restore arc consistency between the guessed
    /// slot and its unassigned neighbors, pruning the guess early if a
    /// neighbor runs out of candidates.
    pub inference: bool,
}

/// Fills a crossword.
pub struct Solver<'a> {
    crossword: &'a Crossword,
    options: SolverOptions,

    // The candidates of each slot, narrowed by node and arc
    // consistency.  Never changed during the search itself.
    domains: Domains,

    // The number of guesses taken by the last search.
    num_guesses: Cell<u32>,
}

impl<'a> Solver<'a> {
    /// Allocate a new solver.  Every slot starts with the whole word
    /// list as candidates.
    ///
    /// # Examples
    ///
    /// ```
    /// let crossword = crossword_solver::Crossword::parse("___\n", "cat\n");
    /// let mut solver = crossword_solver::Solver::new(&crossword);
    /// assert!(solver.solve().is_some());
    /// ```
    pub fn new(crossword: &'a Crossword) -> Self {
        Solver::with_options(crossword, SolverOptions::default())
    }

    pub fn with_options(crossword: &'a Crossword, options: SolverOptions) -> Self {
        Solver {
            crossword,
            options,
            domains: Domains::new(crossword),
            num_guesses: Cell::new(0),
        }
    }

    pub fn options(&self) -> SolverOptions {
        self.options
    }

    /// Get an iterator over the current candidates of a slot.
    pub fn domain(&self, var: VarToken) -> impl Iterator<Item = &str> + '_ {
        self.domains
            .iter(var)
            .map(move |word| self.crossword.word(word).text.as_str())
    }

    /// Remove the candidates whose length does not match their slot.
    pub fn enforce_node_consistency(&mut self) {
        self.domains.enforce_node_consistency(self.crossword);
    }

    /// Make `x` arc consistent with `y`.  Returns whether any candidate
    /// of `x` was removed; slots that do not cross are left alone.
    pub fn revise(&mut self, x: VarToken, y: VarToken) -> bool {
        arc::revise(self.crossword, &mut self.domains, x, y)
    }

    /// Make every slot arc consistent, starting from the given arcs or,
    /// if None, from every pair of crossing slots.
    ///
    /// Returns an error if some slot is left with no candidates.
    pub fn enforce_arc_consistency(&mut self, arcs: Option<Vec<(VarToken, VarToken)>>) -> XwResult<()> {
        let arcs = arcs.unwrap_or_else(|| arc::all_arcs(self.crossword));
        arc::enforce_arc_consistency(self.crossword, &mut self.domains, arcs)
    }

    /// Choose the next slot to fill: the fewest candidates first, then
    /// the most unassigned neighbors, then grid order.
    ///
    /// Returns None if every slot is assigned.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<VarToken> {
        self.select(&self.domains, assignment)
    }

    /// List the candidates of a slot, those ruling out the fewest
    /// candidates of unassigned neighbors first.
    pub fn order_domain_values(&self, var: VarToken, assignment: &Assignment) -> Vec<&str> {
        self.order(&self.domains, var, assignment)
            .into_iter()
            .map(|word| self.crossword.word(word).text.as_str())
            .collect()
    }

    /// Extend the assignment to a complete one, or return None if there
    /// is no such extension.
    pub fn backtrack(&self, assignment: Assignment) -> Option<Assignment> {
        self.search(&self.domains, assignment)
    }

    /// Enforce node and arc consistency, then search for any solution.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.num_guesses.set(0);

        self.enforce_node_consistency();
        if let Err(err) = self.enforce_arc_consistency(None) {
            log::debug!("arc consistency failed: {}", err);
            return None;
        }

        let solution = self.backtrack(Assignment::new());
        match solution {
            Some(_) => log::debug!("solved after {} guesses", self.num_guesses()),
            None => log::debug!("no solution after {} guesses", self.num_guesses()),
        }

        solution
    }

    /// Get the number of guesses taken by the last search.
    pub fn num_guesses(&self) -> u32 {
        self.num_guesses.get()
    }

    fn search(&self, domains: &Domains, assignment: Assignment) -> Option<Assignment> {
        if assignment.is_complete(self.crossword) {
            return Some(assignment);
        }

        let var = self.select(domains, &assignment)?;
        let variable = self.crossword[var];

        for word in self.order(domains, var, &assignment) {
            self.num_guesses.set(self.num_guesses.get().saturating_add(1));

            let text = &self.crossword.word(word).text;
            if !assignment.admits(self.crossword, &variable, text) {
                continue;
            }

            let mut new = assignment.clone();
            new.insert(variable, text.as_str());

            let solution = if self.options.inference {
                let mut narrowed = domains.clone();
                match self.infer(&mut narrowed, var, word, &new) {
                    Ok(()) => self.search(&narrowed, new),
                    Err(_) => None,
                }
            } else {
                self.search(domains, new)
            };

            if solution.is_some() {
                return solution;
            }
        }

        log::trace!("backtracking from {}", variable);
        None
    }

    /// Fix `var` to `word` and propagate to the unassigned neighbors.
    fn infer(&self, domains: &mut Domains, var: VarToken, word: usize, assignment: &Assignment) -> XwResult<()> {
        domains.restrict(var, word);
        let arcs = self
            .crossword
            .neighbors(var)
            .filter(|&z| !assignment.contains(&self.crossword[z]))
            .map(|z| (z, var))
            .collect::<Vec<_>>();

        arc::enforce_arc_consistency(self.crossword, domains, arcs)
    }

    fn select(&self, domains: &Domains, assignment: &Assignment) -> Option<VarToken> {
        let is_unassigned = |var: VarToken| !assignment.contains(&self.crossword[var]);

        self.crossword
            .tokens()
            .filter(|&var| is_unassigned(var))
            .min_by_key(|&var| {
                let degree = self
                    .crossword
                    .neighbors(var)
                    .filter(|&n| is_unassigned(n))
                    .count();
                (domains.len(var), Reverse(degree))
            })
    }

    fn order(&self, domains: &Domains, var: VarToken, assignment: &Assignment) -> Vec<usize> {
        let neighbors: Vec<(VarToken, Overlap)> = self
            .crossword
            .neighbors(var)
            .filter(|&n| !assignment.contains(&self.crossword[n]))
            .filter_map(|n| self.crossword.overlap(var, n).map(|overlap| (n, overlap)))
            .collect();

        let mut values: Vec<(usize, usize)> = domains
            .iter(var)
            .map(|word| {
                let letters = &self.crossword.word(word).letters;
                let ruled_out = neighbors
                    .iter()
                    .map(|&(n, (ox, oy))| {
                        domains
                            .iter(n)
                            .filter(|&other| letters.get(ox) != self.crossword.word(other).letters.get(oy))
                            .count()
                    })
                    .sum();
                (word, ruled_out)
            })
            .collect();

        // Stable, so ties keep word list order.
        values.sort_by_key(|&(_, ruled_out)| ruled_out);
        values.into_iter().map(|(word, _)| word).collect()
    }
}

impl fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Solver={{")?;
        for var in self.crossword.tokens() {
            writeln!(f)?;
            write!(f, "  {}:", self.crossword[var])?;
            for word in self.domain(var) {
                write!(f, " {}", word)?;
            }
        }
        write!(f, "}}")?;
        Ok(())
    }
}
