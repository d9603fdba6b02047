//! Arc consistency (AC-3) over the crossings.

use std::collections::{HashSet, VecDeque};

use crate::domains::Domains;
use crate::{Crossword, Error, VarToken, XwResult};

/// Make `x` arc consistent with `y`: drop each candidate of `x` whose
/// crossing letter no candidate of `y` supplies.
///
/// Returns whether any candidate was dropped.
pub(crate) fn revise(crossword: &Crossword, domains: &mut Domains, x: VarToken, y: VarToken) -> bool {
    let Some((ox, oy)) = crossword.overlap(x, y) else {
        return false;
    };

    let support: HashSet<char> = domains
        .iter(y)
        .filter_map(|word| crossword.word(word).letters.get(oy).copied())
        .collect();

    domains.retain(x, |word| {
        crossword
            .word(word)
            .letters
            .get(ox)
            .map_or(false, |c| support.contains(c))
    })
}

/// Every ordered pair of crossing slots.
pub(crate) fn all_arcs(crossword: &Crossword) -> Vec<(VarToken, VarToken)> {
    crossword
        .tokens()
        .flat_map(move |x| crossword.neighbors(x).map(move |y| (x, y)))
        .collect()
}

/// Revise arcs until none changes, starting from `arcs`.  A revision of
/// `(x, y)` that changes `x` queues `(z, x)` for the other neighbors `z`
/// of `x`.
///
/// Fails as soon as a slot has no candidates left.
pub(crate) fn enforce_arc_consistency<I>(crossword: &Crossword, domains: &mut Domains, arcs: I) -> XwResult<()>
where
    I: IntoIterator<Item = (VarToken, VarToken)>,
{
    let mut queue: VecDeque<_> = arcs.into_iter().collect();

    while let Some((x, y)) = queue.pop_front() {
        if !revise(crossword, domains, x, y) {
            continue;
        }

        log::trace!("revised {} against {}: {} left", crossword[x], crossword[y], domains.len(x));
        if domains.is_empty(x) {
            return Err(Error::EmptyDomain(crossword[x]));
        }

        queue.extend(crossword.neighbors(x).filter(|&z| z != y).map(|z| (z, x)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{all_arcs, enforce_arc_consistency, revise};
    use crate::domains::Domains;
    use crate::{Crossword, Error};

    fn words(crossword: &Crossword, domains: &Domains, idx: usize) -> Vec<String> {
        let var = crossword.tokens().nth(idx).expect("slot");
        domains
            .iter(var)
            .map(|word| crossword.word(word).text.clone())
            .collect()
    }

    #[test]
    fn test_revise() {
        let crossword = Crossword::parse("___\n#_#\n#_#\n", "cat\ndog\nart\nemu\n");
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency(&crossword);

        let mut tokens = crossword.tokens();
        let across = tokens.next().expect("across");
        let down = tokens.next().expect("down");

        // Down words start with C, D, A or E; across letter 1 must match.
        assert!(revise(&crossword, &mut domains, across, down));
        assert_eq!(words(&crossword, &domains, 0), ["CAT"]);
        assert!(!revise(&crossword, &mut domains, across, down));

        assert!(revise(&crossword, &mut domains, down, across));
        assert_eq!(words(&crossword, &domains, 1), ["ART"]);
    }

    #[test]
    fn test_revise_without_overlap() {
        let crossword = Crossword::parse("___\n###\n___\n", "cat\ndog\n");
        let mut domains = Domains::new(&crossword);
        let mut tokens = crossword.tokens();
        let top = tokens.next().expect("top");
        let bottom = tokens.next().expect("bottom");
        assert!(!revise(&crossword, &mut domains, top, bottom));
        assert_eq!(domains.len(top), 2);
    }

    #[test]
    fn test_arc_consistency_fixpoint() {
        let crossword = Crossword::parse(
            "#___#\n#_##_\n#_##_\n#_##_\n#____\n",
            "one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten\n",
        );
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency(&crossword);
        enforce_arc_consistency(&crossword, &mut domains, all_arcs(&crossword)).expect("consistent");

        assert_eq!(words(&crossword, &domains, 0), ["SIX"]);
        assert_eq!(words(&crossword, &domains, 1), ["SEVEN"]);
        assert_eq!(words(&crossword, &domains, 2), ["FIVE", "NINE"]);
        assert_eq!(words(&crossword, &domains, 3), ["NINE"]);

        for (x, y) in all_arcs(&crossword) {
            let (ox, oy) = crossword.overlap(x, y).expect("overlap");
            for wx in domains.iter(x) {
                let letter = crossword.word(wx).letters[ox];
                assert!(domains.iter(y).any(|wy| crossword.word(wy).letters[oy] == letter));
            }
        }
    }

    #[test]
    fn test_arc_consistency_empty_domain() {
        let crossword = Crossword::parse("___\n#_#\n#_#\n", "cat\ndog\n");
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency(&crossword);
        let result = enforce_arc_consistency(&crossword, &mut domains, all_arcs(&crossword));
        assert!(matches!(result, Err(Error::EmptyDomain(_))));
    }

    #[test]
    fn test_arc_consistency_with_no_arcs() {
        let crossword = Crossword::parse("___\n#_#\n#_#\n", "cat\ndog\n");
        let mut domains = Domains::new(&crossword);
        domains.enforce_node_consistency(&crossword);
        assert!(enforce_arc_consistency(&crossword, &mut domains, Vec::new()).is_ok());
        assert_eq!(words(&crossword, &domains, 0), ["CAT", "DOG"]);
    }
}
