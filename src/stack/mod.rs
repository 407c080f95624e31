//! Pairwise baseline stack
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, warn};

use crate::{
    date::{normalize_date_pair, DateLike},
    pair::{DatePair, Pair},
    prelude::{Error, Product},
};

mod graph;

use graph::DateGraph;

/// Selection applied to the full stack on every rebuild, on top of
/// the user removals.
pub trait PairFilter {
    /// Returns true if this [Pair] belongs to the subset stack.
    fn admits(&self, pair: &Pair) -> bool;
}

/// Admits every pair
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Unfiltered;

impl PairFilter for Unfiltered {
    fn admits(&self, _: &Pair) -> bool {
        true
    }
}

/// All valid pairs that can be formed from a reference's candidate set.
///
/// The full stack is built once. User removals ([Stack::remove_pairs]) and
/// restorations ([Stack::add_pairs]) trigger a complete [Stack::rebuild] of
/// the subset stack and of its connected substacks.
/// [Stack] is not meant to be mutated concurrently.
#[derive(Debug, Clone)]
pub struct Stack<F: PairFilter = Unfiltered> {
    geo_reference: Arc<Product>,
    filter: F,
    /// Pair arena
    pairs: Vec<Pair>,
    /// Full stack index into the arena
    index: BTreeMap<DatePair, usize>,
    remove_list: BTreeSet<DatePair>,
    subset: BTreeSet<DatePair>,
    components: Vec<Vec<DatePair>>,
}

impl Stack<Unfiltered> {
    /// Builds the full [Stack] of `geo_reference`, from its candidates.
    pub fn new(geo_reference: Product, candidates: Vec<Product>) -> Result<Self, Error> {
        Self::with_filter(geo_reference, candidates, Unfiltered)
    }
}

impl<F: PairFilter> Stack<F> {
    /// Builds the full [Stack] of `geo_reference`, from its candidates, with
    /// a custom [PairFilter]. The reference is added to the candidates when missing.
    pub fn with_filter(
        geo_reference: Product,
        mut candidates: Vec<Product>,
        filter: F,
    ) -> Result<Self, Error> {
        if !candidates
            .iter()
            .any(|product| product.scene_name == geo_reference.scene_name)
        {
            candidates.push(geo_reference.clone());
        }

        let mut s = Self {
            geo_reference: Arc::new(geo_reference),
            filter,
            pairs: Vec::new(),
            index: BTreeMap::new(),
            remove_list: BTreeSet::new(),
            subset: BTreeSet::new(),
            components: Vec::new(),
        };

        s.build_full_stack(candidates)?;
        s.rebuild();
        Ok(s)
    }

    /// Pairs every usable candidate with every other one.
    fn build_full_stack(&mut self, candidates: Vec<Product>) -> Result<(), Error> {
        let total = candidates.len();

        let usable = candidates
            .into_iter()
            .filter(|product| product.is_valid_reference())
            .sorted_by(|a, b| a.start_time.cmp(&b.start_time))
            .map(Arc::new)
            .collect::<Vec<_>>();

        if usable.is_empty() {
            return Err(Error::NoStateVectorsInStack);
        }
        if usable.len() < total {
            debug!(
                "{} out of {} candidates have no usable state vectors",
                total - usable.len(),
                total
            );
        }

        for (lhs, rhs) in usable.iter().tuple_combinations() {
            let pair = Pair::new(Arc::clone(lhs), Arc::clone(rhs));
            let key = pair.dates();
            match self.index.get(&key) {
                Some(&slot) => {
                    warn!(
                        "{:?}: duplicated date pair, {} / {} replaced",
                        key,
                        self.pairs[slot].reference().scene_name,
                        self.pairs[slot].secondary().scene_name
                    );
                    self.pairs[slot] = pair;
                },
                None => {
                    self.index.insert(key, self.pairs.len());
                    self.pairs.push(pair);
                },
            }
        }

        debug!("full stack: {} pairs", self.pairs.len());
        Ok(())
    }

    /// Recomputes the subset stack and its connected substacks from the
    /// full stack, the remove list and the [PairFilter].
    pub fn rebuild(&mut self) {
        self.subset = self
            .index
            .iter()
            .filter(|(key, _)| !self.remove_list.contains(*key))
            .filter(|(_, slot)| self.filter.admits(&self.pairs[**slot]))
            .map(|(key, _)| *key)
            .collect();

        self.components = DateGraph::new(self.subset.iter()).components();
        debug!(
            "subset stack: {} pairs, {} connected substacks",
            self.subset.len(),
            self.components.len()
        );
    }

    fn normalize_pairs<I, A, B>(pairs: I) -> Result<Vec<DatePair>, Error>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<DateLike>,
        B: Into<DateLike>,
    {
        pairs
            .into_iter()
            .map(|(lhs, rhs)| normalize_date_pair(lhs, rhs))
            .collect()
    }

    /// Excludes pairs (given as date like tuples, in any order) from the subset stack.
    /// Removing an already excluded pair has no effect.
    /// Nothing is modified if one of the dates is invalid.
    pub fn remove_pairs<I, A, B>(&mut self, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<DateLike>,
        B: Into<DateLike>,
    {
        let pairs = Self::normalize_pairs(pairs)?;
        self.remove_list.extend(pairs);
        self.rebuild();
        Ok(())
    }

    /// Restores previously removed pairs.
    /// Nothing is modified if one of the dates is invalid.
    pub fn add_pairs<I, A, B>(&mut self, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<DateLike>,
        B: Into<DateLike>,
    {
        let pairs = Self::normalize_pairs(pairs)?;
        for pair in pairs {
            if !self.remove_list.remove(&pair) {
                warn!("{} - {}: pair was not removed, cannot be added", pair.0, pair.1);
            }
        }
        self.rebuild();
        Ok(())
    }

    pub fn geo_reference(&self) -> &Product {
        &self.geo_reference
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Every pair of the stack, in date order
    pub fn full_stack(&self) -> impl Iterator<Item = (&DatePair, &Pair)> + '_ {
        self.index.iter().map(|(key, slot)| (key, &self.pairs[*slot]))
    }

    pub fn full_len(&self) -> usize {
        self.index.len()
    }

    /// Retained pairs, in date order
    pub fn subset_stack(&self) -> impl Iterator<Item = (&DatePair, &Pair)> + '_ {
        self.subset
            .iter()
            .map(|key| (key, &self.pairs[self.index[key]]))
    }

    pub fn subset_len(&self) -> usize {
        self.subset.len()
    }

    /// Excluded date pairs
    pub fn date_pair_remove_list(&self) -> &BTreeSet<DatePair> {
        &self.remove_list
    }

    /// Pairs of the full stack currently excluded
    pub fn removed_pairs(&self) -> impl Iterator<Item = (&DatePair, &Pair)> + '_ {
        self.remove_list
            .iter()
            .filter_map(|key| self.index.get(key).map(|slot| (key, &self.pairs[*slot])))
    }

    /// Partition of the subset stack into maximal connected substacks.
    pub fn connected_substacks(&self) -> Vec<BTreeMap<DatePair, &Pair>> {
        self.components
            .iter()
            .map(|edges| {
                edges
                    .iter()
                    .map(|key| (*key, &self.pairs[self.index[key]]))
                    .collect()
            })
            .collect()
    }

    /// True when all retained pairs form a single network
    pub fn is_connected(&self) -> bool {
        self.components.len() <= 1
    }

    /// [Pair] of the full stack formed by these two days, in any order
    pub fn pair<A, B>(&self, lhs: A, rhs: B) -> Result<Option<&Pair>, Error>
    where
        A: Into<DateLike>,
        B: Into<DateLike>,
    {
        let key = normalize_date_pair(lhs, rhs)?;
        Ok(self.index.get(&key).map(|slot| &self.pairs[*slot]))
    }

    /// Acquisition days involved in the subset stack
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.subset
            .iter()
            .flat_map(|(lhs, rhs)| [*lhs, *rhs])
            .collect()
    }

    /// (reference, secondary) scene names of the subset stack
    pub fn scene_ids(&self) -> Vec<(String, String)> {
        self.subset_stack()
            .map(|(_, pair)| {
                (
                    pair.reference().scene_name.clone(),
                    pair.secondary().scene_name.clone(),
                )
            })
            .collect()
    }
}
