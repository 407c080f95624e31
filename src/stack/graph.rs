use std::collections::{BTreeMap, BTreeSet, VecDeque};

use chrono::NaiveDate;

use crate::pair::DatePair;

/// Undirected acquisition graph: nodes are acquisition days,
/// edges are pairs (identified by their [DatePair]).
#[derive(Debug, Default, Clone)]
pub(crate) struct DateGraph {
    adjacency: BTreeMap<NaiveDate, BTreeSet<NaiveDate>>,
}

impl DateGraph {
    pub fn new<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a DatePair>,
    {
        let mut adjacency = BTreeMap::<NaiveDate, BTreeSet<NaiveDate>>::new();
        for (lhs, rhs) in edges {
            adjacency.entry(*lhs).or_default().insert(*rhs);
            adjacency.entry(*rhs).or_default().insert(*lhs);
        }
        Self { adjacency }
    }

    /// Maximal connected components, as sorted edge lists.
    /// Components are ordered by their earliest acquisition day.
    pub fn components(&self) -> Vec<Vec<DatePair>> {
        let mut visited = BTreeSet::<NaiveDate>::new();
        let mut components = Vec::new();

        for seed in self.adjacency.keys() {
            if visited.contains(seed) {
                continue;
            }

            let mut edges = Vec::new();
            let mut queue = VecDeque::from([*seed]);
            visited.insert(*seed);

            while let Some(node) = queue.pop_front() {
                for neighbor in self.adjacency[&node].iter() {
                    // every edge is collected once, from its earliest end
                    if node <= *neighbor {
                        edges.push((node, *neighbor));
                    }
                    if visited.insert(*neighbor) {
                        queue.push_back(*neighbor);
                    }
                }
            }

            edges.sort();
            components.push(edges);
        }

        components
    }
}
