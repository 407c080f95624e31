use std::collections::BTreeMap;

use chrono::NaiveDate;
use itertools::Itertools;
use log::debug;

use crate::{
    group::ProductGroup,
    prelude::{Error, Footprint, Product},
};

/// Candidate products, partitioned into single pass [ProductGroup]s.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStack {
    /// Groups in chronological order
    groups: Vec<ProductGroup>,
}

impl GroupStack {
    pub fn new(products: Vec<Product>) -> Result<Self, Error> {
        Ok(Self {
            groups: Self::group_products(products)?,
        })
    }

    /// Partitions products into runs of consecutive absolute orbits.
    pub fn group_products(products: Vec<Product>) -> Result<Vec<ProductGroup>, Error> {
        let mut by_orbit = BTreeMap::<u32, Vec<Product>>::new();
        for product in products {
            by_orbit.entry(product.orbit).or_default().push(product);
        }

        let mut runs = Vec::<Vec<Product>>::new();
        let mut previous = None::<u32>;

        for (orbit, products) in by_orbit {
            let contiguous = previous.is_some_and(|prev| orbit == prev + 1);
            match runs.last_mut() {
                Some(run) if contiguous => run.extend(products),
                _ => runs.push(products),
            }
            previous = Some(orbit);
        }

        let groups = runs
            .into_iter()
            .map(ProductGroup::new)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .sorted_by(|a, b| a.start_time().cmp(&b.start_time()))
            .collect::<Vec<_>>();

        debug!("{} product groups", groups.len());
        Ok(groups)
    }

    /// Groups in chronological order
    pub fn groups(&self) -> &[ProductGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.groups.first().map(|group| group.date())
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.groups.last().map(|group| group.date())
    }

    /// Outline of all group footprints
    pub fn union_footprint(&self) -> Footprint {
        Footprint::merge(self.groups.iter().map(|group| group.footprint()))
    }

    /// Surface covered by every group
    pub fn intersection_footprint(&self) -> Option<Footprint> {
        Footprint::intersect_all(self.groups.iter().map(|group| group.footprint()))
    }
}
