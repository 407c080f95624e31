//! Perpendicular and temporal baselines
use log::{debug, warn};

use crate::prelude::{BaselineKind, Error, Product};

pub mod geodetic;
pub mod interp;
pub mod precalculated;

/// Recoverable situations met while calculating baselines
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Requested reference was not part of the stack and had to be replaced.
    NewReference { requested: String, selected: String },
    /// Some products of the stack have no state vectors: their
    /// perpendicular baseline was not calculated.
    MissingStateVectors { count: usize },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NewReference {
                requested,
                selected,
            } => write!(
                f,
                "NEW_REFERENCE: {} replaced by {} to calculate baseline values",
                requested, selected
            ),
            Self::MissingStateVectors { count } => write!(
                f,
                "MISSING_STATE_VECTORS: {} scenes in stack missing state vectors, perpendicular baseline not calculated for these scenes",
                count
            ),
        }
    }
}

/// Perpendicular baseline of `secondary` with respect to `reference`, using
/// the strategy declared by the reference.
pub fn pair_perpendicular(reference: &Product, secondary: &Product) -> Option<f64> {
    if reference.scene_name == secondary.scene_name {
        return Some(0.0);
    }
    match reference.baseline_kind()? {
        BaselineKind::Ephemeris => geodetic::pair_perpendicular(reference, secondary),
        BaselineKind::Precalculated => {
            precalculated::pair_perpendicular(reference, secondary).unwrap_or_else(|e| {
                debug!("{}: {}", secondary.scene_name, e);
                None
            })
        },
    }
}

/// Calendar days from `reference` to `secondary` acquisitions (signed).
pub fn temporal_days(reference: &Product, secondary: &Product) -> i64 {
    (secondary.date() - reference.date()).num_days()
}

/// Sets the temporal baseline of every product, in days from the reference.
pub fn calculate_temporal_baselines(reference: &Product, products: &mut [Product]) {
    for product in products.iter_mut() {
        product.temporal_baseline = Some(temporal_days(reference, product));
    }
}

/// True when this [Product] carries everything a baseline reference needs:
/// a pre-calculated value, or complete state vectors and a scene location.
pub fn is_usable_reference(product: &Product) -> bool {
    match product.baseline_kind() {
        Some(BaselineKind::Ephemeris) => {
            product.has_state_vectors() && product.center_lat_lon().is_some()
        },
        Some(BaselineKind::Precalculated) => product.insar_baseline().is_some(),
        None => false,
    }
}

/// First product of the stack able to serve as reference
pub fn find_new_reference(products: &[Product]) -> Option<&Product> {
    products.iter().find(|product| is_usable_reference(product))
}

/// Selects the reference actually used for baseline calculations.
/// Any substitution of the requested reference is reported.
fn check_reference(
    reference: &Product,
    products: &[Product],
    warnings: &mut Vec<Warning>,
) -> Result<Product, Error> {
    if products.is_empty() {
        return Err(Error::EmptyStack);
    }

    if let Some(requested) = products
        .iter()
        .find(|product| product.scene_name == reference.scene_name)
    {
        if is_usable_reference(requested) {
            return Ok(requested.clone());
        }
        if requested.baseline_kind() == Some(BaselineKind::Precalculated) {
            return Err(Error::MissingInsarBaseline(requested.scene_name.clone()));
        }
    }

    let selected = match find_new_reference(products) {
        Some(selected) => selected.clone(),
        None => {
            // state vectors exist, but no product can be located
            return match products.iter().find(|p| p.is_valid_reference()) {
                Some(product) => Err(Error::UnknownLocation(product.scene_name.clone())),
                None => Err(Error::NoStateVectorsInStack),
            };
        },
    };

    let warning = Warning::NewReference {
        requested: reference.scene_name.clone(),
        selected: selected.scene_name.clone(),
    };
    warn!("{}", warning);
    warnings.push(warning);
    Ok(selected)
}

/// Calculates temporal and perpendicular baselines of a whole stack with respect
/// to `reference`.
///
/// Metadata only products and products without any baseline payload are
/// discarded. When the requested reference cannot be used, a new one is
/// selected among the stack and a [Warning] describes the substitution.
pub fn get_baseline_from_stack(
    reference: &Product,
    stack: Vec<Product>,
) -> Result<(Vec<Product>, Vec<Warning>), Error> {
    if stack.is_empty() {
        return Err(Error::EmptyStack);
    }

    let mut stack = stack
        .into_iter()
        .filter(|product| !product.is_metadata() && product.baseline.is_some())
        .collect::<Vec<_>>();

    let mut warnings = Vec::new();
    let reference = check_reference(reference, &stack, &mut warnings)?;

    calculate_temporal_baselines(&reference, &mut stack);

    match reference.baseline_kind() {
        Some(BaselineKind::Precalculated) => {
            precalculated::offset_perpendicular_baselines(&reference, &mut stack)?;
        },
        _ => {
            geodetic::calculate_perpendicular_baselines(&reference.scene_name, &mut stack);
            let count = stack.iter().filter(|p| p.no_state_vectors).count();
            if count > 0 {
                let warning = Warning::MissingStateVectors { count };
                warn!("{}", warning);
                warnings.push(warning);
            }
        },
    }

    Ok((stack, warnings))
}
