//! Platforms carrying a single pre-calculated baseline value
use crate::prelude::{Error, Product};

/// Offsets the pre-calculated baseline of `product` by the reference value,
/// rounded half to even.
pub fn pair_perpendicular(reference: &Product, product: &Product) -> Result<Option<f64>, Error> {
    let zero = reference
        .insar_baseline()
        .ok_or_else(|| Error::MissingInsarBaseline(reference.scene_name.clone()))?;
    Ok(product
        .insar_baseline()
        .map(|value| (value - zero).round_ties_even()))
}

/// Expresses the pre-calculated baseline of every product relatively to
/// the reference, in place. The reference must carry a value.
pub fn offset_perpendicular_baselines(
    reference: &Product,
    products: &mut [Product],
) -> Result<(), Error> {
    for product in products.iter_mut() {
        product.perpendicular_baseline = if product.scene_name == reference.scene_name {
            Some(0.0)
        } else {
            pair_perpendicular(reference, product)?
        };
    }
    Ok(())
}
