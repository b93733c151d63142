//! Tree-offset estimator: trees required to absorb an annual emissions total.

/// kg CO₂e one tree absorbs per year.
pub const ABSORPTION_PER_TREE_KG_PER_YEAR: f64 = 25.0;

/// Assumed productive lifetime of a planted tree, in years.
pub const TREE_LIFETIME_YEARS: u32 = 25;

/// Trees needed per year to absorb `total_kg` of annual emissions.
///
/// Pure function of the ledger's current grand total; totals at or below
/// zero need no trees.
pub fn trees_needed_per_year(total_kg: f64) -> u64 {
    if total_kg <= 0.0 || !total_kg.is_finite() {
        return 0;
    }
    (total_kg / ABSORPTION_PER_TREE_KG_PER_YEAR).ceil() as u64
}
