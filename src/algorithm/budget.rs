//! Splitting one shared cell budget across composited layers
//!
//! When several layers (a background and one or more foregrounds) share a
//! per-frame budget, each layer first receives a coverage floor, then the rest
//! is shared in proportion to unmet demand, and the rounding leftover goes to
//! layers that can still use it, in layer order.

use crate::math::interpolation::clamp01;

/// Per-layer budgets for `total` cells across layers of the given sizes
///
/// Guarantees:
/// - no layer receives more than its size
/// - the budgets never sum to more than `total`
/// - every layer gets `ceil(size * min_coverage)` cells when the floors fit in
///   `total`; otherwise the floors are scaled down proportionally
/// - when `total` covers every layer entirely, each layer gets its full size
pub fn allocate_layer_budgets(total: usize, layer_sizes: &[usize], min_coverage: f64) -> Vec<usize> {
    let demand: usize = layer_sizes.iter().sum();
    if demand <= total {
        return layer_sizes.to_vec();
    }

    let coverage = clamp01(min_coverage);
    let floors: Vec<usize> = layer_sizes
        .iter()
        .map(|&size| ((size as f64 * coverage).ceil() as usize).min(size))
        .collect();
    let floor_sum: usize = floors.iter().sum();

    let mut budgets: Vec<usize> = if floor_sum > total {
        floors
            .iter()
            .map(|&floor| proportional(total, floor, floor_sum))
            .collect()
    } else {
        floors
    };

    let granted: usize = budgets.iter().sum();
    let remaining = total.saturating_sub(granted);
    let unmet: Vec<usize> = layer_sizes
        .iter()
        .zip(&budgets)
        .map(|(&size, &budget)| size.saturating_sub(budget))
        .collect();
    let unmet_sum: usize = unmet.iter().sum();

    if unmet_sum > 0 {
        for (budget, &need) in budgets.iter_mut().zip(&unmet) {
            *budget += proportional(remaining, need, unmet_sum).min(need);
        }
    }

    let mut leftover = total.saturating_sub(budgets.iter().sum());
    while leftover > 0 {
        let mut progressed = false;
        for (budget, &size) in budgets.iter_mut().zip(layer_sizes) {
            if leftover == 0 {
                break;
            }
            if *budget < size {
                *budget += 1;
                leftover -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    budgets
}

fn proportional(amount: usize, part: usize, whole: usize) -> usize {
    if whole == 0 {
        return 0;
    }
    ((amount as u128 * part as u128) / whole as u128) as usize
}
