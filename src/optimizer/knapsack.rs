//! Exact 0/1 knapsack over unit point costs, maximizing total effectiveness.
//!
//! The table is `(n + 1) x (max_points + 1)`, stored row-major in one `Vec<f64>`. Reconstruction
//! walks rows from the last unit backwards and takes unit `i` whenever row `i` differs from row
//! `i - 1` at the remaining budget; that scan fixes which of several equally effective subsets is
//! returned.

use std::sync::Arc;

use crate::data::army::Army;
use crate::data::unit::Unit;
use crate::error::{Result, WarbandError};

struct DpTable {
    width: usize,
    cells: Vec<f64>,
}

impl DpTable {
    /// None when `rows * width` does not fit in `usize`.
    fn new(rows: usize, width: usize) -> Option<Self> {
        let len = rows.checked_mul(width)?;
        Some(Self {
            width,
            cells: vec![0.0; len],
        })
    }

    #[inline]
    fn get(&self, row: usize, points: usize) -> f64 {
        self.cells[row * self.width + points]
    }

    #[inline]
    fn set(&mut self, row: usize, points: usize, value: f64) {
        self.cells[row * self.width + points] = value;
    }
}

/// Select the effectiveness-maximal subset of `units` whose total cost is at most `max_points`.
///
/// Every unit is validated before the table is built; nothing is returned on failure.
pub fn optimize(units: &[Arc<Unit>], max_points: i64) -> Result<Army> {
    if max_points < 0 {
        return Err(WarbandError::InvalidBudget(max_points));
    }
    for unit in units {
        unit.validate()?;
    }
    if units.is_empty() || max_points == 0 {
        return Ok(Army::new());
    }

    let budget = working_budget(units, max_points)?;
    let table = fill_table(units, budget, max_points)?;
    let army = reconstruct(units, &table, budget);

    tracing::debug!(
        "optimized {} candidate(s) at budget {}: selected {} unit(s), {} pts, effectiveness {:.3}",
        units.len(),
        max_points,
        army.len(),
        army.total_points(),
        army.total_effectiveness()
    );
    Ok(army)
}

/// Best achievable total effectiveness at `max_points`, without reconstruction.
pub fn optimal_effectiveness(units: &[Arc<Unit>], max_points: i64) -> Result<f64> {
    if max_points < 0 {
        return Err(WarbandError::InvalidBudget(max_points));
    }
    for unit in units {
        unit.validate()?;
    }
    let budget = working_budget(units, max_points)?;
    Ok(fill_table(units, budget, max_points)?.get(units.len(), budget))
}

/// `max_points` capped at the catalog's total cost. Every row is flat from that column on, so the
/// table and the backward scan agree with the uncapped budget.
fn working_budget(units: &[Arc<Unit>], max_points: i64) -> Result<usize> {
    let total_cost: i64 = units.iter().map(|unit| i64::from(unit.point_cost)).sum();
    usize::try_from(max_points.min(total_cost)).map_err(|_| WarbandError::InvalidBudget(max_points))
}

fn fill_table(units: &[Arc<Unit>], budget: usize, max_points: i64) -> Result<DpTable> {
    let width = budget
        .checked_add(1)
        .ok_or(WarbandError::InvalidBudget(max_points))?;
    let mut table =
        DpTable::new(units.len() + 1, width).ok_or(WarbandError::InvalidBudget(max_points))?;

    for (offset, unit) in units.iter().enumerate() {
        let row = offset + 1;
        let cost = unit.point_cost as usize;
        let value = unit.effectiveness();
        for points in 0..width {
            let skip = table.get(row - 1, points);
            let best = if cost > points {
                skip
            } else {
                skip.max(table.get(row - 1, points - cost) + value)
            };
            table.set(row, points, best);
        }
    }

    Ok(table)
}

fn reconstruct(units: &[Arc<Unit>], table: &DpTable, budget: usize) -> Army {
    let mut army = Army::new();
    let mut points = budget;
    let mut row = units.len();

    while row > 0 && points > 0 {
        if table.get(row, points) != table.get(row - 1, points) {
            let unit = &units[row - 1];
            army.add_unit(Arc::clone(unit));
            points -= unit.point_cost as usize;
        }
        row -= 1;
    }

    army
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit with effectiveness exactly `effectiveness` (speed 1, no wounds, one damage source).
    fn unit(name: &str, cost: i32, effectiveness: u32) -> Arc<Unit> {
        Arc::new(Unit::new(name, 1, 0, 0.0, 1.0, effectiveness, 0.0, 0, cost))
    }

    #[test]
    fn picks_single_better_unit_when_both_exceed_budget() {
        let units = vec![unit("Cheap", 80, 100), unit("Dear", 120, 140)];
        let army = optimize(&units, 150).unwrap();
        assert_eq!(army.unit_names(), ["Dear"]);
        assert_eq!(army.total_points(), 120);
    }

    #[test]
    fn empty_inputs_give_empty_army() {
        assert!(optimize(&[], 500).unwrap().is_empty());
        assert!(optimize(&[unit("A", 10, 10)], 0).unwrap().is_empty());
    }

    #[test]
    fn negative_budget_is_rejected() {
        let err = optimize(&[unit("A", 10, 10)], -1).unwrap_err();
        assert!(matches!(err, WarbandError::InvalidBudget(-1)));
    }

    #[test]
    fn non_positive_cost_is_rejected_even_with_zero_budget() {
        let err = optimize(&[unit("Free", 0, 10)], 0).unwrap_err();
        assert!(matches!(err, WarbandError::InvalidUnit { .. }));
    }

    #[test]
    fn duplicate_entries_are_independent_slots() {
        let marine = unit("Marine", 50, 60);
        let units = vec![Arc::clone(&marine), Arc::clone(&marine), Arc::clone(&marine)];
        let army = optimize(&units, 100).unwrap();
        assert_eq!(army.len(), 2);
        assert_eq!(army.total_points(), 100);
    }

    #[test]
    fn backward_scan_keeps_earlier_slot_on_ties() {
        // Row 2 equals row 1 at budget 10, so the later slot is skipped.
        let units = vec![unit("First", 10, 50), unit("Second", 10, 50)];
        let army = optimize(&units, 10).unwrap();
        assert_eq!(army.unit_names(), ["First"]);
    }

    #[test]
    fn selection_is_listed_from_last_slot_backwards() {
        let units = vec![unit("A", 10, 10), unit("B", 10, 20), unit("C", 10, 30)];
        let army = optimize(&units, 30).unwrap();
        assert_eq!(army.unit_names(), ["C", "B", "A"]);
    }

    #[test]
    fn default_codex_at_150_points() {
        let codex = crate::data::catalog::Catalog::default_codex();
        let army = optimize(codex.units(), 150).unwrap();
        // Marine + Scout (140 pts) beats any single unit within 150.
        assert_eq!(army.unit_names(), ["Scout", "Marine"]);
        assert!(army.total_points() <= 150);
    }

    #[test]
    fn huge_budget_is_capped_at_catalog_cost() {
        let codex = crate::data::catalog::Catalog::default_codex();
        let army = optimize(codex.units(), i64::MAX).unwrap();
        assert_eq!(army, optimize(codex.units(), 350).unwrap());
        assert_eq!(army.len(), 4);
        assert_eq!(army.total_points(), 350);

        let best = optimal_effectiveness(codex.units(), i64::MAX).unwrap();
        assert!((best - army.total_effectiveness()).abs() < 1e-9);
    }

    #[test]
    fn capped_budget_keeps_tie_breaking() {
        let units = vec![unit("First", 10, 50), unit("Second", 10, 50), unit("Third", 30, 0)];
        let capped = optimize(&units, 1_000_000).unwrap();
        assert_eq!(capped, optimize(&units, 50).unwrap());
        assert_eq!(capped.unit_names(), ["Second", "First"]);
    }

    #[test]
    fn optimal_effectiveness_matches_reconstructed_army() {
        let codex = crate::data::catalog::Catalog::default_codex();
        for budget in [0, 59, 60, 150, 350] {
            let army = optimize(codex.units(), budget).unwrap();
            let best = optimal_effectiveness(codex.units(), budget).unwrap();
            assert!((army.total_effectiveness() - best).abs() < 1e-9, "budget {budget}");
        }
    }
}
