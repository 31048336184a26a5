use std::cmp::Reverse;
use std::collections::HashMap;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};
use thousands::Separable;

use crate::entities::{CuttingParameters, Material, MaterialCatalog, Piece, Sheet, SheetLayout, UnitPiece};
use crate::error::{OptimizeError, OptimizeResult};
use crate::packing::placement::{self, Orientation};
use crate::packing::Solution;
use crate::util::OptimizerConfig;
use crate::util::assertions;

/// Greedy multi-sheet packer.
///
/// Unit pieces are offered in order of descending priority and area to one sheet at a time.
/// A new sheet of a material is only opened once the previous one cannot take any of the remaining pieces.
#[derive(Clone, Copy, Debug, Default)]
pub struct Orchestrator {
    pub config: OptimizerConfig,
}

impl Orchestrator {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Packs `pieces` onto sheets of the materials they reference.
    /// Fails before any placement if the input is invalid. Pieces that do not fit are reported as unplaced.
    pub fn solve<C: MaterialCatalog + ?Sized>(
        &self,
        pieces: &[Piece],
        catalog: &C,
        params: &CuttingParameters,
    ) -> OptimizeResult<Solution> {
        let start = Instant::now();
        let materials = Self::validate(pieces, catalog, params)?;

        let units = pieces
            .iter()
            .flat_map(Piece::expand)
            .sorted_by_key(|u| (Reverse(u.priority), Reverse(u.area())))
            .collect_vec();
        let n_units = units.len();

        info!(
            "[OPT] packing {} unit pieces ({} mm² in total) over {} material(s)",
            n_units,
            units.iter().map(UnitPiece::area).sum::<u64>().separate_with_commas(),
            materials.len()
        );

        let mut layouts = vec![];
        let mut unplaced = vec![];
        for (code, group) in Self::group_by_material(units) {
            let material = materials[code.as_str()];
            let (sheets, rejected) = self.pack_material(material, group, params)?;
            layouts.extend(sheets);
            unplaced.extend(rejected);
        }

        let solution = Solution {
            layouts,
            unplaced,
            elapsed: start.elapsed(),
        };
        debug_assert!(assertions::solution_accounts_for_all_units(&solution, n_units));

        info!(
            "[OPT] finished in {:.3}ms: {} sheet(s), {}/{} pieces placed, efficiency {:.1}%",
            solution.elapsed.as_secs_f64() * 1000.0,
            solution.n_sheets(),
            solution.n_placed(),
            n_units,
            solution.efficiency() * 100.0
        );
        Ok(solution)
    }

    /// Checks the whole request, returns the referenced materials by code.
    fn validate<'a, C: MaterialCatalog + ?Sized>(
        pieces: &[Piece],
        catalog: &'a C,
        params: &CuttingParameters,
    ) -> OptimizeResult<HashMap<&'a str, &'a Material>> {
        if pieces.is_empty() {
            return Err(OptimizeError::EmptyInput);
        }
        let mut materials = HashMap::new();
        for piece in pieces {
            piece.validate()?;
            let material = catalog.material_by_code(&piece.material).ok_or_else(|| {
                OptimizeError::UnknownMaterial {
                    piece: piece.id.clone(),
                    material: piece.material.clone(),
                }
            })?;
            if !materials.contains_key(material.code.as_str()) {
                material.validate()?;
                params.usable_rect(material)?;
                materials.insert(material.code.as_str(), material);
            }
        }
        Ok(materials)
    }

    /// Splits the sorted units into per-material groups, in order of first appearance.
    fn group_by_material(units: Vec<UnitPiece>) -> Vec<(String, Vec<UnitPiece>)> {
        let mut groups: Vec<(String, Vec<UnitPiece>)> = vec![];
        for unit in units {
            match groups.iter_mut().find(|(code, _)| *code == unit.material) {
                Some((_, group)) => group.push(unit),
                None => groups.push((unit.material.clone(), vec![unit])),
            }
        }
        groups
    }

    /// Fills sheets of `material` until every unit is placed, no progress is made or the sheet limit is hit.
    fn pack_material(
        &self,
        material: &Material,
        units: Vec<UnitPiece>,
        params: &CuttingParameters,
    ) -> OptimizeResult<(Vec<SheetLayout>, Vec<UnitPiece>)> {
        let usable = params.usable_rect(material)?;
        let (mut pending, mut unplaced): (Vec<_>, Vec<_>) =
            units.into_iter().partition(|unit| {
                Orientation::candidates(unit)
                    .iter()
                    .any(|o| usable.fits(o.width, o.height))
            });
        for unit in &unplaced {
            debug!(
                "[OPT] {} ({}x{}) can never fit on material {}",
                unit.id, unit.width, unit.height, material.code
            );
        }

        let mut layouts = vec![];
        while !pending.is_empty() && layouts.len() < self.config.max_sheets {
            let mut sheet = Sheet::new(material, layouts.len() + 1, params, &self.config)?;
            let mut remaining = vec![];
            for unit in pending {
                match placement::place(&unit, &mut sheet) {
                    Some(p) => debug!(
                        "[OPT] placed {} at ({}, {}) on {}#{}{}",
                        p.piece_id,
                        p.x,
                        p.y,
                        material.code,
                        layouts.len() + 1,
                        if p.rotated { " (rotated)" } else { "" }
                    ),
                    None => remaining.push(unit),
                }
            }
            pending = remaining;
            if sheet.is_empty() {
                break;
            }
            layouts.push(sheet.into_layout());
        }

        if !pending.is_empty() {
            info!(
                "[OPT] {} piece(s) of material {} left unplaced after {} sheet(s)",
                pending.len(),
                material.code,
                layouts.len()
            );
        }
        unplaced.extend(pending);
        Ok((layouts, unplaced))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::GrainDirection;
    use crate::packing::SplitRule;
    use test_case::test_case;

    fn catalog() -> Vec<Material> {
        vec![
            Material::new("MDF", 1000, 500),
            Material::new("OAK", 600, 600).with_grain(Some(GrainDirection::Vertical)),
        ]
    }

    #[test]
    fn empty_demand_is_rejected() {
        let result = Orchestrator::default().solve(&[], &catalog(), &CuttingParameters::default());
        assert_eq!(result.unwrap_err(), OptimizeError::EmptyInput);
    }

    #[test]
    fn unknown_material_is_rejected() {
        let pieces = [Piece::new("a", "MDF", 10, 10), Piece::new("b", "PINE", 10, 10)];
        let result = Orchestrator::default().solve(&pieces, &catalog(), &CuttingParameters::default());
        assert_eq!(
            result.unwrap_err(),
            OptimizeError::UnknownMaterial {
                piece: "b".into(),
                material: "PINE".into()
            }
        );
    }

    #[test]
    fn infeasible_trims_are_rejected() {
        let params = CuttingParameters {
            top_trim: 300,
            bottom_trim: 300,
            ..Default::default()
        };
        let pieces = [Piece::new("a", "OAK", 10, 10)];
        let result = Orchestrator::default().solve(&pieces, &catalog(), &params);
        assert!(matches!(
            result,
            Err(OptimizeError::InfeasibleParameters { material, .. }) if material == "OAK"
        ));
    }

    #[test]
    fn priority_takes_precedence_over_area() {
        // only one of the two fits on the single allowed sheet
        let pieces = [
            Piece::new("big", "MDF", 1000, 400),
            Piece::new("urgent", "MDF", 1000, 300).with_priority(1),
        ];
        let config = OptimizerConfig {
            max_sheets: 1,
            ..Default::default()
        };
        let solution = Orchestrator::new(config)
            .solve(&pieces, &catalog(), &CuttingParameters::default())
            .unwrap();
        assert_eq!(solution.layouts[0].placed[0].piece_id, "urgent");
        assert_eq!(solution.unplaced.len(), 1);
        assert_eq!(solution.unplaced[0].id, "big");
    }

    #[test]
    fn sheets_are_opened_until_everything_is_placed() {
        let pieces = [Piece::new("half", "MDF", 500, 500).with_quantity(5)];
        let solution = Orchestrator::default()
            .solve(&pieces, &catalog(), &CuttingParameters::default())
            .unwrap();
        assert_eq!(solution.n_sheets(), 3);
        assert!(solution.unplaced.is_empty());
        assert_eq!(
            solution.layouts.iter().map(|l| l.index).collect_vec(),
            vec![1, 2, 3]
        );
        assert_eq!(
            solution.layouts.iter().map(|l| l.placed.len()).collect_vec(),
            vec![2, 2, 1]
        );
    }

    #[test]
    fn sheet_limit_bounds_the_work() {
        let pieces = [Piece::new("half", "MDF", 500, 500).with_quantity(5)];
        let config = OptimizerConfig {
            max_sheets: 2,
            ..Default::default()
        };
        let solution = Orchestrator::new(config)
            .solve(&pieces, &catalog(), &CuttingParameters::default())
            .unwrap();
        assert_eq!(solution.n_sheets(), 2);
        assert_eq!(solution.unplaced.len(), 1);
        assert_eq!(solution.unplaced[0].id, "half_5");
    }

    #[test]
    fn materials_are_packed_separately_in_order_of_appearance() {
        let pieces = [
            Piece::new("shelf", "OAK", 500, 100).with_grain(Some(GrainDirection::Vertical)),
            Piece::new("panel", "MDF", 900, 400),
        ];
        let solution = Orchestrator::default()
            .solve(&pieces, &catalog(), &CuttingParameters::default())
            .unwrap();
        let codes = solution
            .sheets_per_material()
            .into_iter()
            .map(|(m, n)| (m.code.clone(), n))
            .collect_vec();
        // the MDF panel has the larger area, so MDF appears first
        assert_eq!(codes, vec![("MDF".to_string(), 1), ("OAK".to_string(), 1)]);
    }

    #[test]
    fn forced_grain_is_never_rotated() {
        // the OAK board has a vertical grain, the rail is drawn with a horizontal one
        for can_rotate in [true, false] {
            let pieces = [Piece::new("rail", "OAK", 500, 100)
                .with_grain(Some(GrainDirection::Horizontal))
                .with_rotation(can_rotate)];
            let solution = Orchestrator::default()
                .solve(&pieces, &catalog(), &CuttingParameters::default())
                .unwrap();
            assert_eq!(solution.n_sheets(), 1);
            assert!(solution.unplaced.is_empty());
            let placed = &solution.layouts[0].placed[0];
            assert!(!placed.rotated);
            assert_eq!((placed.width, placed.height), (500, 100));
        }

        // only fits the 1000x500 MDF board when turned, which a forced grain rules out
        let pieces = [Piece::new("stile", "MDF", 200, 800).with_grain(Some(GrainDirection::Vertical))];
        let solution = Orchestrator::default()
            .solve(&pieces, &catalog(), &CuttingParameters::default())
            .unwrap();
        assert_eq!(solution.n_sheets(), 0);
        assert_eq!(solution.unplaced.len(), 1);
    }

    #[test_case(SplitRule::ShorterLeftoverAxis)]
    #[test_case(SplitRule::LongerLeftoverAxis)]
    #[test_case(SplitRule::ShorterAxis)]
    #[test_case(SplitRule::LongerAxis)]
    #[test_case(SplitRule::MinimizeArea)]
    #[test_case(SplitRule::MaximizeArea)]
    fn every_split_rule_yields_valid_layouts(split_rule: SplitRule) {
        let pieces = [
            Piece::new("a", "MDF", 310, 170).with_quantity(6),
            Piece::new("b", "MDF", 120, 95).with_quantity(9),
            Piece::new("c", "MDF", 450, 60).with_quantity(4).with_rotation(false),
        ];
        let params = CuttingParameters {
            kerf: 3,
            top_trim: 5,
            bottom_trim: 5,
            left_trim: 5,
            right_trim: 5,
        };
        let config = OptimizerConfig {
            split_rule,
            ..Default::default()
        };
        let solution = Orchestrator::new(config)
            .solve(&pieces, &catalog(), &params)
            .unwrap();
        assert!(solution.unplaced.is_empty());
        for layout in &solution.layouts {
            assert!(assertions::sheet_layout_is_valid(layout, params.kerf));
        }
    }
}
