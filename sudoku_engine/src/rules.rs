//! The five deduction rules and the fixed-point driver that sequences
//! them.

use itertools::Itertools;
use log::{debug, trace};

use crate::board::Board;
use crate::cell;
use crate::error::{Contradiction, Elimination};

/// Single-candidate elimination. Every empty cell whose mask has
/// exactly one bit set is resolved to that digit, and its peers are
/// narrowed accordingly. An empty cell with an empty mask is a
/// contradiction.
fn single_candidate(board: &mut Board) -> Result<Elimination, Contradiction> {
    let mut ret = Elimination::Same;
    for idx in 0..board.len() {
        let c = board.cell(idx);
        if cell::value(c) != 0 {
            continue;
        }
        let mask = cell::candidate_mask(c);
        if mask == 0 {
            return Err(Contradiction);
        }
        if mask.count_ones() == 1 {
            let d = mask.trailing_zeros();
            board.place(idx, d);
            ret = ret.combine(board.eliminate_peers_inner(idx)?);
        }
    }
    Ok(ret)
}

/// Lone ranger / hidden single. For every empty cell and each of its
/// three units (column, then row, then box), if exactly one candidate digit
/// is unique to that cell within the unit, the cell is resolved to it.
fn lone_ranger(board: &mut Board) -> Result<Elimination, Contradiction> {
    let mut ret = Elimination::Same;
    for idx in 0..board.len() {
        if cell::value(board.cell(idx)) != 0 {
            continue;
        }
        let (r, c, b) = (board.row_of(idx), board.col_of(idx), board.box_of(idx));
        let units: [Box<dyn Iterator<Item = usize>>; 3] = [
            Box::new(board.col_indices(c)),
            Box::new(board.row_indices(r)),
            Box::new(board.box_indices(b)),
        ];

        for unit in units {
            let mut union = 0u32;
            for other in unit {
                if other == idx {
                    continue;
                }
                union |= cell::candidate_mask(board.cell(other));
            }
            let candidates = cell::candidate_mask(board.cell(idx));
            let unique = candidates & !union;
            if unique != 0 && unique.count_ones() == 1 {
                let d = unique.trailing_zeros();
                board.place(idx, d);
                ret = ret.combine(board.eliminate_peers_inner(idx)?);
                break;
            }
        }
    }
    Ok(ret)
}

/// Box-line reduction. If a digit's remaining candidates within a box
/// all lie in a single board-wide row (or column), it cannot appear
/// elsewhere in that row (or column).
fn box_line_reduction(board: &mut Board) -> Result<Elimination, Contradiction> {
    let mut ret = Elimination::Same;
    let size = board.size();

    for b in 0..size {
        let box_cells: Vec<usize> = board.box_indices(b).collect();
        for d in 1..=size as u32 {
            let mut rows = Vec::new();
            let mut cols = Vec::new();
            for &idx in &box_cells {
                let c = board.cell(idx);
                if cell::value(c) == 0 && cell::has_candidate(c, d) {
                    rows.push(board.row_of(idx));
                    cols.push(board.col_of(idx));
                }
            }
            if rows.is_empty() {
                continue;
            }
            if rows.iter().all(|&r| r == rows[0]) {
                for idx in board.row_indices(rows[0]) {
                    if box_cells.contains(&idx) || cell::value(board.cell(idx)) != 0 {
                        continue;
                    }
                    ret = ret.combine(board.eliminate_candidate(idx, d)?);
                }
            }
            if cols.iter().all(|&c| c == cols[0]) {
                for idx in board.col_indices(cols[0]) {
                    if box_cells.contains(&idx) || cell::value(board.cell(idx)) != 0 {
                        continue;
                    }
                    ret = ret.combine(board.eliminate_candidate(idx, d)?);
                }
            }
        }
    }
    Ok(ret)
}

/// Shared shape of naked twins (`k = 2`) and naked triplets (`k = 3`): for
/// each unit, find `k` empty cells whose combined candidates number
/// exactly `k` and lock those digits to exactly those cells.
fn naked_tuple(board: &mut Board, k: usize) -> Elimination {
    let mut ret = Elimination::Same;
    let size = board.size();

    let mut units: Vec<Vec<usize>> = Vec::with_capacity(3 * size);
    units.extend((0..size).map(|r| board.row_indices(r).collect()));
    units.extend((0..size).map(|b| board.box_indices(b).collect()));
    units.extend((0..size).map(|c| board.col_indices(c).collect()));

    for unit in units {
        let empties: Vec<usize> = unit
            .iter()
            .copied()
            .filter(|&idx| cell::value(board.cell(idx)) == 0)
            .collect();
        if empties.len() < k {
            continue;
        }

        for combo in empties.iter().copied().combinations(k) {
            let mut intersection = u32::MAX;
            for &idx in &combo {
                intersection &= cell::candidate_mask(board.cell(idx));
            }
            if intersection.count_ones() < k as u32 {
                continue;
            }

            let mut others_union = 0u32;
            for &idx in &empties {
                if combo.contains(&idx) {
                    continue;
                }
                others_union |= cell::candidate_mask(board.cell(idx));
            }

            let residual = intersection & !others_union;
            if residual.count_ones() != k as u32 {
                continue;
            }

            for &idx in &combo {
                if cell::candidate_mask(board.cell(idx)) != residual {
                    board.set_mask(idx, residual);
                    ret = Elimination::Eliminated;
                }
            }
        }
    }
    ret
}

/// Naked twins.
fn naked_twins(board: &mut Board) -> Elimination {
    naked_tuple(board, 2)
}

/// Naked triplets.
fn naked_triplets(board: &mut Board) -> Elimination {
    naked_tuple(board, 3)
}

/// Run the deduction rules to a fixed point. `cell_resolved` gates
/// single-candidate elimination, `choices_changed` gates the lone-ranger
/// pass; box-line reduction and the naked-tuple passes always run each
/// pass. Terminates once a full pass leaves both flags clear.
///
/// # Errors
/// Returns [`Contradiction`] as soon as any rule detects an inconsistent
/// board (an empty candidate mask, or two peers resolved to the same
/// digit).
pub(crate) fn propagate(board: &mut Board) -> Result<(), Contradiction> {
    let mut cell_resolved = true;
    let mut choices_changed = true;

    'outer: loop {
        if cell_resolved {
            cell_resolved = false;
            if single_candidate(board)?.changed() {
                cell_resolved = true;
                trace!("single-candidate elimination resolved a cell, restarting propagation");
                continue 'outer;
            }
        }

        if choices_changed {
            if lone_ranger(board)?.changed() {
                cell_resolved = true;
                trace!("lone-ranger elimination resolved a cell, restarting propagation");
                continue 'outer;
            }
        }

        choices_changed = false;
        if box_line_reduction(board)?.changed() {
            choices_changed = true;
            trace!("box-line reduction narrowed candidates, restarting propagation");
            continue 'outer;
        }

        if naked_twins(board).changed() {
            choices_changed = true;
            trace!("naked twins narrowed candidates, restarting propagation");
            continue 'outer;
        }

        if naked_triplets(board).changed() {
            choices_changed = true;
        }

        if !cell_resolved && !choices_changed {
            break;
        }
    }

    debug!("propagation reached a fixed point");
    Ok(())
}
