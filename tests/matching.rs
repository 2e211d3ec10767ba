//! Validates snap matching, rotation handling, and commit behavior

use snapgrid::algorithm::block::{Block, DEFAULT_ROTATIONS, Rotation};
use snapgrid::algorithm::hitset::HitSet;
use snapgrid::algorithm::indicator::{IndicatorTint, SnapIndicator};
use snapgrid::algorithm::matcher::{SnapResult, evaluate_snap};
use snapgrid::algorithm::overlap::ContactTracker;
use snapgrid::algorithm::session::{CommitResult, DragSession, OverlapEvent};
use snapgrid::spatial::board::{Board, BoardConfig};
use snapgrid::spatial::cell::{Cell, CellCoord};
use snapgrid::spatial::scene::{FixedHost, NullCellVisual};

/// Records indicator updates so tests can watch the presentation flow
#[derive(Default)]
struct RecordingIndicator {
    visible: bool,
    placements: Vec<[f64; 2]>,
    tints: Vec<IndicatorTint>,
}

impl SnapIndicator for RecordingIndicator {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn place(&mut self, position: [f64; 2], _rotation: Rotation) {
        self.placements.push(position);
    }

    fn tint(&mut self, tint: IndicatorTint) {
        self.tints.push(tint);
    }
}

fn test_board() -> Board {
    let host = FixedHost::new([0.0, 0.0], [1.0, 1.0]);
    match Board::generate(BoardConfig::default(), &host) {
        Ok(board) => board,
        Err(err) => unreachable!("default config should generate: {err}"),
    }
}

fn domino() -> Block {
    match Block::from_cell_offsets(&[[0, 0], [1, 0]], [1.0, 1.0], DEFAULT_ROTATIONS.to_vec()) {
        Ok(block) => block,
        Err(err) => unreachable!("domino should build: {err}"),
    }
}

fn l_tromino() -> Block {
    match Block::from_cell_offsets(
        &[[0, 0], [1, 0], [0, 1]],
        [1.0, 1.0],
        DEFAULT_ROTATIONS.to_vec(),
    ) {
        Ok(block) => block,
        Err(err) => unreachable!("tromino should build: {err}"),
    }
}

/// Aim the pivot at the centroid of the given cells
fn aim_at(board: &Board, block: &mut Block, cells: &[CellCoord]) {
    let count = cells.len() as f64;
    let mut pivot = [0.0, 0.0];
    for coord in cells {
        let Some(cell) = board.cell_at(coord.row as i32, coord.column as i32) else {
            unreachable!("target cell {coord:?} should exist");
        };
        pivot[0] += cell.position()[0] / count;
        pivot[1] += cell.position()[1] / count;
    }
    block.move_to(pivot);
}

fn hits_for(cells: &[CellCoord]) -> HitSet {
    let mut hits = HitSet::new();
    for coord in cells {
        hits.begin(*coord);
    }
    hits
}

#[test]
fn test_domino_snaps_onto_two_free_cells() {
    let board = test_board();
    let mut block = domino();
    let targets = [CellCoord::new(0, 0), CellCoord::new(0, 1)];
    aim_at(&board, &mut block, &targets);
    let hits = hits_for(&targets);

    match evaluate_snap(&board, &block, &hits) {
        SnapResult::Snapped { cells, mean, legal } => {
            assert!(legal, "both cells are free");
            assert_eq!(cells.len(), 2);
            assert!(cells.contains(&targets[0]) && cells.contains(&targets[1]));
            assert!((mean[0] - 0.5).abs() < 1e-9);
            assert!(mean[1].abs() < 1e-9);
        }
        SnapResult::Unsnapped => unreachable!("aligned domino should snap"),
    }
}

#[test]
fn test_occupied_target_makes_the_snap_illegal_but_not_unsnapped() {
    let mut board = test_board();
    let mut visual = NullCellVisual;
    board.set_occupation(CellCoord::new(0, 1), true, &mut visual);

    let mut block = domino();
    let targets = [CellCoord::new(0, 0), CellCoord::new(0, 1)];
    aim_at(&board, &mut block, &targets);
    let hits = hits_for(&targets);

    match evaluate_snap(&board, &block, &hits) {
        SnapResult::Snapped { legal, .. } => assert!(!legal),
        SnapResult::Unsnapped => unreachable!("geometry still matches"),
    }
}

#[test]
fn test_too_few_contacts_is_an_immediate_miss() {
    let board = test_board();
    let mut block = domino();
    let targets = [CellCoord::new(0, 0), CellCoord::new(0, 1)];
    aim_at(&board, &mut block, &targets);
    let hits = hits_for(&[targets[0]]);

    assert_eq!(evaluate_snap(&board, &block, &hits), SnapResult::Unsnapped);
}

#[test]
fn test_scattered_contacts_fail_layout_validation() {
    let board = test_board();
    let mut block = domino();
    let targets = [CellCoord::new(0, 0), CellCoord::new(0, 1)];
    aim_at(&board, &mut block, &targets);
    // Two contacts, but far from a domino's footprint
    let hits = hits_for(&[CellCoord::new(0, 0), CellCoord::new(4, 4)]);

    assert_eq!(evaluate_snap(&board, &block, &hits), SnapResult::Unsnapped);
}

#[test]
fn test_rotation_changes_which_layout_is_accepted() {
    let board = test_board();
    let mut block = l_tromino();

    // Cells forming the quarter-turned tromino around (2, 2)
    let rotated_targets = [
        CellCoord::new(2, 2),
        CellCoord::new(3, 2),
        CellCoord::new(2, 1),
    ];
    aim_at(&board, &mut block, &rotated_targets);
    let hits = hits_for(&rotated_targets);

    assert_eq!(
        evaluate_snap(&board, &block, &hits),
        SnapResult::Unsnapped,
        "upright tromino should reject the rotated footprint"
    );

    block.toggle_rotation();
    match evaluate_snap(&board, &block, &hits) {
        SnapResult::Snapped { legal, .. } => assert!(legal),
        SnapResult::Unsnapped => unreachable!("rotated tromino should accept it"),
    }
}

#[test]
fn test_upright_footprint_is_rejected_after_rotating() {
    let board = test_board();
    let mut block = l_tromino();

    let upright_targets = [
        CellCoord::new(2, 2),
        CellCoord::new(2, 3),
        CellCoord::new(3, 2),
    ];
    aim_at(&board, &mut block, &upright_targets);
    let hits = hits_for(&upright_targets);

    assert!(evaluate_snap(&board, &block, &hits).is_snapped());
    block.toggle_rotation();
    assert_eq!(evaluate_snap(&board, &block, &hits), SnapResult::Unsnapped);
}

#[test]
fn test_extra_contacts_are_ignored_by_greedy_assignment() {
    let board = test_board();
    let mut block = domino();
    let targets = [CellCoord::new(5, 5), CellCoord::new(5, 6)];
    aim_at(&board, &mut block, &targets);
    // Neighbors brushed during the drag alongside the real footprint
    let hits = hits_for(&[
        CellCoord::new(4, 5),
        CellCoord::new(5, 5),
        CellCoord::new(5, 6),
        CellCoord::new(6, 6),
    ]);

    match evaluate_snap(&board, &block, &hits) {
        SnapResult::Snapped { cells, legal, .. } => {
            assert!(legal);
            assert!(cells.contains(&targets[0]) && cells.contains(&targets[1]));
        }
        SnapResult::Unsnapped => unreachable!("footprint is present in the contacts"),
    }
}

#[test]
fn test_session_commits_exactly_the_assigned_cells() {
    let mut board = test_board();
    let mut visual = NullCellVisual;
    let mut indicator = RecordingIndicator::default();

    let mut block = domino();
    let targets = [CellCoord::new(7, 3), CellCoord::new(7, 4)];
    aim_at(&board, &mut block, &targets);

    let mut session = DragSession::begin(block);
    for (sub_cell, coord) in targets.iter().enumerate() {
        session.push_overlap(OverlapEvent::Begin {
            sub_cell,
            cell: *coord,
        });
    }

    assert!(session.tick(&board, &mut indicator).is_legal());
    assert!(indicator.visible);
    assert_eq!(indicator.tints.last(), Some(&IndicatorTint::Available));

    match session.release(&mut board, &mut visual, &mut indicator) {
        CommitResult::Committed(cells) => {
            assert_eq!(cells.len(), 2);
        }
        CommitResult::Discarded => unreachable!("legal snap should commit"),
    }
    assert!(!indicator.visible);
    assert_eq!(board.occupied_count(), 2);
    for coord in targets {
        assert!(
            board
                .cell_at(coord.row as i32, coord.column as i32)
                .is_some_and(Cell::is_occupied)
        );
    }
}

#[test]
fn test_release_without_a_legal_snap_discards() {
    let mut board = test_board();
    let mut visual = NullCellVisual;
    let mut indicator = RecordingIndicator::default();

    let mut session = DragSession::begin(domino());
    session.push_overlap(OverlapEvent::Begin {
        sub_cell: 0,
        cell: CellCoord::new(0, 0),
    });
    session.tick(&board, &mut indicator);

    assert_eq!(
        session.release(&mut board, &mut visual, &mut indicator),
        CommitResult::Discarded
    );
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_blocked_snap_shows_the_indicator_but_never_commits() {
    let mut board = test_board();
    let mut visual = NullCellVisual;
    let mut indicator = RecordingIndicator::default();
    board.set_occupation(CellCoord::new(7, 3), true, &mut visual);

    let mut block = domino();
    let targets = [CellCoord::new(7, 3), CellCoord::new(7, 4)];
    aim_at(&board, &mut block, &targets);

    let mut session = DragSession::begin(block);
    for (sub_cell, coord) in targets.iter().enumerate() {
        session.push_overlap(OverlapEvent::Begin {
            sub_cell,
            cell: *coord,
        });
    }
    session.tick(&board, &mut indicator);
    assert!(indicator.visible);
    assert_eq!(indicator.tints.last(), Some(&IndicatorTint::Blocked));

    assert_eq!(
        session.release(&mut board, &mut visual, &mut indicator),
        CommitResult::Discarded
    );
    assert_eq!(board.occupied_count(), 1, "only the pre-occupied cell");
}

#[test]
fn test_abandon_clears_contacts_and_hides_the_indicator() {
    let board = test_board();
    let mut indicator = RecordingIndicator::default();

    let mut block = domino();
    let targets = [CellCoord::new(1, 1), CellCoord::new(1, 2)];
    aim_at(&board, &mut block, &targets);

    let mut session = DragSession::begin(block);
    for (sub_cell, coord) in targets.iter().enumerate() {
        session.push_overlap(OverlapEvent::Begin {
            sub_cell,
            cell: *coord,
        });
    }
    assert!(session.tick(&board, &mut indicator).is_snapped());

    session.abandon(&mut indicator);
    assert!(!indicator.visible);
    assert_eq!(*session.last_result(), SnapResult::Unsnapped);
    assert_eq!(*session.tick(&board, &mut indicator), SnapResult::Unsnapped);
}

#[test]
fn test_contact_tracker_emits_paired_begin_end_events() {
    let board = test_board();
    let mut block = domino();
    let targets = [CellCoord::new(4, 4), CellCoord::new(4, 5)];
    aim_at(&board, &mut block, &targets);

    let mut tracker = ContactTracker::new();
    let first = tracker.diff(&block, &board);
    let begins = first
        .iter()
        .filter(|event| matches!(event, OverlapEvent::Begin { .. }))
        .count();
    assert_eq!(begins, 2, "one begin per sub-cell on a centered pose");
    assert_eq!(begins, first.len(), "no ends on the first frame");

    // Drag far away: every contact ends
    block.move_to([100.0, 100.0]);
    let second = tracker.diff(&block, &board);
    let ends = second
        .iter()
        .filter(|event| matches!(event, OverlapEvent::End { .. }))
        .count();
    assert_eq!(ends, 2);
    assert_eq!(ends, second.len());
}

#[test]
fn test_tracker_fed_session_commits_through_the_full_pipeline() {
    let mut board = test_board();
    let mut visual = NullCellVisual;
    let mut indicator = RecordingIndicator::default();

    let mut block = domino();
    let targets = [CellCoord::new(2, 6), CellCoord::new(2, 7)];
    aim_at(&board, &mut block, &targets);

    let mut session = DragSession::begin(block);
    let mut tracker = ContactTracker::new();
    for event in tracker.diff(session.block(), &board) {
        session.push_overlap(event);
    }
    assert!(session.tick(&board, &mut indicator).is_legal());

    match session.release(&mut board, &mut visual, &mut indicator) {
        CommitResult::Committed(cells) => assert_eq!(cells.len(), 2),
        CommitResult::Discarded => unreachable!("aligned pose should commit"),
    }
}
