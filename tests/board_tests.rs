use proptest::prelude::*;

use ilokalama::{
    action::{Action, ActionError},
    board::Board,
    grid::{Direction, Position, Size},
    module::ModuleKind,
    pulse::Pulse,
};

fn place(board: &mut Board, kind: &str, x: i32, y: i32) {
    board.apply(&Action::change_type(kind), Position::new(x, y)).unwrap();
}

fn set(board: &mut Board, x: i32, y: i32, changes: &[(&str, &str)]) {
    let changes = changes
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    board.apply(&Action::ChangeProperty(changes), Position::new(x, y)).unwrap();
}

fn pulses(board: &Board) -> Vec<Pulse> {
    board.pulses().copied().collect()
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(Size::new(4, 3));

    assert_eq!(board.size(), Size::new(4, 3));
    assert_eq!(board.modules().iter().count(), 12);
    assert!(board.modules().iter().all(|(p, m)| m.kind() == ModuleKind::Empty && m.position() == p));
    assert_eq!(board.active().count(), 0);
    assert_eq!(board.pulses().count(), 0);
}

#[test]
fn test_apply_tracks_active_modules() {
    let mut board = Board::new(Size::new(3, 3));
    let at = Position::new(1, 2);

    place(&mut board, "emitter", 1, 2);
    assert!(board.is_active(at));

    place(&mut board, "spreader", 1, 2);
    assert!(!board.is_active(at));
    assert_eq!(board.get_name_at(at), Some("spreader"));

    place(&mut board, "emitter", 1, 2);
    let undo = board.apply(&Action::change_type("empty"), at).unwrap();
    assert!(!board.is_active(at));

    board.revert(&undo, at).unwrap();
    assert!(board.is_active(at));
    assert_eq!(board.get_name_at(at), Some("emitter"));
}

#[test]
fn test_failed_apply_leaves_cell_alone() {
    let mut board = Board::new(Size::new(3, 3));
    let at = Position::new(0, 0);

    place(&mut board, "emitter", 0, 0);

    assert!(board.apply(&Action::change_type("output"), at).is_err());
    assert!(board.apply(&Action::change_property("interval", "x"), at).is_err());
    assert!(board.is_active(at));
    assert_eq!(board.get_prop_at(at)["interval"].value, "5");

    assert_eq!(
        board.apply(&Action::change_type("emitter"), Position::new(3, 0)),
        Err(ActionError::OutOfBounds(Position::new(3, 0)))
    );
}

#[test]
fn test_emitter_pulse_travels_and_leaves() {
    let mut board = Board::new(Size::new(5, 5));

    place(&mut board, "emitter", 2, 2);

    board.update(0);
    // emitted this tick, not routed yet
    assert_eq!(pulses(&board), vec![Pulse::new(Position::new(2, 2), Direction::Up)]);

    board.update(1);
    assert_eq!(pulses(&board), vec![Pulse::new(Position::new(2, 1), Direction::Up)]);

    board.update(2);
    assert_eq!(pulses(&board), vec![Pulse::new(Position::new(2, 0), Direction::Up)]);

    board.update(3);
    assert!(pulses(&board).is_empty());
}

#[test]
fn test_out_of_bounds_pulses_are_dropped() {
    let mut board = Board::new(Size::new(3, 3));

    assert!(board.add_pulse(Pulse::new(Position::new(2, 1), Direction::Right)));
    assert!(board.add_pulse(Pulse::new(Position::new(0, 0), Direction::Up)));
    assert!(board.add_pulse(Pulse::new(Position::new(1, 1), Direction::Down)));
    assert!(!board.add_pulse(Pulse::new(Position::new(3, 1), Direction::Down)));

    board.update(1);

    assert_eq!(pulses(&board), vec![Pulse::new(Position::new(1, 2), Direction::Down)]);
}

#[test]
fn test_spreader_on_board() {
    let mut board = Board::new(Size::new(5, 5));

    place(&mut board, "spreader", 2, 2);
    set(
        &mut board,
        2,
        2,
        &[
            ("up_is_input", "false"),
            ("left_is_input", "false"),
            ("right_is_input", "false"),
            ("up_is_output", "true"),
        ],
    );

    board.add_pulse(Pulse::new(Position::new(2, 2), Direction::Down));
    board.update(1);

    let next = pulses(&board);

    assert_eq!(next.len(), 2);
    assert!(next.contains(&Pulse::new(Position::new(3, 2), Direction::Right)));
    assert!(next.contains(&Pulse::new(Position::new(2, 1), Direction::Up)));
}

#[test]
fn test_identical_pulses_collapse() {
    let mut board = Board::new(Size::new(3, 3));

    // default spreader: every input, right output
    place(&mut board, "spreader", 0, 1);

    assert!(board.add_pulse(Pulse::new(Position::new(0, 1), Direction::Down)));
    assert!(board.add_pulse(Pulse::new(Position::new(0, 1), Direction::Right)));
    assert!(!board.add_pulse(Pulse::new(Position::new(0, 1), Direction::Right)));

    board.update(1);

    assert_eq!(pulses(&board), vec![Pulse::new(Position::new(1, 1), Direction::Right)]);
}

#[test]
fn test_crossing_pulses_coexist() {
    let mut board = Board::new(Size::new(3, 3));

    board.add_pulse(Pulse::new(Position::new(0, 1), Direction::Right));
    board.add_pulse(Pulse::new(Position::new(1, 0), Direction::Down));
    board.update(1);

    assert_eq!(
        pulses(&board),
        vec![
            Pulse::new(Position::new(1, 1), Direction::Right),
            Pulse::new(Position::new(1, 1), Direction::Down),
        ]
    );
}

#[test]
fn test_emitter_feeding_spreader() {
    let mut board = Board::new(Size::new(5, 5));

    place(&mut board, "emitter", 2, 4);
    set(&mut board, 2, 4, &[("interval", "100")]);
    place(&mut board, "spreader", 2, 2);
    set(&mut board, 2, 2, &[("left_is_output", "true")]);

    board.update(0);
    board.update(1);
    board.update(2);
    assert_eq!(pulses(&board), vec![Pulse::new(Position::new(2, 2), Direction::Up)]);

    board.update(3);
    assert_eq!(
        pulses(&board),
        vec![
            Pulse::new(Position::new(1, 2), Direction::Left),
            Pulse::new(Position::new(3, 2), Direction::Right),
        ]
    );
}

proptest! {
    #[test]
    fn active_set_matches_modules(edits in prop::collection::vec((0i32..4, 0i32..4, 0usize..3), 0..40)) {
        let mut board = Board::new(Size::new(4, 4));

        for (x, y, kind) in edits {
            let kind = ModuleKind::ALL[kind];

            board.apply(&Action::change_type(kind.name()), Position::new(x, y)).unwrap();

            for (position, module) in board.modules() {
                prop_assert_eq!(board.is_active(position), module.active());
            }
        }
    }
}
