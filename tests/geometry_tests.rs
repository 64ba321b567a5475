use proptest::prelude::*;

use ilokalama::{
    grid::{Direction, Grid, Position, Size},
    pulse::Pulse,
};

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

#[test]
fn test_direction_vectors() {
    let origin = Position::new(3, 3);

    assert_eq!(origin + Direction::Up, Position::new(3, 2));
    assert_eq!(origin + Direction::Down, Position::new(3, 4));
    assert_eq!(origin + Direction::Left, Position::new(2, 3));
    assert_eq!(origin + Direction::Right, Position::new(4, 3));
}

#[test]
fn test_is_inner() {
    let size = Size::new(4, 3);

    assert!(Position::new(0, 0).is_inner(size));
    assert!(Position::new(3, 2).is_inner(size));
    assert!(!Position::new(4, 2).is_inner(size));
    assert!(!Position::new(3, 3).is_inner(size));
    assert!(!Position::new(-1, 0).is_inner(size));
    assert!(!Position::new(0, -1).is_inner(size));
}

#[test]
fn test_crop_clamps_each_axis() {
    let size = Size::new(5, 4);

    assert_eq!(Position::new(-3, 2).crop(size), Position::new(0, 2));
    assert_eq!(Position::new(7, 9).crop(size), Position::new(4, 3));
    assert_eq!(Position::new(2, 1).crop(size), Position::new(2, 1));
}

#[test]
fn test_size_from_str() {
    assert_eq!("20x12".parse::<Size>().unwrap(), Size::new(20, 12));
    assert!("20".parse::<Size>().is_err());
    assert!("ax3".parse::<Size>().is_err());
    assert!("0x3".parse::<Size>().is_err());
    assert!("3000000000x1".parse::<Size>().is_err());
    assert!(format!("1x{}", i32::MAX as u64 + 1).parse::<Size>().is_err());
}

#[test]
fn test_grid_iterates_row_major() {
    let grid = Grid::new(Size::new(2, 2), &mut |p| p.x + p.y * 10);
    let items: Vec<_> = grid.iter().map(|(p, v)| (p, *v)).collect();

    assert_eq!(
        items,
        vec![
            (Position::new(0, 0), 0),
            (Position::new(1, 0), 1),
            (Position::new(0, 1), 10),
            (Position::new(1, 1), 11),
        ]
    );
    assert!(grid.get(Position::new(2, 0)).is_none());
}

#[test]
fn test_grid_replace() {
    let mut grid = Grid::new(Size::new(2, 1), &mut |_| 'a');

    assert_eq!(grid.replace(Position::new(1, 0), 'b'), Ok('a'));
    assert_eq!(grid.get(Position::new(1, 0)), Some(&'b'));
    assert!(grid.replace(Position::new(2, 0), 'c').is_err());
}

proptest! {
    #[test]
    fn move_is_vector_addition(x in -1000i32..1000, y in -1000i32..1000, d in direction()) {
        let p = Position::new(x, y);
        let v = d.vector();

        prop_assert_eq!(p.moved(d), Position::new(x + v.x, y + v.y));
    }

    #[test]
    fn pulse_lands_after_n_steps(x in -1000i32..1000, y in -1000i32..1000, d in direction(), n in 0i32..64) {
        let start = Position::new(x, y);
        let mut pulse = Pulse::new(start, d);

        for _ in 0..n {
            pulse.step();
        }

        prop_assert_eq!(pulse.position, start + d.vector() * n);
        prop_assert_eq!(pulse.direction, d);
    }

    #[test]
    fn crop_is_idempotent_and_inside(x in -100i32..100, y in -100i32..100, w in 1usize..40, h in 1usize..40) {
        let size = Size::new(w, h);
        let cropped = Position::new(x, y).crop(size);

        prop_assert_eq!(cropped.crop(size), cropped);
        prop_assert!(cropped.is_inner(size));
    }
}
