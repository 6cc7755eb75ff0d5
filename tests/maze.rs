use escape_maze::{
    generate_maze,
    maze::{direction::Coordinates, generate_maze_with_rng},
    MazeParams,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_generated_maze_is_perfect() {
    let _ = env_logger::builder().is_test(true).try_init();
    for (width, height) in [(1, 1), (1, 9), (15, 15), (23, 4)] {
        let maze = generate_maze(width, height, Some(42)).unwrap();
        let cell_count = (width * height) as usize;
        assert_eq!(maze.cleared_wall_pairs(), cell_count - 1);
        assert_eq!(maze.reachable_cell_count(Coordinates::new(0, 0)), cell_count);
        assert!(maze.is_perfect());
    }
}

#[test]
fn test_same_seed_same_maze() {
    let first = generate_maze(15, 15, Some(42)).unwrap();
    let second = generate_maze(15, 15, Some(42)).unwrap();
    assert_eq!(first, second);

    let mut first_ascii = Vec::new();
    let mut second_ascii = Vec::new();
    first.display(&mut first_ascii).unwrap();
    second.display(&mut second_ascii).unwrap();
    assert_eq!(first_ascii, second_ascii);
}

#[test]
fn test_different_seed_different_maze() {
    let first = generate_maze(15, 15, Some(42)).unwrap();
    let second = generate_maze(15, 15, Some(43)).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_unseeded_maze_is_perfect() {
    let maze = generate_maze(10, 8, None).unwrap();
    assert!(maze.is_perfect());
}

#[test]
fn test_caller_owned_rng_from_interior_start() {
    let mut rng = StdRng::seed_from_u64(2024);
    let maze = generate_maze_with_rng(20, 10, Coordinates::new(10, 5), &mut rng).unwrap();
    assert!(maze.is_perfect());

    // the same generator state continues to produce new mazes
    let next = generate_maze_with_rng(20, 10, Coordinates::new(10, 5), &mut rng).unwrap();
    assert!(next.is_perfect());
    assert_ne!(maze, next);
}

#[test]
fn test_params_generate_matches_entry_point() {
    let params = MazeParams {
        width: 15,
        height: 15,
        start: [0, 0],
        seed: Some(42),
    };
    assert_eq!(params.generate().unwrap(), generate_maze(15, 15, Some(42)).unwrap());
}

#[test]
fn test_invalid_maze_dimensions() {
    assert!(generate_maze(0, 5, Some(1)).is_err());
    assert!(generate_maze(5, 0, Some(1)).is_err());
}
