use escape_maze::{core::file_io::load_params, MazeParams};

/// Generate the small seeded maze and draw it to stdout.
/// ```sh
/// cargo run --example generate-maze
/// ```
pub fn main() {
    env_logger::init();
    let params: MazeParams =
        load_params("params/maze/small.json").expect("Unable to load parameters");
    let maze = params.generate().expect("Unable to generate the maze");
    maze.display(&mut std::io::stdout())
        .expect("Unable to draw the maze");
}
