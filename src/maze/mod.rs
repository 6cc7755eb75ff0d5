//! Perfect maze generation by randomized depth-first traversal over a grid of
//! wall bit sets.

pub mod carve;
pub mod direction;
pub mod wall_grid;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::error::KernelResult;

use direction::Coordinates;
use wall_grid::WallGrid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MazeParams {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub start: [u32; 2],
    /// Leave unset to draw a fresh seed from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MazeParams {
    pub fn generate(&self) -> KernelResult<WallGrid> {
        let start = Coordinates::new(self.start[0] as i32, self.start[1] as i32);
        match self.seed {
            Some(seed) => generate_maze_with_rng(
                self.width,
                self.height,
                start,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => generate_maze_with_rng(
                self.width,
                self.height,
                start,
                &mut StdRng::from_entropy(),
            ),
        }
    }
}

/// Generate a `width` x `height` perfect maze, carved from the top-left cell.
/// The same seed always yields the same maze.
pub fn generate_maze(width: u32, height: u32, seed: Option<u64>) -> KernelResult<WallGrid> {
    MazeParams {
        width,
        height,
        start: [0, 0],
        seed,
    }
    .generate()
}

/// Generate a maze using a caller-owned random number generator.
pub fn generate_maze_with_rng<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    start: Coordinates,
    rng: &mut R,
) -> KernelResult<WallGrid> {
    let mut grid = WallGrid::new(width, height)?;
    let carved = carve::carve(&mut grid, start, rng)?;
    log::info!(
        "generated {}x{} maze from ({}, {}): {} passages",
        width,
        height,
        start.x,
        start.y,
        carved
    );
    Ok(grid)
}
