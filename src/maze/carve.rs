use rand::Rng;

use crate::core::error::{KernelError, KernelResult};

use super::{
    direction::{random_direction_order, Coordinates, Direction},
    wall_grid::WallGrid,
};

/// One cell on the depth-first path, along with the order in which its
/// neighbors are tried and how many of them have been tried so far.
struct Frame {
    coords: Coordinates,
    order: &'static [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(grid: &mut WallGrid, coords: Coordinates, rng: &mut R) -> Frame {
        grid.mark_visited(coords);
        Frame {
            coords,
            order: random_direction_order(rng),
            next: 0,
        }
    }
}

/**
 * Randomized depth-first traversal that carves a perfect maze out of `grid`.
 *
 * Each cell draws a random ordering of the four directions when it is first
 * entered, then tries its neighbors in that order, descending into any that
 * are in bounds and not yet visited. The path is kept on an explicit stack so
 * that large grids cannot overflow the native call stack; the visit order (and
 * so the maze) is the same as the recursive formulation for the same sequence
 * of random draws.
 *
 * @return: number of passages carved, which is `cell_count - 1` on a fresh grid.
 */
pub fn carve<R: Rng + ?Sized>(
    grid: &mut WallGrid,
    start: Coordinates,
    rng: &mut R,
) -> KernelResult<usize> {
    if !grid.valid(start) {
        return Err(KernelError::invalid_dimension(
            "start",
            format!("({}, {})", start.x, start.y),
        ));
    }

    let mut carved = 0;
    let mut stack = vec![Frame::enter(grid, start, rng)];
    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.order.len() {
            stack.pop();
            continue;
        }
        let direction = frame.order[frame.next];
        frame.next += 1;

        let coords = frame.coords;
        let neighbor = coords.step(direction);
        if grid.valid(neighbor) && !grid.visited(neighbor) {
            grid.clear_walls(coords, neighbor, direction);
            carved += 1;
            stack.push(Frame::enter(grid, neighbor, rng));
        }
    }
    Ok(carved)
}
