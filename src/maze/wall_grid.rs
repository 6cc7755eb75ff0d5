use std::collections::VecDeque;
use std::io::{self, Write};

use crate::core::error::{KernelError, KernelResult};

use super::direction::{Coordinates, Direction, WallFlags};

/**
 * Rectangular grid of maze cells, stored row-major. Every cell starts with all
 * four walls standing and unvisited. Carving a passage clears the pair of wall
 * bits shared by two neighboring cells.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallGrid {
    width: u32,
    height: u32,
    cells: Vec<WallFlags>,
}

impl WallGrid {
    pub fn new(width: u32, height: u32) -> KernelResult<WallGrid> {
        if width == 0 {
            return Err(KernelError::invalid_dimension("maze_width", width));
        }
        if height == 0 {
            return Err(KernelError::invalid_dimension("maze_height", height));
        }
        // Coordinates are signed, so the grid must fit in an i32 per side.
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(KernelError::invalid_dimension(
                "maze_size",
                format!("{}x{}", width, height),
            ));
        }
        Ok(WallGrid {
            width,
            height,
            cells: vec![WallFlags::ALL_WALLS; (width as usize) * (height as usize)],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Bounds check
    pub fn valid(&self, coords: Coordinates) -> bool {
        coords.x >= 0
            && coords.y >= 0
            && (coords.x as u32) < self.width
            && (coords.y as u32) < self.height
    }

    fn index(&self, coords: Coordinates) -> usize {
        assert!(self.valid(coords), "coordinates {:?} are outside of the maze", coords);
        (coords.y as usize) * (self.width as usize) + (coords.x as usize)
    }

    pub fn cell(&self, coords: Coordinates) -> WallFlags {
        self.cells[self.index(coords)]
    }

    pub fn has_wall(&self, coords: Coordinates, direction: Direction) -> bool {
        self.cell(coords).contains(direction.wall())
    }

    pub fn visited(&self, coords: Coordinates) -> bool {
        self.cell(coords).contains(WallFlags::VISITED)
    }

    pub fn mark_visited(&mut self, coords: Coordinates) {
        let index = self.index(coords);
        self.cells[index].insert(WallFlags::VISITED);
    }

    /// Knock down the wall between `orig` and its neighbor `dest` in `direction`.
    pub fn clear_walls(&mut self, orig: Coordinates, dest: Coordinates, direction: Direction) {
        debug_assert_eq!(orig.step(direction), dest, "cells are not adjacent");
        let orig_index = self.index(orig);
        let dest_index = self.index(dest);
        self.cells[orig_index].remove(direction.wall());
        self.cells[dest_index].remove(direction.opposite().wall());
    }

    /// Neighbors reachable from `coords` through an open passage.
    pub fn open_neighbors(&self, coords: Coordinates) -> impl Iterator<Item = Coordinates> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let neighbor = coords.step(direction);
            if self.valid(neighbor) && !self.has_wall(coords, direction) {
                Some(neighbor)
            } else {
                None
            }
        })
    }

    /// Number of carved passages. Each passage clears one wall bit on either
    /// side, so only the east and south side of each cell is counted.
    pub fn cleared_wall_pairs(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let coords = Coordinates::new(x, y);
                for direction in [Direction::East, Direction::South] {
                    if self.valid(coords.step(direction)) && !self.has_wall(coords, direction) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Breadth-first flood fill through open passages.
    /// @return: number of distinct cells reachable from `start`, including itself.
    pub fn reachable_cell_count(&self, start: Coordinates) -> usize {
        if !self.valid(start) {
            return 0;
        }
        let mut reached = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        reached[self.index(start)] = true;
        queue.push_back(start);
        let mut count = 0;
        while let Some(coords) = queue.pop_front() {
            count += 1;
            for neighbor in self.open_neighbors(coords) {
                let index = self.index(neighbor);
                if !reached[index] {
                    reached[index] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        count
    }

    /// A perfect maze is a spanning tree: every cell is reachable, and there
    /// is exactly one fewer passage than there are cells.
    pub fn is_perfect(&self) -> bool {
        self.cleared_wall_pairs() + 1 == self.cell_count()
            && self.reachable_cell_count(Coordinates::new(0, 0)) == self.cell_count()
    }

    /// Draw the maze as ASCII art
    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut top = String::from("+");
        for x in 0..self.width as i32 {
            let coords = Coordinates::new(x, 0);
            top.push_str(if self.has_wall(coords, Direction::North) {
                "--+"
            } else {
                "  +"
            });
        }
        writeln!(writer, "{}", top)?;

        for y in 0..self.height as i32 {
            let mut middle = String::new();
            let mut bottom = String::from("+");
            for x in 0..self.width as i32 {
                let coords = Coordinates::new(x, y);
                if x == 0 {
                    middle.push(if self.has_wall(coords, Direction::West) {
                        '|'
                    } else {
                        ' '
                    });
                }
                middle.push_str(if self.has_wall(coords, Direction::East) {
                    "  |"
                } else {
                    "   "
                });
                bottom.push_str(if self.has_wall(coords, Direction::South) {
                    "--+"
                } else {
                    "  +"
                });
            }
            writeln!(writer, "{}", middle)?;
            writeln!(writer, "{}", bottom)?;
        }
        Ok(())
    }
}
