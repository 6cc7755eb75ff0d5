use rand::Rng;

bitflags::bitflags! {
    /// Per-cell state: one bit per wall that is still standing, plus a
    /// marker for cells the traversal has already reached.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WallFlags: u8 {
        const NORTH = 0b0_0001;
        const EAST = 0b0_0010;
        const SOUTH = 0b0_0100;
        const WEST = 0b0_1000;
        const VISITED = 0b1_0000;

        const ALL_WALLS = Self::NORTH.bits()
            | Self::EAST.bits()
            | Self::SOUTH.bits()
            | Self::WEST.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East,
    South,
    West,
}

use Direction::{East, North, South, West};

const WALL_IN_DIRECTION: [WallFlags; 4] = [
    WallFlags::NORTH,
    WallFlags::EAST,
    WallFlags::SOUTH,
    WallFlags::WEST,
];
const OPPOSITE_DIRECTION: [Direction; 4] = [South, West, North, East];
// North is toward row zero.
const COORDINATE_OFFSET: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

impl Direction {
    pub const ALL: [Direction; 4] = [North, East, South, West];

    pub fn wall(self) -> WallFlags {
        WALL_IN_DIRECTION[self as usize]
    }

    pub fn opposite(self) -> Direction {
        OPPOSITE_DIRECTION[self as usize]
    }

    pub fn offset(self) -> (i32, i32) {
        COORDINATE_OFFSET[self as usize]
    }
}

/// Every ordering of the four directions, in lexicographic order.
pub const DIRECTION_PERMUTATIONS: [[Direction; 4]; 24] = [
    [North, East, South, West],
    [North, East, West, South],
    [North, South, East, West],
    [North, South, West, East],
    [North, West, East, South],
    [North, West, South, East],
    [East, North, South, West],
    [East, North, West, South],
    [East, South, North, West],
    [East, South, West, North],
    [East, West, North, South],
    [East, West, South, North],
    [South, North, East, West],
    [South, North, West, East],
    [South, East, North, West],
    [South, East, West, North],
    [South, West, North, East],
    [South, West, East, North],
    [West, North, East, South],
    [West, North, South, East],
    [West, East, North, South],
    [West, East, South, North],
    [West, South, North, East],
    [West, South, East, North],
];

/// Draw one of the 24 direction orderings uniformly at random.
pub fn random_direction_order<R: Rng + ?Sized>(rng: &mut R) -> &'static [Direction; 4] {
    &DIRECTION_PERMUTATIONS[rng.gen_range(0..DIRECTION_PERMUTATIONS.len())]
}

/// Cell coordinates within a maze; `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Coordinates {
        Coordinates { x, y }
    }

    /// The neighboring cell in `direction`, which may be outside of the grid.
    pub fn step(self, direction: Direction) -> Coordinates {
        let (dx, dy) = direction.offset();
        Coordinates {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
            let there_and_back = Coordinates::new(3, 4)
                .step(direction)
                .step(direction.opposite());
            assert_eq!(there_and_back, Coordinates::new(3, 4));
        }
    }

    #[test]
    fn test_walls_are_distinct_bits() {
        let mut all = WallFlags::empty();
        for direction in Direction::ALL {
            assert_eq!(direction.wall().bits().count_ones(), 1);
            assert!(!all.intersects(direction.wall()));
            all |= direction.wall();
        }
        assert_eq!(all, WallFlags::ALL_WALLS);
        assert!(!all.contains(WallFlags::VISITED));
    }

    #[test]
    fn test_permutation_table_is_complete() {
        let unique: HashSet<[Direction; 4]> = DIRECTION_PERMUTATIONS.iter().copied().collect();
        assert_eq!(unique.len(), 24);
        for order in DIRECTION_PERMUTATIONS {
            let members: HashSet<Direction> = order.iter().copied().collect();
            assert_eq!(members.len(), 4);
        }
    }

    #[test]
    fn test_random_direction_order_covers_table() {
        let mut rng = StdRng::seed_from_u64(82326745);
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            seen.insert(*random_direction_order(&mut rng));
        }
        assert_eq!(seen.len(), 24);
    }
}
