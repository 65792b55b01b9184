//! Table position.

use std::fmt::Display;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the two players at the table. The viewer is the local, human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Viewer,
    Opponent,
}
impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Viewer => "Viewer",
            Side::Opponent => "Opponent",
        })
    }
}
impl Side {
    /// Both sides, viewer first.
    pub fn all_sides() -> &'static [Side; 2] {
        static SIDES: [Side; 2] = [Side::Viewer, Side::Opponent];
        &SIDES
    }

    /// The other side of the table.
    pub fn other(self) -> Side {
        match self {
            Side::Viewer => Side::Opponent,
            Side::Opponent => Side::Viewer,
        }
    }

    /// Returns true for the viewer.
    pub fn is_viewer(self) -> bool {
        matches!(self, Side::Viewer)
    }
}

/// A value for each side of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats<T> {
    pub viewer: T,
    pub opponent: T,
}

impl<T> Seats<T> {
    /// Builds a value for each side.
    pub fn from_fn<F: FnMut(Side) -> T>(mut f: F) -> Self {
        Self {
            viewer: f(Side::Viewer),
            opponent: f(Side::Opponent),
        }
    }

    /// Iterates over both values, viewer first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        std::iter::once((Side::Viewer, &self.viewer))
            .chain(std::iter::once((Side::Opponent, &self.opponent)))
    }

    /// Applies `f` to both values, viewer first.
    pub fn for_each_mut<F: FnMut(Side, &mut T)>(&mut self, mut f: F) {
        f(Side::Viewer, &mut self.viewer);
        f(Side::Opponent, &mut self.opponent);
    }
}

impl<T> Index<Side> for Seats<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Viewer => &self.viewer,
            Side::Opponent => &self.opponent,
        }
    }
}

impl<T> IndexMut<Side> for Seats<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Viewer => &mut self.viewer,
            Side::Opponent => &mut self.opponent,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seats_index() {
        let mut seats = Seats {
            viewer: 1,
            opponent: 2,
        };
        seats[Side::Opponent] += 10;
        assert_eq!(seats[Side::Viewer], 1);
        assert_eq!(seats[Side::Opponent], 12);
        assert_eq!(seats[Side::Viewer.other()], 12);
        let pairs: Vec<_> = seats.iter().map(|(s, v)| (s, *v)).collect();
        assert_eq!(pairs, vec![(Side::Viewer, 1), (Side::Opponent, 12)]);
    }
}
