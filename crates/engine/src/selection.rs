use crate::types::Coord;

/// Two-click swap input: the first click selects a tile, a click on a
/// different tile yields the pair to swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    First(Coord),
}

impl Selection {
    /// Feed one click. Returns the pair once two different coordinates were
    /// clicked; clicking the selected tile again changes nothing.
    pub fn click(&mut self, coord: Coord) -> Option<(Coord, Coord)> {
        match *self {
            Selection::Empty => {
                *self = Selection::First(coord);
                None
            }
            Selection::First(first) if first == coord => None,
            Selection::First(first) => {
                *self = Selection::Empty;
                Some((first, coord))
            }
        }
    }

    pub fn selected(&self) -> Option<Coord> {
        match *self {
            Selection::Empty => None,
            Selection::First(coord) => Some(coord),
        }
    }

    pub fn clear(&mut self) {
        *self = Selection::Empty;
    }
}
