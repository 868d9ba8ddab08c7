use crate::board::{BoardError, Move};
use std::{fmt, ops::Deref, str::FromStr};

/// The moves taken from the starting board, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Route(Vec<Move>);

impl Route {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// A copy of this route with `mv` appended.
    pub fn extended(&self, mv: Move) -> Self {
        let mut moves = Vec::with_capacity(self.0.len() + 1);
        moves.extend_from_slice(&self.0);
        moves.push(mv);
        Self(moves)
    }

    /// The route that walks back to where this one started.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().map(Move::inverse).collect())
    }
}

impl Deref for Route {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl From<Vec<Move>> for Route {
    fn from(moves: Vec<Move>) -> Self {
        Self(moves)
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}

impl FromStr for Route {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
