//! Command alphabet, program parsing, and the diagonal rewriter.
//!
//! A task program is a string; parsing discards whitespace and maps
//! each remaining character to one [`Command`]. Characters outside the
//! alphabet parse to [`Command::Unknown`] and fail at execution time,
//! so a bad program still runs its valid prefix.
//!
//! # Alphabet
//!
//! | Char | Command | Effect |
//! |------|---------|--------|
//! | `N` | [`Command::North`] | `y + 1` |
//! | `S` | [`Command::South`] | `y - 1` |
//! | `E` | [`Command::East`] | `x + 1` |
//! | `W` | [`Command::West`] | `x - 1` |
//! | `G` | [`Command::Grab`] | pick up crate at current cell |
//! | `D` | [`Command::Drop`] | drop crate at current cell |
//!
//! The diagonal commands (`NE`, `NW`, `SE`, `SW`) are internal: they
//! never appear in programs and are produced only by
//! [`fuse_diagonals`] for diagonal-capable robots.

use serde::{Deserialize, Serialize};

/// One atomic robot command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move one cell north (`y + 1`).
    North,
    /// Move one cell south (`y - 1`).
    South,
    /// Move one cell east (`x + 1`).
    East,
    /// Move one cell west (`x - 1`).
    West,
    /// Fused diagonal move north-east (`x + 1, y + 1`).
    NorthEast,
    /// Fused diagonal move north-west (`x - 1, y + 1`).
    NorthWest,
    /// Fused diagonal move south-east (`x + 1, y - 1`).
    SouthEast,
    /// Fused diagonal move south-west (`x - 1, y - 1`).
    SouthWest,
    /// Pick up the crate at the robot's current cell.
    Grab,
    /// Drop the carried crate at the robot's current cell.
    Drop,
    /// A character outside the alphabet; fails when executed.
    Unknown(char),
}

impl Command {
    /// Returns `true` for the four cardinal movement commands.
    ///
    /// Only cardinals participate in diagonal fusion.
    #[must_use]
    pub fn is_cardinal(self) -> bool {
        matches!(self, Self::North | Self::South | Self::East | Self::West)
    }

    /// Fuses two orthogonal cardinals into one diagonal command.
    ///
    /// Returns `None` unless exactly one of the pair is vertical
    /// (`N`/`S`) and the other horizontal (`E`/`W`); order within the
    /// pair is irrelevant (`N` then `E` fuses the same as `E` then
    /// `N`).
    ///
    /// # Example
    ///
    /// ```
    /// use depot_sim::Command;
    ///
    /// assert_eq!(Command::combine(Command::North, Command::East), Some(Command::NorthEast));
    /// assert_eq!(Command::combine(Command::East, Command::North), Some(Command::NorthEast));
    /// assert_eq!(Command::combine(Command::East, Command::East), None);
    /// assert_eq!(Command::combine(Command::North, Command::Grab), None);
    /// ```
    #[must_use]
    pub fn combine(a: Command, b: Command) -> Option<Command> {
        use Command::{East, North, NorthEast, NorthWest, South, SouthEast, SouthWest, West};
        match (a, b) {
            (North, East) | (East, North) => Some(NorthEast),
            (North, West) | (West, North) => Some(NorthWest),
            (South, East) | (East, South) => Some(SouthEast),
            (South, West) | (West, South) => Some(SouthWest),
            _ => None,
        }
    }
}

/// Parses a program string into its command sequence.
///
/// Whitespace is discarded; every remaining character becomes one
/// command. Unrecognised characters are preserved as
/// [`Command::Unknown`] so execution fails at the offending position
/// rather than at parse time.
///
/// # Example
///
/// ```
/// use depot_sim::{parse_program, Command};
///
/// let commands = parse_program("N  E\tG");
/// assert_eq!(commands, vec![Command::North, Command::East, Command::Grab]);
/// ```
#[must_use]
pub fn parse_program(program: &str) -> Vec<Command> {
    program
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'N' => Command::North,
            'S' => Command::South,
            'E' => Command::East,
            'W' => Command::West,
            'G' => Command::Grab,
            'D' => Command::Drop,
            other => Command::Unknown(other),
        })
        .collect()
}

/// Rewrites a command sequence, fusing orthogonal cardinal pairs into
/// diagonal commands.
///
/// Single left-to-right pass over the input with one held command:
/// when the held command and the incoming command are orthogonal
/// cardinals they fuse and the hold clears; otherwise the held command
/// is flushed and the incoming command becomes the new hold. A command
/// consumed by a fusion is never re-considered, which makes the
/// pairing greedy and left-biased: `E E N` keeps the first `E` and
/// fuses the second with `N`.
///
/// `G`, `D`, and unknown commands never participate; like-axis pairs
/// (`E E`, `N S`) are never fused.
///
/// # Example
///
/// ```
/// use depot_sim::{fuse_diagonals, parse_program, Command};
///
/// let fused = fuse_diagonals(&parse_program("NEENWW"));
/// assert_eq!(
///     fused,
///     vec![Command::NorthEast, Command::NorthEast, Command::West, Command::West],
/// );
/// ```
#[must_use]
pub fn fuse_diagonals(commands: &[Command]) -> Vec<Command> {
    let mut fused = Vec::with_capacity(commands.len());
    let mut held: Option<Command> = None;

    for &cmd in commands {
        match held {
            Some(prev) if prev.is_cardinal() && cmd.is_cardinal() => {
                if let Some(diagonal) = Command::combine(prev, cmd) {
                    fused.push(diagonal);
                    held = None;
                } else {
                    fused.push(prev);
                    held = Some(cmd);
                }
            }
            Some(prev) => {
                fused.push(prev);
                held = Some(cmd);
            }
            None => held = Some(cmd),
        }
    }
    if let Some(prev) = held {
        fused.push(prev);
    }

    fused
}
