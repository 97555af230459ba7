//! Textual rendering of a world snapshot.
//!
//! Each cell is a fixed three-character glyph:
//!
//! | Glyph | Meaning |
//! |-------|---------|
//! | ` - ` | empty cell |
//! | `[C]` | crate, no robot |
//! | `XY~` | robot, no crate at or on it |
//! | `XY*` | robot carrying a crate |
//! | `XY_` | robot standing on a dropped crate |
//!
//! `XY` is the first two characters of the robot's visible name (or of
//! its id when no name is registered). Rows are emitted top-down so
//! the origin displays at the bottom-left.

use crate::snapshot::WorldSnapshot;
use depot_types::RobotId;
use std::collections::HashMap;

const HEADER: &str = "--- Warehouse Real-Time View ---\n";
const FOOTER: &str = "--------------------------------\n";

/// Renders a snapshot as a fixed-width grid.
///
/// `names` maps robot ids to the identifiers an operator knows them
/// by; unmapped robots are labelled by their id. Because the snapshot
/// is read-consistent, the output never shows a half-applied
/// transition.
///
/// # Example
///
/// ```
/// use depot_sim::{render_snapshot, RobotSummary, WorldSnapshot};
/// use depot_types::{RobotId, RobotState};
/// use std::collections::HashMap;
///
/// let snapshot = WorldSnapshot {
///     grid_size: 2,
///     crates: vec![vec![false, true], vec![false, false]],
///     robots: vec![RobotSummary {
///         id: RobotId::named("R1"),
///         state: RobotState::at(0, 0),
///     }],
/// };
///
/// let text = render_snapshot(&snapshot, &HashMap::new());
/// let rows: Vec<&str> = text.lines().collect();
/// assert_eq!(rows[1], " -  - ");     // y = 1
/// assert_eq!(rows[2], "R1~[C]");     // y = 0, origin row
/// ```
#[must_use]
pub fn render_snapshot(snapshot: &WorldSnapshot, names: &HashMap<RobotId, String>) -> String {
    let size = snapshot.grid_size;

    let mut grid: Vec<Vec<String>> = (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    if snapshot.crate_at(x, y) {
                        "[C]".to_string()
                    } else {
                        " - ".to_string()
                    }
                })
                .collect()
        })
        .collect();

    // Robots overwrite crates; exclusion guarantees one robot per cell.
    for robot in &snapshot.robots {
        let state = robot.state;
        if state.x >= size || state.y >= size {
            continue;
        }
        let label = names
            .get(&robot.id)
            .map(String::as_str)
            .unwrap_or_else(|| robot.id.as_str());
        let mut glyph: String = label.chars().take(2).collect();
        while glyph.chars().count() < 2 {
            glyph.push(' ');
        }
        glyph.push(if state.has_crate {
            '*'
        } else if snapshot.crate_at(state.x, state.y) {
            '_'
        } else {
            '~'
        });
        grid[state.y][state.x] = glyph;
    }

    let mut out = String::with_capacity((size + 2) * (size * 3 + 1));
    out.push_str(HEADER);
    for y in (0..size).rev() {
        for cell in &grid[y] {
            out.push_str(cell);
        }
        out.push('\n');
    }
    out.push_str(FOOTER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RobotSummary;
    use depot_types::RobotState;

    fn snapshot(size: usize) -> WorldSnapshot {
        WorldSnapshot {
            grid_size: size,
            crates: vec![vec![false; size]; size],
            robots: Vec::new(),
        }
    }

    fn rows(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn empty_grid_is_all_dashes() {
        let text = render_snapshot(&snapshot(3), &HashMap::new());
        let rows = rows(&text);

        assert_eq!(rows.len(), 5); // header + 3 rows + footer
        assert!(rows[0].starts_with("---"));
        for row in &rows[1..=3] {
            assert_eq!(row.as_str(), " -  -  - ");
        }
    }

    #[test]
    fn origin_renders_bottom_left() {
        let mut snap = snapshot(3);
        snap.robots.push(RobotSummary {
            id: RobotId::named("R1"),
            state: RobotState::at(0, 0),
        });
        snap.robots.push(RobotSummary {
            id: RobotId::named("R2"),
            state: RobotState::at(2, 2),
        });

        let rows = rows(&render_snapshot(&snap, &HashMap::new()));
        // Highest y first: R2 on the top grid row, R1 on the bottom.
        assert_eq!(rows[1], " -  - R2~");
        assert_eq!(rows[3], "R1~ -  - ");
    }

    #[test]
    fn crate_glyphs() {
        let mut snap = snapshot(2);
        snap.crates[0][1] = true; // crate alone at (1, 0)
        snap.crates[0][0] = true; // crate under R1
        snap.robots.push(RobotSummary {
            id: RobotId::named("R1"),
            state: RobotState::at(0, 0),
        });
        snap.robots.push(RobotSummary {
            id: RobotId::named("R2"),
            state: RobotState {
                x: 1,
                y: 1,
                has_crate: true,
            },
        });

        let rows = rows(&render_snapshot(&snap, &HashMap::new()));
        assert_eq!(rows[1], " - R2*");
        assert_eq!(rows[2], "R1_[C]");
    }

    #[test]
    fn visible_names_override_ids() {
        let mut snap = snapshot(2);
        let id = RobotId::generate();
        snap.robots.push(RobotSummary {
            id: id.clone(),
            state: RobotState::at(0, 0),
        });

        let mut names = HashMap::new();
        names.insert(id, "AZ-special".to_string());

        let rows = rows(&render_snapshot(&snap, &names));
        assert_eq!(&rows[2][..3], "AZ~");
    }

    #[test]
    fn short_labels_are_padded() {
        let mut snap = snapshot(2);
        snap.robots.push(RobotSummary {
            id: RobotId::named("R"),
            state: RobotState::at(0, 0),
        });

        let rows = rows(&render_snapshot(&snap, &HashMap::new()));
        assert_eq!(&rows[2][..3], "R ~");
    }

    #[test]
    fn rows_are_fixed_width() {
        let mut snap = snapshot(4);
        snap.robots.push(RobotSummary {
            id: RobotId::named("R1"),
            state: RobotState::at(3, 1),
        });
        snap.crates[2][2] = true;

        for row in &rows(&render_snapshot(&snap, &HashMap::new()))[1..=4] {
            assert_eq!(row.chars().count(), 12);
        }
    }
}
