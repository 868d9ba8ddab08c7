//! Terminal output for boards and search reports.

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::{
    board::{Board, SIZE},
    search::{Outcome, SearchReport},
};

/// Formats `board` as a fixed-width grid. With `color`, tiles already on
/// their home cell are drawn in green.
pub fn board(board: &Board, color: bool) -> String {
    if !color {
        return board.to_string();
    }
    let mut out = String::new();
    for row in 0..SIZE {
        for col in 0..SIZE {
            if col > 0 {
                out.push(' ');
            }
            let cell = format!("{:3}", board.get(row, col));
            if board.is_home(row * SIZE + col) {
                out.push_str(&cell.green().bold().to_string());
            } else {
                out.push_str(&cell.dark_grey().to_string());
            }
        }
        out.push('\n');
    }
    out
}

pub fn write_start<W: Write>(out: &mut W, start: &Board, color: bool) -> io::Result<()> {
    writeln!(out, "Start state:")?;
    write!(out, "{}", board(start, color))?;
    writeln!(out, "Solving...")
}

pub fn write_outcome<W: Write>(out: &mut W, report: &SearchReport, color: bool) -> io::Result<()> {
    writeln!(out, "{} boards checked.", report.stats.expanded)?;
    match &report.outcome {
        Outcome::Solved(solution) => {
            let moves = solution.route.len();
            writeln!(out, "Solution found in {} moves:", moves)?;
            writeln!(out, "{}", solution.route)?;
            writeln!(out, "Final state:")?;
            write!(out, "{}", board(&solution.board, color))
        }
        Outcome::Exhausted => writeln!(out, "No solution found."),
        Outcome::Stopped(limit) => writeln!(out, "Search stopped: {} reached.", limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{solve, Limit, SearchLimits, SearchStats};

    fn render(report: &SearchReport) -> String {
        let mut out = Vec::new();
        write_outcome(&mut out, report, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_board_matches_display() {
        let start: Board = "16 2 3 4 5 6 7 8 9 10 11 12 13 14 15 1".parse().unwrap();
        assert_eq!(board(&start, false), start.to_string());
    }

    #[test]
    fn colored_board_keeps_numbers() {
        let text = board(&Board::solved(), true);
        assert_eq!(text.lines().count(), SIZE);
        assert!(text.contains("\u{1b}["));
        assert!(text.contains(" 16"));
    }

    #[test]
    fn start_section() {
        let mut out = Vec::new();
        write_start(&mut out, &Board::solved(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Start state:\n  1   2   3   4\n"));
        assert!(text.ends_with("Solving...\n"));
    }

    #[test]
    fn solved_report() {
        let start: Board = "4 1 2 3 5 6 7 8 9 10 11 12 13 14 15 16".parse().unwrap();
        let text = render(&solve(start, &SearchLimits::unbounded()));
        assert!(text.starts_with("2 boards checked.\nSolution found in 1 moves:\nL1\n"));
        assert!(text.contains("Final state:\n  1   2   3   4\n"));
    }

    #[test]
    fn sorted_report_has_empty_route() {
        let text = render(&solve(Board::solved(), &SearchLimits::unbounded()));
        assert!(text.starts_with("1 boards checked.\nSolution found in 0 moves:\n\n"));
    }

    #[test]
    fn failure_reports() {
        let stats = SearchStats {
            expanded: 5,
            ..SearchStats::default()
        };
        let exhausted = SearchReport {
            outcome: Outcome::Exhausted,
            stats,
        };
        assert_eq!(render(&exhausted), "5 boards checked.\nNo solution found.\n");

        let stopped = SearchReport {
            outcome: Outcome::Stopped(Limit::Expansions(5)),
            stats,
        };
        assert_eq!(
            render(&stopped),
            "5 boards checked.\nSearch stopped: expansion limit of 5 reached.\n"
        );
    }
}
