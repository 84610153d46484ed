use colored::{ColoredString, Colorize};

use common::{Board, render_path};

/// Draw `board` as a triangle. Cells the last jump emptied are shown on red,
/// the cell it filled on blue.
pub fn draw_step(prev: Option<&Board>, board: &Board) -> String {
    let rows = board.rows();
    let prev_rows = prev.map(Board::rows);
    let side = rows.len();

    let mut out = String::new();
    for (r, row) in rows.iter().enumerate() {
        out.push_str(&" ".repeat(side - r - 1));
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, &value)| {
                let before = prev_rows.as_ref().map(|rows| rows[r][c]);
                highlight(before, value).to_string()
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

fn highlight(before: Option<u8>, value: u8) -> ColoredString {
    let text = value.to_string();
    match (before, value) {
        (Some(1), 0) => text.on_red(),
        (Some(0), 1) => text.on_blue(),
        _ => text.normal(),
    }
}

/// Draw every step of a solve path with the jump that led to it highlighted.
/// Without color this is the library's plain rendering.
pub fn draw_path(path: &[Board]) -> String {
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return render_path(path);
    }

    let mut out = String::new();
    let mut prev = None;
    for (step, board) in path.iter().enumerate() {
        out.push_str(&format!("Step {}:\n", step + 1));
        out.push_str(&draw_step(prev, board));
        out.push('\n');
        prev = Some(board);
    }
    out
}

#[cfg(test)]
mod tests {
    use common::{Jump, coord::Position};

    use super::*;

    #[test]
    // with coloring off the CLI prints exactly what the library renders
    fn test_plain_output_matches_library_rendering() {
        colored::control::set_override(false);

        let start = Board::default_start();
        let next = start
            .apply_jump(Jump::new(Position(12), Position(8), Position(5)))
            .unwrap();
        let path = [start, next];

        assert_eq!(draw_path(&path), render_path(&path));
        assert_eq!(draw_step(None, &path[0]), path[0].to_string());
    }
}
