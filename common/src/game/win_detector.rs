use super::board::Cells;
use super::types::{Mark, WinningLine};

pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn is_victory(cells: &Cells) -> bool {
    check_win(cells).is_some()
}

pub fn is_draw(cells: &Cells) -> bool {
    cells.iter().all(|&cell| cell != Mark::Empty)
}

pub fn check_win(cells: &Cells) -> Option<Mark> {
    check_win_with_line(cells).map(|line| line.mark)
}

pub fn check_win_with_line(cells: &Cells) -> Option<WinningLine> {
    for line in WIN_LINES {
        let mark = cells[line[0]];
        if mark != Mark::Empty && cells[line[1]] == mark && cells[line[2]] == mark {
            return Some(WinningLine::new(mark, line));
        }
    }
    None
}
