use super::types::Mark;

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

pub type Cells = [Mark; CELL_COUNT];

pub fn empty_board() -> Cells {
    [Mark::Empty; CELL_COUNT]
}

pub fn cell_index(row: usize, col: usize) -> usize {
    row * BOARD_SIZE + col
}

pub fn get_available_moves(cells: &Cells) -> Vec<usize> {
    cells
        .iter()
        .enumerate()
        .filter_map(|(index, &cell)| if cell == Mark::Empty { Some(index) } else { None })
        .collect()
}

pub fn is_valid_move(cells: &Cells, index: usize) -> bool {
    index < CELL_COUNT && cells[index] == Mark::Empty
}

pub fn apply_move(cells: &Cells, index: usize, mark: Mark) -> Result<Cells, String> {
    if mark == Mark::Empty {
        return Err("Cannot place an empty mark".to_string());
    }
    if index >= CELL_COUNT {
        return Err(format!("Position {} is out of bounds", index));
    }
    if cells[index] != Mark::Empty {
        return Err(format!("Cell {} is already marked", index));
    }

    let mut next = *cells;
    next[index] = mark;
    Ok(next)
}

#[cfg(test)]
pub fn board_from_layout(layout: &str) -> Cells {
    let mut cells = empty_board();
    for (index, symbol) in layout.chars().enumerate() {
        cells[index] = match symbol {
            'X' => Mark::X,
            'O' => Mark::O,
            '.' => Mark::Empty,
            other => panic!("Unexpected board symbol: {}", other),
        };
    }
    cells
}
