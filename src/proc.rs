use crate::error::{Error, Result};
use crate::vlog;

/// `(row, col)` position of a cell, zero based.
pub type Coord = (usize, usize);

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Rect {
    w: usize, // j
    h: usize, // i
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    size: Rect,
    data: Vec<Vec<bool>>,
}

impl Rect {
    #[inline]
    pub fn new(width: usize, height: usize) -> Self {
        Rect { w: width, h: height }
    }

    #[inline]
    pub fn w(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn h(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn unwrap(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub fn fits_in(&self, outer: &Rect) -> bool {
        self.w <= outer.w && self.h <= outer.h
    }
}

/// Computes the next generation of `current` under the B3/S23 rule.
///
/// The returned grid is a fresh allocation with the same dimensions as the
/// input. Cells outside the grid count as dead, so corner cells see 3
/// neighbours, edge cells 5 and interior cells 8.
///
/// Fails with [`Error::InvalidArgument`] when the grid has no rows, its first
/// row has no columns, or its rows differ in length.
pub fn step<R: AsRef<[bool]>>(current: &[R]) -> Result<Vec<Vec<bool>>> {
    let size = data_size(current)?;
    Ok(next_generation(current, size))
}

/// Lists the coordinates of every live cell in row-major order.
///
/// An empty grid has no live cells and yields an empty list.
pub fn locate<R: AsRef<[bool]>>(generation: &[R]) -> Vec<Coord> {
    let mut cells = Vec::with_capacity(population(generation));

    for (i, row) in generation.iter().enumerate() {
        for (j, alive) in row.as_ref().iter().enumerate() {
            if *alive {
                cells.push((i, j));
            }
        }
    }
    cells
}

fn population<R: AsRef<[bool]>>(grid: &[R]) -> usize {
    grid.iter()
        .map(|r| r.as_ref().iter().filter(|c| **c).count())
        .sum()
}

fn data_size<R: AsRef<[bool]>>(data: &[R]) -> Result<Rect> {
    let first = data
        .first()
        .ok_or(Error::InvalidArgument("grid has no rows"))?;
    let w = first.as_ref().len();

    if w == 0 {
        return Err(Error::InvalidArgument("first row has no columns"));
    }
    if !data.iter().all(|r| r.as_ref().len() == w) {
        return Err(Error::InvalidArgument("all rows should be the same size"));
    }
    Ok(Rect::new(w, data.len()))
}

fn next_generation<R: AsRef<[bool]>>(current: &[R], size: Rect) -> Vec<Vec<bool>> {
    let (w, h) = size.unwrap();
    let mut n = vec![vec![false; w]; h];

    for (i, row) in n.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = produce_value(
                current[i].as_ref()[j],
                living_neighbors(current, size, i, j),
            );
        }
    }
    n
}

/// Counts live cells in the 3x3 window around `(i, j)` clipped to the grid,
/// minus the center itself.
fn living_neighbors<R: AsRef<[bool]>>(grid: &[R], size: Rect, i: usize, j: usize) -> usize {
    let rows = i.saturating_sub(1)..=(i + 1).min(size.h() - 1);
    let cols = j.saturating_sub(1)..=(j + 1).min(size.w() - 1);

    let window: usize = grid[rows]
        .iter()
        .map(|r| r.as_ref()[cols.clone()].iter().filter(|c| **c).count())
        .sum();

    window - grid[i].as_ref()[j] as usize
}

fn produce_value(current: bool, neighbors: usize) -> bool {
    match (current, neighbors) {
        (true, 2) | (true, 3) => true, // survival
        (false, 3) => true,            // birth
        _ => false,
    }
}

impl Field {
    #[inline]
    pub fn new(data: Vec<Vec<bool>>) -> Result<Self> {
        let size = data_size(&data)?;
        Ok(Field { size, data })
    }

    /// Parses one row per line. `'0'`, `' '` and `'.'` are dead cells, any
    /// other character is alive. Blank lines are skipped.
    pub fn from_string(s: &str) -> Result<Self> {
        let mut data: Vec<Vec<bool>> = vec![];

        for i in s.split('\n') {
            let r: Vec<bool> = i
                .trim_end_matches('\r')
                .chars()
                .map(|j| !matches!(j, '0' | ' ' | '.'))
                .collect();
            if !r.is_empty() {
                data.push(r);
            }
        }

        Self::new(data)
    }

    #[inline]
    pub fn size(&self) -> &Rect {
        &self.size
    }

    #[inline]
    pub fn data(&self) -> &Vec<Vec<bool>> {
        &self.data
    }

    #[inline]
    pub fn population(&self) -> usize {
        population(&self.data)
    }

    #[inline]
    pub fn living_cells(&self) -> Vec<Coord> {
        locate(&self.data)
    }

    /// Returns the following generation, leaving `self` untouched.
    pub fn next(&self) -> Self {
        let next = Field {
            size: self.size,
            data: next_generation(&self.data, self.size),
        };
        vlog!(
            "stepped {}x{} field: {} -> {} live cells",
            self.size.w(),
            self.size.h(),
            self.population(),
            next.population()
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_are_clipped_at_the_border() {
        let full = vec![vec![true; 3]; 3];
        let size = Rect::new(3, 3);

        assert_eq!(living_neighbors(&full, size, 0, 0), 3);
        assert_eq!(living_neighbors(&full, size, 0, 2), 3);
        assert_eq!(living_neighbors(&full, size, 2, 0), 3);
        assert_eq!(living_neighbors(&full, size, 2, 2), 3);
        assert_eq!(living_neighbors(&full, size, 0, 1), 5);
        assert_eq!(living_neighbors(&full, size, 1, 0), 5);
        assert_eq!(living_neighbors(&full, size, 1, 1), 8);
    }

    #[test]
    fn center_is_not_its_own_neighbour() {
        let lone = [[false, false, false], [false, true, false], [false, false, false]];
        assert_eq!(living_neighbors(&lone, Rect::new(3, 3), 1, 1), 0);
        assert_eq!(living_neighbors(&lone, Rect::new(3, 3), 0, 0), 1);
    }

    #[test]
    fn single_row_and_column_grids() {
        let row = [[true, true, true]];
        assert_eq!(living_neighbors(&row, Rect::new(3, 1), 0, 1), 2);
        assert_eq!(living_neighbors(&row, Rect::new(3, 1), 0, 0), 1);

        let col = [[true], [true], [true]];
        assert_eq!(living_neighbors(&col, Rect::new(1, 3), 1, 0), 2);
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            assert_eq!(produce_value(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(produce_value(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn data_size_rejects_bad_shapes() {
        let empty: [Vec<bool>; 0] = [];
        assert_eq!(
            data_size(&empty),
            Err(Error::InvalidArgument("grid has no rows"))
        );
        assert_eq!(
            data_size(&[Vec::<bool>::new()]),
            Err(Error::InvalidArgument("first row has no columns"))
        );
        assert_eq!(
            data_size(&[vec![true, false], vec![true]]),
            Err(Error::InvalidArgument("all rows should be the same size"))
        );
        assert_eq!(data_size(&[[false; 4]; 2]), Ok(Rect::new(4, 2)));
    }

    #[test]
    fn from_string_reads_dead_and_live_characters() {
        let f = Field::from_string(".#.\r\n0 x\n\n").unwrap();
        assert_eq!(
            f.data(),
            &vec![vec![false, true, false], vec![false, false, true]]
        );
        assert_eq!(f.size(), &Rect::new(3, 2));
        assert_eq!(f.population(), 2);
    }

    #[test]
    fn from_string_rejects_empty_input() {
        assert!(Field::from_string("\n\n").is_err());
    }

    #[test]
    fn next_keeps_the_original_field() {
        let f = Field::new(vec![vec![true, true], vec![true, false]]).unwrap();
        let n = f.next();

        assert_eq!(f.data(), &vec![vec![true, true], vec![true, false]]);
        assert_eq!(n.data(), &vec![vec![true, true], vec![true, true]]);
        assert_eq!(n.living_cells(), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
