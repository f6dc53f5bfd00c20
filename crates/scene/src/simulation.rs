/// Toy `n`³ cell grid holding one scalar per cell.
///
/// Workaround for a real fluid solver: `update` only assigns every cell a
/// value that oscillates with time, which the renderer turns into colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    n: usize,
    cells: Vec<f32>,
}

impl Simulation {
    /// A grid with every cell set to 1.0, or `None` when `n`³ overflows `usize`.
    pub fn new(n: usize) -> Option<Self> {
        let count = n.checked_mul(n)?.checked_mul(n)?;
        Some(Self {
            n,
            cells: vec![1.0; count],
        })
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Flat index of cell `(i, j, k)`, or `None` when out of range.
    pub fn index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        if i >= self.n || j >= self.n || k >= self.n {
            return None;
        }
        Some(i * self.n * self.n + j * self.n + k)
    }

    pub fn value(&self, i: usize, j: usize, k: usize) -> Option<f32> {
        self.index(i, j, k).map(|idx| self.cells[idx])
    }

    /// Set every cell to `0.5 * cos(time)`.
    pub fn update(&mut self, time: f32) {
        let value = 0.5 * time.cos();
        self.cells.fill(value);
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// `(i, j, k, value)` for every cell in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, f32)> + '_ {
        let n = self.n;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, v)| (idx / (n * n), (idx / n) % n, idx % n, *v))
    }
}
