//! Raw registry grid as read from the source file.

/// The registry before normalization: one header row and one row per region.
///
/// Cells that were empty in the source are `None`. Every row has exactly
/// `headers().len()` cells; rows only enter through [`RawRegistry::push_row`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRegistry {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawRegistry {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Mutable access to the cells of each row; row width stays fixed.
    pub fn rows_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut [Option<String>]> {
        self.rows.iter_mut().map(Vec::as_mut_slice)
    }

    /// Appends a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    /// Keeps the rows whose current position satisfies `keep`.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let mut position = 0usize;
        self.rows.retain(|_| {
            let kept = keep(position);
            position += 1;
            kept
        });
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn missing_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_none())
            .count()
    }
}

/// One cleaned source row: the composite label plus its wide-form values,
/// keyed by column label in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRegistryRow {
    pub label: String,
    pub values: Vec<(String, String)>,
}
