//! The row-packing algorithm behind the wrapped tag display.

use thiserror::Error;

// ---------------------------------------------------------------------------
// LayoutError
// ---------------------------------------------------------------------------

/// Errors from the row packer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// `line_limit` must be at least 1.
    #[error("line limit must be at least 1")]
    InvalidLineLimit,
}

// ---------------------------------------------------------------------------
// pack_rows
// ---------------------------------------------------------------------------

/// Partition `items` into ordered rows for a display wrapped over
/// `line_limit` lines.
///
/// Every row holds up to `C = ceil(N / line_limit)` items, where `N` is the
/// total item count.  The capacity is computed once from `(N, line_limit)`
/// and applied to every row: rows are filled to `C` in input order, and the
/// final row holds whatever remains (it may be shorter).  Because the
/// capacity is rounded up, the produced row count can be *less* than
/// `line_limit` when `N` does not divide evenly.
///
/// Concatenating the returned rows always reproduces `items` exactly.
///
/// An empty input produces a single empty row so the view still renders one
/// (empty) line strip.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidLineLimit`] when `line_limit` is zero.
///
/// # Examples
///
/// ```
/// use piclearn::layout::pack_rows;
///
/// let items: Vec<u32> = (0..17).collect();
/// let rows = pack_rows(&items, 3).unwrap();
/// let sizes: Vec<usize> = rows.iter().map(Vec::len).collect();
/// assert_eq!(sizes, [6, 6, 5]);
/// ```
pub fn pack_rows<T: Clone>(items: &[T], line_limit: usize) -> Result<Vec<Vec<T>>, LayoutError> {
    if line_limit == 0 {
        return Err(LayoutError::InvalidLineLimit);
    }

    if items.is_empty() {
        return Ok(vec![Vec::new()]);
    }

    let capacity = items.len().div_ceil(line_limit);
    Ok(items.chunks(capacity).map(<[T]>::to_vec).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes<T>(rows: &[Vec<T>]) -> Vec<usize> {
        rows.iter().map(Vec::len).collect()
    }

    #[test]
    fn even_split_fills_every_row() {
        let items: Vec<u32> = (0..18).collect();
        let rows = pack_rows(&items, 3).unwrap();
        assert_eq!(sizes(&rows), [6, 6, 6]);
    }

    #[test]
    fn remainder_lands_in_the_final_row() {
        let items: Vec<u32> = (0..17).collect();
        let rows = pack_rows(&items, 3).unwrap();
        assert_eq!(sizes(&rows), [6, 6, 5]);
    }

    #[test]
    fn concatenation_reproduces_input_order() {
        let items: Vec<u32> = (0..23).collect();
        let rows = pack_rows(&items, 4).unwrap();

        let flattened: Vec<u32> = rows.into_iter().flatten().collect();
        assert_eq!(flattened, items);
    }

    #[test]
    fn empty_input_yields_one_empty_row() {
        let rows = pack_rows::<u32>(&[], 3).unwrap();
        assert_eq!(rows, vec![Vec::<u32>::new()]);
    }

    #[test]
    fn zero_line_limit_is_rejected() {
        let err = pack_rows(&[1, 2, 3], 0).unwrap_err();
        assert_eq!(err, LayoutError::InvalidLineLimit);
    }

    #[test]
    fn single_line_takes_everything() {
        let items = ["a", "b", "c", "d"];
        let rows = pack_rows(&items, 1).unwrap();
        assert_eq!(rows, vec![vec!["a", "b", "c", "d"]]);
    }

    #[test]
    fn fewer_items_than_lines_produces_fewer_rows() {
        // Capacity rounds up to 1, so two items fill two of three lines.
        let rows = pack_rows(&["a", "b"], 3).unwrap();
        assert_eq!(rows, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn single_item_is_one_row() {
        let rows = pack_rows(&["only"], 5).unwrap();
        assert_eq!(rows, vec![vec!["only"]]);
    }

    /// Totality check across a grid of sizes and limits: rows concatenate to
    /// the input, no row exceeds the computed capacity, and only the last
    /// row may be short.
    #[test]
    fn packing_totals_hold_for_small_grid() {
        for n in 0..40usize {
            for limit in 1..8usize {
                let items: Vec<usize> = (0..n).collect();
                let rows = pack_rows(&items, limit).unwrap();

                let flattened: Vec<usize> = rows.iter().flatten().copied().collect();
                assert_eq!(flattened, items, "n={n} limit={limit}");

                if n == 0 {
                    assert_eq!(rows.len(), 1);
                    continue;
                }

                let capacity = n.div_ceil(limit);
                for (i, row) in rows.iter().enumerate() {
                    if i + 1 < rows.len() {
                        assert_eq!(row.len(), capacity, "n={n} limit={limit} row={i}");
                    } else {
                        assert!(row.len() <= capacity, "n={n} limit={limit} last row");
                        assert!(!row.is_empty(), "n={n} limit={limit} last row empty");
                    }
                }
            }
        }
    }
}
