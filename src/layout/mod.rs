//! Row packing for the wrapped vocabulary-chip display.
//!
//! The presentation layer shows extracted vocabulary as tappable chips
//! wrapped over a fixed number of display lines.  [`pack_rows`] is the pure
//! partitioning step: it slices an ordered item list into rows of equal
//! capacity so the view can lay each row out as a horizontal strip.
//!
//! # Quick start
//!
//! ```
//! use piclearn::layout::pack_rows;
//!
//! let words = ["bench", "tree", "kite", "pond", "duck"];
//! let rows = pack_rows(&words, 2).unwrap();
//!
//! assert_eq!(rows, vec![vec!["bench", "tree", "kite"], vec!["pond", "duck"]]);
//! ```

pub mod packer;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use packer::{pack_rows, LayoutError};
