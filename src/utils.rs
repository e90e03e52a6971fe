//! Small shared utilities used by the scanner and parser.

mod iter;
pub use iter::PeekIter;
