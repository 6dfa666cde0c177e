//! Reader for a small Lisp: turns source text into a tree of atoms and lists.
//!
//! The result of a successful parse is a single [`Form`]: a list whose first
//! element is the symbol `begin`, followed by every top-level form in the
//! input, in source order. Evaluation is somebody else's problem.

pub mod data;
pub mod reader;

pub use data::{Form, Symbol};
pub use reader::{parse, parse_with_depth, SyntaxError};
