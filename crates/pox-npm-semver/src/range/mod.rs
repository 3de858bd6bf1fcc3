//! Range expressions: comparators, sets and the algorithms over them

mod bound;
mod comparator;
mod operator;
#[allow(clippy::module_inception)]
mod range;
mod range_parser;
mod simplify;
mod subset;

pub use bound::Bound;
pub use comparator::Comparator;
pub use operator::Operator;
pub use range::{ComparatorSet, Hilo, Range};
pub use simplify::simplify;
pub use subset::is_subset;
