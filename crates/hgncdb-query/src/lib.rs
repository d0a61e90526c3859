pub mod aggregate;
pub mod lookup;

pub use aggregate::{count_by, Aggregator, Grouping, YearRange};
pub use lookup::{GeneQueries, DATE_FIELDS, LOCUS_FIELDS};
