//! Survival estimators over in-memory record slices.
//!
//! - [`kaplan_meier`] — non-parametric step curve
//! - [`weibull`] — median-rank regression fit of shape `k` and scale `λ`
//! - [`analyze`] — both estimators over one [`survival_model::Dataset`]
//!
//! Every function borrows its input and returns owned results; nothing here
//! performs I/O or keeps state between calls.

pub mod analysis;
pub mod kaplan_meier;
pub mod weibull;

pub use analysis::{Analysis, analyze};
pub use kaplan_meier::kaplan_meier;
pub use weibull::{median_rank_reliability, rank_records, weibull};
