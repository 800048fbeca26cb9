pub mod evaluator;
pub mod extensions;

pub use evaluator::{bytes_to_mb, evaluate, Evaluation, Rejection, RejectionKind};
pub use extensions::{allowed_label, file_extension, matches_filter, parse_custom_extensions};
