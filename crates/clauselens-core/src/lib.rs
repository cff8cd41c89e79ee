pub mod highlight;
pub mod intake;
pub mod markup;
pub mod summary;

pub use highlight::{highlight_line, parse_terms_annotation, parse_terms_attribute, term_spans, Span};
pub use intake::{IntakeError, SelectedFile, ALLOWED_MEDIA_TYPES};
pub use summary::{counter_markup, parse_leading_count};
