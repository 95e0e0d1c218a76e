//! Styled username generation for Impulse.
//!
//! Names are assembled from per-style word lists:
//!
//! ```text
//! prefix + connector + suffix    e.g. "Shadow" + "Of" + "Reaper"
//! ```
//!
//! Each part is drawn with [`select_weighted`], which favors words near the
//! front of a list (weight of index `i` is `1 / (i + 1)`). The assembled base
//! name then goes through a round of cosmetic variation (random casing, `_`
//! suffix, `X` prefix, a "lucky" number) before one variant is picked.
//!
//! A [`NameGenerator`] remembers every name it has handed out (compared
//! case-insensitively) and retries up to [`MAX_ATTEMPTS`] times to avoid
//! repeats. When the budget runs out it returns a numbered name instead of
//! failing.

mod error;
mod generator;
mod style;
mod weighted;

pub use error::{NamesError, NamesResult};
pub use generator::{NameGenerator, LUCKY_NUMBERS, MAX_ATTEMPTS};
pub use style::{Pattern, Style};
pub use weighted::{select_weighted, weight_of};
