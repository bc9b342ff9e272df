//! Terminal presentation layer
//!
//! - [`display`]: styled catalog cards, loadout lists and summaries
//! - [`prompt`]: interactive tool selection and loadout approval

pub mod display;
pub mod prompt;
