//! Conversion of a UCD grapheme break property file into a per-codepoint lookup table
//!
//! The pipeline runs strictly forward: raw lines are parsed into a codepoint spec and a property tag ([`line`]),
//! specs are expanded into codepoints ([`codepoint`]) and all assignments are folded into a [`LookupTable`] ([`table`]),
//! which keeps the order in which codepoints first appeared in the file.
//! The table is then handed to a [`TableEmitter`].

use gbreak_logging::LogCategory;

mod error;
pub use error::*;

pub mod codepoint;
pub mod line;
pub mod property;
pub mod table;
pub mod generator;
pub mod emit;

pub use codepoint::{Codepoint, CodepointSpec, DegenerateRangePolicy, Expansion, RangeRejection};
pub use line::{parse_line, LineOutcome, SkipReason, UcdLine};
pub use property::{PropertyName, PropertyTag};
pub use table::{LookupTable, PropertyRecord};
pub use generator::{Generation, GenerationStats, Generator, GeneratorOptions};
pub use emit::{RustTableEmitter, TableEmitter};

pub const LOG_CAT : LogCategory = LogCategory::new("Ucd");

#[cfg(test)]
mod tests;
