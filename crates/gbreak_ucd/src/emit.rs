//! Emission of a finished [`LookupTable`]
//!
//! How the table ends up in the consuming program is up to the [`TableEmitter`] implementation.
//! [`RustTableEmitter`] writes it as a rust `const` array, which can be included in a crate that implements grapheme segmentation.

use std::io;

use crate::{LookupTable, PropertyRecord, PropertyTag, UcdError};

/// Renders a lookup table into a writer
pub trait TableEmitter {
    /// Write the table, records need to be written in the order the table iterates them
    fn emit(&self, table: &LookupTable, writer: &mut dyn io::Write) -> Result<(), UcdError>;
}

/// Emits the table as a rust constant
///
/// ```text
/// pub(crate) const GRAPHEME_BREAK_PROPERTIES: [(u32, &'static [&'static str]); 2] = [
///     (0x00000D, &["CR"]),
///     (0x01F3FB, &["Emoji_Modifier", "Extend"]),
/// ];
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RustTableEmitter {
    name     : String,
    tag_type : Option<String>,
    source   : Option<String>,
}

impl RustTableEmitter {
    pub const DEFAULT_NAME: &'static str = "GRAPHEME_BREAK_PROPERTIES";

    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), tag_type: None, source: None }
    }

    /// Write tags as variants of `tag_type` instead of string literals, e.g. `GraphemeBreak::RegionalIndicator`
    ///
    /// The variants are named after [`PropertyTag`], so only known tags can be emitted.
    pub fn with_tag_type(mut self, tag_type: &str) -> Self {
        self.tag_type = Some(tag_type.to_string());
        self
    }

    /// Name of the source file, mentioned in the header of the generated file
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    fn element_type(&self) -> String {
        match &self.tag_type {
            Some(ty) => ty.clone(),
            None => "&'static str".to_string(),
        }
    }

    fn format_tags(&self, record: &PropertyRecord) -> Result<String, UcdError> {
        let mut tags = Vec::with_capacity(record.tags.len());
        for tag in &record.tags {
            match &self.tag_type {
                Some(ty) => {
                    let variant = PropertyTag::from_name(tag).ok_or_else(|| UcdError::UnknownProperty { tag: tag.clone() })?;
                    tags.push(format!("{ty}::{}", variant.variant_name()));
                },
                None => tags.push(format!("{tag:?}")),
            }
        }
        Ok(tags.join(", "))
    }

    fn write_table(&self, table: &LookupTable, writer: &mut dyn io::Write) -> Result<(), UcdError> {
        let source = self.source.as_deref().unwrap_or("a UCD property file");
        write!(writer, "// This file is generated by gbreak from {source}, and should not be edited manually.\n\n").map_err(emit_error)?;

        write!(writer, "pub(crate) const {}: [(u32, &'static [{}]); {}] = [\n", self.name, self.element_type(), table.len()).map_err(emit_error)?;
        for record in table {
            let tags = self.format_tags(record)?;
            write!(writer, "\t({:#08X}, &[{tags}]),\n", record.codepoint.value()).map_err(emit_error)?;
        }
        write!(writer, "];\n").map_err(emit_error)
    }
}

impl Default for RustTableEmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

impl TableEmitter for RustTableEmitter {
    fn emit(&self, table: &LookupTable, writer: &mut dyn io::Write) -> Result<(), UcdError> {
        self.write_table(table, writer)?;
        writer.flush().map_err(emit_error)
    }
}

fn emit_error(err: io::Error) -> UcdError {
    UcdError::Emit(err.to_string())
}
