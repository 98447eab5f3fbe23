use core::fmt;
use std::{fs, path::Path};

use gbreak_logging::{log_verbose, log_warning};

use crate::{
    CodepointSpec, DegenerateRangePolicy, Expansion, LineOutcome, LookupTable, PropertyTag, UcdError, UcdLine,
    parse_line, LOG_CAT,
};

/// Options for a generation run
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GeneratorOptions {
    /// How ranges of the form `X..X` are handled
    pub degenerate_ranges : DegenerateRangePolicy,
    /// Warn about tags that aren't a known grapheme break property, the tags are kept either way
    pub validate_tags     : bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { degenerate_ranges: DegenerateRangePolicy::Drop, validate_tags: true }
    }
}

/// Counters collected during a generation run
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct GenerationStats {
    /// Number of lines read
    pub lines           : usize,
    /// Number of lines that were accepted by the line grammar
    pub entries         : usize,
    /// Comments and empty lines
    pub skipped         : usize,
    /// Lines with an invalid number of fields
    pub malformed       : usize,
    /// Degenerate and inverted ranges
    pub rejected_ranges : usize,
    /// Number of (codepoint, tag) pairs added to the table
    pub assignments     : usize,
    /// Entries with a tag that isn't a known property, only counted when validating tags
    pub unknown_tags    : usize,
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{} lines: {} entries, {} assignments, {} comments/empty, {} malformed, {} rejected ranges, {} unknown tags",
            self.lines, self.entries, self.assignments, self.skipped, self.malformed, self.rejected_ranges, self.unknown_tags
        ))
    }
}

/// Result of a successful generation run
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Generation {
    pub table : LookupTable,
    pub stats : GenerationStats,
}

/// Runs the full pipeline over the contents of a UCD property file
///
/// Lines are processed in file order and every accepted line is expanded and folded into the table before the next one is parsed.
/// Skipped lines and rejected ranges only produce log messages, an invalid codepoint aborts the run.
#[derive(Clone, Default, Debug)]
pub struct Generator {
    options : GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate the lookup table from the contents of a UCD property file
    pub fn generate(&self, source: &str) -> Result<Generation, UcdError> {
        let mut table = LookupTable::new();
        let mut stats = GenerationStats::default();

        for (idx, line) in source.lines().enumerate() {
            let line_nr = idx + 1;
            stats.lines += 1;

            let outcome = parse_line(line);
            trace_line(line_nr, &outcome);

            match outcome {
                LineOutcome::Entry(entry) => {
                    stats.entries += 1;
                    self.process_entry(entry, &mut table, &mut stats).map_err(|err| err.at_line(line_nr))?;
                },
                LineOutcome::Skip(reason) if reason.is_malformed() => {
                    stats.malformed += 1;
                    log_verbose!(LOG_CAT, "Skipping line {line_nr}: {reason}");
                },
                LineOutcome::Skip(_) => stats.skipped += 1,
            }
        }

        Ok(Generation { table, stats })
    }

    /// Read the file at `path` and generate the lookup table from it
    pub fn generate_file<P: AsRef<Path>>(&self, path: P) -> Result<Generation, UcdError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| UcdError::io(path, &err))?;
        self.generate(&source)
    }

    fn process_entry(&self, entry: UcdLine<'_>, table: &mut LookupTable, stats: &mut GenerationStats) -> Result<(), UcdError> {
        let spec = CodepointSpec::parse(entry.spec)?;

        if self.options.validate_tags && !PropertyTag::is_known(entry.property) {
            stats.unknown_tags += 1;
            log_warning!(LOG_CAT, "'{}' is not a known grapheme break property (for {spec})", entry.property);
        }

        match spec.expand(self.options.degenerate_ranges) {
            Expansion::Codepoints(codepoints) => for codepoint in codepoints {
                table.insert(codepoint, entry.property.to_string());
                stats.assignments += 1;
            },
            Expansion::Rejected(rejection) => {
                stats.rejected_ranges += 1;
                log_warning!(LOG_CAT, "Dropping {rejection}, its codepoints don't get the '{}' property", entry.property);
            },
        }
        Ok(())
    }
}

cfg_if::cfg_if!{
    if #[cfg(feature = "line_logging")] {
        fn trace_line(line_nr: usize, outcome: &LineOutcome<'_>) {
            gbreak_logging::log_debug!(LOG_CAT, trace_line, "line {line_nr}: {outcome:?}");
        }
    } else {
        #[inline(always)]
        fn trace_line(_line_nr: usize, _outcome: &LineOutcome<'_>) {}
    }
}

#[cfg(test)]
mod tests {
    use crate::Codepoint;
    use super::*;

    #[test]
    fn test_stats() {
        let source = "\
# GraphemeBreakProperty-15.1.0.txt

0600..0605    ; Prepend # Cf   [6] ARABIC NUMBER SIGN..ARABIC NUMBER MARK ABOVE
0041..0041    ; L # degenerate
0045..0041    ; L # inverted
0041;0042;0043 # too many fields
0042 ; Other # unknown
0042 ; L
";
        let generation = Generator::default().generate(source).unwrap();
        assert_eq!(generation.stats, GenerationStats {
            lines: 8,
            entries: 4,
            skipped: 2,
            malformed: 2,
            rejected_ranges: 2,
            assignments: 7,
            unknown_tags: 1,
        });
        assert_eq!(generation.table.len(), 7);
        assert!(!generation.table.contains(Codepoint::new(0x41)));
        assert_eq!(generation.table.get(Codepoint::new(0x42)).unwrap().tags, ["Other"]);
    }

    #[test]
    fn test_degenerate_policy() {
        let source = "0041..0041 ; L # degenerate\n";

        let dropped = Generator::default().generate(source).unwrap();
        assert!(dropped.table.is_empty());
        assert_eq!(dropped.stats.rejected_ranges, 1);

        let kept = Generator::new(GeneratorOptions { degenerate_ranges: DegenerateRangePolicy::Single, ..Default::default() })
            .generate(source)
            .unwrap();
        assert_eq!(kept.table.get(Codepoint::new(0x41)).unwrap().tags, ["L"]);
        assert_eq!(kept.stats.rejected_ranges, 0);
    }

    #[test]
    fn test_validation_disabled() {
        let generator = Generator::new(GeneratorOptions { validate_tags: false, ..Default::default() });
        let generation = generator.generate("0041 ; Not_A_Property # ?\n").unwrap();
        assert_eq!(generation.stats.unknown_tags, 0);
        assert_eq!(generation.table.get(Codepoint::new(0x41)).unwrap().tags, ["Not_A_Property"]);
    }

    #[test]
    fn test_invalid_codepoint_is_fatal() {
        let source = "000D ; CR # ok\n\n00G1 ; L # bad hex\n0042 ; L # never reached\n";
        let err = Generator::default().generate(source).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(matches!(err.root(), UcdError::InvalidCodepoint { text } if text == "00G1"));
    }

    #[test]
    fn test_crlf_lines() {
        let generation = Generator::default().generate("000D ; CR # a\r\n\r\n000A ; LF # b\r\n").unwrap();
        assert_eq!(generation.table.len(), 2);
        assert_eq!(generation.stats.skipped, 1);
    }
}
