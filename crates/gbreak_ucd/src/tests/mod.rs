use std::path::PathBuf;

use crate::*;

const SAMPLE: &str = include_str!("data/GraphemeBreakProperty-sample.txt");

fn sample_path() -> PathBuf {
	[env!("CARGO_MANIFEST_DIR"), "src", "tests", "data", "GraphemeBreakProperty-sample.txt"].iter().collect()
}

fn tags(table: &LookupTable, cp: u32) -> Vec<&str> {
	table.get(Codepoint::new(cp)).map_or_else(Vec::new, |record| record.tags.iter().map(String::as_str).collect())
}

fn emit(table: &LookupTable) -> String {
	let mut out = Vec::new();
	RustTableEmitter::default().with_source("GraphemeBreakProperty-sample.txt").emit(table, &mut out).unwrap();
	String::from_utf8(out).unwrap()
}

#[test]
fn test_end_to_end_scenario() {
	let source = "\
000D          ; CR # <comment>
0041..0042    ; L  # <comment>
1F3FB         ; Emoji_Modifier # <comment>
";
	let table = Generator::default().generate(source).unwrap().table;

	let records: Vec<(u32, Vec<&str>)> = table.iter()
		.map(|record| (record.codepoint.value(), record.tags.iter().map(String::as_str).collect()))
		.collect();
	assert_eq!(records, [
		(0x0D, vec!["CR"]),
		(0x41, vec!["L"]),
		(0x42, vec!["L"]),
		(0x1F3FB, vec!["Emoji_Modifier"]),
	]);
}

#[test]
fn test_skipped_lines_contribute_nothing() {
	let source = "# comment only\n0041;0042;0043 # too many fields\n";
	let generation = Generator::default().generate(source).unwrap();
	assert!(generation.table.is_empty());
	assert_eq!(generation.stats.entries, 0);
	assert_eq!(generation.stats.assignments, 0);
}

#[test]
fn test_repeated_assignments() {
	let source = "\
0041 ; L # first
0041 ; Extend # second
0041 ; L # repeated
";
	let table = Generator::default().generate(source).unwrap().table;
	assert_eq!(table.len(), 1);
	assert_eq!(tags(&table, 0x41), ["L", "Extend", "L"]);
}

#[test]
fn test_idempotence() {
	let generator = Generator::default();
	let first = generator.generate(SAMPLE).unwrap();
	let second = generator.generate(SAMPLE).unwrap();

	assert_eq!(first, second);
	assert_eq!(emit(&first.table), emit(&second.table));
}

#[test]
fn test_sample_file() {
	let generation = Generator::default().generate_file(sample_path()).unwrap();
	let table = &generation.table;

	assert_eq!(generation.stats.lines, 83);
	assert_eq!(generation.stats.entries, 18);
	assert_eq!(generation.stats.malformed, 0);
	assert_eq!(generation.stats.rejected_ranges, 1);
	assert_eq!(generation.stats.unknown_tags, 0);
	assert_eq!(generation.stats.assignments, 74);
	assert_eq!(table.len(), 69);
	assert_eq!(table.tag_count(), generation.stats.assignments);

	// Codepoints are kept in file order, not sorted
	assert_eq!(table.records()[0].codepoint, Codepoint::new(0x0600));
	assert_eq!(table.records()[7].codepoint, Codepoint::new(0x000D));

	assert_eq!(tags(table, 0x1F3FB), ["Extend", "Emoji_Modifier"]);
	assert_eq!(tags(table, 0x1F1FF), ["Regional_Indicator"]);
	assert_eq!(tags(table, 0xFFFF), ["Extended_Pictographic"]);
	assert_eq!(tags(table, 0x10000), ["Extended_Pictographic"]);

	// Degenerate range is dropped, unlisted codepoints are absent
	assert!(!table.contains(Codepoint::new(0x1F600)));
	assert!(!table.contains(Codepoint::new(0x0041)));
}

#[test]
fn test_sample_file_matches_source() {
	let from_file = Generator::default().generate_file(sample_path()).unwrap();
	let from_str = Generator::default().generate(SAMPLE).unwrap();
	assert_eq!(from_file, from_str);
}

#[test]
fn test_keep_degenerate_ranges() {
	let generator = Generator::new(GeneratorOptions { degenerate_ranges: DegenerateRangePolicy::Single, ..Default::default() });
	let generation = generator.generate(SAMPLE).unwrap();
	assert_eq!(generation.stats.rejected_ranges, 0);
	assert_eq!(tags(&generation.table, 0x1F600), ["Extended_Pictographic"]);
	assert_eq!(generation.table.len(), 70);
}

#[test]
fn test_typed_emission_of_sample() {
	let table = Generator::default().generate(SAMPLE).unwrap().table;
	let mut out = Vec::new();
	RustTableEmitter::new("GRAPHEME_BREAK").with_tag_type("GraphemeBreak").emit(&table, &mut out).unwrap();
	let text = String::from_utf8(out).unwrap();

	assert!(text.contains("[(u32, &'static [GraphemeBreak]); 69]"));
	assert!(text.contains("\t(0x01F3FB, &[GraphemeBreak::Extend, GraphemeBreak::EmojiModifier]),\n"));
	assert_eq!(text.lines().filter(|line| line.starts_with("\t(")).count(), 69);
}

#[test]
fn test_missing_file() {
	let path = sample_path().with_file_name("does-not-exist.txt");
	let err = Generator::default().generate_file(&path).unwrap_err();
	match err {
		UcdError::Io { path: err_path, kind, .. } => {
			assert_eq!(err_path, path);
			assert_eq!(kind, std::io::ErrorKind::NotFound);
		},
		err => panic!("expected an io error, got {err:?}"),
	}
}

#[test]
fn test_fatal_error_reports_line() {
	let source = format!("{SAMPLE}0041..ZZZZ ; L # broken\n");
	let err = Generator::default().generate(&source).unwrap_err();
	assert_eq!(err.line(), Some(84));
	assert_eq!(err.to_string(), "line 84: Invalid hexadecimal codepoint: 'ZZZZ'");
}
