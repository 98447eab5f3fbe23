//! Parser for the subset of TOML used by gbreak settings files
//!
//! Supported are comments, `[table]` headers (with dotted and quoted keys), key-value pairs,
//! basic and literal strings (including their multi-line forms), integers, booleans and arrays.

use core::fmt;
use gbreak_common::collections::OrderedMap;
use gbreak_parser_utils::{str_parser::*, ParserError};

/// TOML parsing error
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TomlParseError(pub ParserError);

impl fmt::Display for TomlParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("Failed to parse toml at {}:{}, err: {}", self.0.line, self.0.column, self.0.msg))
	}
}

impl std::error::Error for TomlParseError {}

#[derive(Clone, PartialEq, Debug)]
pub enum Item {
	String(String),
	Integer(i64),
	Boolean(bool),
	Array(Vec<Item>),
	Table(Table),
}

impl Item {
	/// Name of the item type, used in diagnostics
	pub fn type_name(&self) -> &'static str {
		match self {
			Item::String(_)  => "string",
			Item::Integer(_) => "integer",
			Item::Boolean(_) => "boolean",
			Item::Array(_)   => "array",
			Item::Table(_)   => "table",
		}
	}
}

/// Toml table, keys are kept in the order they were defined
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Table {
	items : OrderedMap<String, Item>,
}

impl<'a> IntoIterator for &'a Table {
	type Item = (&'a String, &'a Item);
	type IntoIter = gbreak_common::collections::Iter<'a, String, Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

impl Table {
	pub fn new() -> Self {
		Self { items: OrderedMap::new() }
	}

	/// Append an item to the table, returns `false` if the key is already defined
	pub fn push(&mut self, key: String, item: Item) -> bool {
		self.items.push(key, item)
	}

	/// Append an item with a dotted key to the table, creating intermediate tables when needed
	pub fn push_multi_key(&mut self, keys: &[String], item: Item) -> Result<(), &'static str> {
		let Some((last, path)) = keys.split_last() else {
			return Err("Empty key");
		};

		let table = self.get_or_add_table(path).ok_or("Key does not point to a table")?;
		if table.push(last.clone(), item) {
			Ok(())
		} else {
			Err("Duplicate key")
		}
	}

	/// Get an element from the table
	pub fn get_item(&self, key: &str) -> Option<&Item> {
		self.items.get(&key.to_string())
	}

	/// Get an element of a given type from the table
	pub fn get<T: FromTomlItem + ?Sized>(&self, key: &str) -> Option<&T> {
		self.get_item(key).and_then(T::from_item)
	}

	/// Get a sub-table
	pub fn get_table(&self, key: &str) -> Option<&Table> {
		self.get(key)
	}

	/// Get the number of items in the table
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Check if the table is empty
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Iterate over all items in the order they were defined
	pub fn iter(&self) -> gbreak_common::collections::Iter<'_, String, Item> {
		self.items.iter()
	}

	fn get_or_add_table(&mut self, keys: &[String]) -> Option<&mut Table> {
		let Some((first, rest)) = keys.split_first() else {
			return Some(self);
		};

		match self.items.get_or_insert_with(first.clone(), || Item::Table(Table::new())) {
			Item::Table(table) => table.get_or_add_table(rest),
			// Non table item, so we can't add to it
			_ => None,
		}
	}
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Toml {
	table : Table,
}

impl Toml {
	/// Create a new toml
	pub fn new() -> Self {
		Self { table: Table::new() }
	}

	/// Parse toml from a string
	pub fn parse(source: &str) -> Result<Self, TomlParseError> {
		let mut parser = Parser::new(source);
		parser.parse()
	}

	/// Get an element from the toml
	pub fn get(&self, key: &str) -> Option<&Item> {
		self.table.get_item(key)
	}

	/// Get a top-level table
	pub fn get_table(&self, key: &str) -> Option<&Table> {
		self.table.get_table(key)
	}

	/// Get the root table
	pub fn table(&self) -> &Table {
		&self.table
	}
}


struct Parser<'a> {
	pub parser : StrParser<'a>,
}

impl<'a> Parser<'a> {
	fn new(source: &'a str) -> Self {
		Self { parser: StrParser::new(source) }
	}

	fn parse(&mut self) -> Result<Toml, TomlParseError> {
		let mut toml = Toml::new();
		// Keys of the table that is currently being filled
		let mut cur_table = Vec::new();

		loop {
			self.parser.consume_whitespace(true);
			if !self.parser.can_parse() {
				break;
			}

			// Now we should either have a comment, a table, or a key-item pair
			if self.parser.starts_with("#") {
				self.parser.consume_to_eol();
				continue;
			} else if self.parser.starts_with("[[") {
				return Err(self.error("Arrays of tables are not supported"));
			} else if self.parser.consume_char('[') {
				self.parser.consume_whitespace(false);
				let keys = self.parse_keys()?;
				self.parser.consume_whitespace(false);
				if !self.parser.consume_char(']') {
					return Err(self.error("Table is not closed"));
				}
				if toml.table.get_or_add_table(&keys).is_none() {
					return Err(self.error("Path does not point to a table"));
				}
				cur_table = keys;
			} else {
				let (keys, item) = self.parse_key_item()?;
				let table = match toml.table.get_or_add_table(&cur_table) {
					Some(table) => table,
					None => return Err(self.error("Path does not point to a table")),
				};
				if let Err(msg) = table.push_multi_key(&keys, item) {
					return Err(self.error(msg));
				}
			}

			self.expect_end_of_line()?;
		}
		Ok(toml)
	}

	fn expect_end_of_line(&mut self) -> Result<(), TomlParseError> {
		self.parser.consume_whitespace(false);
		if self.parser.starts_with("#") {
			self.parser.consume_to_eol();
		} else if self.parser.can_parse() && !self.parser.consume_char('\n') {
			return Err(self.error("Expected a new line"));
		}
		Ok(())
	}

	fn parse_key_item(&mut self) -> Result<(Vec<String>, Item), TomlParseError> {
		let keys = self.parse_keys()?;
		self.parser.consume_whitespace(false);
		if !self.parser.consume_char('=') {
			return Err(self.error("Key is not followed by an `=`"));
		}
		self.parser.consume_whitespace(false);
		let item = self.parse_item()?;
		Ok((keys, item))
	}

	fn parse_keys(&mut self) -> Result<Vec<String>, TomlParseError> {
		let mut arr = Vec::new();
		loop {
			let key = if self.parser.starts_with("\"") {
				match self.parser.extract_string("\"", "\"", false) {
					Some(s) => s.to_string(),
					None => return Err(self.error("Invalid key")),
				}
			} else {
				let key = self.parser.extract_until(|ch: char| !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_');
				if key.is_empty() {
					return Err(self.error("Invalid key"));
				}
				key.to_string()
			};
			arr.push(key);

			self.parser.consume_whitespace(false);
			if !self.parser.consume_char('.') {
				return Ok(arr);
			}
			self.parser.consume_whitespace(false);
		}
	}

	fn parse_item(&mut self) -> Result<Item, TomlParseError> {
		let Some(first) = self.parser.peek() else {
			return Err(self.error("End of file"));
		};

		for (word, val) in [("true", true), ("false", false)] {
			if self.parser.starts_with(word) && self.parser.string[word.len()..].chars().next().map_or(true, |ch| !ch.is_alphanumeric()) {
				self.parser.consume_count(word.len());
				return Ok(Item::Boolean(val));
			}
		}

		match first {
			// TOML basic strings
			'"' => {
				let (delim, multi_line) = if self.parser.starts_with("\"\"\"") { ("\"\"\"", true) } else { ("\"", false) };
				let (line, column) = (self.parser.line, self.parser.column);
				match self.parser.extract_string(delim, delim, multi_line) {
					Some(string) => unescape(string).map(Item::String).map_err(|msg| TomlParseError(ParserError { line, column, msg })),
					None => Err(self.error("Invalid string")),
				}
			},
			// TOML literal strings, no escapes
			'\'' => {
				let (delim, multi_line) = if self.parser.starts_with("'''") { ("'''", true) } else { ("'", false) };
				match self.parser.extract_string(delim, delim, multi_line) {
					Some(string) => Ok(Item::String(string.to_string())),
					None => Err(self.error("Invalid string")),
				}
			},
			'[' => self.parse_array(),
			ch if ch.is_ascii_digit() || ch == '-' || ch == '+' => self.parse_integer(),
			_ => Err(self.error("Invalid item")),
		}
	}

	fn parse_integer(&mut self) -> Result<Item, TomlParseError> {
		let (line, column) = (self.parser.line, self.parser.column);
		let error = |msg| TomlParseError(ParserError { line, column, msg });

		let s = self.parser.extract_until(|ch: char| !ch.is_alphanumeric() && ch != '-' && ch != '+' && ch != '_' && ch != '.');
		// remove `_`
		let mut s = s.to_string();
		s.retain(|ch| ch != '_');

		let (radix, digits) = if let Some(s) = s.strip_prefix("0x") {
			(16, s)
		} else if let Some(s) = s.strip_prefix("0o") {
			(8, s)
		} else if let Some(s) = s.strip_prefix("0b") {
			(2, s)
		} else {
			(10, s.as_str())
		};

		if radix != 10 && digits.starts_with(['+', '-']) {
			return Err(error("Sign on a non-decimal integer"));
		}
		match i64::from_str_radix(digits, radix) {
			Ok(val) => Ok(Item::Integer(val)),
			Err(_) if s.contains(['.', 'e', 'E']) && radix == 10 => Err(error("Floats are not supported")),
			Err(_) => Err(error("Invalid integer literal")),
		}
	}

	fn parse_array(&mut self) -> Result<Item, TomlParseError> {
		let valid = self.parser.consume_char('[');
		debug_assert!(valid);

		let mut arr = Vec::new();
		loop {
			self.skip_array_whitespace();
			if self.parser.consume_char(']') {
				return Ok(Item::Array(arr));
			}

			arr.push(self.parse_item()?);

			self.skip_array_whitespace();
			if !self.parser.consume_char(',') {
				self.skip_array_whitespace();
				if self.parser.consume_char(']') {
					return Ok(Item::Array(arr));
				}
				return Err(self.error("Array was not ended correctly"));
			}
		}
	}

	/// Arrays may span multiple lines and contain comments
	fn skip_array_whitespace(&mut self) {
		loop {
			self.parser.consume_whitespace(true);
			if self.parser.starts_with("#") {
				self.parser.consume_to_eol();
			} else {
				break;
			}
		}
	}

	fn error(&self, msg: &'static str) -> TomlParseError {
		TomlParseError(self.parser.error(msg))
	}
}

fn unescape(s: &str) -> Result<String, &'static str> {
	let mut res = String::with_capacity(s.len());
	let mut chars = s.chars();
	while let Some(ch) = chars.next() {
		if ch != '\\' {
			res.push(ch);
			continue;
		}

		match chars.next() {
			Some('\\') => res.push('\\'),
			Some('"')  => res.push('"'),
			Some('n')  => res.push('\n'),
			Some('t')  => res.push('\t'),
			Some('r')  => res.push('\r'),
			Some(ty @ ('u' | 'U')) => {
				let len = if ty == 'u' { 4 } else { 8 };
				let hex: String = chars.by_ref().take(len).collect();
				let ch = match u32::from_str_radix(&hex, 16) {
					Ok(code) if hex.len() == len => char::from_u32(code).ok_or("Invalid unicode scalar in escape")?,
					_ => return Err("Invalid unicode escape"),
				};
				res.push(ch);
			},
			_ => return Err("Invalid escape sequence"),
		}
	}
	Ok(res)
}


pub trait FromTomlItem {
	fn from_item(item: &Item) -> Option<&Self>;
}

impl FromTomlItem for Item {
	fn from_item(item: &Item) -> Option<&Self> {
		Some(item)
	}
}

impl FromTomlItem for str {
	fn from_item(item: &Item) -> Option<&Self> {
		if let Item::String(s) = item {
			Some(s.as_str())
		} else {
			None
		}
	}
}

macro_rules! impl_from_toml_item {
	($ty:ty => $iden:ident) => {
		impl FromTomlItem for $ty {
			fn from_item(item: &Item) -> Option<&Self> {
				if let Item::$iden(s) = item {
					Some(s)
				} else {
					None
				}
			}
		}
	};
}
impl_from_toml_item!(String => String);
impl_from_toml_item!(i64 => Integer);
impl_from_toml_item!(bool => Boolean);
impl_from_toml_item!(Vec<Item> => Array);
impl_from_toml_item!(Table => Table);
