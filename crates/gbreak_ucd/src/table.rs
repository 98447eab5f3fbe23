use core::{fmt, slice};

use gbreak_common::collections::OrderedMap;

use crate::{Codepoint, PropertyName};

/// All property tags assigned to a codepoint, in the order they were first seen
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PropertyRecord {
    pub codepoint : Codepoint,
    /// Tags in file order, a tag assigned by multiple lines appears multiple times
    pub tags      : Vec<PropertyName>,
}

impl PropertyRecord {
    pub fn new(codepoint: Codepoint) -> Self {
        Self { codepoint, tags: Vec::new() }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for PropertyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> [{}]", self.codepoint, self.tags.join(", "))
    }
}

/// Lookup table from codepoint to its assigned properties
///
/// Only codepoints that were assigned a property are present, there is no fallback record.
/// Iteration follows the order in which codepoints were first inserted, so 2 tables built from the same input are identical, including their order.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct LookupTable {
    records : OrderedMap<Codepoint, PropertyRecord>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self { records: OrderedMap::new() }
    }

    /// Assign a tag to a codepoint, the tag is appended when the codepoint already has a record
    pub fn insert(&mut self, codepoint: Codepoint, tag: PropertyName) {
        self.records
            .get_or_insert_with(codepoint, || PropertyRecord::new(codepoint))
            .tags
            .push(tag);
    }

    pub fn get(&self, codepoint: Codepoint) -> Option<&PropertyRecord> {
        self.records.get(&codepoint)
    }

    pub fn contains(&self, codepoint: Codepoint) -> bool {
        self.records.contains_key(&codepoint)
    }

    /// Get the number of distinct codepoints in the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the records in insertion order
    pub fn records(&self) -> &[PropertyRecord] {
        self.records.values()
    }

    pub fn iter(&self) -> slice::Iter<'_, PropertyRecord> {
        self.records().iter()
    }

    /// Get the total number of tags over all records
    pub fn tag_count(&self) -> usize {
        self.iter().map(|record| record.tags.len()).sum()
    }
}

impl FromIterator<(Codepoint, PropertyName)> for LookupTable {
    fn from_iter<T: IntoIterator<Item = (Codepoint, PropertyName)>>(iter: T) -> Self {
        let mut table = LookupTable::new();
        table.extend(iter);
        table
    }
}

impl Extend<(Codepoint, PropertyName)> for LookupTable {
    fn extend<T: IntoIterator<Item = (Codepoint, PropertyName)>>(&mut self, iter: T) {
        for (codepoint, tag) in iter {
            self.insert(codepoint, tag);
        }
    }
}

impl<'a> IntoIterator for &'a LookupTable {
    type Item = &'a PropertyRecord;
    type IntoIter = slice::Iter<'a, PropertyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(cp: u32, tag: &str) -> (Codepoint, PropertyName) {
        (Codepoint::new(cp), tag.to_string())
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let table: LookupTable = [pair(0x41, "L"), pair(0x41, "Extend"), pair(0x41, "L")].into_iter().collect();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(Codepoint::new(0x41)).unwrap().tags, ["L", "Extend", "L"]);
        assert_eq!(table.tag_count(), 3);
    }

    #[test]
    fn test_insertion_order() {
        let mut table = LookupTable::new();
        table.insert(Codepoint::new(0x1F3FB), "Emoji_Modifier".to_string());
        table.insert(Codepoint::new(0x0D), "CR".to_string());
        table.insert(Codepoint::new(0x1F3FB), "Extend".to_string());
        table.insert(Codepoint::new(0x41), "L".to_string());

        let order: Vec<u32> = table.iter().map(|record| record.codepoint.value()).collect();
        assert_eq!(order, [0x1F3FB, 0x0D, 0x41]);
        assert!(table.get(Codepoint::new(0x1F3FB)).unwrap().has_tag("Extend"));
    }

    #[test]
    fn test_absent_codepoints() {
        let table: LookupTable = [pair(0x0D, "CR")].into_iter().collect();
        assert!(table.contains(Codepoint::new(0x0D)));
        assert!(!table.contains(Codepoint::new(0x0A)));
        assert_eq!(table.get(Codepoint::new(0x0A)), None);
        assert!(LookupTable::new().is_empty());
    }

    #[test]
    fn test_equality_includes_order() {
        let a: LookupTable = [pair(0x41, "L"), pair(0x42, "L")].into_iter().collect();
        let b: LookupTable = [pair(0x42, "L"), pair(0x41, "L")].into_iter().collect();
        let c: LookupTable = [pair(0x41, "L"), pair(0x42, "L")].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_record_display() {
        let table: LookupTable = [pair(0x41, "L"), pair(0x41, "Extend")].into_iter().collect();
        assert_eq!(table.records()[0].to_string(), "U+0041 -> [L, Extend]");
    }
}
