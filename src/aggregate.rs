use std::collections::HashMap;

use regex::RegexBuilder;

use crate::error::Result;
use crate::models::{is_hidden_category, Record};

// ---------------------------------------------------------------------------
// Ordered grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub name: String,
    pub records: Vec<&'a Record>,
}

/// Records bucketed by name. Groups iterate in the order their key was first
/// seen, and records inside a group keep their input order.
#[derive(Debug, Clone, Default)]
pub struct Grouping<'a> {
    groups: Vec<Group<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> Grouping<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, record: &'a Record) {
        match self.index.get(key) {
            Some(&i) => self.groups[i].records.push(record),
            None => {
                self.index.insert(key.to_string(), self.groups.len());
                self.groups.push(Group {
                    name: key.to_string(),
                    records: vec![record],
                });
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&[&'a Record]> {
        self.index
            .get(key)
            .map(|&i| self.groups[i].records.as_slice())
    }

    #[cfg(test)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[cfg(test)]
    pub fn keys(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group<'a>> {
        self.groups.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'g, 'a> IntoIterator for &'g Grouping<'a> {
    type Item = &'g Group<'a>;
    type IntoIter = std::slice::Iter<'g, Group<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

// ---------------------------------------------------------------------------
// Group-by
// ---------------------------------------------------------------------------

/// Bucket records by category, skipping hidden categories.
pub fn group_by_category<'a, I>(records: I) -> Grouping<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut grouping = Grouping::new();
    for record in records {
        if is_hidden_category(&record.category) {
            continue;
        }
        grouping.push(&record.category, record);
    }
    grouping
}

/// Put each record into every tag group whose name occurs in its tags field.
/// Tags outside `vocabulary` are never matched.
pub fn group_by_tag<'a, I, S>(records: I, vocabulary: &[S]) -> Grouping<'a>
where
    I: IntoIterator<Item = &'a Record>,
    S: AsRef<str>,
{
    let mut grouping = Grouping::new();
    for record in records {
        for tag in vocabulary {
            let tag = tag.as_ref();
            if record.tags.contains(tag) {
                grouping.push(tag, record);
            }
        }
    }
    grouping
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub name: String,
    pub total: f64,
}

/// Summed amount per group, in grouping order.
pub fn totals_by_group(grouping: &Grouping<'_>) -> Vec<GroupTotal> {
    grouping
        .iter()
        .map(|g| GroupTotal {
            name: g.name.clone(),
            total: sum_amounts(g.records.iter().copied()),
        })
        .collect()
}

pub fn sum_amounts<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().map(|r| r.amount).sum()
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// First group, in grouping order, whose name contains a match for `pattern`
/// (case-insensitive). `Ok(None)` when nothing matches; an error only when the
/// pattern is not a valid regular expression.
pub fn find_group_by_pattern<'g, 'a>(
    grouping: &'g Grouping<'a>,
    pattern: &str,
) -> Result<Option<&'g [&'a Record]>> {
    let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
    Ok(grouping
        .iter()
        .find(|g| re.is_match(&g.name))
        .map(|g| g.records.as_slice()))
}
