use crate::dates::DateKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One student's attendance mark for one day.
///
/// Unknown submitted values are kept verbatim and count toward neither total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mark {
    Present,
    Absent,
    Other(String),
}

impl Mark {
    /// Normalizes a raw form value. `None` means the value was blank.
    pub fn parse(raw: &str) -> Option<Mark> {
        let t = raw.trim();
        if t.is_empty() {
            return None;
        }
        let mark = if t.eq_ignore_ascii_case("p") || t.eq_ignore_ascii_case("present") {
            Mark::Present
        } else if t.eq_ignore_ascii_case("a") || t.eq_ignore_ascii_case("absent") {
            Mark::Absent
        } else {
            Mark::Other(t.to_string())
        };
        Some(mark)
    }

    pub fn label(&self) -> &str {
        match self {
            Mark::Present => "Present",
            Mark::Absent => "Absent",
            Mark::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Mark {
    fn from(raw: String) -> Self {
        Mark::parse(&raw).unwrap_or(Mark::Other(raw))
    }
}

impl From<Mark> for String {
    fn from(mark: Mark) -> Self {
        mark.label().to_string()
    }
}

/// Per-date mapping of student name to mark.
pub type Bucket = BTreeMap<String, Mark>;

pub const NOT_MARKED: &str = "Not Marked";

/// One row of a student's attendance history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: DateKey,
    /// `None` when the day was recorded without this student.
    pub mark: Option<Mark>,
}

impl HistoryEntry {
    pub fn status(&self) -> &str {
        self.mark.as_ref().map(Mark::label).unwrap_or(NOT_MARKED)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceStore {
    buckets: BTreeMap<DateKey, Bucket>,
}

impl AttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, date: &DateKey) -> Option<&Bucket> {
        self.buckets.get(date)
    }

    /// Replaces the whole bucket for `date`.
    ///
    /// Every listed student gets a mark: the submitted one when non-blank,
    /// `Absent` otherwise. Names not in `students` are ignored.
    pub fn mark(
        &mut self,
        date: DateKey,
        students: &[String],
        submitted: &HashMap<String, String>,
    ) -> &Bucket {
        let bucket: Bucket = students
            .iter()
            .map(|s| {
                let mark = submitted
                    .get(s)
                    .and_then(|raw| Mark::parse(raw))
                    .unwrap_or(Mark::Absent);
                (s.clone(), mark)
            })
            .collect();
        let slot = self.buckets.entry(date).or_default();
        *slot = bucket;
        slot
    }

    /// Drops `name` from every bucket. Returns how many buckets held it.
    pub fn forget_student(&mut self, name: &str) -> usize {
        self.buckets
            .values_mut()
            .filter_map(|b| b.remove(name))
            .count()
    }

    /// Drops every mark whose student fails `keep`.
    pub fn retain_students<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        for bucket in self.buckets.values_mut() {
            bucket.retain(|name, _| keep(name));
        }
    }

    /// Recorded dates, latest first.
    pub fn dates_descending(&self) -> Vec<DateKey> {
        self.buckets.keys().rev().copied().collect()
    }

    /// One entry per recorded date, latest first. Restartable by calling again.
    pub fn student_history<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = HistoryEntry> + 'a {
        self.buckets.iter().rev().map(move |(date, bucket)| HistoryEntry {
            date: *date,
            mark: bucket.get(name).cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_parse_normalizes_short_and_long_forms() {
        assert_eq!(Mark::parse("P"), Some(Mark::Present));
        assert_eq!(Mark::parse(" present "), Some(Mark::Present));
        assert_eq!(Mark::parse("a"), Some(Mark::Absent));
        assert_eq!(Mark::parse("Absent"), Some(Mark::Absent));
        assert_eq!(Mark::parse("Late"), Some(Mark::Other("Late".into())));
        assert_eq!(Mark::parse("   "), None);
    }

    #[test]
    fn mark_serializes_as_label() {
        let v = serde_json::to_value(Mark::Present).expect("serialize");
        assert_eq!(v, serde_json::json!("Present"));
        let m: Mark = serde_json::from_value(serde_json::json!("Late")).expect("deserialize");
        assert_eq!(m, Mark::Other("Late".into()));
    }
}
