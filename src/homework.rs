use crate::dates::DateKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Homework for one course on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkEntry {
    pub description: String,
    pub marks: BTreeMap<String, String>,
    pub progress: BTreeMap<String, String>,
}

/// Fields of one homework submission. Blank values leave stored ones alone.
#[derive(Debug, Clone, Default)]
pub struct HomeworkSubmission {
    pub description: String,
    pub marks: HashMap<String, String>,
    pub progress: HashMap<String, String>,
}

pub type CourseEntries = BTreeMap<String, HomeworkEntry>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeworkStore {
    days: BTreeMap<DateKey, CourseEntries>,
}

impl HomeworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn entry(&self, date: &DateKey, course: &str) -> Option<&HomeworkEntry> {
        self.days.get(date).and_then(|courses| courses.get(course))
    }

    /// All recorded days, latest first.
    pub fn days_descending(&self) -> impl Iterator<Item = (&DateKey, &CourseEntries)> {
        self.days.iter().rev()
    }

    /// Merges a submission into the (date, course) entry, creating it empty first if needed.
    ///
    /// Only students in `students` are read from the submitted marks and progress.
    /// A non-blank value (after trimming) overwrites; a blank one never erases.
    pub fn record(
        &mut self,
        date: DateKey,
        course: &str,
        students: &[String],
        submission: &HomeworkSubmission,
    ) -> &HomeworkEntry {
        let entry = self
            .days
            .entry(date)
            .or_default()
            .entry(course.to_string())
            .or_default();

        let description = submission.description.trim();
        if !description.is_empty() {
            entry.description = description.to_string();
        }
        for student in students {
            if let Some(mark) = non_blank(submission.marks.get(student)) {
                entry.marks.insert(student.clone(), mark.to_string());
            }
            if let Some(progress) = non_blank(submission.progress.get(student)) {
                entry.progress.insert(student.clone(), progress.to_string());
            }
        }
        entry
    }
}

fn non_blank(v: Option<&String>) -> Option<&str> {
    v.map(|s| s.trim()).filter(|s| !s.is_empty())
}
