use serde::{Deserialize, Serialize};

/// Registered students and courses, each kept in registration order.
///
/// Names are case-sensitive and unique within their list. Deserialized
/// rosters go through the same add rules as live edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RosterLists")]
pub struct Roster {
    students: Vec<String>,
    courses: Vec<String>,
}

#[derive(Deserialize)]
struct RosterLists {
    #[serde(default)]
    students: Vec<String>,
    #[serde(default)]
    courses: Vec<String>,
}

impl From<RosterLists> for Roster {
    fn from(lists: RosterLists) -> Self {
        Roster::seeded(lists.students, lists.courses)
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster by feeding every name through the regular add rules.
    pub fn seeded<S, C>(students: S, courses: C) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut roster = Roster::new();
        for s in students {
            roster.add_student(s.as_ref());
        }
        for c in courses {
            roster.add_course(c.as_ref());
        }
        roster
    }

    pub fn students(&self) -> &[String] {
        &self.students
    }

    pub fn courses(&self) -> &[String] {
        &self.courses
    }

    pub fn has_student(&self, name: &str) -> bool {
        self.students.iter().any(|s| s == name)
    }

    /// Returns `false` when the trimmed name is empty or already registered.
    pub fn add_student(&mut self, name: &str) -> bool {
        push_unique(&mut self.students, name)
    }

    /// Returns `false` when no student of that exact name is registered.
    pub fn remove_student(&mut self, name: &str) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s != name);
        self.students.len() != before
    }

    pub fn add_course(&mut self, name: &str) -> bool {
        push_unique(&mut self.courses, name)
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || list.iter().any(|s| s == name) {
        return false;
    }
    list.push(name.to_string());
    true
}
