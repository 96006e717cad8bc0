use crate::attendance::{AttendanceStore, Bucket};
use crate::dates::{DateError, DateKey, DatePolicy};
use crate::homework::{HomeworkEntry, HomeworkStore, HomeworkSubmission};
use crate::roster::Roster;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owns the roster and both stores, and applies every mutation to them.
///
/// Mutations take `&mut self`; a caller that shares one instance across
/// threads must put it behind a single lock so roster reads and bucket writes
/// stay consistent.
#[derive(Debug, Clone, Default)]
pub struct Classbook {
    roster: Roster,
    attendance: AttendanceStore,
    homework: HomeworkStore,
    date_policy: DatePolicy,
}

/// Serializable copy of the whole classbook state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub roster: Roster,
    pub attendance: AttendanceStore,
    pub homework: HomeworkStore,
}

impl Classbook {
    pub fn new(roster: Roster, date_policy: DatePolicy) -> Self {
        Classbook {
            roster,
            attendance: AttendanceStore::new(),
            homework: HomeworkStore::new(),
            date_policy,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn attendance(&self) -> &AttendanceStore {
        &self.attendance
    }

    pub fn homework(&self) -> &HomeworkStore {
        &self.homework
    }

    pub fn date_policy(&self) -> DatePolicy {
        self.date_policy
    }

    pub fn resolve_date(&self, input: Option<&str>) -> Result<DateKey, DateError> {
        self.date_policy.resolve(input, DateKey::today())
    }

    pub fn add_student(&mut self, name: &str) -> bool {
        let added = self.roster.add_student(name);
        if added {
            info!(
                "event=student_add module=roster status=ok students={}",
                self.roster.students().len()
            );
        }
        added
    }

    /// Removes the student and their marks from every attendance bucket.
    /// Homework marks and progress for the student are kept.
    pub fn remove_student(&mut self, name: &str) -> bool {
        if !self.roster.remove_student(name) {
            return false;
        }
        let buckets = self.attendance.forget_student(name);
        info!(
            "event=student_remove module=roster status=ok students={} buckets_touched={}",
            self.roster.students().len(),
            buckets
        );
        true
    }

    pub fn add_course(&mut self, name: &str) -> bool {
        let added = self.roster.add_course(name);
        if added {
            info!(
                "event=course_add module=roster status=ok courses={}",
                self.roster.courses().len()
            );
        }
        added
    }

    /// Writes a full bucket for the resolved date, replacing any earlier one.
    pub fn mark_attendance(
        &mut self,
        date_input: Option<&str>,
        submitted: &HashMap<String, String>,
    ) -> Result<(DateKey, &Bucket), DateError> {
        let date = self.resolve_date(date_input)?;
        let bucket = self
            .attendance
            .mark(date, self.roster.students(), submitted);
        info!(
            "event=attendance_mark module=attendance status=ok date={} students={}",
            date,
            bucket.len()
        );
        Ok((date, bucket))
    }

    pub fn record_homework(
        &mut self,
        date_input: Option<&str>,
        course: &str,
        submission: &HomeworkSubmission,
    ) -> Result<(DateKey, &HomeworkEntry), DateError> {
        let date = self.resolve_date(date_input)?;
        let entry = self
            .homework
            .record(date, course, self.roster.students(), submission);
        info!(
            "event=homework_record module=homework status=ok date={} marks={} progress={}",
            date,
            entry.marks.len(),
            entry.progress.len()
        );
        Ok((date, entry))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            roster: self.roster.clone(),
            attendance: self.attendance.clone(),
            homework: self.homework.clone(),
        }
    }

    /// Replaces all state. Attendance marks for students not on the restored
    /// roster are dropped.
    pub fn restore(&mut self, snapshot: Snapshot) {
        let Snapshot {
            roster,
            mut attendance,
            homework,
        } = snapshot;
        attendance.retain_students(|name| roster.has_student(name));
        self.roster = roster;
        self.attendance = attendance;
        self.homework = homework;
        info!(
            "event=state_restore module=classbook status=ok students={} dates={}",
            self.roster.students().len(),
            self.attendance.len()
        );
    }
}
