use rollbookd::attendance::{Bucket, Mark};
use rollbookd::classbook::Classbook;
use rollbookd::dates::{DateKey, DatePolicy};
use rollbookd::roster::Roster;
use rollbookd::stats::{self, DailyStats};
use std::collections::HashMap;

fn book(students: &[&str]) -> Classbook {
    Classbook::new(
        Roster::seeded(students.iter().copied(), ["Maths"]),
        DatePolicy::FallbackToToday,
    )
}

fn submitted(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn bucket(pairs: &[(&str, Mark)]) -> Bucket {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn empty_submission_marks_every_student_absent() {
    let mut book = book(&["A", "B", "C"]);
    let (date, marked) = book
        .mark_attendance(Some("2024-03-05"), &HashMap::new())
        .expect("mark");
    assert_eq!(date.to_string(), "05-03-2024");
    assert_eq!(
        marked,
        &bucket(&[("A", Mark::Absent), ("B", Mark::Absent), ("C", Mark::Absent)])
    );
}

#[test]
fn scenario_two_students_one_present() {
    let mut book = book(&["A", "B"]);
    let (date, marked) = book
        .mark_attendance(Some("2024-03-05"), &submitted(&[("A", "P")]))
        .expect("mark");
    assert_eq!(marked, &bucket(&[("A", Mark::Present), ("B", Mark::Absent)]));
    assert_eq!(
        stats::daily_stats(book.attendance(), &date),
        DailyStats {
            present_count: 1,
            absent_count: 1
        }
    );
}

#[test]
fn remarking_a_date_replaces_the_whole_bucket() {
    let mut book = book(&["A", "B"]);
    book.mark_attendance(Some("2024-03-05"), &submitted(&[("A", "P"), ("B", "P")]))
        .expect("first mark");
    let (_, marked) = book
        .mark_attendance(Some("2024-03-05"), &submitted(&[("B", "P")]))
        .expect("second mark");
    assert_eq!(marked.get("A"), Some(&Mark::Absent));
    assert_eq!(marked.get("B"), Some(&Mark::Present));
    assert_eq!(book.attendance().len(), 1);
}

#[test]
fn names_outside_the_roster_are_not_stored() {
    let mut book = book(&["A"]);
    let (_, marked) = book
        .mark_attendance(Some("2024-03-05"), &submitted(&[("A", "P"), ("Ghost", "P")]))
        .expect("mark");
    assert_eq!(marked.len(), 1);
    assert!(!marked.contains_key("Ghost"));
}

#[test]
fn blank_status_counts_as_omitted_and_unknown_status_is_kept() {
    let mut book = book(&["A", "B"]);
    let (date, marked) = book
        .mark_attendance(Some("2024-03-05"), &submitted(&[("A", "  "), ("B", "Late")]))
        .expect("mark");
    assert_eq!(marked.get("A"), Some(&Mark::Absent));
    assert_eq!(marked.get("B"), Some(&Mark::Other("Late".to_string())));
    assert_eq!(
        stats::daily_stats(book.attendance(), &date),
        DailyStats {
            present_count: 0,
            absent_count: 1
        }
    );
}

#[test]
fn missing_date_has_zero_stats() {
    let book = book(&["A"]);
    let date = DateKey::parse("2024-03-05").expect("date");
    assert_eq!(stats::daily_stats(book.attendance(), &date), DailyStats::default());
}

#[test]
fn missing_or_malformed_date_marks_today_under_fallback() {
    let mut book = book(&["A"]);
    let (d1, _) = book.mark_attendance(None, &HashMap::new()).expect("mark");
    let (d2, _) = book
        .mark_attendance(Some("not a date"), &HashMap::new())
        .expect("mark");
    assert_eq!(d1, DateKey::today());
    assert_eq!(d2, DateKey::today());
}

#[test]
fn reject_policy_refuses_malformed_dates_without_writing() {
    let mut book = Classbook::new(Roster::seeded(["A"], ["Maths"]), DatePolicy::Reject);
    let err = book
        .mark_attendance(Some("2024/03/05"), &HashMap::new())
        .expect_err("malformed date");
    assert_eq!(err.input, "2024/03/05");
    assert!(book.attendance().is_empty());
}

#[test]
fn removing_a_student_drops_their_marks_everywhere() {
    let mut book = book(&["A", "B"]);
    book.mark_attendance(Some("2024-03-05"), &submitted(&[("A", "P")]))
        .expect("mark");
    book.mark_attendance(Some("2024-03-06"), &submitted(&[("B", "P")]))
        .expect("mark");

    assert!(book.remove_student("A"));
    for date in book.attendance().dates_descending() {
        let b = book.attendance().bucket(&date).expect("bucket");
        assert!(!b.contains_key("A"));
        assert!(b.contains_key("B"));
    }
    assert!(!book.remove_student("A"));
}
