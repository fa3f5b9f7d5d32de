use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::core::library::LoanStatus;
use crate::core::repository::LineCodec;
use crate::utils::text::{decode_fields, eq_ignore_case, escape, format_date, join_fields, parse_bool, parse_date};

// LoanEntity abstracts a copy of a book lent to a member. isbn and member_id refer to
// the book and member collections but are not checked against them here.
// Record layout: isbn|member_id|issue_date|due_date|returned
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanEntity {
    pub isbn: String,
    pub member_id: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned: bool,
}

impl LoanEntity {
    pub fn new(isbn: &str, member_id: &str, issue_date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            isbn: isbn.to_string(),
            member_id: member_id.to_string(),
            issue_date,
            due_date,
            returned: false,
        }
    }

    // issue starts an active loan due `days` calendar days after `today`; days may be zero
    // or negative. None when the due date falls outside the supported calendar.
    pub fn issue(isbn: &str, member_id: &str, today: NaiveDate, days: i64) -> Option<Self> {
        let delta = Days::new(days.unsigned_abs());
        let due_date = if days >= 0 {
            today.checked_add_days(delta)
        } else {
            today.checked_sub_days(delta)
        }?;
        Some(LoanEntity::new(isbn, member_id, today, due_date))
    }

    pub fn status(&self) -> LoanStatus {
        if self.returned {
            LoanStatus::Returned
        } else {
            LoanStatus::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == LoanStatus::Active
    }

    pub fn is_for_book(&self, isbn: &str) -> bool {
        eq_ignore_case(&self.isbn, isbn)
    }

    pub fn is_for(&self, isbn: &str, member_id: &str) -> bool {
        self.is_for_book(isbn) && eq_ignore_case(&self.member_id, member_id)
    }

    // Returned is terminal.
    pub fn mark_returned(&mut self) {
        self.returned = true;
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && today > self.due_date
    }

    pub fn days_late(&self, today: NaiveDate) -> i64 {
        if today > self.due_date {
            (today - self.due_date).num_days()
        } else {
            0
        }
    }

    // fine_on never goes negative for a non-negative rate.
    pub fn fine_on(&self, today: NaiveDate, fine_per_day: f64) -> f64 {
        self.days_late(today) as f64 * fine_per_day
    }
}

impl LineCodec for LoanEntity {
    const MIN_FIELDS: usize = 5;

    fn encode(&self) -> String {
        join_fields(&[
            escape(&self.isbn),
            escape(&self.member_id),
            format_date(self.issue_date),
            format_date(self.due_date),
            self.returned.to_string(),
        ])
    }

    fn decode(line: &str) -> Option<Self> {
        let fields = decode_fields(line, Self::MIN_FIELDS)?;
        let issue_date = parse_date(&fields[2])?;
        let due_date = parse_date(&fields[3])?;
        let mut loan = LoanEntity::new(&fields[0], &fields[1], issue_date, due_date);
        loan.returned = parse_bool(&fields[4]);
        Some(loan)
    }
}

impl Display for LoanEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ISBN: {}, Member: {}, Issue: {}, Due: {}, Returned: {}",
               self.isbn, self.member_id, format_date(self.issue_date), format_date(self.due_date), self.returned)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::core::library::LoanStatus;
    use crate::core::repository::LineCodec;
    use crate::loans::domain::model::LoanEntity;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_should_issue_loan() {
        let loan = LoanEntity::issue("111", "m1", date(2024, 12, 28), 7).expect("should issue");
        assert_eq!(date(2024, 12, 28), loan.issue_date);
        assert_eq!(date(2025, 1, 4), loan.due_date);
        assert_eq!(LoanStatus::Active, loan.status());
    }

    #[test]
    fn test_should_issue_with_zero_or_negative_days() {
        let today = date(2024, 3, 1);
        assert_eq!(today, LoanEntity::issue("111", "m1", today, 0).expect("should issue").due_date);
        assert_eq!(date(2024, 2, 28), LoanEntity::issue("111", "m1", today, -2).expect("should issue").due_date);
    }

    #[test]
    fn test_should_not_issue_past_calendar_range() {
        assert!(LoanEntity::issue("111", "m1", date(2024, 3, 1), i64::MAX).is_none());
        assert!(LoanEntity::issue("111", "m1", date(2024, 3, 1), i64::MIN).is_none());
    }

    #[test]
    fn test_should_compute_fine() {
        let loan = LoanEntity::new("111", "m1", date(2024, 1, 1), date(2024, 1, 10));
        assert_eq!(0.0, loan.fine_on(date(2024, 1, 9), 2.0));
        assert_eq!(0.0, loan.fine_on(date(2024, 1, 10), 2.0));
        assert_eq!(2.0, loan.fine_on(date(2024, 1, 11), 2.0));
        assert_eq!(44.0, loan.fine_on(date(2024, 2, 1), 2.0));
    }

    #[test]
    fn test_should_detect_overdue_only_while_active() {
        let mut loan = LoanEntity::new("111", "m1", date(2024, 1, 1), date(2024, 1, 10));
        assert!(!loan.is_overdue(date(2024, 1, 10)));
        assert!(loan.is_overdue(date(2024, 1, 11)));
        loan.mark_returned();
        assert_eq!(LoanStatus::Returned, loan.status());
        assert!(!loan.is_overdue(date(2024, 1, 11)));
    }

    #[test]
    fn test_should_match_keys_ignoring_case() {
        let loan = LoanEntity::new("ISBN-A", "Member-1", date(2024, 1, 1), date(2024, 1, 10));
        assert!(loan.is_for("isbn-a", "MEMBER-1"));
        assert!(!loan.is_for("isbn-a", "member-2"));
        assert!(loan.is_for_book("Isbn-A"));
    }

    #[test]
    fn test_should_encode_loan() {
        let mut loan = LoanEntity::new("1|1", "m1", date(2024, 1, 1), date(2024, 1, 10));
        assert_eq!("1\\|1|m1|2024-01-01|2024-01-10|false", loan.encode());
        loan.mark_returned();
        assert_eq!(Some(loan.clone()), LoanEntity::decode(loan.encode().as_str()));
    }

    #[test]
    fn test_should_decode_returned_ignoring_case() {
        let loan = LoanEntity::decode("111|m1|2024-01-01|2024-01-10|TRUE").expect("should decode");
        assert!(loan.returned);
        let loan = LoanEntity::decode("111|m1|2024-01-01|2024-01-10|yes").expect("should decode");
        assert!(!loan.returned);
    }

    #[test]
    fn test_should_skip_bad_dates_or_short_lines() {
        assert_eq!(None, LoanEntity::decode("111|m1|2024-01-01|2024-01-10"));
        assert_eq!(None, LoanEntity::decode("111|m1|01/01/2024|2024-01-10|false"));
        assert_eq!(None, LoanEntity::decode("111|m1|2024-01-01|soon|false"));
    }

    #[test]
    fn test_should_format_loan() {
        let loan = LoanEntity::new("111", "m1", date(2024, 1, 1), date(2024, 1, 10));
        assert_eq!("ISBN: 111, Member: m1, Issue: 2024-01-01, Due: 2024-01-10, Returned: false", loan.to_string());
    }
}
