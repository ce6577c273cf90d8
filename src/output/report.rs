//! Per-meeting report lines.
//!
//! These go to stdout, one per selected meeting, so they can be piped.

use crate::api::Meeting;

fn start_time(meeting: &Meeting) -> String {
    meeting.start_time.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}

/// `"  1 | MeetingID 812 | 2021-03-05 10:20:30+03:00 | Topic"`
pub fn meeting_line(index: usize, meeting: &Meeting) -> String {
    format!(
        "{:3} | MeetingID {} | {} | {}",
        index,
        meeting.id,
        start_time(meeting),
        meeting.topic
    )
}

/// [`meeting_line`] followed by the meeting's status.
pub fn status_line(index: usize, meeting: &Meeting, status: &str) -> String {
    format!("{} | {}", meeting_line(index, meeting), status)
}

/// Status text for an error caught at the per-meeting boundary.
pub fn error_status(error: &crate::error::Error) -> String {
    format!("Unhandled exception: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::meeting;

    #[test]
    fn test_lines() {
        let m = meeting("u", "812", "Algebra", "2021-03-05T10:20:30+03:00");
        assert_eq!(
            meeting_line(1, &m),
            "  1 | MeetingID 812 | 2021-03-05 10:20:30+03:00 | Algebra"
        );
        assert_eq!(
            status_line(12, &m, "Fetched 2 files"),
            " 12 | MeetingID 812 | 2021-03-05 10:20:30+03:00 | Algebra | Fetched 2 files"
        );
    }

    #[test]
    fn test_error_status() {
        let err = crate::error::Error::RedirectExpected {
            url: "https://zoom.test/rec/1".into(),
            status: 200,
        };
        assert_eq!(
            error_status(&err),
            "Unhandled exception: Expected redirect for https://zoom.test/rec/1, got HTTP 200"
        );
    }
}
