//! Meeting selection predicates.
//!
//! Filters are plain data evaluated against a meeting after the whole catalog has
//! been fetched; nothing is pushed to the remote API.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use crate::api::Meeting;
use crate::error::{Error, Result};

/// A boolean predicate over a meeting.
#[derive(Debug, Clone)]
pub enum MeetingFilter {
    /// Meeting id is one of the given ids.
    IdIn(HashSet<String>),
    /// Topic contains any of the substrings, ignoring case. Stored lowercased.
    TopicContains(Vec<String>),
    /// Topic matches the expression anywhere.
    TopicRegex(Regex),
    /// Host email contains any of the substrings.
    HostEmailContains(Vec<String>),
    /// Host email matches the expression anywhere.
    HostEmailRegex(Regex),
    /// Every inner filter holds. An empty conjunction holds for every meeting.
    And(Vec<MeetingFilter>),
}

impl MeetingFilter {
    pub fn id_in<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MeetingFilter::IdIn(ids.into_iter().map(Into::into).collect())
    }

    pub fn topic_contains<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        MeetingFilter::TopicContains(
            substrings
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        )
    }

    pub fn topic_regex(expression: &str) -> Result<Self> {
        Ok(MeetingFilter::TopicRegex(Regex::new(expression)?))
    }

    pub fn host_email_contains<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MeetingFilter::HostEmailContains(substrings.into_iter().map(Into::into).collect())
    }

    pub fn host_email_regex(expression: &str) -> Result<Self> {
        Ok(MeetingFilter::HostEmailRegex(Regex::new(expression)?))
    }

    pub fn and(filters: Vec<MeetingFilter>) -> Self {
        MeetingFilter::And(filters)
    }

    /// Whether the meeting is selected.
    pub fn evaluate(&self, meeting: &Meeting) -> bool {
        match self {
            MeetingFilter::IdIn(ids) => ids.contains(&meeting.id),
            MeetingFilter::TopicContains(substrings) => {
                let topic = meeting.topic.to_lowercase();
                substrings.iter().any(|s| topic.contains(s.as_str()))
            }
            MeetingFilter::TopicRegex(re) => re.is_match(&meeting.topic),
            MeetingFilter::HostEmailContains(substrings) => substrings
                .iter()
                .any(|s| meeting.host_email.contains(s.as_str())),
            MeetingFilter::HostEmailRegex(re) => re.is_match(&meeting.host_email),
            MeetingFilter::And(filters) => filters.iter().all(|f| f.evaluate(meeting)),
        }
    }
}

impl fmt::Display for MeetingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeetingFilter::IdIn(ids) => {
                let mut ids: Vec<_> = ids.iter().map(String::as_str).collect();
                ids.sort_unstable();
                write!(f, "id in [{}]", ids.join(", "))
            }
            MeetingFilter::TopicContains(s) => write!(f, "topic contains any of [{}]", s.join(", ")),
            MeetingFilter::TopicRegex(re) => write!(f, "topic matches /{}/", re.as_str()),
            MeetingFilter::HostEmailContains(s) => {
                write!(f, "host email contains any of [{}]", s.join(", "))
            }
            MeetingFilter::HostEmailRegex(re) => write!(f, "host email matches /{}/", re.as_str()),
            MeetingFilter::And(filters) => {
                let parts: Vec<String> = filters.iter().map(|x| format!("({})", x)).collect();
                write!(f, "{}", parts.join(" and "))
            }
        }
    }
}

/// Selection flags as given on the command line, before validation.
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub meeting_ids: Option<Vec<String>>,
    pub topic_contains: Vec<String>,
    pub topic_regex: Option<String>,
    pub host_email_contains: Vec<String>,
    pub host_email_regex: Option<String>,
}

impl FilterSelection {
    /// Build one filter per selection flag that was given.
    fn build_all(&self) -> Result<Vec<MeetingFilter>> {
        let mut filters = Vec::new();

        if let Some(ids) = &self.meeting_ids {
            let ids: Vec<&str> = ids
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .collect();
            if ids.is_empty() {
                return Err(Error::Usage("--meeting-ids needs at least one id".into()));
            }
            filters.push(MeetingFilter::id_in(ids));
        }
        if !self.topic_contains.is_empty() {
            filters.push(MeetingFilter::topic_contains(&self.topic_contains));
        }
        if let Some(expr) = &self.topic_regex {
            filters.push(MeetingFilter::topic_regex(expr)?);
        }
        if !self.host_email_contains.is_empty() {
            filters.push(MeetingFilter::host_email_contains(
                self.host_email_contains.iter().cloned(),
            ));
        }
        if let Some(expr) = &self.host_email_regex {
            filters.push(MeetingFilter::host_email_regex(expr)?);
        }

        Ok(filters)
    }

    /// The single selected filter; zero or several selections are a usage error.
    pub fn exactly_one(&self) -> Result<MeetingFilter> {
        let mut filters = self.build_all()?;
        match filters.len() {
            1 => Ok(filters.remove(0)),
            0 => Err(Error::Usage(
                "Exactly one of --meeting-ids, --topic-contains, --topic-regex, \
                 --host-email-contains, --host-email-regex is required"
                    .into(),
            )),
            n => Err(Error::Usage(format!(
                "Exactly one selection filter is allowed, got {}",
                n
            ))),
        }
    }

    /// Conjunction of every given filter, or `None` when nothing was selected.
    pub fn conjunction(&self) -> Result<Option<MeetingFilter>> {
        let mut filters = self.build_all()?;
        Ok(match filters.len() {
            0 => None,
            1 => Some(filters.remove(0)),
            _ => Some(MeetingFilter::and(filters)),
        })
    }
}
