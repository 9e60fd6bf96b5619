//! Notification recipient resolution.
//!
//! A notification is free text in which `@student` tokens name extra
//! recipients. Mentioning a student opts them in to the teacher's
//! notifications permanently; the recipients of a notification are all
//! opted-in students of the teacher who are not suspended.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::store::{EdgeSet, RosterStore};
use crate::types::{StudentId, TeacherId};

/// Marks a token as a student mention.
pub const MENTION_PREFIX: char = '@';

/// Separator used both for splitting and for rejoining notification text.
const WORD_SEPARATOR: &str = " ";

/// Incoming `retrievefornotifications` payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationRequest {
    pub teacher: TeacherId,
    pub notification: String,
}

/// Resolved notification: cleaned text plus the students to deliver it to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResult {
    pub teacher: TeacherId,
    pub notification: String,
    pub students: Vec<StudentId>,
}

/// A notification split into body words and mentioned students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNotification {
    /// Non-mention tokens in their original order.
    pub plain_words: Vec<String>,
    /// Mentioned student ids in order of appearance, duplicates kept.
    pub mentions: Vec<StudentId>,
}

impl ParsedNotification {
    /// The notification text with all mention tokens removed.
    pub fn cleaned_text(&self) -> String {
        self.plain_words.join(WORD_SEPARATOR)
    }
}

/// Split `raw` on single spaces into plain words and `@mention` student ids.
///
/// A token is a mention when it starts with `@` and has at least one more
/// character. A bare `@` is kept as a plain word.
pub fn parse_notification(raw: &str) -> Result<ParsedNotification, CoreError> {
    let mut tokens = raw.split(WORD_SEPARATOR).peekable();
    if tokens.peek().map_or(true, |first| first.is_empty()) {
        return Err(CoreError::InvalidNotificationFormat);
    }

    let mut plain_words = Vec::new();
    let mut mentions = Vec::new();
    for token in tokens {
        match mention_of(token) {
            Some(student) => mentions.push(student.to_string()),
            None => plain_words.push(token.to_string()),
        }
    }

    Ok(ParsedNotification {
        plain_words,
        mentions,
    })
}

fn mention_of(token: &str) -> Option<&str> {
    token
        .strip_prefix(MENTION_PREFIX)
        .filter(|student| !student.is_empty())
}

/// Computes notification recipients against a [`RosterStore`].
pub struct NotificationResolver<'a> {
    store: &'a dyn RosterStore,
}

impl<'a> NotificationResolver<'a> {
    pub fn new(store: &'a dyn RosterStore) -> Self {
        Self { store }
    }

    /// Opt `student` in to `teacher`'s notifications. Safe to repeat.
    pub async fn ensure_opted_in(&self, teacher: &str, student: &str) -> Result<(), CoreError> {
        if self
            .store
            .edge_exists(EdgeSet::NotificationOptIn, teacher, student)
            .await?
        {
            return Ok(());
        }
        self.store
            .insert_edge_if_absent(EdgeSet::NotificationOptIn, teacher, student)
            .await?;
        Ok(())
    }

    /// Opted-in students of `teacher` minus suspended students, sorted
    /// ascending and deduplicated.
    pub async fn resolve_recipients(&self, teacher: &str) -> Result<Vec<StudentId>, CoreError> {
        let mut recipients = self
            .store
            .unsuspended_by_source(EdgeSet::NotificationOptIn, teacher)
            .await?;
        recipients.sort();
        recipients.dedup();
        Ok(recipients)
    }

    /// Validate, parse, persist mentions, and resolve recipients.
    ///
    /// Mentions are persisted one by one; a storage failure aborts the call
    /// but opt-ins written before it are kept.
    pub async fn retrieve_for_notification(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationResult, CoreError> {
        if request.teacher.is_empty() {
            return Err(CoreError::InvalidRequest(
                "Missing teacher specified.".into(),
            ));
        }
        let parsed = parse_notification(&request.notification).map_err(|_| {
            CoreError::InvalidRequest("Empty or malformed notification.".into())
        })?;

        for student in &parsed.mentions {
            self.ensure_opted_in(&request.teacher, student).await?;
        }

        let students = self.resolve_recipients(&request.teacher).await?;

        Ok(NotificationResult {
            teacher: request.teacher.clone(),
            notification: parsed.cleaned_text(),
            students,
        })
    }
}
