//! Invitation lifecycle: issue, resend, cancel and status reporting

use chrono::Duration;
use learnboard_common::{
    new_entity_id, EntityId, Invitation, InvitationStatus, LearnboardError, Result, Timestamp,
};
use learnboard_i18n::{FluentValue, Locale, Translator};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, info};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
        .expect("e-mail pattern is a valid regex")
});

/// Invitation behaviour layered over the shared data type
pub trait InvitationExt {
    /// A pending invitation for `email` valid for `validity_days` from `now`
    fn issue(email: impl Into<String>, now: Timestamp, validity_days: i64) -> Self;

    /// The status as displayed at `now`. A pending invitation past its
    /// expiry reads as expired; the stored status is left untouched.
    fn effective_status(&self, now: Timestamp) -> InvitationStatus;
}

impl InvitationExt for Invitation {
    fn issue(email: impl Into<String>, now: Timestamp, validity_days: i64) -> Self {
        Self {
            id: new_entity_id(),
            email: email.into(),
            status: InvitationStatus::Pending,
            sent_at: now,
            expires_at: now + Duration::days(validity_days),
            accepted_at: None,
        }
    }

    fn effective_status(&self, now: Timestamp) -> InvitationStatus {
        match self.status {
            InvitationStatus::Pending if self.expires_at < now => InvitationStatus::Expired,
            status => status,
        }
    }
}

/// Message key of the status label
pub fn status_label_key(status: InvitationStatus) -> &'static str {
    match status {
        InvitationStatus::Accepted => "invitation-status-accepted",
        InvitationStatus::Pending => "invitation-status-pending",
        InvitationStatus::Expired => "invitation-status-expired",
    }
}

/// Localized status label
pub fn status_label(translator: &Translator, locale: Locale, status: InvitationStatus) -> String {
    translator.text(locale, status_label_key(status))
}

/// Invitation counts by effective status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub accepted: usize,
    pub expired: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.accepted + self.expired
    }
}

/// An owned, editable list of invitations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationBook {
    invitations: Vec<Invitation>,
}

impl InvitationBook {
    pub fn new(invitations: Vec<Invitation>) -> Self {
        Self { invitations }
    }

    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    pub fn into_inner(self) -> Vec<Invitation> {
        self.invitations
    }

    pub fn get(&self, id: &str) -> Option<&Invitation> {
        self.invitations.iter().find(|inv| inv.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.invitations
            .iter()
            .position(|inv| inv.id == id)
            .ok_or_else(|| LearnboardError::validation_field(format!("Unknown invitation: {id}"), "id"))
    }

    /// Issue one invitation per address and return their ids
    pub fn invite(&mut self, emails: &[String], now: Timestamp, validity_days: i64) -> Vec<EntityId> {
        let issued: Vec<Invitation> = emails
            .iter()
            .map(|email| Invitation::issue(email.clone(), now, validity_days))
            .collect();
        let ids = issued.iter().map(|inv| inv.id.clone()).collect();
        info!(count = issued.len(), "Issued invitations");
        self.invitations.extend(issued);
        ids
    }

    /// Send the invitation again with a fresh validity window.
    ///
    /// Accepted invitations cannot be resent.
    pub fn resend(&mut self, id: &str, now: Timestamp, validity_days: i64) -> Result<&Invitation> {
        let index = self.position(id)?;
        let invitation = &mut self.invitations[index];
        if invitation.status == InvitationStatus::Accepted {
            return Err(LearnboardError::validation_field(
                format!("Invitation {id} was already accepted"),
                "status",
            ));
        }

        invitation.sent_at = now;
        invitation.expires_at = now + Duration::days(validity_days);
        invitation.status = InvitationStatus::Pending;
        invitation.accepted_at = None;
        debug!(id, email = %invitation.email, "Resent invitation");
        Ok(invitation)
    }

    /// Withdraw the invitation
    pub fn cancel(&mut self, id: &str) -> Result<Invitation> {
        let index = self.position(id)?;
        let removed = self.invitations.remove(index);
        debug!(id, email = %removed.email, "Cancelled invitation");
        Ok(removed)
    }

    pub fn status_counts(&self, now: Timestamp) -> StatusCounts {
        self.invitations
            .iter()
            .fold(StatusCounts::default(), |mut counts, inv| {
                match inv.effective_status(now) {
                    InvitationStatus::Pending => counts.pending += 1,
                    InvitationStatus::Accepted => counts.accepted += 1,
                    InvitationStatus::Expired => counts.expired += 1,
                }
                counts
            })
    }
}

/// Split a comma-separated address list and validate every entry
pub fn parse_invite_emails(input: &str) -> Result<Vec<String>> {
    let emails: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .collect();

    if emails.is_empty() {
        return Err(LearnboardError::validation_field(
            "At least one e-mail address is required",
            "emails",
        ));
    }

    let invalid: Vec<&str> = emails
        .iter()
        .map(String::as_str)
        .filter(|email| !EMAIL_REGEX.is_match(email))
        .collect();
    if !invalid.is_empty() {
        return Err(LearnboardError::validation_field(
            format!("Invalid e-mail addresses: {}", invalid.join(", ")),
            "emails",
        ));
    }

    Ok(emails)
}

/// Text of the invitation e-mail
pub fn invitation_message(
    translator: &Translator,
    locale: Locale,
    company_name: &str,
    company_code: &str,
) -> String {
    translator.text_with(
        locale,
        "invitation-message",
        &[
            ("company", FluentValue::from(company_name)),
            ("code", FluentValue::from(company_code)),
        ],
    )
}
