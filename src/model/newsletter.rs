//! Newsletter subscribe page

use std::time::{Duration, Instant};

/// Simulated round trip of a subscription request
pub const SUBMIT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Frequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily digest",
            Frequency::Weekly => "Weekly roundup",
            Frequency::Monthly => "Monthly highlights",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Frequency::Daily => Frequency::Weekly,
            Frequency::Weekly => Frequency::Monthly,
            Frequency::Monthly => Frequency::Daily,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Frequency::Daily => Frequency::Monthly,
            Frequency::Weekly => Frequency::Daily,
            Frequency::Monthly => Frequency::Weekly,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SubscribeStatus {
    #[default]
    Idle,
    Invalid(String),
    Submitting { since: Instant },
    Subscribed,
}

#[derive(Clone, Debug, Default)]
pub struct NewsletterForm {
    pub email: String,
    pub frequency: Frequency,
    pub status: SubscribeStatus,
}

impl NewsletterForm {
    pub fn is_locked(&self) -> bool {
        matches!(self.status, SubscribeStatus::Submitting { .. } | SubscribeStatus::Subscribed)
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_locked() {
            return;
        }
        self.email.push(c);
        if matches!(self.status, SubscribeStatus::Invalid(_)) {
            self.status = SubscribeStatus::Idle;
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_locked() {
            self.email.pop();
        }
    }

    pub fn clear(&mut self) {
        if !self.is_locked() {
            self.email.clear();
            self.status = SubscribeStatus::Idle;
        }
    }

    pub fn cycle_frequency(&mut self, forward: bool) {
        if self.is_locked() {
            return;
        }
        self.frequency = if forward {
            self.frequency.next()
        } else {
            self.frequency.prev()
        };
    }

    /// Validate and start the simulated submission.
    ///
    /// Returns `false` when the input was rejected or a submission is
    /// already underway.
    pub fn submit(&mut self, now: Instant) -> bool {
        if self.is_locked() {
            return false;
        }
        match validate_email(&self.email) {
            Ok(()) => {
                self.status = SubscribeStatus::Submitting { since: now };
                true
            }
            Err(reason) => {
                self.status = SubscribeStatus::Invalid(reason.to_string());
                false
            }
        }
    }

    pub fn finish_if_due(&mut self, now: Instant) -> bool {
        match self.status {
            SubscribeStatus::Submitting { since }
                if now.saturating_duration_since(since) >= SUBMIT_DELAY =>
            {
                self.status = SubscribeStatus::Subscribed;
                true
            }
            _ => false,
        }
    }

    /// Start over after a completed subscription
    pub fn reset(&mut self) {
        *self = Self {
            frequency: self.frequency,
            ..Self::default()
        };
    }
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Please enter your email address");
    }
    if email.chars().any(char::is_whitespace) {
        return Err("Email addresses cannot contain spaces");
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Email address must contain a single @");
    };
    if local.is_empty() {
        return Err("Missing the part before @");
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err("Domain looks incomplete");
    }
    Ok(())
}
