//! Contact form that hands the message off to the visitor's mail client.
//!
//! There is no backend: a valid submit builds a `mailto:` link, opens it and
//! then plays out the "sending" button state on timers.

use std::fmt::Write as _;

use folio_core::config::ContactConfig;

use crate::notify::NotificationKind;
use crate::timer::Timers;

/// Label of the idle submit button.
pub const SUBMIT_LABEL: &str = "Send Message";
/// Label while the mail client is being opened.
pub const SENDING_LABEL: &str = "Sending...";
/// Shown when a submit fails validation.
pub const INVALID_MESSAGE: &str = "Please fill in all fields correctly.";
/// Shown once the mail client has been opened.
pub const OPENED_MESSAGE: &str = "Email client opened! Please send the message from your email app.";

/// Form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Sender's name.
    Name,
    /// Sender's address.
    Email,
    /// Subject line.
    Subject,
    /// Message body.
    Message,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Subject => 2,
            Self::Message => 3,
        }
    }

    /// Input name attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Checks a raw input value.
    #[must_use]
    pub fn validate(self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Self::Email => is_valid_email(value),
            Self::Name | Self::Subject | Self::Message => !value.is_empty(),
        }
    }
}

/// Presentation change produced by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormChange {
    /// The field's wrapper gains/loses the `focused` marker.
    Focused(Field, bool),
    /// The field gains/loses the `error` marker.
    Invalid(Field, bool),
    /// Show a toast.
    Notify(NotificationKind, String),
    /// Navigate to this URL (the `mailto:` hand-off).
    OpenUrl(String),
    /// Submit button state.
    Button {
        /// Whether clicks are ignored.
        disabled: bool,
        /// Button text.
        label: String,
    },
    /// All inputs cleared.
    Reset,
}

#[derive(Debug, Clone, Copy)]
enum FormTimer {
    Opened,
    RestoreButton,
}

/// Contact form state.
#[derive(Debug)]
pub struct ContactForm {
    config: ContactConfig,
    values: [String; 4],
    focused: [bool; 4],
    invalid: [bool; 4],
    sending: bool,
    timers: Timers<FormTimer>,
}

impl ContactForm {
    /// An empty form.
    #[must_use]
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config,
            values: Default::default(),
            focused: [false; 4],
            invalid: [false; 4],
            sending: false,
            timers: Timers::new(),
        }
    }

    /// Current raw value of `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// True while `field` carries the error marker.
    #[must_use]
    pub fn is_invalid(&self, field: Field) -> bool {
        self.invalid[field.index()]
    }

    /// True while the submit button is disabled.
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        self.sending
    }

    /// Input gained focus.
    pub fn focus(&mut self, field: Field) -> Vec<FormChange> {
        self.set_focused(field, true).into_iter().collect()
    }

    /// Input lost focus. The marker stays while the input has text.
    pub fn blur(&mut self, field: Field) -> Vec<FormChange> {
        if self.values[field.index()].is_empty() {
            self.set_focused(field, false).into_iter().collect()
        } else {
            Vec::new()
        }
    }

    /// Input text changed; re-validates that field.
    pub fn input(&mut self, field: Field, value: impl Into<String>) -> Vec<FormChange> {
        self.values[field.index()] = value.into();
        self.revalidate(field).into_iter().collect()
    }

    /// Submit pressed.
    pub fn submit(&mut self) -> Vec<FormChange> {
        if self.sending {
            return Vec::new();
        }

        let mut changes: Vec<FormChange> = Field::ALL.iter().filter_map(|&f| self.revalidate(f)).collect();

        if self.invalid.iter().any(|&bad| bad) {
            tracing::debug!("contact form rejected");
            changes.push(FormChange::Notify(NotificationKind::Error, INVALID_MESSAGE.to_string()));
            return changes;
        }

        let link = self.mailto_link();
        tracing::info!(recipient = %self.config.recipient, "opening mail client");
        changes.push(FormChange::Button {
            disabled: true,
            label: SENDING_LABEL.to_string(),
        });
        changes.push(FormChange::OpenUrl(link));

        self.sending = true;
        self.timers.schedule(self.config.open_delay, FormTimer::Opened);
        self.timers.schedule(self.config.restore_delay, FormTimer::RestoreButton);
        changes
    }

    /// The `mailto:` link for the current values.
    #[must_use]
    pub fn mailto_link(&self) -> String {
        let body = format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.value(Field::Name),
            self.value(Field::Email),
            self.value(Field::Message)
        );
        format!(
            "mailto:{}?subject={}&body={}",
            self.config.recipient,
            encode_uri_component(self.value(Field::Subject)),
            encode_uri_component(&body)
        )
    }

    /// Advances the post-submit timers.
    pub fn update(&mut self, dt: f32) -> Vec<FormChange> {
        let mut changes = Vec::new();
        for timer in self.timers.update(dt) {
            match timer {
                FormTimer::Opened => {
                    changes.push(FormChange::Notify(NotificationKind::Success, OPENED_MESSAGE.to_string()));
                    changes.push(FormChange::Reset);
                    for field in Field::ALL {
                        self.values[field.index()].clear();
                        changes.extend(self.set_focused(field, false));
                        if std::mem::replace(&mut self.invalid[field.index()], false) {
                            changes.push(FormChange::Invalid(field, false));
                        }
                    }
                }
                FormTimer::RestoreButton => {
                    self.sending = false;
                    changes.push(FormChange::Button {
                        disabled: false,
                        label: SUBMIT_LABEL.to_string(),
                    });
                }
            }
        }
        changes
    }

    fn set_focused(&mut self, field: Field, focused: bool) -> Option<FormChange> {
        let slot = &mut self.focused[field.index()];
        if *slot == focused {
            return None;
        }
        *slot = focused;
        Some(FormChange::Focused(field, focused))
    }

    fn revalidate(&mut self, field: Field) -> Option<FormChange> {
        let invalid = !field.validate(&self.values[field.index()]);
        let slot = &mut self.invalid[field.index()];
        if *slot == invalid {
            return None;
        }
        *slot = invalid;
        Some(FormChange::Invalid(field, invalid))
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the
/// domain with text on both sides.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the
/// same set `encodeURIComponent` leaves alone.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            out.push(char::from(byte));
        } else {
            // Writing to a String cannot fail.
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new(ContactConfig::default());
        form.input(Field::Name, "Ada");
        form.input(Field::Email, "ada@example.com");
        form.input(Field::Subject, "Hi there");
        form.input(Field::Message, "Line one\nLine two");
        form
    }

    #[test]
    fn test_email_rule() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("Hi there"), "Hi%20there");
        assert_eq!(encode_uri_component("a&b=c?"), "a%26b%3Dc%3F");
        assert_eq!(encode_uri_component("ok-_.!~*'()"), "ok-_.!~*'()");
        assert_eq!(encode_uri_component("\n"), "%0A");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn test_focus_blur_marker() {
        let mut form = ContactForm::new(ContactConfig::default());
        assert_eq!(form.focus(Field::Name), vec![FormChange::Focused(Field::Name, true)]);
        assert_eq!(form.blur(Field::Name), vec![FormChange::Focused(Field::Name, false)]);

        form.focus(Field::Name);
        form.input(Field::Name, "x");
        assert!(form.blur(Field::Name).is_empty());
    }

    #[test]
    fn test_live_validation() {
        let mut form = ContactForm::new(ContactConfig::default());
        assert_eq!(form.input(Field::Email, "nope"), vec![FormChange::Invalid(Field::Email, true)]);
        assert!(form.input(Field::Email, "still nope").is_empty());
        assert_eq!(form.input(Field::Email, "a@b.io"), vec![FormChange::Invalid(Field::Email, false)]);
        assert_eq!(form.input(Field::Subject, "   "), vec![FormChange::Invalid(Field::Subject, true)]);
    }

    #[test]
    fn test_invalid_submit_notifies() {
        let mut form = ContactForm::new(ContactConfig::default());
        let changes = form.submit();
        assert!(changes.contains(&FormChange::Notify(NotificationKind::Error, INVALID_MESSAGE.to_string())));
        assert!(Field::ALL.iter().all(|&f| form.is_invalid(f)));
        assert!(!form.is_sending());
    }

    #[test]
    fn test_mailto_link() {
        let form = filled();
        assert_eq!(
            form.mailto_link(),
            "mailto:AbhijnanSahariah18@gmail.com?subject=Hi%20there&body=Name%3A%20Ada%0AEmail%3A%20ada%40example.com%0A%0AMessage%3A%0ALine%20one%0ALine%20two"
        );
    }

    #[test]
    fn test_submit_lifecycle() {
        let mut form = filled();
        form.focus(Field::Name);

        let changes = form.submit();
        assert!(changes.contains(&FormChange::Button {
            disabled: true,
            label: SENDING_LABEL.to_string()
        }));
        assert!(changes.iter().any(|c| matches!(c, FormChange::OpenUrl(url) if url.starts_with("mailto:"))));
        assert!(form.is_sending());
        assert!(form.submit().is_empty());

        let changes = form.update(1.0);
        assert!(changes.contains(&FormChange::Notify(NotificationKind::Success, OPENED_MESSAGE.to_string())));
        assert!(changes.contains(&FormChange::Reset));
        assert!(changes.contains(&FormChange::Focused(Field::Name, false)));
        assert_eq!(form.value(Field::Message), "");
        assert!(form.is_sending());

        let changes = form.update(1.0);
        assert_eq!(
            changes,
            vec![FormChange::Button {
                disabled: false,
                label: SUBMIT_LABEL.to_string()
            }]
        );
        assert!(!form.is_sending());
    }
}
