//! Contact form with validation-gated submission.
//!
//! ```text
//!            edit                 submit (rules fail)
//!  Editing <------ Invalid <----------------------- Editing
//!     |                                               ^
//!     | submit (rules pass): fields reset, errors     | edit
//!     v        cleared                                |
//!  Submitted -----------------------------------------+
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tether_core::*;

pub const NAME_ERROR: &str = "Name field must be at least 3 characters";
pub const EMAIL_ERROR: &str = "Email is invalid";
pub const MESSAGE_ERROR: &str = "Message field must be at least 10 characters";
pub const SUCCESS_MESSAGE: &str = "Form is submitted successfully!";

const NAME_MIN_CHARS: usize = 3;
const MESSAGE_MIN_CHARS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn with(&self, field: Field, value: String) -> Self {
        let mut next = self.clone();
        match field {
            Field::Name => next.name = value,
            Field::Email => next.email = value,
            Field::Message => next.message = value,
        }
        next
    }

    pub fn any_empty(&self) -> bool {
        Field::ALL.iter().any(|f| self.get(*f).is_empty())
    }
}

/// Per-field validation messages. `None` means the field passed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<&'static str> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn cleared(&self, field: Field) -> Self {
        let mut next = self.clone();
        *next.slot(field) = None;
        next
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Runs every rule against `data`.
pub fn validate(data: &FormData) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if data.name.trim().chars().count() < NAME_MIN_CHARS {
        errors.name = Some(NAME_ERROR);
    }
    if !EMAIL_RE.is_match(&data.email) {
        errors.email = Some(EMAIL_ERROR);
    }
    if data.message.trim().chars().count() < MESSAGE_MIN_CHARS {
        errors.message = Some(MESSAGE_ERROR);
    }
    errors
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Editing,
    Invalid,
    Submitted,
}

#[derive(Clone)]
pub struct ContactFormView {
    pub data: FormData,
    pub errors: FieldErrors,
    pub status: FormStatus,
    /// Any message showing, or any field still empty.
    pub submit_disabled: bool,
    on_change: Callback<(Field, String)>,
    on_submit: Callback<()>,
}

impl ContactFormView {
    pub fn success_visible(&self) -> bool {
        self.status == FormStatus::Submitted
    }

    pub fn success_message(&self) -> Option<&'static str> {
        self.success_visible().then_some(SUCCESS_MESSAGE)
    }

    pub fn change(&self, field: Field, value: impl Into<String>) {
        self.on_change.call((field, value.into()));
    }

    /// Validates what this view shows. Not gated on `submit_disabled`; the
    /// rules are.
    pub fn submit(&self) {
        self.on_submit.call(());
    }
}

pub fn ContactForm() -> ContactFormView {
    let data = use_state(FormData::default);
    let errors = use_state(FieldErrors::default);
    let status = use_state(FormStatus::default);

    let current = data.get();
    let current_errors = errors.get();

    bind_effect(deps![current_errors.clone()], {
        let snapshot = current_errors.clone();
        move || {
            log::debug!("error state updated: {snapshot:?}");
            Dispose::none()
        }
    });

    let on_change = Callback::new({
        let (data, errors, status) = (data.clone(), errors.clone(), status.clone());
        move |(field, value): (Field, String)| {
            data.update(move |d| d.with(field, value));
            errors.update(move |e| e.cleared(field));
            status.set(FormStatus::Editing);
        }
    });

    let on_submit = Callback::new({
        let (data, errors, status) = (data.clone(), errors.clone(), status.clone());
        let snapshot = current.clone();
        move |()| {
            let found = validate(&snapshot);
            if found.is_empty() {
                log::info!("contact form submitted for {}", snapshot.email);
                data.set(FormData::default());
                errors.set(FieldErrors::default());
                status.set(FormStatus::Submitted);
            } else {
                log::debug!("contact form blocked: {found:?}");
                errors.set(found);
                status.set(FormStatus::Invalid);
            }
        }
    });

    ContactFormView {
        submit_disabled: !current_errors.is_empty() || current.any_empty(),
        data: current,
        errors: current_errors,
        status: status.get(),
        on_change,
        on_submit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(rt: &Runtime, name: &str, email: &str, message: &str) -> ContactFormView {
        let view = rt.render(ContactForm);
        view.change(Field::Name, name);
        view.change(Field::Email, email);
        view.change(Field::Message, message);
        rt.render(ContactForm)
    }

    #[test]
    fn test_short_name_blocks_submission() {
        let rt = Runtime::new();
        let view = fill(&rt, "Al", "a@b.com", "This message is long enough");
        assert!(!view.submit_disabled);

        view.submit();
        let view = rt.render(ContactForm);

        assert_eq!(view.status, FormStatus::Invalid);
        assert_eq!(view.errors.name, Some(NAME_ERROR));
        assert_eq!(view.errors.email, None);
        assert_eq!(view.errors.message, None);
        assert_eq!(view.data.name, "Al");
        assert!(view.submit_disabled);
        assert!(!view.success_visible());
    }

    #[test]
    fn test_valid_submission_resets_form() {
        let rt = Runtime::new();
        let view = fill(&rt, "Alice", "a@b.com", "This message is long enough");

        view.submit();
        let view = rt.render(ContactForm);

        assert_eq!(view.status, FormStatus::Submitted);
        assert_eq!(view.data, FormData::default());
        assert!(view.errors.is_empty());
        assert_eq!(view.success_message(), Some(SUCCESS_MESSAGE));
    }

    #[test]
    fn test_edit_leaves_submitted_and_clears_field_error() {
        let rt = Runtime::new();
        let view = fill(&rt, "Al", "nope", "short");
        view.submit();
        let view = rt.render(ContactForm);
        assert_eq!(view.status, FormStatus::Invalid);

        view.change(Field::Name, "Alice");
        let view = rt.render(ContactForm);
        assert_eq!(view.status, FormStatus::Editing);
        assert_eq!(view.errors.name, None);
        assert_eq!(view.errors.email, Some(EMAIL_ERROR));

        view.change(Field::Email, "a@b.com");
        view.change(Field::Message, "This message is long enough");
        let view = rt.render(ContactForm);
        assert!(!view.submit_disabled);
        view.submit();
        let view = rt.render(ContactForm);
        assert!(view.success_visible());

        view.change(Field::Name, "B");
        let view = rt.render(ContactForm);
        assert_eq!(view.status, FormStatus::Editing);
        assert!(!view.success_visible());
    }

    #[test]
    fn test_stale_view_submits_its_own_snapshot() {
        let rt = Runtime::new();
        let view = rt.render(ContactForm);
        assert_eq!(view.status, FormStatus::default());

        let filled = fill(&rt, "Alice", "a@b.com", "This message is long enough");
        view.submit();
        let after = rt.render(ContactForm);
        assert_eq!(after.status, FormStatus::Invalid);
        assert_eq!(after.errors, validate(&FormData::default()));

        filled.submit();
        let after = rt.render(ContactForm);
        assert_eq!(after.status, FormStatus::Submitted);
    }

    #[test]
    fn test_submit_disabled_until_every_field_filled() {
        let rt = Runtime::new();
        let view = rt.render(ContactForm);
        assert!(view.submit_disabled);

        view.change(Field::Name, "Alice");
        view.change(Field::Email, "a@b.com");
        let view = rt.render(ContactForm);
        assert!(view.submit_disabled);
    }

    #[test]
    fn test_rules() {
        let ok = FormData {
            name: "  Bob ".into(),
            email: "bob@example.org".into(),
            message: "0123456789".into(),
        };
        assert!(validate(&ok).is_empty());

        for bad in ["bob.example.org", "bob@example", "@x.y", "a @b.c"] {
            let data = FormData {
                email: bad.into(),
                ..ok.clone()
            };
            assert_eq!(validate(&data).email, Some(EMAIL_ERROR), "{bad}");
        }

        let padded = FormData {
            name: " Al  ".into(),
            message: "   short    ".into(),
            ..ok
        };
        let errors = validate(&padded);
        assert_eq!(errors.name, Some(NAME_ERROR));
        assert_eq!(errors.message, Some(MESSAGE_ERROR));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        insta::assert_debug_snapshot!(validate(&FormData::default()), @r#"
        FieldErrors {
            name: Some(
                "Name field must be at least 3 characters",
            ),
            email: Some(
                "Email is invalid",
            ),
            message: Some(
                "Message field must be at least 10 characters",
            ),
        }
        "#);
    }
}
