use crate::ui::{ContactForm, FieldSlot, InputKind, Notifier};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Where to look when the form has no control carrying `name()`.
    pub fn fallback_slot(self) -> FieldSlot {
        match self {
            Self::Name => FieldSlot { kind: InputKind::Text, nth: 0 },
            Self::Email => FieldSlot { kind: InputKind::Email, nth: 0 },
            Self::Subject => FieldSlot { kind: InputKind::Text, nth: 1 },
            Self::Message => FieldSlot { kind: InputKind::TextArea, nth: 0 },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Named lookup first; an empty named value counts as a miss. Fields
    /// missing both ways come back empty.
    pub fn extract(form: &dyn ContactForm) -> Self {
        let read = |field: FormField| {
            form.named_value(field.name())
                .filter(|value| !value.is_empty())
                .or_else(|| form.positional_value(field.fallback_slot()))
                .unwrap_or_default()
        };

        Self {
            name: read(FormField::Name),
            email: read(FormField::Email),
            subject: read(FormField::Subject),
            message: read(FormField::Message),
        }
    }

    pub fn acknowledgement(&self) -> String {
        format!(
            "Thank you, {}! Your message has been sent. I'll get back to you soon.",
            self.name
        )
    }
}

/// Reads the form, shows the acknowledgement and clears the fields.
pub fn submit(form: &dyn ContactForm, notifier: &dyn Notifier) -> ContactSubmission {
    let submission = ContactSubmission::extract(form);
    notifier.acknowledge(&submission.acknowledgement());
    form.reset();
    submission
}
