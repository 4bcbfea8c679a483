//! Login and registration forms.
//!
//! Both panels share one form model: a list of text fields, a focus index
//! and a `submitting` flag that disables the submit control while a request
//! is in flight.

mod render;
mod update;

pub use render::{render_login, render_register};
pub use update::{FormAction, handle_form_key, handle_form_paste};
use taller_core::models::{Credentials, RegistrationRequest};

/// A single-line text input.
#[derive(Debug, Clone)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    /// Rendered masked (passwords).
    pub secret: bool,
}

impl TextField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            secret: false,
        }
    }

    fn secret(label: &'static str) -> Self {
        Self {
            secret: true,
            ..Self::new(label)
        }
    }
}

/// Generic form state.
#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: Vec<TextField>,
    /// Focused field index; `fields.len()` is the submit control.
    pub focus: usize,
    pub submitting: bool,
}

impl FormState {
    fn with_fields(fields: Vec<TextField>) -> Self {
        Self {
            fields,
            focus: 0,
            submitting: false,
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.as_str())
    }

    pub fn submit_focused(&self) -> bool {
        self.focus == self.fields.len()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (self.fields.len() + 1);
    }

    pub fn focus_prev(&mut self) {
        let slots = self.fields.len() + 1;
        self.focus = (self.focus + slots - 1) % slots;
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        self.fields.get_mut(self.focus)
    }

    /// Empties every field and moves focus back to the first one.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }
}

pub const USERNAME_LABEL: &str = "Usuario";
pub const PASSWORD_LABEL: &str = "Contraseña";
pub const EMAIL_LABEL: &str = "Email";
pub const FIRST_NAME_LABEL: &str = "Nombre";
pub const LAST_NAME_LABEL: &str = "Apellido";

/// Login panel.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub form: FormState,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            form: FormState::with_fields(vec![
                TextField::new(USERNAME_LABEL),
                TextField::secret(PASSWORD_LABEL),
            ]),
        }
    }
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.form.value(0), self.form.value(1))
    }
}

/// Registration panel.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub form: FormState,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            form: FormState::with_fields(vec![
                TextField::new(FIRST_NAME_LABEL),
                TextField::new(LAST_NAME_LABEL),
                TextField::new(USERNAME_LABEL),
                TextField::new(EMAIL_LABEL),
                TextField::secret(PASSWORD_LABEL),
            ]),
        }
    }
}

impl RegisterForm {
    pub fn request(&self) -> RegistrationRequest {
        RegistrationRequest::new(
            self.form.value(2),
            self.form.value(3),
            self.form.value(4),
            self.form.value(0),
            self.form.value(1),
        )
    }
}
