//! Assignment errors.

use crate::domain::InvalidPostalCode;

/// Errors from assigning a postal code to a person.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    /// Not exactly 5 digits
    #[error(transparent)]
    InvalidFormat(#[from] InvalidPostalCode),

    /// No rule covers the leading character
    #[error("postal code starting with '{0}' is not assignable")]
    Unroutable(char),

    /// The rule table names a person the contact table does not know
    #[error("no contact record for {0}")]
    MissingContact(String),
}

impl AssignError {
    /// German message for the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            AssignError::InvalidFormat(_) => {
                "Ungültige PLZ. Bitte geben Sie eine 5-stellige Zahl ein."
            }
            AssignError::Unroutable(_) => "PLZ nicht zuordenbar.",
            AssignError::MissingContact(_) => {
                "Interner Fehler bei der Zuordnung. Bitte versuchen Sie es später erneut."
            }
        }
    }
}
