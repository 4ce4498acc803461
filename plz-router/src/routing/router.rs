//! The assignment router.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::domain::{Person, PersonContact, PostalCode};

use super::contacts::ContactBook;
use super::error::AssignError;
use super::rules::{Outcome, rule_for};

/// A finished assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalAssignment {
    pub person: Person,
    pub land: &'static str,
    pub contact: PersonContact,
}

/// One of the people the caller may choose from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub person: Person,
    pub contact: PersonContact,
}

/// The caller must pick one of `options` and ask again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceRequest {
    /// Always `true`; lets clients tell the two shapes apart.
    pub requires_choice: bool,
    pub options: Vec<ChoiceOption>,
    pub land: &'static str,
}

/// Result of assigning a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Assignment {
    Resolved(FinalAssignment),
    ChoiceRequired(ChoiceRequest),
}

impl Assignment {
    /// The assigned person, if the assignment is final.
    pub fn person(&self) -> Option<Person> {
        match self {
            Assignment::Resolved(done) => Some(done.person),
            Assignment::ChoiceRequired(_) => None,
        }
    }

    /// The Land label, present in both shapes.
    pub fn land(&self) -> &'static str {
        match self {
            Assignment::Resolved(done) => done.land,
            Assignment::ChoiceRequired(choice) => choice.land,
        }
    }
}

/// Maps postal codes to responsible people.
///
/// Stateless: a pending choice is finished by calling [`assign`] again with
/// the same postal code and the chosen name.
///
/// [`assign`]: AssignmentRouter::assign
#[derive(Debug, Clone)]
pub struct AssignmentRouter {
    contacts: Arc<ContactBook>,
}

impl AssignmentRouter {
    pub fn new(contacts: Arc<ContactBook>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &ContactBook {
        &self.contacts
    }

    /// Assign a postal code given as text.
    ///
    /// The code must be exactly 5 ASCII digits. `chosen_person` is only
    /// consulted where the rule offers a choice.
    pub fn assign(
        &self,
        postal_code: &str,
        chosen_person: Option<&str>,
    ) -> Result<Assignment, AssignError> {
        let code = PostalCode::parse(postal_code)?;
        self.assign_code(code, chosen_person)
    }

    /// Assign an already validated postal code.
    pub fn assign_code(
        &self,
        code: PostalCode,
        chosen_person: Option<&str>,
    ) -> Result<Assignment, AssignError> {
        let leading = code.leading_digit();
        let rule = rule_for(leading).ok_or_else(|| {
            AssignError::Unroutable(code.as_str().chars().next().unwrap_or('?'))
        })?;

        match rule.outcome {
            Outcome::Single(person) => {
                debug!(postal_code = %code, person = %person, "assigned");
                self.finalize(person, rule.land)
            }
            Outcome::Choice(options) => {
                let chosen = chosen_person
                    .and_then(Person::from_name)
                    .filter(|p| options.contains(p));

                match chosen {
                    Some(person) => {
                        debug!(postal_code = %code, person = %person, "assigned by choice");
                        self.finalize(person, rule.land)
                    }
                    None => {
                        debug!(postal_code = %code, "choice required");
                        let options = options
                            .iter()
                            .map(|&person| {
                                Ok(ChoiceOption {
                                    person,
                                    contact: self.contact(person)?,
                                })
                            })
                            .collect::<Result<Vec<_>, AssignError>>()?;
                        Ok(Assignment::ChoiceRequired(ChoiceRequest {
                            requires_choice: true,
                            options,
                            land: rule.land,
                        }))
                    }
                }
            }
        }
    }

    fn finalize(&self, person: Person, land: &'static str) -> Result<Assignment, AssignError> {
        Ok(Assignment::Resolved(FinalAssignment {
            person,
            land,
            contact: self.contact(person)?,
        }))
    }

    fn contact(&self, person: Person) -> Result<PersonContact, AssignError> {
        match self.contacts.contact(person) {
            Some(contact) => Ok(contact.clone()),
            None => {
                error!(person = %person, "contact table has no record for assigned person");
                Err(AssignError::MissingContact(person.name().to_string()))
            }
        }
    }
}
