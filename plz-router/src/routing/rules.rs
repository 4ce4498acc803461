//! The leading-digit rule table.

use crate::domain::Person;

/// Who is responsible under a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// One person is responsible.
    Single(Person),
    /// Either person may be chosen by the caller.
    Choice([Person; 2]),
}

impl Outcome {
    /// Every person named by this outcome.
    pub fn persons(&self) -> &[Person] {
        match self {
            Outcome::Single(person) => std::slice::from_ref(person),
            Outcome::Choice(persons) => persons,
        }
    }
}

/// Rule for one leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentRule {
    pub outcome: Outcome,
    /// Federal state label shown with the result.
    pub land: &'static str,
}

const NORTH_EAST: Outcome = Outcome::Single(Person::MattiasHerbst);
const WEST: Outcome = Outcome::Choice([Person::MattiasHerbst, Person::AnnaKropfitsch]);
const CENTRE_SOUTH_WEST: Outcome = Outcome::Single(Person::CarmenBergar);
const SOUTH: Outcome = Outcome::Single(Person::AnnaKropfitsch);

/// Look up the rule for a leading digit.
///
/// Returns `None` for anything outside 0-9.
pub fn rule_for(digit: u8) -> Option<AssignmentRule> {
    let (outcome, land) = match digit {
        0 => (NORTH_EAST, "Sachsen/Thüringen/Sachsen-Anhalt"),
        1 => (NORTH_EAST, "Brandenburg/Berlin"),
        2 => (
            NORTH_EAST,
            "Hamburg/Schleswig-Holstein/Mecklenburg-Vorpommern",
        ),
        3 => (NORTH_EAST, "Niedersachsen/Bremen"),
        4 => (WEST, "Nordrhein-Westfalen"),
        5 => (WEST, "Nordrhein-Westfalen/Rheinland-Pfalz"),
        6 => (CENTRE_SOUTH_WEST, "Hessen/Rheinland-Pfalz/Saarland"),
        7 => (CENTRE_SOUTH_WEST, "Baden-Württemberg"),
        8 => (SOUTH, "Bayern"),
        9 => (SOUTH, "Bayern/Thüringen"),
        _ => return None,
    };
    Some(AssignmentRule { outcome, land })
}

/// Every rule in digit order.
pub fn all_rules() -> impl Iterator<Item = (u8, AssignmentRule)> {
    (0..=9).filter_map(|d| rule_for(d).map(|rule| (d, rule)))
}
