//! Form copy for the three abstraction levels.
//!
//! A pure lookup keyed by {level × field}; there is no behavior here, only
//! wording. "Concrete" speaks in everyday language, "abstract" in IFS
//! terminology, "mixed" blends the two.

use std::collections::HashMap;

use crate::contract::model::AbstractionLevel;

/// The form fields that carry level-dependent copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Role,
    Description,
    Feelings,
    Beliefs,
    Triggers,
    Needs,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Role,
        FormField::Description,
        FormField::Feelings,
        FormField::Beliefs,
        FormField::Triggers,
        FormField::Needs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Role => "role",
            FormField::Description => "description",
            FormField::Feelings => "feelings",
            FormField::Beliefs => "beliefs",
            FormField::Triggers => "triggers",
            FormField::Needs => "needs",
        }
    }
}

/// Copy for one {level × field} cell. Total over both enums.
pub fn form_copy(level: AbstractionLevel, field: FormField) -> &'static str {
    use AbstractionLevel::*;
    use FormField::*;

    match (level, field) {
        (Concrete, Name) => "What do you call this side of you?",
        (Concrete, Role) => "What job does it do for you day to day?",
        (Concrete, Description) => "Describe how it shows up: voice, posture, habits.",
        (Concrete, Feelings) => "What feelings come with it? (e.g. tense, tired, excited)",
        (Concrete, Beliefs) => "What does it tell you about yourself or the world?",
        (Concrete, Triggers) => "Which situations switch it on?",
        (Concrete, Needs) => "What would help it relax?",

        (Abstract, Name) => "Name of this part",
        (Abstract, Role) => "IFS role (Manager, Firefighter, Exile, Protector)",
        (Abstract, Description) => "How this part functions within the system",
        (Abstract, Feelings) => "Affects carried by this part",
        (Abstract, Beliefs) => "Core beliefs or burdens this part holds",
        (Abstract, Triggers) => "Activating conditions for this part",
        (Abstract, Needs) => "What this part needs from Self",

        (Mixed, Name) => "What do you call this part?",
        (Mixed, Role) => "Its role in your system (Manager, Firefighter, …)",
        (Mixed, Description) => "How this part shows up and what it does for you",
        (Mixed, Feelings) => "Feelings this part carries",
        (Mixed, Beliefs) => "Beliefs or burdens it holds",
        (Mixed, Triggers) => "What activates this part?",
        (Mixed, Needs) => "What does this part need?",
    }
}

/// The full copy table for one level, keyed by field name.
pub fn copy_for_level(level: AbstractionLevel) -> HashMap<&'static str, &'static str> {
    FormField::ALL
        .iter()
        .map(|f| (f.as_str(), form_copy(level, *f)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total_and_non_empty() {
        for level in AbstractionLevel::ALL {
            for field in FormField::ALL {
                assert!(!form_copy(level, field).is_empty());
            }
        }
    }

    #[test]
    fn copy_for_level_covers_every_field() {
        for level in AbstractionLevel::ALL {
            let table = copy_for_level(level);
            assert_eq!(table.len(), FormField::ALL.len());
            assert!(table.contains_key("name"));
            assert!(table.contains_key("needs"));
        }
    }

    #[test]
    fn levels_word_things_differently() {
        assert_ne!(
            form_copy(AbstractionLevel::Concrete, FormField::Name),
            form_copy(AbstractionLevel::Abstract, FormField::Name)
        );
    }
}
