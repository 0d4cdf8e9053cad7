//! # Party Example
//!
//! A list of invited people and the form used to add one more.
//!
//! The form keeps its own draft; submitting appends the draft to the list
//! and resets the form to blank fields.

use parlour_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// An invited person, as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    /// Name
    pub name: String,
    /// Age, as typed
    pub age: String,
    /// Picture URL
    pub url: String,
    /// Optional note
    pub note: String,
}

/// Form field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    /// `name`
    Name,
    /// `age`
    Age,
    /// `url`
    Url,
    /// `note`
    Note,
}

/// Party state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyState {
    /// Everyone invited so far
    pub people: Vec<Person>,
    /// Draft for the next invite
    pub form: Person,
}

impl Default for PartyState {
    fn default() -> Self {
        Self {
            people: vec![Person {
                name: "dace".to_string(),
                age: "21".to_string(),
                url: "url".to_string(),
                note: "dgfdfgdfg".to_string(),
            }],
            form: Person::default(),
        }
    }
}

/// Party actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartyAction {
    /// Replace one form field
    EditForm {
        /// Field to change
        field: PersonField,
        /// New text
        value: String,
    },
    /// Append the draft to the list and clear the form
    SubmitForm,
}

/// Party reducer
#[derive(Debug, Clone, Copy, Default)]
pub struct PartyReducer;

impl Reducer for PartyReducer {
    type State = PartyState;
    type Action = PartyAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PartyAction::EditForm { field, value } => {
                let slot = match field {
                    PersonField::Name => &mut state.form.name,
                    PersonField::Age => &mut state.form.age,
                    PersonField::Url => &mut state.form.url,
                    PersonField::Note => &mut state.form.note,
                };
                *slot = value;
            },
            PartyAction::SubmitForm => {
                let invited = std::mem::take(&mut state.form);
                state.people.push(invited);
            },
        }

        smallvec![Effect::None]
    }
}
