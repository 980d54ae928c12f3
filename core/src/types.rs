//! The form record and its submitted form.
//!
//! `FormValues` is the typed view of the form at any moment: `age` and `dob`
//! are `None` while their text does not transcode. `SubmittedValues` is what
//! a submit handler receives after a passing validation, so both are present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::list::ListEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    pub twitter: String,
    pub facebook: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub username: String,
    pub email: String,
    pub channel: String,
    pub social: Social,
    pub phone_numbers: [String; 2],
    pub ph_numbers: Vec<ListEntry>,
    pub age: Option<f64>,
    pub dob: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedValues {
    pub username: String,
    pub email: String,
    pub channel: String,
    pub social: Social,
    pub phone_numbers: [String; 2],
    pub ph_numbers: Vec<ListEntry>,
    pub age: f64,
    pub dob: NaiveDate,
}

impl SubmittedValues {
    /// `None` if `age` or `dob` did not transcode.
    pub fn from_values(values: FormValues) -> Option<Self> {
        Some(Self {
            age: values.age?,
            dob: values.dob?,
            username: values.username,
            email: values.email,
            channel: values.channel,
            social: values.social,
            phone_numbers: values.phone_numbers,
            ph_numbers: values.ph_numbers,
        })
    }
}

/// The part of the remote user record the form consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteDefaults {
    pub email: String,
}
