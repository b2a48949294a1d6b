//! Attendance roster fed by a signature pad.
//!
//! The roster keeps the form currently being filled in, the signature the
//! bound pad last saved, and the list of completed attendees. Adding an
//! attendee validates the record, stamps it with the capture time and blanks
//! the pad through its `SignatureControl` handle.

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::pad::SignaturePad;
use crate::{Error, Result, SignatureControl};

/// Timestamp layout: es-ES short date with medium time, e.g. `18/10/26, 14:05:09`.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%y, %H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub dni: String,
    pub training_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: i64,
    pub name: String,
    pub dni: String,
    pub training_name: String,
    pub signature_data_url: String,
    pub signature_timestamp: String,
}

#[derive(Default)]
pub struct Roster {
    form: FormData,
    attendees: Vec<Attendee>,
    pending: Arc<Mutex<Option<String>>>,
    last_id: i64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route the pad's save/clear callbacks into this roster's pending slot.
    pub fn bind(&self, pad: &mut SignaturePad) {
        let saved = self.pending.clone();
        pad.on_save(move |image| {
            *saved.lock().unwrap_or_else(|p| p.into_inner()) = Some(image.to_data_url());
        });
        let cleared = self.pending.clone();
        pad.on_clear(move || {
            *cleared.lock().unwrap_or_else(|p| p.into_inner()) = None;
        });
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    /// Set a form field by its form name (`name`, `dni`, `trainingName`).
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let slot = match field {
            "name" => &mut self.form.name,
            "dni" => &mut self.form.dni,
            "trainingName" => &mut self.form.training_name,
            other => return Err(Error::InvalidInput(format!("unknown form field '{}'", other))),
        };
        *slot = value.into();
        Ok(())
    }

    pub fn pending_signature(&self) -> Option<String> {
        self.pending.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Check that every field is filled in and a signature has been saved.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.form.name.trim().is_empty() {
            missing.push("name");
        }
        if self.form.dni.trim().is_empty() {
            missing.push("dni");
        }
        if self.form.training_name.trim().is_empty() {
            missing.push("trainingName");
        }
        if self.pending_signature().is_none() {
            missing.push("signature");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::IncompleteRecord(format!("missing {}", missing.join(", "))))
        }
    }

    pub fn is_form_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn add_attendee(&mut self, pad: &mut dyn SignatureControl) -> Result<&Attendee> {
        self.add_attendee_at(pad, &Local::now())
    }

    /// Append the current form as an attendee captured at `now`, then reset
    /// the form (keeping the training) and clear the pad.
    ///
    /// The id is the capture instant in Unix milliseconds; the timestamp is
    /// the wall-clock time in `now`'s zone.
    pub fn add_attendee_at<Tz>(&mut self, pad: &mut dyn SignatureControl, now: &DateTime<Tz>) -> Result<&Attendee>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.validate()?;
        let signature_data_url = self
            .pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take()
            .ok_or_else(|| Error::IncompleteRecord("missing signature".into()))?;

        let millis = now.timestamp_millis();
        let id = if millis > self.last_id { millis } else { self.last_id + 1 };
        self.last_id = id;

        let form = std::mem::take(&mut self.form);
        self.form.training_name = form.training_name.clone();
        self.attendees.push(Attendee {
            id,
            name: form.name,
            dni: form.dni,
            training_name: form.training_name,
            signature_data_url,
            signature_timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        });
        debug!("added attendee {} ({} total)", id, self.attendees.len());

        pad.clear();
        self.attendees
            .last()
            .ok_or_else(|| Error::IncompleteRecord("attendee was not recorded".into()))
    }

    /// Remove an attendee by id; returns whether one was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.attendees.len();
        self.attendees.retain(|a| a.id != id);
        self.attendees.len() != before
    }

    pub fn clear_list(&mut self) {
        self.attendees.clear();
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    struct CountingControl(usize);

    impl SignatureControl for CountingControl {
        fn clear(&mut self) {
            self.0 += 1;
        }
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, h, m, s).unwrap()
    }

    fn filled(roster: &mut Roster) {
        roster.set_field("name", "Ana Pérez").unwrap();
        roster.set_field("dni", "30111222").unwrap();
        roster.set_field("trainingName", "Primeros Auxilios").unwrap();
        *roster.pending.lock().unwrap() = Some("data:image/png;base64,AAAA".into());
    }

    #[test]
    fn validation_lists_missing_fields() {
        let mut roster = Roster::new();
        roster.set_field("name", "  ").unwrap();
        match roster.validate() {
            Err(Error::IncompleteRecord(msg)) => {
                assert_eq!(msg, "missing name, dni, trainingName, signature");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut roster = Roster::new();
        assert!(matches!(roster.set_field("email", "x"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn adding_resets_form_but_keeps_training() {
        let mut roster = Roster::new();
        let mut pad = CountingControl(0);
        filled(&mut roster);
        let added = roster.add_attendee_at(&mut pad, &at(14, 5, 9)).unwrap().clone();
        assert_eq!(added.signature_timestamp, "18/10/26, 14:05:09");
        assert_eq!(added.name, "Ana Pérez");
        assert_eq!(pad.0, 1);
        assert_eq!(roster.form().training_name, "Primeros Auxilios");
        assert!(roster.form().name.is_empty());
        assert!(roster.pending_signature().is_none());
        assert!(!roster.is_form_valid());
    }

    #[test]
    fn incomplete_record_leaves_pad_alone() {
        let mut roster = Roster::new();
        let mut pad = CountingControl(0);
        assert!(roster.add_attendee_at(&mut pad, &at(9, 0, 0)).is_err());
        assert_eq!(pad.0, 0);
        assert!(roster.is_empty());
    }

    #[test]
    fn id_is_unix_millis_and_timestamp_is_wall_clock() {
        let mut roster = Roster::new();
        let mut pad = CountingControl(0);
        filled(&mut roster);
        let art = FixedOffset::west_opt(3 * 3600).unwrap();
        let captured = art.with_ymd_and_hms(2026, 10, 18, 11, 5, 9).unwrap();
        let added = roster.add_attendee_at(&mut pad, &captured).unwrap();
        assert_eq!(added.id, at(14, 5, 9).timestamp_millis());
        assert_eq!(added.signature_timestamp, "18/10/26, 11:05:09");
    }

    #[test]
    fn ids_stay_unique_within_the_same_millisecond() {
        let mut roster = Roster::new();
        let mut pad = CountingControl(0);
        filled(&mut roster);
        let a = roster.add_attendee_at(&mut pad, &at(10, 0, 0)).unwrap().id;
        filled(&mut roster);
        let b = roster.add_attendee_at(&mut pad, &at(10, 0, 0)).unwrap().id;
        assert_eq!(b, a + 1);
        assert!(roster.remove(a));
        assert!(!roster.remove(a));
        assert_eq!(roster.len(), 1);
        roster.clear_list();
        assert!(roster.is_empty());
    }

    #[test]
    fn attendee_serializes_with_camel_case_keys() {
        let a = Attendee {
            id: 1,
            name: "A".into(),
            dni: "1".into(),
            training_name: "T".into(),
            signature_data_url: "data:".into(),
            signature_timestamp: "ts".into(),
        };
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["trainingName"], "T");
        assert_eq!(v["signatureDataUrl"], "data:");
    }
}
