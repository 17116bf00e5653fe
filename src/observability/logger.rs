//! Line-oriented JSON logger
//!
//! Synchronous, no buffering. Keys are ordered alphabetically (serde_json's
//! default map), so identical events always serialize identically.

use std::io::{self, Write};

use serde_json::{Map, Value};

use super::events::Event;

/// Structured logger for engine events
pub struct Logger;

impl Logger {
    /// Log an event with the given fields to stdout
    pub fn log(event: Event, fields: &[(&str, String)]) {
        Self::log_to_writer(event, fields, &mut io::stdout());
    }

    fn log_to_writer<W: Write>(event: Event, fields: &[(&str, String)], writer: &mut W) {
        let mut map = Map::new();
        map.insert("event".into(), Value::from(event.name()));
        map.insert("severity".into(), Value::from(event.severity().as_str()));
        for (key, value) in fields {
            map.insert((*key).into(), Value::from(value.as_str()));
        }

        let _ = writeln!(writer, "{}", Value::Object(map));
        let _ = writer.flush();
    }
}
