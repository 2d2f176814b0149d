//! Points and their InfluxDB line protocol encoding.
//!
//! See <https://docs.influxdata.com/influxdb/v2/reference/syntax/line-protocol/>.

use std::{
    collections::BTreeMap,
    fmt::{self, Write},
    time::{SystemTime, UNIX_EPOCH},
};

/// A field value. Only the kinds a UPS reading needs are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Boolean(bool),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

/// A single timestamped measurement.
///
/// Tags and fields are kept in [`BTreeMap`]s so the encoded output is always
/// sorted by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    measurement: String,
    tags: BTreeMap<String, String>,
    fields: BTreeMap<String, FieldValue>,
    timestamp_ns: i128,
}

impl Point {
    pub fn new<S: Into<String>>(measurement: S, at: SystemTime) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp_ns: unix_nanos(at),
        }
    }

    pub fn tag<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn field<K: Into<String>, V: Into<FieldValue>>(mut self, key: K, value: V) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn timestamp_ns(&self) -> i128 {
        self.timestamp_ns
    }

    /// Encodes this point as a single line of line protocol, without a
    /// trailing newline.
    pub fn to_line_protocol(&self) -> String {
        self.to_string()
    }

    fn write_line_protocol<W: Write>(&self, out: &mut W) -> fmt::Result {
        write_escaped(out, &self.measurement, &[',', ' '])?;

        // Empty tag values aren't allowed in line protocol, so they are dropped.
        for (key, value) in self.tags.iter().filter(|(_, v)| !v.is_empty()) {
            out.write_char(',')?;
            write_escaped(out, key, &[',', '=', ' '])?;
            out.write_char('=')?;
            write_escaped(out, value, &[',', '=', ' '])?;
        }

        let mut sep = ' ';
        for (key, value) in &self.fields {
            out.write_char(sep)?;
            sep = ',';

            write_escaped(out, key, &[',', '=', ' '])?;
            out.write_char('=')?;
            match value {
                FieldValue::Integer(v) => write!(out, "{v}i")?,
                FieldValue::Boolean(v) => write!(out, "{v}")?,
            }
        }

        write!(out, " {}", self.timestamp_ns)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_line_protocol(f)
    }
}

/// Encodes a batch of points, one per line.
pub fn to_line_protocol(points: &[Point]) -> String {
    points
        .iter()
        .map(Point::to_line_protocol)
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_escaped<W: Write>(out: &mut W, s: &str, special: &[char]) -> fmt::Result {
    for c in s.chars() {
        if special.contains(&c) {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }

    Ok(())
}

fn unix_nanos(at: SystemTime) -> i128 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_nanos() as i128,
        Err(before) => -(before.duration().as_nanos() as i128),
    }
}
