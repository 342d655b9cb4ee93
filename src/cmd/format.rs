/*!
format.rs

JSON rendering for the payloads printed by `current-weather`.

Two separator conventions are supported:
  - Spaced  : `", "` between elements, `": "` between key and value,
              single line (the layout of a default Python-style encoder).
  - Compact : `","` and `":"`, no whitespace at all (serde_json default).

Public API Summary:
  - Separators::{Spaced, Compact}
  - to_json_string(&value, Separators) -> Result<String>
  - SpacedFormatter (serde_json::ser::Formatter impl)

Key order is whatever the serialized value yields: struct declaration order
for the payload types, insertion order for `serde_json::Value` (the crate
enables `preserve_order`). Parsing an emitted document into a `Value` and
rendering it again with the same separators reproduces the same bytes.

NOTE:
  - No trailing newline is added here; printing is the caller's concern.
*/

use std::fmt;
use std::io;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

/* -------------------------------------------------------------------------- */
/* Separators                                                                 */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separators {
    Spaced,
    Compact,
}

impl Separators {
    /// Element separator (between array items / object members).
    pub const fn item(&self) -> &'static str {
        match self {
            Separators::Spaced => ", ",
            Separators::Compact => ",",
        }
    }

    /// Key separator (between an object key and its value).
    pub const fn key(&self) -> &'static str {
        match self {
            Separators::Spaced => ": ",
            Separators::Compact => ":",
        }
    }
}

impl fmt::Display for Separators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.item(), self.key())
    }
}

/* -------------------------------------------------------------------------- */
/* Spaced Formatter                                                           */
/* -------------------------------------------------------------------------- */

/// Single-line formatter with a space after every `,` and `:`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(Separators::Spaced.item().as_bytes())
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(Separators::Spaced.item().as_bytes())
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(Separators::Spaced.key().as_bytes())
    }
}

/* -------------------------------------------------------------------------- */
/* Rendering                                                                  */
/* -------------------------------------------------------------------------- */

/// Serialize `value` to a single-line JSON string using `separators`.
pub fn to_json_string<T>(value: &T, separators: Separators) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(256);
    match separators {
        Separators::Spaced => {
            let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
            value
                .serialize(&mut ser)
                .context("failed to serialize JSON (spaced)")?;
        }
        Separators::Compact => {
            serde_json::to_writer(&mut buf, value).context("failed to serialize JSON (compact)")?;
        }
    }
    String::from_utf8(buf).context("serializer produced invalid UTF-8")
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
