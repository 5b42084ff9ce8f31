//! Pre-flight walk over a `Serialize` value.
//!
//! `serde_json::to_value` silently turns NaN and infinities into `null`,
//! which would let distinct inputs share a fingerprint. This serializer
//! visits every primitive without producing output and fails on the first
//! non-finite float.

use crate::HashError;
use serde::ser::{self, Serialize, Serializer};
use std::fmt;

/// Rejects values containing non-finite floats.
pub(crate) fn check<T: Serialize + ?Sized>(value: &T) -> Result<(), HashError> {
    value.serialize(Probe).map_err(|e| match e {
        ProbeError::NonFinite => HashError::NonFiniteNumber,
        ProbeError::Custom(msg) => HashError::Unsupported(msg),
    })
}

#[derive(Debug)]
enum ProbeError {
    NonFinite,
    Custom(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::NonFinite => f.write_str("non-finite float"),
            ProbeError::Custom(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ProbeError {}

impl ser::Error for ProbeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ProbeError::Custom(msg.to_string())
    }
}

struct Probe;

type Probed = Result<(), ProbeError>;

fn finite(is_finite: bool) -> Probed {
    if is_finite {
        Ok(())
    } else {
        Err(ProbeError::NonFinite)
    }
}

impl Serializer for Probe {
    type Ok = ();
    type Error = ProbeError;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Probed {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Probed {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Probed {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Probed {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Probed {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Probed {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Probed {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Probed {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Probed {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Probed {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Probed {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Probed {
        finite(v.is_finite())
    }

    fn serialize_f64(self, v: f64) -> Probed {
        finite(v.is_finite())
    }

    fn serialize_char(self, _v: char) -> Probed {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Probed {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Probed {
        Ok(())
    }

    fn serialize_none(self) -> Probed {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Probed {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Probed {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Probed {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Probed {
        Ok(())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Probed {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Probed {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, ProbeError> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, ProbeError> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, ProbeError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, ProbeError> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, ProbeError> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, ProbeError> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, ProbeError> {
        Ok(self)
    }
}

impl ser::SerializeSeq for Probe {
    type Ok = ();
    type Error = ProbeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Probed {
        value.serialize(Probe)
    }

    fn end(self) -> Probed {
        Ok(())
    }
}

impl ser::SerializeTuple for Probe {
    type Ok = ();
    type Error = ProbeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Probed {
        value.serialize(Probe)
    }

    fn end(self) -> Probed {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Probe {
    type Ok = ();
    type Error = ProbeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Probed {
        value.serialize(Probe)
    }

    fn end(self) -> Probed {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for Probe {
    type Ok = ();
    type Error = ProbeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Probed {
        value.serialize(Probe)
    }

    fn end(self) -> Probed {
        Ok(())
    }
}

impl ser::SerializeMap for Probe {
    type Ok = ();
    type Error = ProbeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Probed {
        key.serialize(Probe)
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Probed {
        value.serialize(Probe)
    }

    fn end(self) -> Probed {
        Ok(())
    }
}

impl ser::SerializeStruct for Probe {
    type Ok = ();
    type Error = ProbeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Probed {
        value.serialize(Probe)
    }

    fn end(self) -> Probed {
        Ok(())
    }
}

impl ser::SerializeStructVariant for Probe {
    type Ok = ();
    type Error = ProbeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Probed {
        value.serialize(Probe)
    }

    fn end(self) -> Probed {
        Ok(())
    }
}
