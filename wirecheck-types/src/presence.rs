//! Three-state optional values.
//!
//! Assemblies arrive as loosely shaped JSON where a key may be missing, set to
//! `null`, or carry a value. Those are different facts (an absent key is not
//! part of the content hash, a `null` is), so optional fields are modelled as
//! [`Presence`] rather than `Option`.
//!
//! Fields of this type should be declared with
//! `#[serde(default, skip_serializing_if = "Presence::is_absent")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Presence<T> {
    /// The key was not present.
    Absent,
    /// The key was present with an explicit `null`.
    Null,
    /// The key carried a value.
    Present(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Presence::Absent
    }
}

impl<T> Presence<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Presence::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Presence::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Presence::Present(_))
    }

    /// The value, treating both `Absent` and `Null` as "no value".
    pub fn get(&self) -> Option<&T> {
        match self {
            Presence::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Presence::Present(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value, inserting `T::default()` first when there is none.
    pub fn get_or_insert_default(&mut self) -> &mut T
    where
        T: Default,
    {
        if !self.is_present() {
            *self = Presence::Present(T::default());
        }
        match self {
            Presence::Present(v) => v,
            _ => unreachable!("presence was just set"),
        }
    }

    pub fn set(&mut self, value: T) {
        *self = Presence::Present(value);
    }
}

impl<T: Copy> Presence<T> {
    pub fn copied(&self) -> Option<T> {
        self.get().copied()
    }
}

impl<T> From<Option<T>> for Presence<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Presence::Present(v),
            None => Presence::Null,
        }
    }
}

impl<T: Serialize> Serialize for Presence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Presence::Present(v) => v.serialize(serializer),
            Presence::Absent | Presence::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only reached when the key exists; a missing key falls back to `Default`.
        Ok(Option::<T>::deserialize(deserializer)?.into())
    }
}
