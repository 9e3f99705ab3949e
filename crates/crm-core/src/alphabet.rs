//! The event alphabet: a finite, user-declared set of symbolic event names.
//!
//! Event identity is by name, but comparisons at runtime are O(1) integer
//! operations: names are interned into [`Event`] handles by an [`Alphabet`].

use std::collections::HashMap;
use std::fmt;

/// A handle to an interned event name.
///
/// Two `Event`s compare equal iff they were interned from the same name by
/// the same [`Alphabet`]. An `Event` obtained from one alphabet is
/// meaningless (though not memory-unsafe) when used against another; see
/// [`Alphabet::event`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Event(u32);

impl Event {
    /// Raw index for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Error raised while declaring an [`Alphabet`].
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("duplicate event name in alphabet: {0:?}")]
    DuplicateName(String),
    #[error("event name must be non-empty")]
    EmptyName,
    #[error("alphabet declares more than {0} events: EventSet's u64 bitmask can't address more")]
    TooManyEvents(usize),
}

/// The finite, fixed set of event names `Σ` a CRM is declared over.
///
/// Built once and shared; every [`Event`] handed out by a given `Alphabet`
/// stays valid (and comparable) for that alphabet's lifetime.
#[derive(Debug, Clone, Default)]
pub struct Alphabet {
    by_name: HashMap<String, Event>,
    names: Vec<String>,
}

impl Alphabet {
    /// `EventSet`'s backing bitmask is a `u64`; no alphabet can exceed this.
    pub const MAX_EVENTS: usize = 64;

    /// Declare an alphabet from an ordered list of event names.
    ///
    /// Order is preserved (iteration order matches declaration order) but is
    /// not semantically significant — events compare by name equality only.
    pub fn new<I, S>(names: I) -> Result<Self, AlphabetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut alphabet = Self::default();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(AlphabetError::EmptyName);
            }
            if alphabet.by_name.contains_key(&name) {
                return Err(AlphabetError::DuplicateName(name));
            }
            if alphabet.names.len() >= Self::MAX_EVENTS {
                return Err(AlphabetError::TooManyEvents(Self::MAX_EVENTS));
            }
            let event = Event(alphabet.names.len() as u32);
            alphabet.names.push(name.clone());
            alphabet.by_name.insert(name, event);
        }
        Ok(alphabet)
    }

    /// Resolve an event name to its handle, if declared.
    pub fn event(&self, name: &str) -> Option<Event> {
        self.by_name.get(name).copied()
    }

    /// Resolve a handle back to its declared name.
    ///
    /// # Panics
    /// Panics if `event` was not issued by this alphabet.
    pub fn name(&self, event: Event) -> &str {
        &self.names[event.0 as usize]
    }

    /// Number of declared events, `|Σ|`.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate declared events in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Event, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, s)| (Event(i as u32), s.as_str()))
    }
}

/// A set of events that fired on one transition, `E ⊆ Σ`.
///
/// Backed by a bitmask so membership, union, and equality are O(1); this
/// bounds a single [`Alphabet`] to 64 declared events, which comfortably
/// covers the event alphabets CRMs are written against in practice.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct EventSet(u64);

impl EventSet {
    pub const EMPTY: Self = EventSet(0);

    pub fn insert(&mut self, event: Event) {
        self.0 |= 1 << event.0;
    }

    pub fn contains(&self, event: Event) -> bool {
        self.0 & (1 << event.0) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(&self, other: &Self) -> Self {
        EventSet(self.0 | other.0)
    }

    pub fn from_events<I: IntoIterator<Item = Event>>(events: I) -> Self {
        let mut set = Self::default();
        for event in events {
            set.insert(event);
        }
        set
    }

    /// Render as `{A, B}` using `alphabet` to resolve names, for diagnostics.
    pub fn display<'a>(&'a self, alphabet: &'a Alphabet) -> impl fmt::Display + 'a {
        struct Disp<'a> {
            set: &'a EventSet,
            alphabet: &'a Alphabet,
        }
        impl fmt::Display for Disp<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{{")?;
                let mut first = true;
                for (event, name) in self.alphabet.iter() {
                    if self.set.contains(event) {
                        if !first {
                            write!(f, ", ")?;
                        }
                        write!(f, "{name}")?;
                        first = false;
                    }
                }
                write!(f, "}}")
            }
        }
        Disp {
            set: self,
            alphabet,
        }
    }
}

impl fmt::Debug for EventSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventSet({:#b})", self.0)
    }
}
