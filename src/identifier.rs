// used to print out readable forms of an identifier
use std::fmt;
// equality and hashing normalize the string key
use std::hash::{Hash, Hasher};

use crate::construct::OfferType;
use crate::datatype::KindTag;

// ------------- NaturalKey -------------
/// The key an identifier carries for its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NaturalKey<'a> {
    Numeric(i64),
    Text(&'a str),
    /// The kind is `None` or unrecognized, so neither key means anything.
    Unkeyed,
}

// ------------- Identifier -------------
/// A durable reference to a live entity.
///
/// Both keys are always present, since both are always written, but only one
/// of them is meaningful for any given kind. An absent string key and an empty
/// one are the same key: they compare and hash equal.
#[derive(Clone, Debug, Default)]
pub struct Identifier {
    kind: KindTag,
    numeric_key: i64,
    string_key: Option<String>,
}

impl Identifier {
    pub fn new(kind: KindTag, numeric_key: i64, string_key: Option<String>) -> Self {
        Self {
            kind: KindTag::from_ordinal(kind.ordinal()),
            numeric_key,
            string_key,
        }
    }
    pub fn actor(actor_id: i64) -> Self {
        Self::new(KindTag::Actor, actor_id, None)
    }
    pub fn gadget(key: impl Into<String>) -> Self {
        Self::new(KindTag::Gadget, 0, Some(key.into()))
    }
    pub fn land_plot(id: impl Into<String>) -> Self {
        Self::new(KindTag::LandPlot, 0, Some(id.into()))
    }
    pub fn gordo(key: impl Into<String>) -> Self {
        Self::new(KindTag::Gordo, 0, Some(key.into()))
    }
    pub fn treasure_pod(key: impl Into<String>) -> Self {
        Self::new(KindTag::TreasurePod, 0, Some(key.into()))
    }
    pub fn exchange_offer(offer: OfferType) -> Self {
        Self::new(KindTag::ExchangeOffer, i64::from(offer.ordinal()), None)
    }
    pub fn kind(&self) -> KindTag {
        self.kind
    }
    pub fn numeric_key(&self) -> i64 {
        self.numeric_key
    }
    pub fn string_key(&self) -> Option<&str> {
        self.string_key.as_deref()
    }
    /// The string key with absence read as empty.
    pub fn normalized_string_key(&self) -> &str {
        self.string_key.as_deref().unwrap_or("")
    }
    pub fn key(&self) -> NaturalKey<'_> {
        if self.kind.is_numeric_keyed() {
            NaturalKey::Numeric(self.numeric_key)
        } else if self.kind.is_string_keyed() {
            NaturalKey::Text(self.normalized_string_key())
        } else {
            NaturalKey::Unkeyed
        }
    }
    /// Same kind and string key, different numeric key.
    pub fn with_numeric_key(&self, numeric_key: i64) -> Self {
        Self {
            kind: self.kind,
            numeric_key,
            string_key: self.string_key.clone(),
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.numeric_key == other.numeric_key
            && self.normalized_string_key() == other.normalized_string_key()
    }
}
impl Eq for Identifier {}
impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.numeric_key.hash(state);
        self.normalized_string_key().hash(state);
    }
}
impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.key() {
            NaturalKey::Numeric(key) => write!(f, "{}:{}", self.kind, key),
            NaturalKey::Text(key) => write!(f, "{}:{:?}", self.kind, key),
            NaturalKey::Unkeyed => write!(
                f,
                "{}:{}:{:?}",
                self.kind,
                self.numeric_key,
                self.normalized_string_key()
            ),
        }
    }
}
