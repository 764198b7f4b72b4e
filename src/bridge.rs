//! Cross-version remapping of enum values embedded in identifiers.
//!
//! Exchange offers are keyed by an `OfferType`, so an exchange-offer identifier
//! carries an enum ordinal in its numeric key. When the save was written with a
//! different set of enum values (mods add their own), that ordinal has to be
//! translated before the identifier can be resolved. No other kind embeds an
//! enum value, so for them the bridge does nothing.

use core::hash::BuildHasherDefault;
use std::collections::HashMap;

// used to keep the one-to-one mapping between live and persisted ordinals
use bimap::BiMap;
use seahash::SeaHasher;
use tracing::{debug, warn};

use crate::construct::OfferType;
use crate::datatype::KindTag;
use crate::error::{IdentifierError, Result};
use crate::identifier::Identifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TranslationMode {
    /// Live value to the value written in the save.
    ToTranslated,
    /// Value read from the save back to the live value.
    FromTranslated,
}

/// An enum whose ordinals may differ between the running game and a save.
pub trait TranslatedEnum: Copy {
    const ENUM_NAME: &'static str;
    fn to_ordinal(self) -> i32;
    fn from_ordinal(ordinal: i32) -> Self;
}

impl TranslatedEnum for OfferType {
    const ENUM_NAME: &'static str = "OfferType";
    fn to_ordinal(self) -> i32 {
        self.0
    }
    fn from_ordinal(ordinal: i32) -> Self {
        OfferType(ordinal)
    }
}

pub trait EnumTranslator {
    fn translate_enum<E: TranslatedEnum>(&self, mode: TranslationMode, value: E) -> E;
}

// ------------- TranslationTable -------------
/// Per-enum tables of live ordinal to persisted ordinal. Values without an
/// entry translate to themselves.
#[derive(Debug, Default, Clone)]
pub struct TranslationTable {
    tables: HashMap<&'static str, BiMap<i32, i32>, BuildHasherDefault<SeaHasher>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }
    /// Records that `live` is written to saves as `persisted`.
    pub fn register<E: TranslatedEnum>(&mut self, live: E, persisted: i32) -> Result<()> {
        let table = self.tables.entry(E::ENUM_NAME).or_insert_with(BiMap::new);
        let live = live.to_ordinal();
        match (table.get_by_left(&live), table.get_by_right(&persisted)) {
            (None, None) => {
                table.insert(live, persisted);
                Ok(())
            }
            (Some(&existing), _) if existing == persisted => Ok(()),
            _ => Err(IdentifierError::Invariant(format!(
                "{} ordinal {} cannot be persisted as {}: conflicts with an existing mapping",
                E::ENUM_NAME,
                live,
                persisted
            ))),
        }
    }
    pub fn len(&self) -> usize {
        self.tables.values().map(BiMap::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnumTranslator for TranslationTable {
    fn translate_enum<E: TranslatedEnum>(&self, mode: TranslationMode, value: E) -> E {
        let ordinal = value.to_ordinal();
        let translated = self.tables.get(E::ENUM_NAME).and_then(|table| match mode {
            TranslationMode::ToTranslated => table.get_by_left(&ordinal),
            TranslationMode::FromTranslated => table.get_by_right(&ordinal),
        });
        match translated {
            Some(&translated) => E::from_ordinal(translated),
            None => value,
        }
    }
}

impl Identifier {
    /// Remaps the offer type carried by an exchange-offer identifier; any other
    /// identifier is returned unchanged.
    pub fn translate_with_enum<T: EnumTranslator>(&self, translator: &T, mode: TranslationMode) -> Identifier {
        if self.kind() != KindTag::ExchangeOffer {
            return self.clone();
        }
        let Ok(ordinal) = i32::try_from(self.numeric_key()) else {
            warn!(identifier = %self, "numeric key is not an offer type, left untranslated");
            return self.clone();
        };
        let offer = translator.translate_enum(mode, OfferType::from_ordinal(ordinal));
        debug!(from = ordinal, to = offer.to_ordinal(), ?mode, "translated offer type");
        self.with_numeric_key(i64::from(offer.to_ordinal()))
    }
}
