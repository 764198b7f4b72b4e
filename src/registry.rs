//! Kind registry: the static tables tying each kind tag to the versioned record
//! type it names and to the collection type that persists those records.
//!
//! Two tables are authored side by side and checked against each other when the
//! registry is built:
//! * record table: `KindTag <-> record TypeDescriptor`, kept in a [`BiMap`] so
//!   that no two kinds can share a record type;
//! * collection table: an ordered list of collection entries. Lookups by
//!   runtime type walk this list in authored order and the first entry that
//!   accepts the type wins.

use std::any::TypeId;

// used to keep the one-to-one mapping between kinds and record types
use bimap::BiMap;
use lazy_static::lazy_static;
use tracing::debug;

use crate::construct::{ActorData, ExchangeOffer, Gordo, LandPlot, OfferType, PlacedGadget, TreasurePod};
use crate::datatype::{Collection, KindTag, TypeDescriptor};
use crate::error::{IdentifierError, Result};
use crate::persist::PersistedSet;

macro_rules! record_table {
    ($($kind:ident => $record:ty),+ $(,)?) => {
        vec![$((KindTag::$kind, TypeDescriptor::of_record::<$record>())),+]
    };
}

macro_rules! collection_table {
    ($($collection:ty => $kind:ident),+ $(,)?) => {
        vec![$(CollectionEntry::of::<$collection>(KindTag::$kind)),+]
    };
}

// ------------- CollectionEntry -------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectionEntry {
    kind: KindTag,
    collection: TypeDescriptor,
    item: TypeDescriptor,
}

impl CollectionEntry {
    pub fn of<C: Collection>(kind: KindTag) -> Self {
        Self {
            kind,
            collection: TypeDescriptor::of_collection::<C>(),
            item: TypeDescriptor::of_record::<C::Item>(),
        }
    }
    pub fn kind(&self) -> KindTag {
        self.kind
    }
    pub fn collection(&self) -> &TypeDescriptor {
        &self.collection
    }
    pub fn item(&self) -> &TypeDescriptor {
        &self.item
    }
    // A record counts as an instance of the collection type that persists it.
    pub fn accepts(&self, ty: TypeId) -> bool {
        self.collection.describes(ty) || self.item.describes(ty)
    }
}

// ------------- Registry -------------
#[derive(Debug)]
pub struct Registry {
    records: BiMap<KindTag, TypeDescriptor>,
    collections: Vec<CollectionEntry>,
}

impl Registry {
    /// The tables for the kinds known to this save format.
    pub fn authored() -> Result<Self> {
        let records = record_table![
            Actor => ActorData,
            Gadget => PlacedGadget,
            LandPlot => LandPlot,
            Gordo => Gordo,
            TreasurePod => TreasurePod,
            ExchangeOffer => ExchangeOffer,
        ];
        let collections = collection_table![
            Vec<ActorData> => Actor,
            PersistedSet<String, PlacedGadget> => Gadget,
            Vec<LandPlot> => LandPlot,
            PersistedSet<String, Gordo> => Gordo,
            PersistedSet<String, TreasurePod> => TreasurePod,
            PersistedSet<OfferType, ExchangeOffer> => ExchangeOffer,
        ];
        Self::from_tables(records, collections)
    }

    /// Builds a registry from explicitly authored tables, rejecting any pair of
    /// tables that are not mutual inverses.
    pub fn from_tables(
        records: Vec<(KindTag, TypeDescriptor)>,
        collections: Vec<CollectionEntry>,
    ) -> Result<Self> {
        let mut kept = BiMap::new();
        for (kind, record) in records {
            if !is_registrable(kind) {
                return Err(IdentifierError::Invariant(format!(
                    "kind {} cannot be registered",
                    kind
                )));
            }
            if let Err((kind, record)) = kept.insert_no_overwrite(kind, record) {
                let message = match kept.get_by_right(&record) {
                    Some(holder) => format!(
                        "record type {} is registered for both {} and {}",
                        record, holder, kind
                    ),
                    None => format!("kind {} is registered twice", kind),
                };
                return Err(IdentifierError::Invariant(message));
            }
        }
        let registry = Self {
            records: kept,
            collections,
        };
        registry.validate()?;
        debug!(kinds = registry.records.len(), "kind registry built");
        Ok(registry)
    }

    /// Checks that the record table and the collection table are inverses.
    pub fn validate(&self) -> Result<()> {
        for (position, entry) in self.collections.iter().enumerate() {
            if !is_registrable(entry.kind) {
                return Err(IdentifierError::Invariant(format!(
                    "collection {} is registered for kind {}",
                    entry.collection, entry.kind
                )));
            }
            for earlier in &self.collections[..position] {
                if earlier.kind == entry.kind || earlier.collection == entry.collection {
                    return Err(IdentifierError::Invariant(format!(
                        "collection {} for kind {} clashes with {} for kind {}",
                        entry.collection, entry.kind, earlier.collection, earlier.kind
                    )));
                }
            }
            match self.records.get_by_left(&entry.kind) {
                Some(record) if *record == entry.item => (),
                Some(record) => {
                    return Err(IdentifierError::Invariant(format!(
                        "kind {} names record {} but its collection {} stores {}",
                        entry.kind, record, entry.collection, entry.item
                    )));
                }
                None => {
                    return Err(IdentifierError::Invariant(format!(
                        "collection {} for kind {} has no record type",
                        entry.collection, entry.kind
                    )));
                }
            }
        }
        for (kind, record) in self.records.iter() {
            if !self.collections.iter().any(|entry| entry.kind == *kind) {
                return Err(IdentifierError::Invariant(format!(
                    "record {} for kind {} has no collection",
                    record, kind
                )));
            }
        }
        Ok(())
    }

    /// Finds the kind for a runtime type, `KindTag::None` when unrecognized.
    pub fn tag_for_persisted_type(&self, ty: TypeId) -> KindTag {
        self.collections
            .iter()
            .find(|entry| entry.accepts(ty))
            .map(|entry| entry.kind)
            .unwrap_or(KindTag::None)
    }
    pub fn tag_for<T: 'static>(&self) -> KindTag {
        self.tag_for_persisted_type(TypeId::of::<T>())
    }
    pub fn record_type(&self, kind: KindTag) -> Option<&TypeDescriptor> {
        self.records.get_by_left(&kind)
    }
    pub fn kind_of_record(&self, record: &TypeDescriptor) -> KindTag {
        self.records.get_by_right(record).copied().unwrap_or(KindTag::None)
    }
    pub fn collection_type(&self, kind: KindTag) -> Option<&TypeDescriptor> {
        self.collections
            .iter()
            .find(|entry| entry.kind == kind)
            .map(|entry| &entry.collection)
    }
    pub fn kind_of_collection(&self, collection: &TypeDescriptor) -> KindTag {
        self.collections
            .iter()
            .find(|entry| entry.collection == *collection)
            .map(|entry| entry.kind)
            .unwrap_or(KindTag::None)
    }
    /// Registered kinds, in collection table order.
    pub fn kinds(&self) -> impl Iterator<Item = KindTag> + '_ {
        self.collections.iter().map(|entry| entry.kind)
    }
    pub fn entries(&self) -> &[CollectionEntry] {
        &self.collections
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn is_registrable(kind: KindTag) -> bool {
    KindTag::KNOWN.contains(&kind)
}

lazy_static! {
    static ref REGISTRY: Registry = match Registry::authored() {
        Ok(registry) => registry,
        Err(e) => panic!("the authored kind registry is inconsistent: {}", e),
    };
}

/// The process-wide registry, built on first use.
pub fn registry() -> &'static Registry {
    &REGISTRY
}
