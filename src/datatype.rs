// used to identify record and collection types at runtime
use std::any::{Any, TypeId};
// used to print out readable forms of kinds and descriptors
use std::fmt;
// kinds and descriptors are compared by their underlying identity
use std::hash::{Hash, Hasher};

// ------------- KindTag -------------
/// The discriminator naming which category of entity an identifier refers to.
///
/// The ordinals are part of the save format. Ordinals outside the known set are
/// kept as `Unrecognized` so that a decoded identifier survives a round trip
/// even when it cannot be resolved.
#[derive(Clone, Copy, Debug, Default)]
pub enum KindTag {
    #[default]
    None,
    Actor,
    Gadget,
    LandPlot,
    Gordo,
    TreasurePod,
    ExchangeOffer,
    Unrecognized(i32),
}

impl KindTag {
    /// The known kinds, excluding the `None` sentinel.
    pub const KNOWN: [KindTag; 6] = [
        KindTag::Actor,
        KindTag::Gadget,
        KindTag::LandPlot,
        KindTag::Gordo,
        KindTag::TreasurePod,
        KindTag::ExchangeOffer,
    ];

    pub fn ordinal(self) -> i32 {
        match self {
            KindTag::None => 0,
            KindTag::Actor => 1,
            KindTag::Gadget => 2,
            KindTag::LandPlot => 3,
            KindTag::Gordo => 4,
            KindTag::TreasurePod => 5,
            KindTag::ExchangeOffer => 6,
            KindTag::Unrecognized(ordinal) => ordinal,
        }
    }
    pub fn from_ordinal(ordinal: i32) -> Self {
        match ordinal {
            0 => KindTag::None,
            1 => KindTag::Actor,
            2 => KindTag::Gadget,
            3 => KindTag::LandPlot,
            4 => KindTag::Gordo,
            5 => KindTag::TreasurePod,
            6 => KindTag::ExchangeOffer,
            other => KindTag::Unrecognized(other),
        }
    }
    /// Kinds whose natural key is the numeric key; the rest use the string key.
    pub fn is_numeric_keyed(self) -> bool {
        matches!(self.canonical(), KindTag::Actor | KindTag::ExchangeOffer)
    }
    pub fn is_string_keyed(self) -> bool {
        matches!(
            self.canonical(),
            KindTag::Gadget | KindTag::LandPlot | KindTag::Gordo | KindTag::TreasurePod
        )
    }
    // Unrecognized(1) and Actor are the same kind.
    fn canonical(self) -> Self {
        Self::from_ordinal(self.ordinal())
    }
}
impl PartialEq for KindTag {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal() == other.ordinal()
    }
}
impl Eq for KindTag {}
impl Hash for KindTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordinal().hash(state);
    }
}
impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.canonical() {
            KindTag::None => write!(f, "NONE"),
            KindTag::Actor => write!(f, "ACTOR"),
            KindTag::Gadget => write!(f, "GADGET"),
            KindTag::LandPlot => write!(f, "LANDPLOT"),
            KindTag::Gordo => write!(f, "GORDO"),
            KindTag::TreasurePod => write!(f, "TREASUREPOD"),
            KindTag::ExchangeOffer => write!(f, "EXCHANGEOFFER"),
            KindTag::Unrecognized(ordinal) => write!(f, "UNRECOGNIZED({})", ordinal),
        }
    }
}

// ------------- Records -------------
/// A versioned data record that can be persisted and referred to by identifier.
pub trait Record: Any + fmt::Debug {
    const VERSION: u32;
}

/// A keyed or listed container holding records of a single type.
pub trait Collection: Any {
    type Item: Record;
}

impl<R: Record> Collection for Vec<R> {
    type Item = R;
}

// ------------- TypeDescriptor -------------
/// Opaque handle for a record or collection type, compared by `TypeId`.
#[derive(Clone, Copy, Debug)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    version: u32,
}

impl TypeDescriptor {
    pub fn of_record<R: Record>() -> Self {
        Self {
            id: TypeId::of::<R>(),
            name: std::any::type_name::<R>(),
            version: R::VERSION,
        }
    }
    /// Collections carry the version of the records they store.
    pub fn of_collection<C: Collection>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
            version: <C::Item as Record>::VERSION,
        }
    }
    pub fn id(&self) -> TypeId {
        self.id
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn version(&self) -> u32 {
        self.version
    }
    pub fn describes(&self, ty: TypeId) -> bool {
        self.id == ty
    }
}
impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for TypeDescriptor {}
impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (v{})", self.name, self.version)
    }
}
