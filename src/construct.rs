// used to print out readable forms of a construct
use std::fmt;

// our own stuff that we need
use crate::datatype::Record;
use crate::persist::PersistedSet;

// ------------- ActorData -------------
#[derive(Clone, Debug, PartialEq)]
pub struct ActorData {
    pub actor_id: i64,
    pub type_id: i32,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}
impl ActorData {
    pub fn new(actor_id: i64, type_id: i32) -> Self {
        Self {
            actor_id,
            type_id,
            position: [0.0; 3],
            rotation: [0.0; 3],
        }
    }
}
impl Record for ActorData {
    const VERSION: u32 = 9;
}

// ------------- PlacedGadget -------------
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedGadget {
    pub gadget_id: i32,
    pub yaw: f32,
    pub ammo: Vec<i32>,
}
impl PlacedGadget {
    pub fn new(gadget_id: i32) -> Self {
        Self {
            gadget_id,
            yaw: 0.0,
            ammo: Vec::new(),
        }
    }
}
impl Record for PlacedGadget {
    const VERSION: u32 = 8;
}

// ------------- LandPlot -------------
// Plots carry their own id, so no reverse lookup is needed to name them.
#[derive(Clone, Debug, PartialEq)]
pub struct LandPlot {
    pub id: String,
    pub type_id: i32,
    pub upgrades: Vec<i32>,
}
impl LandPlot {
    pub fn new(id: impl Into<String>, type_id: i32) -> Self {
        Self {
            id: id.into(),
            type_id,
            upgrades: Vec::new(),
        }
    }
}
impl Record for LandPlot {
    const VERSION: u32 = 8;
}

// ------------- Gordo -------------
#[derive(Clone, Debug, PartialEq)]
pub struct Gordo {
    pub eaten_count: i32,
    pub fashions: Vec<i32>,
}
impl Gordo {
    pub fn new(eaten_count: i32) -> Self {
        Self {
            eaten_count,
            fashions: Vec::new(),
        }
    }
}
impl Record for Gordo {
    const VERSION: u32 = 1;
}

// ------------- TreasurePod -------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PodState {
    Locked,
    Open,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreasurePod {
    pub state: PodState,
    pub spawn_queue: Vec<i32>,
}
impl TreasurePod {
    pub fn new(state: PodState) -> Self {
        Self {
            state,
            spawn_queue: Vec::new(),
        }
    }
}
impl Record for TreasurePod {
    const VERSION: u32 = 1;
}

// ------------- OfferType -------------
/// The exchange offer enum. Its ordinals may be extended by mods, so any `i32`
/// is a legal value and the known ones are exposed as constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OfferType(pub i32);

impl OfferType {
    pub const GENERAL: OfferType = OfferType(0);
    pub const OGDEN: OfferType = OfferType(1);
    pub const MOCHI: OfferType = OfferType(2);
    pub const VIKTOR: OfferType = OfferType(3);

    pub fn ordinal(self) -> i32 {
        self.0
    }
}
impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            OfferType::GENERAL => write!(f, "GENERAL"),
            OfferType::OGDEN => write!(f, "OGDEN"),
            OfferType::MOCHI => write!(f, "MOCHI"),
            OfferType::VIKTOR => write!(f, "VIKTOR"),
            OfferType(other) => write!(f, "OfferType({})", other),
        }
    }
}

// ------------- ExchangeOffer -------------
#[derive(Clone, Debug, PartialEq)]
pub struct ExchangeOffer {
    pub offer_id: Option<String>,
    pub rancher_id: String,
    pub expire_time: f64,
    pub earliest_rerequest_time: f64,
}
impl ExchangeOffer {
    pub fn new(rancher_id: impl Into<String>, expire_time: f64) -> Self {
        Self {
            offer_id: None,
            rancher_id: rancher_id.into(),
            expire_time,
            earliest_rerequest_time: 0.0,
        }
    }
}
impl Record for ExchangeOffer {
    const VERSION: u32 = 4;
}

// ------------- World -------------
/// The live world snapshot identifiers are taken from and resolved against.
///
/// Actors and plots are plain lists scanned linearly; the remaining kinds live
/// in keyed collections that support reverse lookup.
#[derive(Debug, Default, Clone)]
pub struct World {
    pub actors: Vec<ActorData>,
    pub plots: Vec<LandPlot>,
    pub placed_gadgets: PersistedSet<String, PlacedGadget>,
    pub gordos: PersistedSet<String, Gordo>,
    pub treasure_pods: PersistedSet<String, TreasurePod>,
    pub offers: PersistedSet<OfferType, ExchangeOffer>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn actor(&self, actor_id: i64) -> Option<&ActorData> {
        self.actors.iter().find(|actor| actor.actor_id == actor_id)
    }
    pub fn plot(&self, id: &str) -> Option<&LandPlot> {
        self.plots.iter().find(|plot| plot.id == id)
    }
}
