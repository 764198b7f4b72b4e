//! Taking identifiers from live entities and resolving them back.
//!
//! A resolution that runs a lookup for a known kind but finds nothing is not an
//! error: the entity may simply be gone from the current world. An identifier
//! whose kind has no resolution at all is an error, since it can only come from
//! a malformed record or a registry that lags behind the encoded kinds.

use std::any::Any;

use tracing::{debug, warn};

use crate::construct::{ActorData, ExchangeOffer, Gordo, LandPlot, OfferType, PlacedGadget, TreasurePod, World};
use crate::datatype::{KindTag, Record};
use crate::error::{IdentifierError, Result};
use crate::identifier::Identifier;
use crate::registry::registry;

// ------------- EntityRef -------------
/// A borrowed live entity of one of the identifiable kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityRef<'w> {
    Actor(&'w ActorData),
    Gadget(&'w PlacedGadget),
    LandPlot(&'w LandPlot),
    Gordo(&'w Gordo),
    TreasurePod(&'w TreasurePod),
    ExchangeOffer(&'w ExchangeOffer),
}

impl<'w> EntityRef<'w> {
    pub fn kind(&self) -> KindTag {
        match self {
            EntityRef::Actor(_) => KindTag::Actor,
            EntityRef::Gadget(_) => KindTag::Gadget,
            EntityRef::LandPlot(_) => KindTag::LandPlot,
            EntityRef::Gordo(_) => KindTag::Gordo,
            EntityRef::TreasurePod(_) => KindTag::TreasurePod,
            EntityRef::ExchangeOffer(_) => KindTag::ExchangeOffer,
        }
    }
    pub fn as_any(&self) -> &'w dyn Any {
        match *self {
            EntityRef::Actor(actor) => actor,
            EntityRef::Gadget(gadget) => gadget,
            EntityRef::LandPlot(plot) => plot,
            EntityRef::Gordo(gordo) => gordo,
            EntityRef::TreasurePod(pod) => pod,
            EntityRef::ExchangeOffer(offer) => offer,
        }
    }
    pub fn downcast<R: Record>(&self) -> Option<&'w R> {
        self.as_any().downcast_ref::<R>()
    }
}

fn unrecognized(kind: KindTag, detail: String) -> IdentifierError {
    warn!(%kind, %detail, "unrecognized identifier kind");
    IdentifierError::UnrecognizedKind { kind, detail }
}

fn detached(kind: KindTag) -> IdentifierError {
    warn!(%kind, "entity is not stored in its world collection");
    IdentifierError::Detached { kind }
}

// ------------- Identify -------------
/// Builds the identifier naming `entity` within `world`.
///
/// Keyed kinds (gadgets, gordos, treasure pods and exchange offers) are named by
/// the key they are stored under, so they must be stored in `world`.
pub fn identify(world: &World, entity: &dyn Any) -> Result<Identifier> {
    let kind = registry().tag_for_persisted_type(entity.type_id());
    let identifier = match kind {
        KindTag::Actor => entity
            .downcast_ref::<ActorData>()
            .map(|actor| Identifier::actor(actor.actor_id)),
        KindTag::Gadget => match entity.downcast_ref::<PlacedGadget>() {
            Some(gadget) => {
                let key = world.placed_gadgets.key_of_entry(gadget).ok_or_else(|| detached(kind))?;
                Some(Identifier::gadget(key.as_str()))
            }
            None => None,
        },
        KindTag::Gordo => match entity.downcast_ref::<Gordo>() {
            Some(gordo) => {
                let key = world.gordos.key_of_entry(gordo).ok_or_else(|| detached(kind))?;
                Some(Identifier::gordo(key.as_str()))
            }
            None => None,
        },
        KindTag::TreasurePod => match entity.downcast_ref::<TreasurePod>() {
            Some(pod) => {
                let key = world.treasure_pods.key_of_entry(pod).ok_or_else(|| detached(kind))?;
                Some(Identifier::treasure_pod(key.as_str()))
            }
            None => None,
        },
        KindTag::ExchangeOffer => match entity.downcast_ref::<ExchangeOffer>() {
            Some(offer) => {
                let key = world.offers.key_of_entry(offer).ok_or_else(|| detached(kind))?;
                Some(Identifier::exchange_offer(*key))
            }
            None => None,
        },
        KindTag::LandPlot => entity
            .downcast_ref::<LandPlot>()
            .map(|plot| Identifier::land_plot(plot.id.as_str())),
        KindTag::None | KindTag::Unrecognized(_) => None,
    };
    // a registered collection type, rather than a record, ends up here too
    let identifier = identifier.ok_or_else(|| {
        let detail = match registry().record_type(kind) {
            Some(record) => format!("expected a {} record", record.name()),
            None => String::from("entity type is not registered"),
        };
        unrecognized(kind, detail)
    })?;
    debug!(%identifier, "identified entity");
    Ok(identifier)
}

// ------------- Resolve -------------
/// Looks up the live entity an identifier names, `None` when it is not in `world`.
pub fn resolve<'w>(world: &'w World, identifier: &Identifier) -> Result<Option<EntityRef<'w>>> {
    let found = match identifier.kind() {
        KindTag::Actor => world
            .actor(identifier.numeric_key())
            .map(EntityRef::Actor),
        KindTag::Gadget => world
            .placed_gadgets
            .get(identifier.normalized_string_key())
            .map(EntityRef::Gadget),
        KindTag::LandPlot => world
            .plot(identifier.normalized_string_key())
            .map(EntityRef::LandPlot),
        KindTag::Gordo => world
            .gordos
            .get(identifier.normalized_string_key())
            .map(EntityRef::Gordo),
        KindTag::TreasurePod => world
            .treasure_pods
            .get(identifier.normalized_string_key())
            .map(EntityRef::TreasurePod),
        // keys outside the i32 range were never stored
        KindTag::ExchangeOffer => i32::try_from(identifier.numeric_key())
            .ok()
            .and_then(|ordinal| world.offers.get(&OfferType(ordinal)))
            .map(EntityRef::ExchangeOffer),
        kind @ (KindTag::None | KindTag::Unrecognized(_)) => {
            return Err(unrecognized(kind, String::from("no resolution for this kind")));
        }
    };
    debug!(%identifier, found = found.is_some(), "resolved identifier");
    Ok(found)
}

/// Resolves into `slot`, returning whether anything live was found.
///
/// A miss clears the slot and returns `Ok(false)`; an identifier that cannot be
/// resolved at all is still an error.
pub fn try_resolve<'w>(
    world: &'w World,
    identifier: &Identifier,
    slot: &mut Option<EntityRef<'w>>,
) -> Result<bool> {
    *slot = None;
    *slot = resolve(world, identifier)?;
    Ok(slot.is_some())
}
