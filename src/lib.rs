//! Dataident – durable identifiers for entities referenced from save-game records.
//!
//! A saved record often needs to point at some other live entity (an actor, a
//! placed gadget, a land plot...) without embedding it. Dataident provides the
//! reference value for that, an [`identifier::Identifier`], and everything
//! needed to take one from a live entity, persist it and resolve it again after
//! a reload:
//! * A [`datatype::KindTag`] names the category of entity referred to.
//! * An [`identifier::Identifier`] pairs a kind with a numeric key and a string
//!   key, only one of which is meaningful for a given kind.
//! * The [`registry::Registry`] ties each kind to its versioned record type and
//!   to the collection type that persists those records.
//! * [`resolve::identify`] and [`resolve::resolve`] move between live entities
//!   in a [`construct::World`] and identifiers.
//! * The [`codec`] module writes and reads identifiers in the save format.
//! * The [`bridge`] module remaps the one enum value an identifier can carry
//!   (an exchange offer's `OfferType`) between save-format versions.
//!
//! ## Modules
//! * [`datatype`] – Kind tags, type descriptors and the record/collection traits.
//! * [`persist`] – [`persist::PersistedSet`], ordered keyed storage with reverse lookup.
//! * [`construct`] – The record types and the [`construct::World`] snapshot.
//! * [`registry`] – The kind registry.
//! * [`identifier`] – The identifier value type.
//! * [`codec`] – Binary encoding.
//! * [`resolve`] – Identify, resolve and try-resolve.
//! * [`bridge`] – Enum translation.
//! * [`settings`] – Configuration loaded with the `config` crate.
//! * [`error`] – The crate error type.
//!
//! ## Quick Start
//! ```
//! use dataident::construct::{ActorData, World};
//! use dataident::{codec, resolve};
//! let mut world = World::new();
//! world.actors.push(ActorData::new(42, 7));
//! let id = resolve::identify(&world, &world.actors[0]).unwrap();
//! let bytes = codec::encode(&id).unwrap();
//! let restored = codec::decode(&bytes).unwrap();
//! assert_eq!(restored, id);
//! assert!(resolve::resolve(&world, &restored).unwrap().is_some());
//! ```

pub mod bridge;
pub mod codec;
pub mod construct;
pub mod datatype;
pub mod error;
pub mod identifier;
pub mod persist;
pub mod registry;
pub mod resolve;
pub mod settings;

pub use error::{IdentifierError, Result};
pub use identifier::Identifier;
