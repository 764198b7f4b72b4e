use dataident::codec::{decode, encode};
use dataident::construct::{
    ActorData, ExchangeOffer, Gordo, LandPlot, OfferType, PlacedGadget, PodState, TreasurePod, World,
};
use dataident::datatype::KindTag;
use dataident::resolve::{identify, resolve, try_resolve, EntityRef};
use dataident::{Identifier, IdentifierError};

fn world() -> World {
    let mut world = World::new();
    world.actors.push(ActorData::new(42, 7));
    world.actors.push(ActorData::new(43, 8));
    world.plots.push(LandPlot::new("plot1", 1));
    world.plots.push(LandPlot::new("plot2", 2));
    world.placed_gadgets.insert(String::from("site-a"), PlacedGadget::new(10));
    world.placed_gadgets.insert(String::from("site-b"), PlacedGadget::new(11));
    world.gordos.insert(String::from("gordo-pink"), Gordo::new(3));
    world.treasure_pods.insert(String::from("pod-1"), TreasurePod::new(PodState::Locked));
    world.offers.insert(OfferType::OGDEN, ExchangeOffer::new("ogden", 100.0));
    world.offers.insert(OfferType::VIKTOR, ExchangeOffer::new("viktor", 200.0));
    world
}

fn live_entities(world: &World) -> Vec<EntityRef<'_>> {
    vec![
        EntityRef::Actor(&world.actors[1]),
        EntityRef::LandPlot(&world.plots[1]),
        EntityRef::Gadget(world.placed_gadgets.get("site-b").expect("gadget")),
        EntityRef::Gordo(world.gordos.get("gordo-pink").expect("gordo")),
        EntityRef::TreasurePod(world.treasure_pods.get("pod-1").expect("pod")),
        EntityRef::ExchangeOffer(world.offers.get(&OfferType::VIKTOR).expect("offer")),
    ]
}

#[test]
fn identify_then_resolve_returns_the_entity() {
    let world = world();
    for entity in live_entities(&world) {
        let id = identify(&world, entity.as_any()).expect("identify");
        assert_eq!(id.kind(), entity.kind());
        let resolved = resolve(&world, &id).expect("resolve");
        assert_eq!(resolved, Some(entity), "resolving {}", id);
    }
}

#[test]
fn identifiers_name_entities_by_their_natural_key() {
    let world = world();
    assert_eq!(identify(&world, &world.actors[0]).expect("actor"), Identifier::actor(42));
    assert_eq!(identify(&world, &world.plots[0]).expect("plot"), Identifier::land_plot("plot1"));
    let gadget = world.placed_gadgets.get("site-a").expect("gadget");
    assert_eq!(identify(&world, gadget).expect("gadget"), Identifier::gadget("site-a"));
    let gordo = world.gordos.get("gordo-pink").expect("gordo");
    assert_eq!(identify(&world, gordo).expect("gordo"), Identifier::gordo("gordo-pink"));
}

#[test]
fn exchange_offers_resolve_by_their_encoded_key() {
    let world = world();
    let viktor = world.offers.get(&OfferType::VIKTOR).expect("offer");
    let id = identify(&world, viktor).expect("identify");
    assert_eq!(id.numeric_key(), 3);
    assert_eq!(id, Identifier::exchange_offer(OfferType::VIKTOR));
    let restored = decode(&encode(&id).expect("encode")).expect("decode");
    match resolve(&world, &restored).expect("resolve") {
        Some(EntityRef::ExchangeOffer(offer)) => assert_eq!(offer.rancher_id, "viktor"),
        other => panic!("expected viktor's offer, got {:?}", other),
    }
    let ogden = resolve(&world, &Identifier::exchange_offer(OfferType::OGDEN)).expect("resolve");
    assert_eq!(ogden.and_then(|e| e.downcast::<ExchangeOffer>()).map(|o| o.rancher_id.as_str()), Some("ogden"));
}

#[test]
fn decoded_actor_resolves_to_the_live_actor() {
    let world = world();
    let bytes = [1, 0, 0, 0, 42, 0, 0, 0, 0, 0, 0, 0, 0];
    let id = decode(&bytes).expect("decode");
    assert_eq!(id, Identifier::actor(42));
    let actor = resolve(&world, &id).expect("resolve").and_then(|e| e.downcast::<ActorData>());
    assert_eq!(actor.map(|a| a.type_id), Some(7));
}

#[test]
fn absent_entities_are_not_found() {
    let world = world();
    let missing = [
        Identifier::actor(999),
        Identifier::gadget("nowhere"),
        Identifier::land_plot("plot9"),
        Identifier::gordo("gordo-gold"),
        Identifier::treasure_pod("pod-9"),
        Identifier::exchange_offer(OfferType::MOCHI),
        Identifier::new(KindTag::ExchangeOffer, i64::from(i32::MAX) + 1, None),
        Identifier::new(KindTag::Gadget, 0, None),
    ];
    for id in missing {
        assert_eq!(resolve(&world, &id).expect("known kind"), None, "{}", id);
    }
}

#[test]
fn try_resolve_separates_misses_from_errors() {
    let world = world();
    let mut slot = Some(EntityRef::Actor(&world.actors[0]));
    assert!(!try_resolve(&world, &Identifier::actor(999), &mut slot).expect("miss"));
    assert!(slot.is_none());

    assert!(try_resolve(&world, &Identifier::gordo("gordo-pink"), &mut slot).expect("hit"));
    assert_eq!(slot.map(|e| e.kind()), Some(KindTag::Gordo));

    let err = try_resolve(&world, &Identifier::default(), &mut slot).unwrap_err();
    assert!(matches!(err, IdentifierError::UnrecognizedKind { kind: KindTag::None, .. }));
    assert!(slot.is_none());
}

#[test]
fn unrecognized_kinds_fail_to_resolve() {
    let world = world();
    for id in [
        Identifier::default(),
        Identifier::new(KindTag::from_ordinal(77), 42, None),
    ] {
        match resolve(&world, &id) {
            Err(IdentifierError::UnrecognizedKind { kind, .. }) => assert_eq!(kind, id.kind()),
            other => panic!("expected an unrecognized kind for {}, got {:?}", id, other),
        }
    }
}

#[test]
fn unsupported_entities_cannot_be_identified() {
    let world = world();
    let err = identify(&world, &5u32).unwrap_err();
    assert!(matches!(err, IdentifierError::UnrecognizedKind { kind: KindTag::None, .. }));
    // the collection type is registered, but it is not an entity
    let err = identify(&world, &world.placed_gadgets).unwrap_err();
    assert!(matches!(err, IdentifierError::UnrecognizedKind { kind: KindTag::Gadget, .. }));
}

#[test]
fn keyed_entities_outside_the_world_are_detached() {
    let world = world();
    let stray = PlacedGadget::new(99);
    let err = identify(&world, &stray).unwrap_err();
    assert!(matches!(err, IdentifierError::Detached { kind: KindTag::Gadget }));
    let stray_offer = ExchangeOffer::new("nobody", 1.0);
    let err = identify(&world, &stray_offer).unwrap_err();
    assert!(matches!(err, IdentifierError::Detached { kind: KindTag::ExchangeOffer }));
    // plots carry their own id, so they never need the world
    let plot = LandPlot::new("plot7", 1);
    assert_eq!(identify(&world, &plot).expect("plot"), Identifier::land_plot("plot7"));
}

#[test]
fn first_match_wins_on_duplicate_actor_ids() {
    let mut world = world();
    world.actors.push(ActorData::new(42, 99));
    let actor = resolve(&world, &Identifier::actor(42)).expect("resolve").and_then(|e| e.downcast::<ActorData>());
    assert_eq!(actor.map(|a| a.type_id), Some(7));
}

#[test]
fn equal_records_are_named_by_their_own_key() {
    let mut world = world();
    world.gordos.insert(String::from("gordo-twin"), Gordo::new(3));
    world.placed_gadgets.insert(String::from("site-c"), PlacedGadget::new(10));
    let twin = world.gordos.get("gordo-twin").expect("twin");
    let id = identify(&world, twin).expect("identify");
    assert_eq!(id, Identifier::gordo("gordo-twin"));
    let resolved = resolve(&world, &id).expect("resolve").and_then(|e| e.downcast::<Gordo>());
    assert!(resolved.is_some_and(|gordo| std::ptr::eq(gordo, twin)));
    let gadget = world.placed_gadgets.get("site-c").expect("gadget");
    assert_eq!(identify(&world, gadget).expect("identify"), Identifier::gadget("site-c"));
}

#[test]
fn equal_copies_of_stored_records_are_detached() {
    let world = world();
    let copy = world.gordos.get("gordo-pink").expect("gordo").clone();
    let err = identify(&world, &copy).unwrap_err();
    assert!(matches!(err, IdentifierError::Detached { kind: KindTag::Gordo }));
}

#[test]
fn removed_entities_stop_resolving() {
    let mut world = world();
    let id = identify(&world, world.placed_gadgets.get("site-a").expect("gadget")).expect("identify");
    world.placed_gadgets.remove("site-a");
    assert_eq!(resolve(&world, &id).expect("resolve"), None);
}

#[test]
fn entity_refs_downcast_to_their_record() {
    let world = world();
    let entity = EntityRef::Actor(&world.actors[0]);
    assert!(entity.downcast::<ActorData>().is_some());
    assert!(entity.downcast::<Gordo>().is_none());
}
