//! End-to-end store tests through the dispatcher and a recording host.
//!
//! Mirrors the production wiring: UI intents and host completions are both
//! delivered as dispatches, with the completion arriving on its own turn.

use std::cell::RefCell;
use std::rc::Rc;

use parlor_core::{
    Dispatcher, HostApi, HostError, NewRoomParams, PanelAction, RoomStore, RoomStoreConfig,
    RoomStoreUpdate, RoomToken, PREF_ROOMS_MAX_SIZE,
};
use parlor_harness::{room_fixture, rooms_from_json, FakeHost, HostCall};

struct Fixture {
    dispatcher: Dispatcher,
    host: Rc<FakeHost>,
    store: Rc<RoomStore>,
}

fn fixture() -> Fixture {
    let dispatcher = Dispatcher::new();
    let host = Rc::new(FakeHost::new());
    let store =
        RoomStore::new(&dispatcher, RoomStoreConfig { host: Rc::clone(&host) as Rc<dyn HostApi> });
    Fixture { dispatcher, host, store }
}

#[test]
fn get_all_rooms_sets_pending_and_initiates_fetch() {
    let f = fixture();

    f.dispatcher.dispatch(&PanelAction::GetAllRooms).unwrap();

    assert!(f.store.store_state().pending_initial_retrieval);
    assert_eq!(f.host.calls(), [HostCall::FetchAllRooms]);
}

#[test]
fn successful_empty_fetch_clears_pending_without_error() {
    let f = fixture();
    f.dispatcher.dispatch(&PanelAction::GetAllRooms).unwrap();

    f.dispatcher.dispatch(&PanelAction::RoomsFetched { result: Ok(Vec::new()) }).unwrap();

    let state = f.store.store_state();
    assert!(!state.pending_initial_retrieval);
    assert!(state.rooms.is_empty());
    assert_eq!(state.error, None);
}

#[test]
fn failed_fetch_surfaces_error_and_clears_pending() {
    let f = fixture();
    f.dispatcher.dispatch(&PanelAction::GetAllRooms).unwrap();

    f.dispatcher
        .dispatch(&PanelAction::RoomsFetched {
            result: Err(HostError::Failed("fake error".into())),
        })
        .unwrap();

    let state = f.store.store_state();
    assert!(!state.pending_initial_retrieval);
    assert_eq!(state.error, Some(HostError::Failed("fake error".into())));
}

#[test]
fn fetched_rooms_arrive_newest_first() {
    let f = fixture();
    f.dispatcher.dispatch(&PanelAction::GetAllRooms).unwrap();

    let rooms = vec![room_fixture("old", 100), room_fixture("new", 300), room_fixture("mid", 200)];
    f.dispatcher.dispatch(&PanelAction::RoomsFetched { result: Ok(rooms) }).unwrap();

    let order: Vec<String> =
        f.store.store_state().rooms.iter().map(|r| r.room_token.to_string()).collect();
    assert_eq!(order, ["new", "mid", "old"]);
}

#[test]
fn create_room_generates_name_and_reads_max_size_pref() {
    let f = fixture();
    f.host.set_pref(PREF_ROOMS_MAX_SIZE, "5");
    // Existing numbered names drive the sequence.
    f.dispatcher
        .dispatch(&PanelAction::UpdateRoomList {
            rooms: rooms_from_json(
                r#"[
                    {"roomToken": "QzBbvGmIZWU", "roomUrl": "http://sample/QzBbvGmIZWU",
                     "roomName": "Conversation 2", "maxSize": 2, "ctime": 1405517418}
                ]"#,
            ),
        })
        .unwrap();

    f.dispatcher
        .dispatch(&PanelAction::CreateRoom {
            name_template: "Conversation {{number}}".into(),
            room_owner: "fakeEmail@example.com".into(),
        })
        .unwrap();

    assert!(f.store.store_state().pending_creation);
    let create = f
        .host
        .calls()
        .into_iter()
        .find(|call| matches!(call, HostCall::CreateRoom(_)))
        .unwrap();
    assert_eq!(
        create,
        HostCall::CreateRoom(NewRoomParams {
            room_name: "Conversation 3".into(),
            room_owner: "fakeEmail@example.com".into(),
            max_size: 5,
        })
    );
}

#[test]
fn created_room_is_appended_and_pending_cleared() {
    let f = fixture();
    f.dispatcher
        .dispatch(&PanelAction::CreateRoom {
            name_template: "Conversation {{number}}".into(),
            room_owner: "fakeEmail@example.com".into(),
        })
        .unwrap();

    f.dispatcher
        .dispatch(&PanelAction::RoomCreated { result: Ok(room_fixture("fresh", 42)) })
        .unwrap();

    let state = f.store.store_state();
    assert!(!state.pending_creation);
    assert_eq!(state.error, None);
    assert_eq!(state.rooms.len(), 1);
    assert_eq!(state.rooms[0].room_token, RoomToken::from("fresh"));
}

#[test]
fn failed_creation_surfaces_error() {
    let f = fixture();
    f.dispatcher
        .dispatch(&PanelAction::CreateRoom {
            name_template: "Conversation {{number}}".into(),
            room_owner: "fakeEmail@example.com".into(),
        })
        .unwrap();

    f.dispatcher
        .dispatch(&PanelAction::RoomCreated {
            result: Err(HostError::Rejected { code: 402, reason: "quota".into() }),
        })
        .unwrap();

    let state = f.store.store_state();
    assert!(!state.pending_creation);
    assert!(state.rooms.is_empty());
    assert_eq!(state.error, Some(HostError::Rejected { code: 402, reason: "quota".into() }));
}

#[test]
fn delete_room_delegates_and_confirmation_removes_entry() {
    let f = fixture();
    f.store.set_store_state(
        RoomStoreUpdate::new().rooms(vec![room_fixture("A", 1), room_fixture("B", 2)]),
    );

    f.dispatcher.dispatch(&PanelAction::DeleteRoom { room_token: RoomToken::from("A") }).unwrap();
    assert_eq!(f.host.calls(), [HostCall::DeleteRoom(RoomToken::from("A"))]);

    f.dispatcher
        .dispatch(&PanelAction::RoomDeleted { room_token: RoomToken::from("A"), result: Ok(()) })
        .unwrap();

    let state = f.store.store_state();
    assert_eq!(state.rooms.len(), 1);
    assert_eq!(state.rooms[0].room_token, RoomToken::from("B"));
    assert_eq!(state.error, None);
}

#[test]
fn confirming_delete_of_absent_room_is_a_no_op() {
    let f = fixture();
    f.store.set_store_state(RoomStoreUpdate::new().rooms(vec![room_fixture("B", 2)]));

    let notified = Rc::new(RefCell::new(0_u32));
    let sink = Rc::clone(&notified);
    f.store.subscribe(move |_| *sink.borrow_mut() += 1);

    f.dispatcher
        .dispatch(&PanelAction::RoomDeleted { room_token: RoomToken::from("gone"), result: Ok(()) })
        .unwrap();

    let state = f.store.store_state();
    assert_eq!(state.rooms.len(), 1);
    assert_eq!(state.error, None);
    // No state change, no notification.
    assert_eq!(*notified.borrow(), 0);
}

#[test]
fn failed_delete_keeps_room_and_surfaces_error() {
    let f = fixture();
    f.store.set_store_state(RoomStoreUpdate::new().rooms(vec![room_fixture("A", 1)]));

    f.dispatcher
        .dispatch(&PanelAction::RoomDeleted {
            room_token: RoomToken::from("A"),
            result: Err(HostError::Unavailable),
        })
        .unwrap();

    let state = f.store.store_state();
    assert_eq!(state.rooms.len(), 1);
    assert_eq!(state.error, Some(HostError::Unavailable));
}

#[test]
fn copy_open_and_email_delegate_to_host() {
    let f = fixture();

    f.dispatcher
        .dispatch(&PanelAction::CopyRoomUrl { room_url: "http://sample/QzBbvGmIZWU".into() })
        .unwrap();
    f.dispatcher
        .dispatch(&PanelAction::OpenRoom { room_token: RoomToken::from("QzBbvGmIZWU") })
        .unwrap();
    f.dispatcher
        .dispatch(&PanelAction::EmailRoomUrl { room_url: "http://sample/QzBbvGmIZWU".into() })
        .unwrap();

    let calls = f.host.calls();
    assert_eq!(calls[0], HostCall::CopyString("http://sample/QzBbvGmIZWU".into()));
    assert_eq!(calls[1], HostCall::OpenRoom(RoomToken::from("QzBbvGmIZWU")));
    assert!(matches!(&calls[2], HostCall::ComposeEmail { body, .. }
        if body == "http://sample/QzBbvGmIZWU"));

    // Pure delegation: no local state change.
    let state = f.store.store_state();
    assert!(state.rooms.is_empty());
    assert_eq!(state.error, None);
}

#[test]
fn pushed_room_list_replaces_state_and_clears_error() {
    let f = fixture();
    f.store.set_store_state(RoomStoreUpdate::new().error(HostError::Unavailable));

    f.dispatcher
        .dispatch(&PanelAction::UpdateRoomList {
            rooms: vec![room_fixture("A", 1), room_fixture("A", 1), room_fixture("B", 2)],
        })
        .unwrap();

    let state = f.store.store_state();
    assert_eq!(state.rooms.len(), 2);
    assert_eq!(state.error, None);
}

#[test]
fn default_max_size_applies_without_pref() {
    let f = fixture();

    f.dispatcher
        .dispatch(&PanelAction::CreateRoom {
            name_template: "Conversation {{number}}".into(),
            room_owner: "fakeEmail@example.com".into(),
        })
        .unwrap();

    assert!(matches!(
        f.host.calls().as_slice(),
        [HostCall::CreateRoom(NewRoomParams { max_size: 2, .. })]
    ));
}
