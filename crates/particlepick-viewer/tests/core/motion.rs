use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use particlepick_core::{
    EventBus, EventBusConfig, ParticleError, ParticleEvent, ParticleFamily, ParticleId,
    ParticleStore, PickerEvent,
};
use particlepick_viewer::motion::{Direction, ParticleMotionController};

fn recording_bus() -> Arc<EventBus> {
    Arc::new(EventBus::with_config(EventBusConfig {
        enable_history: true,
        ..Default::default()
    }))
}

fn store_with_particle(x: i32, y: i32) -> (ParticleStore, ParticleId) {
    let mut store = ParticleStore::new();
    let family = Arc::new(ParticleFamily::new("default", 20).unwrap());
    let id = store.add(x, y, family);
    (store, id)
}

#[test]
fn test_move_without_active_is_noop() {
    let events = recording_bus();
    let (mut store, id) = store_with_particle(10, 10);
    let mut motion = ParticleMotionController::new(events.clone());

    assert_eq!(motion.move_active(&mut store, 5, 5), None);
    assert_eq!(motion.nudge(&mut store, Direction::Up), None);
    assert_eq!(store.get(id).unwrap().position(), (10, 10));
    assert!(!motion.is_changed());
    assert!(events.history().is_empty());
}

#[test]
fn test_moves_accumulate() {
    let events = recording_bus();
    let (mut store, id) = store_with_particle(10, 10);
    let mut motion = ParticleMotionController::new(events.clone());
    motion.select_particle(&store, id).unwrap();

    assert_eq!(motion.move_active(&mut store, 1, 0), Some((11, 10)));
    assert_eq!(motion.move_active(&mut store, 0, -1), Some((11, 9)));
    assert_eq!(store.get(id).unwrap().position(), (11, 9));
    assert!(motion.is_changed());

    assert_eq!(
        events.history(),
        vec![
            PickerEvent::Particle(ParticleEvent::ActiveChanged { id: Some(id) }),
            PickerEvent::Particle(ParticleEvent::Moved { id, x: 11, y: 10 }),
            PickerEvent::Particle(ParticleEvent::Moved { id, x: 11, y: 9 }),
        ]
    );
}

#[test]
fn test_moves_are_not_clamped() {
    let (mut store, id) = store_with_particle(0, 0);
    let mut motion = ParticleMotionController::new(Arc::new(EventBus::new()));
    motion.select_particle(&store, id).unwrap();

    assert_eq!(motion.nudge(&mut store, Direction::Left), Some((-1, 0)));
    assert_eq!(motion.nudge(&mut store, Direction::Up), Some((-1, -1)));
}

#[test]
fn test_nudge_uses_step() {
    let (mut store, id) = store_with_particle(50, 50);
    let mut motion = ParticleMotionController::with_step(Arc::new(EventBus::new()), 5);
    motion.select_particle(&store, id).unwrap();

    assert_eq!(motion.nudge(&mut store, Direction::Right), Some((55, 50)));
    assert_eq!(motion.nudge(&mut store, Direction::Down), Some((55, 55)));
}

#[test]
fn test_select_unknown_particle() {
    let (store, _) = store_with_particle(0, 0);
    let mut motion = ParticleMotionController::new(Arc::new(EventBus::new()));
    let err = motion.select_particle(&store, ParticleId(99)).unwrap_err();
    assert_eq!(err, ParticleError::UnknownParticle { id: ParticleId(99) });
    assert_eq!(motion.active(), None);
}

#[test]
fn test_reselecting_same_particle_publishes_once() {
    let events = recording_bus();
    let (store, id) = store_with_particle(0, 0);
    let mut motion = ParticleMotionController::new(events.clone());
    motion.select_particle(&store, id).unwrap();
    motion.select_particle(&store, id).unwrap();
    assert_eq!(events.history().len(), 1);

    motion.clear_active();
    motion.clear_active();
    assert_eq!(events.history().len(), 2);
}

#[test]
fn test_stale_active_is_dropped() {
    let events = recording_bus();
    let (mut store, id) = store_with_particle(0, 0);
    let mut motion = ParticleMotionController::new(events.clone());
    motion.select_particle(&store, id).unwrap();
    store.remove(id);

    assert_eq!(motion.nudge(&mut store, Direction::Right), None);
    assert_eq!(motion.active(), None);
    assert!(!motion.is_changed());
    assert_eq!(
        events.history().last(),
        Some(&PickerEvent::Particle(ParticleEvent::ActiveChanged { id: None }))
    );

    // once dropped, further moves stay quiet
    assert_eq!(motion.move_active(&mut store, 1, 1), None);
    assert_eq!(events.history().len(), 2);
}

#[test]
fn test_stale_active_dropped_by_set_position() {
    let (mut store, id) = store_with_particle(5, 5);
    let mut motion = ParticleMotionController::new(Arc::new(EventBus::new()));
    motion.select_particle(&store, id).unwrap();
    store.remove(id);

    assert_eq!(motion.set_position(&mut store, 10, 10), None);
    assert_eq!(motion.active(), None);
}

#[test]
fn test_shared_changed_flag() {
    let flag = Arc::new(AtomicBool::new(false));
    let (mut store, id) = store_with_particle(0, 0);
    let mut motion =
        ParticleMotionController::new(Arc::new(EventBus::new())).sharing_changed_flag(flag.clone());
    motion.select_particle(&store, id).unwrap();

    motion.nudge(&mut store, Direction::Down);
    assert!(flag.load(Ordering::SeqCst));
    motion.mark_saved();
    assert!(!flag.load(Ordering::SeqCst));
}

#[test]
fn test_set_position_and_saved_flag() {
    let (mut store, id) = store_with_particle(0, 0);
    let mut motion = ParticleMotionController::new(Arc::new(EventBus::new()));
    motion.select_particle(&store, id).unwrap();

    assert_eq!(motion.set_position(&mut store, 300, 200), Some((300, 200)));
    assert!(motion.is_changed());
    motion.mark_saved();
    assert!(!motion.is_changed());
    assert_eq!(motion.active_particle(&store).unwrap().position(), (300, 200));
}
