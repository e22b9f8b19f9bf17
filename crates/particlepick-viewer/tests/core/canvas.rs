use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use particlepick_core::{
    ImageSpace, ParticleError, ParticleFamily, ParticleId, PickerEvent, SessionEvent, ShapeKind,
    ShapeSet, ViewEvent,
};
use particlepick_settings::PickerConfig;
use particlepick_viewer::{
    AnnotationCanvas, FrameContext, KeyIntent, Micrograph, PickingCanvas, SourceRect, ViewSegment,
};

fn recording_config() -> PickerConfig {
    let mut config = PickerConfig::default();
    config.events.enable_history = true;
    config
}

fn family() -> Arc<ParticleFamily> {
    Arc::new(ParticleFamily::new("default", 20).unwrap())
}

fn micrograph(name: &str, w: i32, h: i32) -> Micrograph {
    Micrograph::new(name, ImageSpace::new(w, h).unwrap())
}

fn canvas() -> PickingCanvas {
    let config = recording_config();
    let frame = FrameContext::from_config(&config);
    PickingCanvas::from_config(micrograph("mic_001", 1000, 1000), &config, frame).unwrap()
}

#[test]
fn test_arrow_keys_need_active_particle() {
    let mut canvas = canvas();
    let id = canvas.add_particle(100, 100, family());
    canvas.mark_saved();

    assert!(!canvas.handle_key(KeyIntent::Left));
    assert!(!canvas.is_changed());

    canvas.select_particle(id).unwrap();
    assert!(canvas.handle_key(KeyIntent::Left));
    assert!(canvas.handle_key(KeyIntent::Down));
    assert_eq!(canvas.active().unwrap().position(), (99, 101));
    assert!(canvas.is_changed());

    assert!(!canvas.handle_key(KeyIntent::Other));
}

#[test]
fn test_toggle_key_works_without_active_particle() {
    let mut canvas = canvas();
    assert!(canvas.handle_key(KeyIntent::ToggleShapes));
    assert_eq!(canvas.frame_context().shapes().selection(), ShapeSet::none());
    assert!(canvas.handle_key(KeyIntent::ToggleShapes));
    assert_eq!(canvas.frame_context().shapes().selection(), ShapeSet::all());
}

#[test]
fn test_configured_nudge_step() {
    let mut config = recording_config();
    config.picking.nudge_step = 4;
    let frame = FrameContext::from_config(&config);
    let mut canvas =
        PickingCanvas::from_config(micrograph("mic_001", 500, 500), &config, frame).unwrap();
    let id = canvas.add_particle(50, 50, family());
    canvas.select_particle(id).unwrap();

    assert!(canvas.handle_key(KeyIntent::Up));
    assert_eq!(canvas.active().unwrap().position(), (50, 46));
}

#[test]
fn test_select_at_view() {
    let mut canvas = canvas();
    canvas.set_magnification(2.0).unwrap();
    let first = canvas.add_particle(100, 100, family());
    let second = canvas.add_particle(105, 100, family());

    // (104, 100) is inside both boxes; the later pick is on top
    assert_eq!(canvas.select_at_view(208.0, 200.0), Some(second));
    assert_eq!(canvas.active_id(), Some(second));

    assert_eq!(canvas.select_at_view(186.0, 200.0), Some(first));
    assert_eq!(canvas.select_at_view(900.0, 900.0), None);
    assert_eq!(canvas.active_id(), None);
}

#[test]
fn test_move_to_recenters_only_when_needed() {
    let mut canvas = canvas();
    canvas.fit_to_view(200.0, 200.0).unwrap();
    let near = canvas.add_particle(50, 50, family());
    let far = canvas.add_particle(800, 800, family());
    canvas.frame_context().events().clear_history();

    assert!(!canvas.move_to(near).unwrap());
    assert!(canvas.move_to(far).unwrap());
    assert_eq!(canvas.view().source_rect(), SourceRect::new(700, 700, 200, 200).unwrap());
    assert!(!canvas.move_to(far).unwrap());

    assert_eq!(
        canvas.frame_context().events().history(),
        vec![PickerEvent::View(ViewEvent::Recentered {
            x: 700,
            y: 700,
            width: 200,
            height: 200,
        })]
    );

    let err = canvas.move_to(ParticleId(42)).unwrap_err();
    assert_eq!(err, ParticleError::UnknownParticle { id: ParticleId(42) });
}

#[test]
fn test_zoom_publishes_magnification() {
    let mut canvas = canvas();
    canvas.frame_context().events().clear_history();
    assert!(canvas.zoom_in());
    assert!(canvas.set_magnification(-1.0).is_err());

    assert_eq!(
        canvas.frame_context().events().history(),
        vec![PickerEvent::View(ViewEvent::ZoomChanged { magnification: 1.5 })]
    );
}

#[test]
fn test_remove_active_particle_clears_it() {
    let mut canvas = canvas();
    let id = canvas.add_particle(10, 10, family());
    canvas.select_particle(id).unwrap();

    assert!(canvas.remove_particle(id).is_some());
    assert_eq!(canvas.active_id(), None);
    assert!(canvas.remove_particle(id).is_none());
}

#[test]
fn test_switch_micrograph() {
    let mut canvas = canvas();
    canvas.set_magnification(0.5).unwrap();
    let id = canvas.add_particle(10, 10, family());
    canvas.select_particle(id).unwrap();

    let previous = canvas.switch_micrograph(micrograph("mic_002", 400, 300));
    assert_eq!(previous.name(), "mic_001");
    assert_eq!(previous.particles().len(), 1);

    assert_eq!(canvas.micrograph().name(), "mic_002");
    assert_eq!(canvas.active_id(), None);
    assert!(canvas.active().is_none());
    assert_eq!(canvas.view().magnification(), 0.5);
    assert_eq!(canvas.view().source_rect(), SourceRect::new(0, 0, 400, 300).unwrap());

    let history = canvas.frame_context().events().history();
    assert_eq!(
        history.last(),
        Some(&PickerEvent::Session(SessionEvent::MicrographSwitched {
            name: "mic_002".to_string(),
        }))
    );
}

#[test]
fn test_refresh_active_through_trait() {
    let mut canvas = canvas();
    let id = canvas.add_particle(10, 10, family());
    canvas.mark_saved();

    let dyn_canvas: &mut dyn AnnotationCanvas = &mut canvas;
    dyn_canvas.refresh_active(id);
    assert_eq!(dyn_canvas.active().map(|p| p.id), Some(id));

    // unknown ids still refresh but select nothing new
    dyn_canvas.refresh_active(ParticleId(7));
    assert_eq!(dyn_canvas.active().map(|p| p.id), Some(id));
    assert!(canvas.is_changed());
}

#[test]
fn test_views_share_shape_policy() {
    let config = recording_config();
    let frame = FrameContext::from_config(&config);
    let mut first =
        PickingCanvas::from_config(micrograph("mic_001", 500, 500), &config, frame.share()).unwrap();
    let mut second =
        PickingCanvas::from_config(micrograph("mic_002", 500, 500), &config, frame).unwrap();
    first.add_particle(20, 20, family());
    second.add_particle(40, 40, family());

    first.frame_context().shapes().set_selected(ShapeKind::Circle, false);
    assert!(!second.frame_context().is_shape_selected(ShapeKind::Circle));

    assert!(first.handle_key(KeyIntent::ToggleShapes));
    assert!(second.overlays().iter().all(|o| o.is_empty()));

    assert!(second.handle_key(KeyIntent::ToggleShapes));
    assert!(first.overlays().iter().all(|o| o.circle.is_some()));
}

#[test]
fn test_overlays_mark_active() {
    let mut canvas = canvas();
    let first = canvas.add_particle(100, 100, family());
    let second = canvas.add_particle(300, 300, family());
    canvas.select_particle(second).unwrap();

    let overlays = canvas.overlays();
    assert_eq!(overlays.len(), 2);
    assert_eq!(overlays[0].id, first);
    assert!(!overlays[0].active);
    assert!(overlays[1].active);

    canvas.frame_context().shapes().toggle_all_shapes();
    assert!(canvas.overlay_for(first, false).unwrap().is_empty());
    assert!(!canvas.overlay_for(first, true).unwrap().is_empty());
    assert!(canvas.overlay_for(ParticleId(99), true).is_none());
}

#[test]
fn test_reference_line_in_view() {
    let mut canvas = canvas();
    canvas.set_magnification(0.5).unwrap();
    let (line, segment) = canvas.reference_line(FRAC_PI_2).unwrap();
    assert_eq!(line.start(), (0.0, 500.0));
    assert_eq!(
        segment,
        ViewSegment {
            x1: 0.0,
            y1: 250.0,
            x2: 500.0,
            y2: 250.0,
        }
    );
    assert!(canvas.reference_line(f64::NAN).is_err());
}

#[test]
fn test_cross_length_validation() {
    let mut canvas = canvas();
    assert!(canvas.frame_mut().set_cross_half_length(0.0).is_err());
    canvas.frame_mut().set_cross_half_length(4.0).unwrap();
    assert_eq!(canvas.frame_context().cross_half_length(), 4.0);
}

#[test]
fn test_views_share_changed_flag() {
    let config = recording_config();
    let frame = FrameContext::from_config(&config);
    let mut first =
        PickingCanvas::from_config(micrograph("mic_001", 500, 500), &config, frame.share()).unwrap();
    let mut second =
        PickingCanvas::from_config(micrograph("mic_002", 500, 500), &config, frame).unwrap();
    let id = first.add_particle(20, 20, family());
    first.select_particle(id).unwrap();
    first.mark_saved();
    assert!(!second.is_changed());

    assert!(first.handle_key(KeyIntent::Right));
    assert!(second.is_changed());
    assert!(second.frame_context().is_changed());

    second.mark_saved();
    assert!(!first.is_changed());
}
