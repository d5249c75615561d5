//! Random input sequences never break orbit or grid invariants.

use proptest::prelude::*;
use pulsecube::*;
use pulsecube_core::orbit::{zoom_bounds, POLE_MARGIN};

fn input() -> impl Strategy<Value = Message> {
    prop_oneof![
        Just(Message::OrbitStart),
        Just(Message::OrbitEnd),
        Just(Message::Tap),
        Just(Message::MouseLeave),
        Just(Message::PinchStart),
        Just(Message::PinchEnd),
        (-3.0f32..3.0, -3.0f32..3.0).prop_map(|(d_theta, d_phi)| Message::OrbitMove { d_theta, d_phi }),
        (-2.0f32..2.0, -2.0f32..2.0).prop_map(|(x, y)| Message::MouseNdc { x, y }),
        (0.01f32..20.0).prop_map(|ratio| Message::PinchMove { ratio }),
        (200.0f32..2000.0, 200.0f32..1200.0, 0.5f32..4.0)
            .prop_map(|(width, height, dpr)| Message::Resize { width, height, dpr }),
        prop::sample::select(vec!["dusk", "tide", "moss", "void", "sunset"])
            .prop_map(|name| Message::Theme { name: name.to_string() }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn inputs_keep_state_in_bounds(messages in prop::collection::vec(input(), 1..40)) {
        let options = Options::new().with_seed(5).with_auto_cycle(false);
        let mut sim = Simulation::new(options, HeadlessHost::new());

        let mut now = 0.0;
        for message in &messages {
            message.apply(&mut sim);
            now += 0.05;
            sim.tick(0.05, now);

            let n = sim.grid_size();
            prop_assert_eq!(sim.cubelets().len(), n * n * n);
            prop_assert_eq!(sim.layer_materials().len(), n);

            let phi = sim.orbit().phi;
            prop_assert!(phi >= POLE_MARGIN && phi <= std::f32::consts::PI - POLE_MARGIN);
            prop_assert!(sim.viewport().pixel_ratio <= 2.0);

            let (min_r, max_r) = zoom_bounds(n);
            if matches!(message, Message::PinchMove { .. }) {
                prop_assert!(sim.orbit().radius >= min_r && sim.orbit().radius <= max_r);
            }
        }
    }
}
