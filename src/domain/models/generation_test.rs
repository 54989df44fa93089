use super::GenerationSettings;

fn approx_eq(a: f32, b: f32) -> bool {
    return (a - b).abs() < 1e-6;
}

#[test]
fn it_defaults_to_slider_defaults() {
    let settings = GenerationSettings::default();
    assert!(approx_eq(settings.temperature, 0.7));
    assert_eq!(settings.max_tokens, 150);
}

#[test]
fn it_clamps_temperature() {
    assert!(approx_eq(GenerationSettings::clamp_temperature(-1.0), 0.0));
    assert!(approx_eq(GenerationSettings::clamp_temperature(3.0), 1.0));
    assert!(approx_eq(GenerationSettings::clamp_temperature(0.44), 0.4));
    assert!(approx_eq(GenerationSettings::clamp_temperature(f32::NAN), 0.7));
}

#[test]
fn it_clamps_max_tokens() {
    assert_eq!(GenerationSettings::clamp_max_tokens(10), 50);
    assert_eq!(GenerationSettings::clamp_max_tokens(-10), 50);
    assert_eq!(GenerationSettings::clamp_max_tokens(9000), 500);
    assert_eq!(GenerationSettings::clamp_max_tokens(321), 321);
}

#[test]
fn it_does_not_clamp_on_new() {
    let settings = GenerationSettings::new(1.5, 1000);
    assert!(approx_eq(settings.temperature, 1.5));
    assert_eq!(settings.max_tokens, 1000);
}
