use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn format_weight(weight: f32) -> String {
    format!("{weight:.2}")
}

pub fn format_distance(pixels: f32) -> String {
    if pixels >= 1000.0 {
        format!("{:.1}k px", pixels / 1000.0)
    } else {
        format!("{pixels:.1} px")
    }
}

pub fn scenario_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
