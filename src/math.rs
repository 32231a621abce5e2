/// Round `v` to `places` decimal places.
///
/// Used for parse-time coordinate normalization and render-time formatting so
/// that both ends of a morph agree on the same numeric grid.
pub fn round_to(v: f64, places: u8) -> f64 {
    let scale = 10f64.powi(i32::from(places));
    (v * scale).round() / scale
}

/// Format a coordinate at the given precision using the shortest
/// round-trippable representation (`10` rather than `10.000000`).
pub fn format_coord(v: f64, places: u8) -> String {
    let r = round_to(v, places);
    if r == 0.0 {
        // collapse -0 so formatted comparisons treat it as 0
        return "0".to_string();
    }
    format!("{r}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_snaps_to_grid() {
        assert_eq!(round_to(1.234_567_89, 6), 1.234_568);
        assert_eq!(round_to(1.234_567_89, 2), 1.23);
        assert_eq!(round_to(-0.000_000_4, 6), -0.0);
        assert_eq!(round_to(10.0, 6), 10.0);
    }

    #[test]
    fn format_coord_is_terse() {
        assert_eq!(format_coord(10.0, 6), "10");
        assert_eq!(format_coord(0.5, 6), "0.5");
        assert_eq!(format_coord(1.0000004, 6), "1");
        assert_eq!(format_coord(1e-5, 6), "0.00001");
    }
}
