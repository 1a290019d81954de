use crate::model::{LevelConfig, SnapStyle};

pub const LEVELS: [LevelConfig; 3] = [
    LevelConfig {
        level: 1,
        rows: 3,
        cols: 3,
        snap_radius: 25.0,
        snap_style: SnapStyle::HighGlow,
    },
    LevelConfig {
        level: 2,
        rows: 4,
        cols: 4,
        snap_radius: 20.0,
        snap_style: SnapStyle::StandardGlow,
    },
    LevelConfig {
        level: 3,
        rows: 5,
        cols: 5,
        snap_radius: 18.0,
        snap_style: SnapStyle::Pulse,
    },
];

/// Looks up a level by number; unknown numbers fall back to the first level.
pub fn level_config(level: u32) -> LevelConfig {
    LEVELS
        .iter()
        .find(|cfg| cfg.level == level)
        .copied()
        .unwrap_or(LEVELS[0])
}

pub fn max_level() -> u32 {
    LEVELS.len() as u32
}

/// Short label shown in the HUD for a level's snap treatment.
pub fn theme_label(style: SnapStyle) -> &'static str {
    match style {
        SnapStyle::HighGlow => "HIGH GLOW",
        SnapStyle::StandardGlow => "STANDARD GLOW",
        SnapStyle::Pulse => "PULSE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_maps_level_numbers() {
        assert_eq!(LEVELS.len(), 3);
        let expected = [
            (3, 3, 25.0, SnapStyle::HighGlow),
            (4, 4, 20.0, SnapStyle::StandardGlow),
            (5, 5, 18.0, SnapStyle::Pulse),
        ];
        for (n, (rows, cols, radius, style)) in (1..=3).zip(expected) {
            let cfg = level_config(n);
            assert_eq!(cfg.level, n);
            assert_eq!((cfg.rows, cfg.cols, cfg.snap_radius, cfg.snap_style), (rows, cols, radius, style));
        }
    }

    #[test]
    fn unknown_level_falls_back_to_first() {
        assert_eq!(level_config(99), LEVELS[0]);
        assert_eq!(level_config(0).level, 1);
    }
}
