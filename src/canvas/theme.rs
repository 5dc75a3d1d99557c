/// A fixed palette: two gradient endpoints plus one accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg_top: [u8; 3],
    pub bg_bottom: [u8; 3],
    pub accent: [u8; 3],
}

/// Finite styling table; scenes pick a palette by `scene_id % len`,
/// which keeps theme selection stable across runs.
pub const THEMES: [Theme; 6] = [
    // Indigo / Pink
    Theme {
        bg_top: [99, 102, 241],
        bg_bottom: [79, 70, 229],
        accent: [236, 72, 153],
    },
    // Cyan / Yellow
    Theme {
        bg_top: [6, 182, 212],
        bg_bottom: [14, 116, 144],
        accent: [250, 204, 21],
    },
    // Pink / Purple
    Theme {
        bg_top: [236, 72, 153],
        bg_bottom: [190, 24, 93],
        accent: [139, 92, 246],
    },
    // Green / Blue
    Theme {
        bg_top: [34, 197, 94],
        bg_bottom: [21, 128, 61],
        accent: [59, 130, 246],
    },
    // Orange / Indigo
    Theme {
        bg_top: [251, 146, 60],
        bg_bottom: [234, 88, 12],
        accent: [99, 102, 241],
    },
    // Purple / Cyan
    Theme {
        bg_top: [139, 92, 246],
        bg_bottom: [109, 40, 217],
        accent: [6, 182, 212],
    },
];

pub fn for_scene(scene_id: usize) -> &'static Theme {
    &THEMES[scene_id % THEMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_selection_is_deterministic() {
        assert_eq!(for_scene(0), for_scene(0));
        assert_eq!(for_scene(2), &THEMES[2]);
    }

    #[test]
    fn test_theme_selection_wraps_around() {
        assert_eq!(for_scene(6), &THEMES[0]);
        assert_eq!(for_scene(13), &THEMES[1]);
    }
}
