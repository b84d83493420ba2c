use super::canvas::{Fill, Rgb};

#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    pub background: Rgb,
    pub water: Fill,
    pub bridge: Fill,
    pub boundary: Rgb,
    pub boundary_opacity: f64,
    pub fairway: Fill,
    pub bunker: Fill,
    pub green: Fill,
    pub tee: Fill,
    pub flag_pole: Rgb,
    pub flag: Rgb,
    pub label: Rgb,
    pub player_palette: Vec<Rgb>,
    pub ball: Rgb,
    pub outline: Rgb,
    pub greenkeeper: Rgb,
    pub overlay: Fill,
    pub overlay_text: Rgb,
    pub wind: Rgb,
    pub player_size_scale: f64,
    pub ball_size_scale: f64,
    pub greenkeeper_size_scale: f64,
    pub flag_size_scale: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Rgb(0x2e, 0x7d, 0x32),
            water: Fill::solid(Rgb(0x4a, 0x90, 0xd9)),
            bridge: Fill::solid(Rgb(0x8d, 0x6e, 0x63)),
            boundary: Rgb::WHITE,
            boundary_opacity: 0.35,
            fairway: Fill::solid(Rgb(0xa2, 0xd1, 0x49)),
            bunker: Fill::solid(Rgb(0xe8, 0xd9, 0xa0)),
            green: Fill::solid(Rgb(0x34, 0xa8, 0x53)),
            tee: Fill::solid(Rgb(0x7c, 0xb3, 0x42)),
            flag_pole: Rgb(0xf5, 0xf5, 0xf5),
            flag: Rgb(0xe5, 0x39, 0x35),
            label: Rgb::WHITE,
            player_palette: vec![
                Rgb(0x1e, 0x88, 0xe5),
                Rgb(0xfb, 0x8c, 0x00),
                Rgb(0x8e, 0x24, 0xaa),
                Rgb(0xfd, 0xd8, 0x35),
                Rgb(0x00, 0xac, 0xc1),
                Rgb(0xd8, 0x1b, 0x60),
            ],
            ball: Rgb::WHITE,
            outline: Rgb::BLACK,
            greenkeeper: Rgb(0x6d, 0x4c, 0x41),
            overlay: Fill {
                color: Rgb::BLACK,
                opacity: 0.6,
            },
            overlay_text: Rgb::WHITE,
            wind: Rgb::WHITE,
            player_size_scale: 0.6,
            ball_size_scale: 0.6,
            greenkeeper_size_scale: 0.6,
            flag_size_scale: 0.6,
        }
    }
}

impl RenderStyle {
    #[must_use]
    pub fn player_color(&self, id: u32) -> Rgb {
        if self.player_palette.is_empty() {
            return self.outline;
        }
        let idx = usize::try_from(id).unwrap_or_default() % self.player_palette.len();
        self.player_palette[idx]
    }
}
