//! Presentation state: theme, background, quote and control visibility

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::timer_engine::TimerSnapshot;

/// Background index shown at startup ("Mountain Retreat")
pub const DEFAULT_BACKGROUND_INDEX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Background {
    pub name: &'static str,
    pub location: &'static str,
    pub url: &'static str,
}

pub const BACKGROUNDS: [Background; 4] = [
    Background {
        name: "Valley Mist",
        location: "谷地",
        url: "https://images.unsplash.com/photo-1506744038136-46273834b3fb?auto=format&fit=crop&q=80&w=2000",
    },
    Background {
        name: "Distant Peaks",
        location: "远山",
        url: "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?auto=format&fit=crop&q=80&w=2000",
    },
    Background {
        name: "Emerald Forest",
        location: "雨林",
        url: "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05?auto=format&fit=crop&q=80&w=2000",
    },
    Background {
        name: "Mountain Retreat",
        location: "山居",
        url: "https://images.unsplash.com/photo-1534067783941-51c9c23ecefd?auto=format&fit=crop&q=80&w=2000",
    },
];

pub const QUOTES: [&str; 15] = [
    "观照 · 呼吸",
    "静心 · 当下",
    "行住坐卧 · 皆是修行",
    "一念觉 · 一念迷",
    "心若止水 · 万物自明",
    "放下执念 · 自在随缘",
    "念起即觉 · 觉即不随",
    "万法归一 · 一归何处",
    "空即是色 · 色即是空",
    "不思善恶 · 本来面目",
    "心如明镜 · 照见本性",
    "无住生心 · 应无所住",
    "活在当下 · 此刻即是",
    "觉知呼吸 · 回归本心",
    "静观己心 · 了悟自性",
];

/// User-selected theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Palette a renderer should apply. Overtime overrides the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Dark,
    Light,
    Overtime,
}

#[derive(Debug, Clone)]
pub struct PresentationState {
    theme: Theme,
    background_index: usize,
    quote_index: usize,
    controls_visible: bool,
}

impl PresentationState {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            theme: Theme::Dark,
            background_index: DEFAULT_BACKGROUND_INDEX,
            quote_index: rng.gen_range(0..QUOTES.len()),
            controls_visible: true,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn background_index(&self) -> usize {
        self.background_index
    }

    pub fn background(&self) -> Background {
        BACKGROUNDS[self.background_index]
    }

    pub fn quote(&self) -> &'static str {
        QUOTES[self.quote_index]
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn palette(&self, timer: &TimerSnapshot) -> Palette {
        if timer.is_overtime {
            Palette::Overtime
        } else {
            match self.theme {
                Theme::Dark => Palette::Dark,
                Theme::Light => Palette::Light,
            }
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Advance to the next background, wrapping, and draw a fresh quote
    pub fn next_background<R: Rng>(&mut self, rng: &mut R) -> usize {
        self.background_index = (self.background_index + 1) % BACKGROUNDS.len();
        self.quote_index = rng.gen_range(0..QUOTES.len());
        self.background_index
    }

    pub fn show_controls(&mut self) {
        self.controls_visible = true;
    }

    pub fn hide_controls(&mut self) {
        self.controls_visible = false;
    }

    /// Serializable view for the presentation layer
    pub fn view(&self, timer: &TimerSnapshot) -> PresentationView {
        PresentationView {
            theme: self.theme,
            palette: self.palette(timer),
            background_index: self.background_index,
            background: self.background(),
            quote: self.quote(),
            controls_visible: self.controls_visible,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresentationView {
    pub theme: Theme,
    pub palette: Palette,
    pub background_index: usize,
    pub background: Background,
    pub quote: &'static str,
    pub controls_visible: bool,
}
