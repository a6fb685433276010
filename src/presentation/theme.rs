use colored::Colorize;

/// Styling for each kind of catalog field in text output.
pub struct Theme {
    pub title: fn(&str) -> String,
    pub meta: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub label: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub genre: fn(&str) -> String,
    pub body: fn(&str) -> String,
    pub rating: fn(&str) -> String,
    pub link: fn(&str) -> String,
}

pub const THEME_NAMES: [&str; 3] = ["marquee", "noir", "daylight"];

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "marquee" | "" => Self::marquee(),
            "noir" => Self::noir(),
            "daylight" => Self::daylight(),
            _ => {
                eprintln!(
                    "{}",
                    format!(
                        "✘ Unknown theme '{}', expected one of: {}",
                        name,
                        THEME_NAMES.join(", ")
                    )
                    .yellow()
                );
                Self::marquee()
            }
        }
    }

    // Bright headline titles, gold ratings
    fn marquee() -> Self {
        Self {
            title: |s| s.bright_yellow().bold().to_string(),
            meta: |s| s.bright_black().to_string(),
            line: |s| s.yellow().dimmed().to_string(),
            label: |s| s.bright_blue().bold().to_string(),
            idx: |s| s.yellow().to_string(),
            genre: |s| s.magenta().to_string(),
            body: |s| s.normal().to_string(),
            rating: |s| s.bright_yellow().to_string(),
            link: |s| s.blue().underline().to_string(),
        }
    }

    // Monochrome with a single red accent
    fn noir() -> Self {
        Self {
            title: |s| s.bright_white().bold().to_string(),
            meta: |s| s.white().dimmed().to_string(),
            line: |s| s.bright_black().to_string(),
            label: |s| s.white().bold().to_string(),
            idx: |s| s.bright_black().to_string(),
            genre: |s| s.white().italic().to_string(),
            body: |s| s.white().to_string(),
            rating: |s| s.bright_red().bold().to_string(),
            link: |s| s.bright_black().underline().to_string(),
        }
    }

    // Dark inks for light terminal backgrounds
    fn daylight() -> Self {
        Self {
            title: |s| s.blue().bold().to_string(),
            meta: |s| s.black().dimmed().to_string(),
            line: |s| s.blue().dimmed().to_string(),
            label: |s| s.green().bold().to_string(),
            idx: |s| s.blue().to_string(),
            genre: |s| s.purple().to_string(),
            body: |s| s.black().to_string(),
            rating: |s| s.red().to_string(),
            link: |s| s.cyan().underline().to_string(),
        }
    }
}
