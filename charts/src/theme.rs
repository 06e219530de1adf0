// Chart colors

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPalette {
    pub background: String,
    pub foreground: String,
    pub frame: String,
    pub grid: String,
    pub price: String,
    pub ma_short: String,
    pub ma_long: String,
    pub buy: String,
    pub sell: String,
}

impl ChartPalette {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            frame: "#333333".to_string(),
            grid: "#e0e0e0".to_string(),
            price: "#1f77b4".to_string(),
            ma_short: "#ff7f0e".to_string(),
            ma_long: "#2ca02c".to_string(),
            buy: "#008000".to_string(),
            sell: "#ff0000".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#d1d4dc".to_string(),
            frame: "#565656".to_string(),
            grid: "#2f2f2f".to_string(),
            price: "#007acc".to_string(),
            ma_short: "#ffc107".to_string(),
            ma_long: "#9c27b0".to_string(),
            buy: "#26a69a".to_string(),
            sell: "#ef5350".to_string(),
        }
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self::default_light()
    }
}
