// Page grouping and the 2x2 panel grid.
use shared::models::CoinAnalysis;

pub const PANELS_PER_PAGE: usize = 4;
const GRID_COLUMNS: usize = 2;

/// Height reserved at the top of a page for its title.
pub const TITLE_BAND: f64 = 50.0;

/// One page worth of panels. `slots` always has `PANELS_PER_PAGE` entries;
/// `None` marks a blank slot on the last page.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub number: usize,
    pub slots: Vec<Option<&'a CoinAnalysis>>,
}

impl<'a> Page<'a> {
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn blank(&self) -> usize {
        self.slots.len() - self.populated()
    }

    pub fn coins(&self) -> Vec<&'a str> {
        self.slots.iter().filter_map(|slot| slot.map(|a| a.coin.as_str())).collect()
    }
}

/// Groups analyses into pages of four, keeping their order.
pub fn paginate(analyses: &[CoinAnalysis]) -> Vec<Page<'_>> {
    analyses
        .chunks(PANELS_PER_PAGE)
        .enumerate()
        .map(|(idx, chunk)| {
            let mut slots: Vec<Option<&CoinAnalysis>> = chunk.iter().map(Some).collect();
            slots.resize(PANELS_PER_PAGE, None);
            Page { number: idx + 1, slots }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Area of grid slot `slot` (row-major: 0 top-left, 3 bottom-right).
pub fn panel_rect(slot: usize, page_width: f64, page_height: f64) -> Rect {
    let rows = PANELS_PER_PAGE / GRID_COLUMNS;
    let width = page_width / GRID_COLUMNS as f64;
    let height = (page_height - TITLE_BAND) / rows as f64;
    Rect {
        x: (slot % GRID_COLUMNS) as f64 * width,
        y: TITLE_BAND + (slot / GRID_COLUMNS) as f64 * height,
        width,
        height,
    }
}
