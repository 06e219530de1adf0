// Chart rendering: turns analyzed coins into paginated 2x2 SVG pages.
pub mod layout;
pub mod page;
pub mod panel;
pub mod svg;
pub mod theme;

pub use layout::{paginate, Page, PANELS_PER_PAGE};
pub use page::{render_page, render_pages, PageStyle, RenderedPage, MIN_PAGE_SIZE, PAGE_TITLE};
pub use theme::ChartPalette;
