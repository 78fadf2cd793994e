use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Header box, body box and footer legend of a full-page screen, plus the
/// padded area inside each box.
pub struct Regions {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
    pub header_inner: Rect,
    pub body_inner: Rect,
    pub footer_inner: Rect,
}

const PAGE_MARGIN: u16 = 1;
const INNER_MARGIN: u16 = 2;

/// The header gets `header_needed` rows (but never squeezes the body below
/// three), the footer `footer_height`, the body the rest.
pub fn page_regions(size: Rect, header_needed: u16, footer_height: u16) -> Regions {
    let usable = size.height.saturating_sub(2 * PAGE_MARGIN).saturating_sub(footer_height);
    let header_height = header_needed.min(usable.saturating_sub(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(PAGE_MARGIN)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(3),
            Constraint::Length(footer_height),
        ])
        .split(size);

    let pad = Margin { horizontal: INNER_MARGIN, vertical: 1 };
    Regions {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
        header_inner: chunks[0].inner(&pad),
        body_inner: chunks[1].inner(&pad),
        footer_inner: chunks[2].inner(&Margin { horizontal: INNER_MARGIN, vertical: 1 }),
    }
}

/// A `width` x `height` box centred in `r`, shrunk to fit if needed.
pub fn centered_popup(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width.saturating_sub(2));
    let h = height.min(r.height.saturating_sub(2));
    Rect {
        x: r.x + r.width.saturating_sub(w) / 2,
        y: r.y + r.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    }
}
