use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A popup rect of `width` x `height` centred in `area`, shrunk to fit.
pub fn center_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// Cap `area` at `max_width` columns, keeping it horizontally centred.
pub fn cap_width(area: Rect, max_width: u16) -> Rect {
    if area.width <= max_width {
        return area;
    }
    let x = area.x + (area.width - max_width) / 2;
    Rect::new(x, area.y, max_width, area.height)
}

/// Shrink `area` by `horizontal` columns on each side and `vertical` rows top and bottom.
pub fn pad(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    let width = area.width.saturating_sub(horizontal * 2);
    let height = area.height.saturating_sub(vertical * 2);
    Rect::new(
        area.x + horizontal.min(area.width / 2),
        area.y + vertical.min(area.height / 2),
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_popup() {
        let popup = center_popup(Rect::new(0, 0, 100, 40), 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn test_center_popup_shrinks_to_fit() {
        let popup = center_popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 5);
    }

    #[test]
    fn test_cap_width() {
        assert_eq!(cap_width(Rect::new(0, 0, 80, 10), 120), Rect::new(0, 0, 80, 10));
        assert_eq!(
            cap_width(Rect::new(10, 2, 200, 10), 120),
            Rect::new(50, 2, 120, 10)
        );
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad(Rect::new(0, 0, 80, 20), 4, 1), Rect::new(4, 1, 72, 18));
        // Never underflows on tiny areas
        let tiny = pad(Rect::new(0, 0, 3, 1), 4, 1);
        assert_eq!((tiny.width, tiny.height), (0, 0));
    }
}
