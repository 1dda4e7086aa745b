//! Waterfall (staggered) grid placement for result cards

use super::content::ResultItem;

/// Longest title is wrapped to at most this many lines
const MAX_TITLE_LINES: u16 = 3;
/// Top and bottom border of a card
const CARD_CHROME: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCard {
    pub index: usize,
    pub column: usize,
    pub top: u16,
    pub height: u16,
}

impl GridCard {
    fn center(&self) -> u32 {
        self.top as u32 * 2 + self.height as u32
    }
}

/// Result cards placed column by column, each into the shortest column
#[derive(Clone, Debug, Default)]
pub struct WaterfallLayout {
    pub columns: usize,
    pub column_width: u16,
    pub cards: Vec<GridCard>,
}

impl WaterfallLayout {
    pub fn new(items: &[ResultItem], total_width: u16, columns: usize) -> Self {
        let columns = columns.max(1);
        let column_width = total_width / columns as u16;
        let mut column_heights = vec![0u16; columns];
        let mut cards = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            // First shortest column wins ties, so rows fill left to right
            let (column, top) = column_heights
                .iter()
                .copied()
                .enumerate()
                .min_by_key(|&(_, height)| height)
                .unwrap_or((0, 0));
            let height = card_height(item, column_width);
            column_heights[column] = top.saturating_add(height);
            cards.push(GridCard {
                index,
                column,
                top,
                height,
            });
        }

        Self {
            columns,
            column_width,
            cards,
        }
    }

    pub fn card(&self, index: usize) -> Option<&GridCard> {
        self.cards.get(index)
    }

    /// Index of the card reached by moving from `from` in `direction`.
    pub fn neighbor(&self, from: usize, direction: Direction) -> usize {
        let Some(current) = self.card(from) else {
            return from;
        };

        let target = match direction {
            Direction::Up => self
                .cards
                .iter()
                .filter(|c| c.column == current.column && c.top < current.top)
                .max_by_key(|c| c.top),
            Direction::Down => self
                .cards
                .iter()
                .filter(|c| c.column == current.column && c.top > current.top)
                .min_by_key(|c| c.top),
            Direction::Left if current.column > 0 => self.closest_in_column(current.column - 1, current),
            Direction::Right if current.column + 1 < self.columns => {
                self.closest_in_column(current.column + 1, current)
            }
            _ => None,
        };

        target.map(|c| c.index).unwrap_or(from)
    }

    fn closest_in_column(&self, column: usize, to: &GridCard) -> Option<&GridCard> {
        self.cards
            .iter()
            .filter(|c| c.column == column)
            .min_by_key(|c| c.center().abs_diff(to.center()))
    }
}

/// Wrapped title lines plus one artist line plus borders
pub fn card_height(item: &ResultItem, column_width: u16) -> u16 {
    let inner_width = card_inner_width(column_width) as usize;
    let title_chars = item.title().chars().count().max(1);
    let title_lines = title_chars.div_ceil(inner_width).min(MAX_TITLE_LINES as usize) as u16;
    title_lines + 1 + CARD_CHROME
}

/// Text width inside a card's left and right border
pub fn card_inner_width(column_width: u16) -> u16 {
    column_width.saturating_sub(CARD_CHROME).max(1)
}

/// The title split into the lines `card_height` accounts for.
/// A title that does not fit ends in an ellipsis.
pub fn card_title_lines(item: &ResultItem, column_width: u16) -> Vec<String> {
    let width = card_inner_width(column_width) as usize;
    let chars: Vec<char> = item.title().chars().collect();
    let mut lines: Vec<String> = chars
        .chunks(width)
        .take(MAX_TITLE_LINES as usize)
        .map(|chunk| chunk.iter().collect())
        .collect();

    if chars.len() > width * MAX_TITLE_LINES as usize {
        if let Some(last) = lines.last_mut() {
            last.pop();
            last.push('…');
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
