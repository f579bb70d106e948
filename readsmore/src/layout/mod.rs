use crate::element::{NodeId, NodeKind, Page};
use crate::text::{display_width, strip_markup, wrap_words};
use crate::types::Size;

/// A run of text drawn for one node on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub x: u16,
    pub text: String,
    pub node: NodeId,
    pub hidden: bool,
}

impl Segment {
    fn width(&self) -> u16 {
        clamped_width(&self.text)
    }

    pub fn contains(&self, x: u16) -> bool {
        x >= self.x && x < self.x.saturating_add(self.width())
    }
}

/// Display width in columns, saturating at `u16::MAX`.
fn clamped_width(text: &str) -> u16 {
    u16::try_from(display_width(text)).unwrap_or(u16::MAX)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub y: u16,
    pub segments: Vec<Segment>,
}

impl Row {
    fn end(&self) -> u16 {
        self.segments
            .last()
            .map_or(0, |s| s.x.saturating_add(s.width()))
    }
}

/// Rows a node occupies at its natural size.
///
/// The node's own text is word-wrapped at the page width; text of its
/// descendants continues inline on the last row when it fits.
pub fn natural_rows(page: &Page, node: NodeId) -> Vec<Row> {
    let width = page.width();
    let el = page.node(node);
    let hidden = el.hidden;

    let mut rows: Vec<Row> = wrap_words(&strip_markup(&el.html), width as usize)
        .into_iter()
        .map(|line| {
            let mut row = Row::default();
            if !line.is_empty() {
                row.segments.push(Segment {
                    x: 0,
                    text: line,
                    node,
                    hidden,
                });
            }
            row
        })
        .collect();

    for child in page.children(node) {
        for (piece_node, text, piece_hidden) in inline_pieces(page, *child, hidden) {
            place_inline(&mut rows, piece_node, text, piece_hidden, width);
        }
    }

    for (y, row) in rows.iter_mut().enumerate() {
        row.y = u16::try_from(y).unwrap_or(u16::MAX);
    }
    rows
}

/// Height a node would have without an explicit size, at least one row.
pub fn natural_height(page: &Page, node: NodeId) -> u16 {
    u16::try_from(natural_rows(page, node).len().max(1)).unwrap_or(u16::MAX)
}

fn inline_pieces(page: &Page, node: NodeId, parent_hidden: bool) -> Vec<(NodeId, String, bool)> {
    let el = page.node(node);
    let hidden = parent_hidden || el.hidden;
    let mut pieces = Vec::new();

    let own = strip_markup(&el.html);
    let words: Vec<&str> = own.split_whitespace().collect();
    if !words.is_empty() {
        pieces.push((node, words.join(" "), hidden));
    }
    for child in page.children(node) {
        pieces.extend(inline_pieces(page, *child, hidden));
    }
    pieces
}

fn place_inline(rows: &mut Vec<Row>, node: NodeId, text: String, hidden: bool, width: u16) {
    let text_width = clamped_width(&text);
    let last = rows.len() - 1;
    let end = rows[last].end();
    let gap = u16::from(end > 0);

    if end == 0 || end.saturating_add(gap).saturating_add(text_width) <= width {
        rows[last].segments.push(Segment {
            x: end.saturating_add(gap),
            text,
            node,
            hidden,
        });
    } else {
        rows.push(Row {
            y: 0,
            segments: vec![Segment {
                x: 0,
                text,
                node,
                hidden,
            }],
        });
    }
}

/// Lay out every top-level node of the page, top to bottom.
///
/// An explicit height pads the box with empty rows, and cuts it short when
/// the node's overflow clips.
pub fn layout_page(page: &Page) -> Vec<Row> {
    let mut out = Vec::new();
    let mut y: u16 = 0;

    for root in page.roots() {
        let el = page.node(*root);
        let mut rows = natural_rows(page, *root);

        if let Size::Fixed(h) = el.height {
            let h = h as usize;
            if el.overflow.clips() {
                rows.truncate(h);
            }
            while rows.len() < h {
                rows.push(Row::default());
            }
        }

        for mut row in rows {
            row.y = y;
            y = y.saturating_add(1);
            out.push(row);
        }
    }

    out
}

/// Id of the visible toggle link drawn at `(x, y)`, if any.
pub fn hit_test(page: &Page, rows: &[Row], x: u16, y: u16) -> Option<String> {
    let row = rows.iter().find(|r| r.y == y)?;
    let segment = row
        .segments
        .iter()
        .rev()
        .find(|s| !s.hidden && s.contains(x))?;

    let node = page.node(segment.node);
    if node.kind == NodeKind::ToggleLink {
        node.id.clone()
    } else {
        None
    }
}
