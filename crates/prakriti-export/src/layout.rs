//! Flow layout: a linear list of [`Block`]s is paginated into positioned
//! drawing operations. Coordinates are millimetres from the bottom-left
//! corner of the page, text positions are baselines.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::styles::{PdfStyles, Tint};
use crate::text::{PT_TO_MM, chars_per_line, wrap_text};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Strip above the bottom margin kept free for the footer.
    pub footer_band: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin: 18.0,
        footer_band: 12.0,
    };

    pub fn content_top(&self) -> f32 {
        self.height - self.margin
    }

    pub fn content_bottom(&self) -> f32 {
        self.margin + self.footer_band
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.content_top() - self.content_bottom()
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// One column of a side-by-side strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: String,
    pub items: Vec<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Subheading(String),
    Paragraph(String),
    /// Small grey text.
    Muted(String),
    Bullets(Vec<String>),
    Numbered(Vec<String>),
    /// Column headers with relative widths, then rows of cells.
    Table {
        columns: Vec<(String, f32)>,
        rows: Vec<Vec<String>>,
    },
    /// Scaled to fit, aspect preserved, centred. Skipped when unreadable.
    Image {
        path: PathBuf,
        max_width: f32,
        max_height: f32,
    },
    /// Label/value tiles in one row.
    Badges(Vec<(String, String)>),
    Columns(Vec<Column>),
    /// Highlighted box.
    Note {
        title: Option<String>,
        text: String,
    },
    Spacer(f32),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        color: Tint,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Tint,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Tint,
        thickness: f32,
    },
    Image {
        path: PathBuf,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<Op>,
}

impl Page {
    /// Concatenated text of every text op, for inspection.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const CELL_PAD: f32 = 1.6;
const BULLET_INDENT: f32 = 5.0;
const COLUMN_GAP: f32 = 4.0;
const BOX_PAD: f32 = 3.5;
const BADGE_HEIGHT: f32 = 14.0;
const ITEM_INDENT: f32 = 3.0;

#[derive(Debug, Clone, Copy)]
struct Run {
    size: f32,
    bold: bool,
    color: Tint,
}

struct ColumnLine {
    run: Run,
    bullet: bool,
    indent: f32,
    text: String,
}

/// Height in lines of a wrapped row: its tallest cell, at least one.
fn line_count(wrapped: &[Vec<String>]) -> usize {
    wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1)
}

struct Paginator {
    geometry: PageGeometry,
    styles: PdfStyles,
    pages: Vec<Page>,
    y: f32,
}

/// Paginate `blocks` onto pages of `geometry`. Always yields at least one page.
pub fn paginate(blocks: &[Block], geometry: PageGeometry, styles: PdfStyles) -> Vec<Page> {
    let mut p = Paginator {
        geometry,
        styles,
        pages: vec![Page::default()],
        y: geometry.content_top(),
    };
    for block in blocks {
        p.block(block);
    }
    p.pages
}

impl Paginator {
    fn push(&mut self, op: Op) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn at_top(&self) -> bool {
        self.y >= self.geometry.content_top()
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.geometry.content_top();
    }

    /// Start a new page unless `height` still fits or the page is empty.
    fn ensure(&mut self, height: f32) {
        if self.y - height < self.geometry.content_bottom() && !self.at_top() {
            self.new_page();
        }
    }

    fn line_height(&self, size: f32) -> f32 {
        size * self.styles.leading * PT_TO_MM
    }

    fn body(&self) -> Run {
        Run {
            size: self.styles.body_size,
            bold: false,
            color: Tint::TEXT,
        }
    }

    fn left(&self) -> f32 {
        self.geometry.margin
    }

    fn text_op(&mut self, x: f32, baseline: f32, run: Run, text: String) {
        self.push(Op::Text {
            x,
            y: baseline,
            size: run.size,
            bold: run.bold,
            color: run.color,
            text,
        });
    }

    /// Wrap and place text lines at `x`, breaking pages between lines.
    fn flow_text(&mut self, text: &str, x: f32, width: f32, run: Run) {
        let lh = self.line_height(run.size);
        let max = chars_per_line(width, run.size);
        for paragraph_line in text.split('\n') {
            for line in wrap_text(paragraph_line, max) {
                self.ensure(lh);
                self.y -= lh;
                let baseline = self.y + lh * 0.28;
                self.text_op(x, baseline, run, line);
            }
        }
    }

    fn block(&mut self, block: &Block) {
        let width = self.geometry.content_width();
        let left = self.left();
        match block {
            Block::Title(text) => {
                let run = Run {
                    size: self.styles.title_size,
                    bold: true,
                    color: self.styles.accent,
                };
                self.flow_text(text, left, width, run);
                self.y -= 1.5;
            }
            Block::Heading(text) => {
                let run = Run {
                    size: self.styles.heading_size,
                    bold: true,
                    color: self.styles.accent,
                };
                if !self.at_top() {
                    self.y -= 3.0;
                }
                // keep the heading with at least two body lines
                let keep = self.line_height(run.size) + 2.0 * self.line_height(self.styles.body_size);
                self.ensure(keep);
                self.flow_text(text, left, width, run);
                let y = self.y - 0.8;
                self.push(Op::Line {
                    from: (left, y),
                    to: (left + width, y),
                    color: self.styles.accent.over_white(0.5),
                    thickness: 0.6,
                });
                self.y -= 2.5;
            }
            Block::Subheading(text) => {
                let run = Run {
                    size: self.styles.subheading_size,
                    bold: true,
                    color: Tint::TEXT,
                };
                let keep = self.line_height(run.size) + self.line_height(self.styles.body_size);
                self.ensure(keep);
                self.flow_text(text, left, width, run);
                self.y -= 0.8;
            }
            Block::Paragraph(text) => {
                let run = self.body();
                self.flow_text(text, left, width, run);
                self.y -= 2.0;
            }
            Block::Muted(text) => {
                let run = Run {
                    size: self.styles.small_size,
                    bold: false,
                    color: Tint::MUTED,
                };
                self.flow_text(text, left, width, run);
                self.y -= 1.5;
            }
            Block::Bullets(items) => {
                for item in items {
                    self.list_item(None, item, left, width);
                }
                self.y -= 2.0;
            }
            Block::Numbered(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.list_item(Some(format!("{}.", i + 1)), item, left, width);
                }
                self.y -= 2.0;
            }
            Block::Table { columns, rows } => self.table(columns, rows),
            Block::Image {
                path,
                max_width,
                max_height,
            } => self.image(path, *max_width, *max_height),
            Block::Badges(badges) => self.badges(badges),
            Block::Columns(columns) => self.columns(columns),
            Block::Note { title, text } => self.note(title.as_deref(), text),
            Block::Spacer(height) => {
                if self.y - height < self.geometry.content_bottom() {
                    self.new_page();
                } else {
                    self.y -= height;
                }
            }
            Block::PageBreak => {
                if !self.at_top() {
                    self.new_page();
                }
            }
        }
    }

    fn list_item(&mut self, marker: Option<String>, text: &str, x: f32, width: f32) {
        let run = self.body();
        let lh = self.line_height(run.size);
        let lines = wrap_text(text, chars_per_line(width - BULLET_INDENT, run.size));
        for (i, line) in lines.into_iter().enumerate() {
            self.ensure(lh);
            self.y -= lh;
            let baseline = self.y + lh * 0.28;
            if i == 0 {
                match &marker {
                    Some(number) => self.text_op(x, baseline, run, number.clone()),
                    None => {
                        let side = 1.1;
                        self.push(Op::Rect {
                            x: x + 1.2,
                            y: baseline + 0.9,
                            w: side,
                            h: side,
                            fill: self.styles.accent,
                        });
                    }
                }
            }
            self.text_op(x + BULLET_INDENT, baseline, run, line);
        }
    }

    fn wrap_cells(&self, cells: &[String], widths: &[f32], run: Run) -> Vec<Vec<String>> {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| wrap_text(cell, chars_per_line(w - 2.0 * CELL_PAD, run.size)))
            .collect()
    }

    fn row_height(&self, lines: usize, run: Run) -> f32 {
        lines.max(1) as f32 * self.line_height(run.size) + 2.0 * CELL_PAD
    }

    /// Draw lines `from..to` of a wrapped row at the current position.
    /// The caller has made room.
    fn table_row(
        &mut self,
        wrapped: &[Vec<String>],
        (from, to): (usize, usize),
        widths: &[f32],
        run: Run,
        fill: Option<Tint>,
    ) {
        let lh = self.line_height(run.size);
        let row_h = self.row_height(to - from, run);
        let top = self.y;
        let left = self.left();
        let total_w: f32 = widths.iter().sum();
        if let Some(fill) = fill {
            self.push(Op::Rect {
                x: left,
                y: top - row_h,
                w: total_w,
                h: row_h,
                fill,
            });
        }
        let mut x = left;
        for (cell_lines, w) in wrapped.iter().zip(widths) {
            for (i, line) in cell_lines.iter().skip(from).take(to - from).enumerate() {
                let baseline = top - CELL_PAD - (i as f32 + 1.0) * lh + lh * 0.28;
                self.text_op(x + CELL_PAD, baseline, run, line.clone());
            }
            x += w;
        }
        self.y = top - row_h;
        self.push(Op::Line {
            from: (left, self.y),
            to: (left + total_w, self.y),
            color: Tint::RULE,
            thickness: 0.3,
        });
    }

    /// Whole lines of `run` that fit between the cursor and the footer band.
    fn lines_left(&self, run: Run) -> usize {
        let room = self.y - self.geometry.content_bottom() - 2.0 * CELL_PAD;
        if room <= 0.0 {
            0
        } else {
            (room / self.line_height(run.size)).floor() as usize
        }
    }

    /// Header row repeats on every page the table reaches. Rows move to the
    /// next page whole; a row taller than a page is split across pages.
    fn table(&mut self, columns: &[(String, f32)], rows: &[Vec<String>]) {
        let total: f32 = columns.iter().map(|(_, w)| w.max(0.0)).sum();
        if columns.is_empty() || total <= 0.0 {
            return;
        }
        let width = self.geometry.content_width();
        let widths: Vec<f32> = columns.iter().map(|(_, w)| w.max(0.0) / total * width).collect();
        let header: Vec<String> = columns.iter().map(|(h, _)| h.clone()).collect();
        let header_run = Run {
            size: self.styles.body_size,
            bold: true,
            color: Tint::WHITE,
        };
        let body = self.body();
        let header_cells = self.wrap_cells(&header, &widths, header_run);
        let header_lines = line_count(&header_cells);
        let header_h = self.row_height(header_lines, header_run);
        let accent = self.styles.accent;

        let fresh_lines = {
            let room = self.geometry.content_height() - header_h - 2.0 * CELL_PAD;
            ((room / self.line_height(body.size)).floor() as usize).max(1)
        };
        let wrapped_rows: Vec<Vec<Vec<String>>> =
            rows.iter().map(|row| self.wrap_cells(row, &widths, body)).collect();
        // Keep the header with as much of the first row as a page can hold.
        let first_h = wrapped_rows
            .first()
            .map(|w| self.row_height(line_count(w).min(fresh_lines), body))
            .unwrap_or(0.0);
        self.ensure(header_h + first_h);
        self.table_row(&header_cells, (0, header_lines), &widths, header_run, Some(accent));

        for (i, wrapped) in wrapped_rows.iter().enumerate() {
            let lines = line_count(wrapped);
            let fill = (i % 2 == 1).then(|| Tint::rgb(0.96, 0.96, 0.96));

            let mut from = 0;
            let mut fresh = false;
            while from < lines {
                let remaining = lines - from;
                let fits = self.lines_left(body);
                if remaining <= fits {
                    self.table_row(wrapped, (from, lines), &widths, body, fill);
                    break;
                }
                if !fresh && (remaining <= fresh_lines || fits == 0) {
                    self.new_page();
                    self.table_row(&header_cells, (0, header_lines), &widths, header_run, Some(accent));
                    fresh = true;
                    continue;
                }
                let take = fits.max(1).min(remaining);
                self.table_row(wrapped, (from, from + take), &widths, body, fill);
                from += take;
                if from < lines {
                    self.new_page();
                    self.table_row(&header_cells, (0, header_lines), &widths, header_run, Some(accent));
                    fresh = true;
                }
            }
        }
        self.y -= 3.0;
    }

    fn image(&mut self, path: &Path, max_width: f32, max_height: f32) {
        let (px_w, px_h) = match image::image_dimensions(path) {
            Ok((w, h)) if w > 0 && h > 0 => (w as f32, h as f32),
            Ok(_) => return,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Image omitted");
                return;
            }
        };
        let mut w = max_width.min(self.geometry.content_width());
        let mut h = w * px_h / px_w;
        let max_h = max_height.min(self.geometry.content_height());
        if h > max_h {
            h = max_h;
            w = h * px_w / px_h;
        }
        self.ensure(h);
        self.y -= h;
        let x = self.left() + (self.geometry.content_width() - w) / 2.0;
        let y = self.y;
        self.push(Op::Image {
            path: path.to_path_buf(),
            x,
            y,
            w,
            h,
        });
        self.y -= 3.0;
    }

    fn badges(&mut self, badges: &[(String, String)]) {
        if badges.is_empty() {
            return;
        }
        let n = badges.len() as f32;
        let width = (self.geometry.content_width() - COLUMN_GAP * (n - 1.0)) / n;
        self.ensure(BADGE_HEIGHT);
        let top = self.y;
        let label = Run {
            size: self.styles.small_size,
            bold: false,
            color: Tint::MUTED,
        };
        let value = Run {
            size: self.styles.subheading_size,
            bold: true,
            color: self.styles.accent,
        };
        let fill = self.styles.accent.over_white(0.12);
        for (i, (l, v)) in badges.iter().enumerate() {
            let x = self.left() + i as f32 * (width + COLUMN_GAP);
            self.push(Op::Rect {
                x,
                y: top - BADGE_HEIGHT,
                w: width,
                h: BADGE_HEIGHT,
                fill,
            });
            let max = chars_per_line(width - 2.0 * BOX_PAD, value.size);
            let shown: String = v.chars().take(max).collect();
            self.text_op(x + BOX_PAD, top - 4.8, label, l.clone());
            self.text_op(x + BOX_PAD, top - 10.6, value, shown);
        }
        self.y = top - BADGE_HEIGHT - 4.0;
    }

    fn column_lines(&self, column: &Column, width: f32) -> Vec<ColumnLine> {
        let title = Run {
            size: self.styles.body_size,
            bold: true,
            color: self.styles.accent,
        };
        let body = Run {
            size: self.styles.small_size + 0.5,
            ..self.body()
        };
        let note = Run {
            size: self.styles.small_size,
            bold: false,
            color: Tint::MUTED,
        };
        let plain = |run: Run, text: String| ColumnLine {
            run,
            bullet: false,
            indent: 0.0,
            text,
        };

        let mut out: Vec<ColumnLine> = wrap_text(&column.title, chars_per_line(width, title.size))
            .into_iter()
            .map(|line| plain(title, line))
            .collect();
        for item in &column.items {
            let lines = wrap_text(item, chars_per_line(width - ITEM_INDENT, body.size));
            for (i, text) in lines.into_iter().enumerate() {
                out.push(ColumnLine {
                    run: body,
                    bullet: i == 0,
                    indent: ITEM_INDENT,
                    text,
                });
            }
        }
        if let Some(text) = &column.note {
            out.extend(
                wrap_text(text, chars_per_line(width, note.size))
                    .into_iter()
                    .map(|line| plain(note, line)),
            );
        }
        out
    }

    fn columns(&mut self, columns: &[Column]) {
        if columns.is_empty() {
            return;
        }
        let n = columns.len() as f32;
        let col_w = (self.geometry.content_width() - COLUMN_GAP * (n - 1.0)) / n;
        let inner = col_w - 2.0 * BOX_PAD;
        let laid: Vec<Vec<ColumnLine>> = columns.iter().map(|c| self.column_lines(c, inner)).collect();
        let height = laid
            .iter()
            .map(|lines| lines.iter().map(|l| self.line_height(l.run.size)).sum::<f32>())
            .fold(0.0_f32, f32::max)
            + 2.0 * BOX_PAD;

        if height > self.geometry.content_height() {
            for column in columns {
                self.block(&Block::Subheading(column.title.clone()));
                self.block(&Block::Bullets(column.items.clone()));
                if let Some(note) = &column.note {
                    self.block(&Block::Muted(note.clone()));
                }
            }
            return;
        }

        self.ensure(height);
        let top = self.y;
        let fill = self.styles.accent.over_white(0.07);
        for (i, lines) in laid.into_iter().enumerate() {
            let x = self.left() + i as f32 * (col_w + COLUMN_GAP);
            self.push(Op::Rect {
                x,
                y: top - height,
                w: col_w,
                h: height,
                fill,
            });
            let mut y = top - BOX_PAD;
            for line in lines {
                let lh = self.line_height(line.run.size);
                y -= lh;
                let baseline = y + lh * 0.28;
                if line.bullet {
                    self.push(Op::Rect {
                        x: x + BOX_PAD,
                        y: baseline + 0.8,
                        w: 0.9,
                        h: 0.9,
                        fill: self.styles.accent,
                    });
                }
                self.text_op(x + BOX_PAD + line.indent, baseline, line.run, line.text);
            }
        }
        self.y = top - height - 4.0;
    }

    fn note(&mut self, title: Option<&str>, text: &str) {
        let width = self.geometry.content_width() - 2.0 * BOX_PAD;
        let body = self.body();
        let head = Run {
            bold: true,
            color: self.styles.accent,
            ..body
        };
        let mut lines: Vec<(Run, String)> = Vec::new();
        if let Some(title) = title {
            for line in wrap_text(title, chars_per_line(width, head.size)) {
                lines.push((head, line));
            }
        }
        for paragraph in text.split('\n') {
            for line in wrap_text(paragraph, chars_per_line(width, body.size)) {
                lines.push((body, line));
            }
        }
        let height: f32 =
            lines.iter().map(|(run, _)| self.line_height(run.size)).sum::<f32>() + 2.0 * BOX_PAD;

        if height > self.geometry.content_height() {
            if let Some(title) = title {
                self.block(&Block::Subheading(title.to_string()));
            }
            self.block(&Block::Paragraph(text.to_string()));
            return;
        }

        self.ensure(height);
        let top = self.y;
        let left = self.left();
        self.push(Op::Rect {
            x: left,
            y: top - height,
            w: self.geometry.content_width(),
            h: height,
            fill: self.styles.accent.over_white(0.1),
        });
        self.push(Op::Rect {
            x: left,
            y: top - height,
            w: 1.2,
            h: height,
            fill: self.styles.accent,
        });
        let mut y = top - BOX_PAD;
        for (run, line) in lines {
            let lh = self.line_height(run.size);
            y -= lh;
            self.text_op(left + BOX_PAD, y + lh * 0.28, run, line);
        }
        self.y = top - height - 4.0;
    }
}
