use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: usize = 2;
const RULE_CHAR: char = '-';

/// Fixed-width plain-text table for terminal output.
#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self
            .headers
            .iter()
            .map(|header| display_width(header))
            .collect();
        for row in &self.rows {
            for (width, cell) in col_widths.iter_mut().zip(row.as_ref()) {
                *width = (*width).max(display_width(cell));
            }
        }

        let total_width =
            col_widths.iter().sum::<usize>() + COLUMN_GAP * col_count.saturating_sub(1);
        let mut table = String::with_capacity((total_width + 1) * (self.rows.len() + 2));

        self.write_line(&mut table, self.headers, &col_widths);
        table.extend(std::iter::repeat_n(RULE_CHAR, total_width));
        table.push('\n');
        for row in &self.rows {
            self.write_line(&mut table, row.as_ref(), &col_widths);
        }

        table
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'_, str>], col_widths: &[usize]) {
        let mut line = String::new();
        for (idx, width) in col_widths.iter().copied().enumerate() {
            if idx > 0 {
                line.extend(std::iter::repeat_n(' ', COLUMN_GAP));
            }
            let cell: &str = cells.get(idx).map(|cell| &**cell).unwrap_or("");
            let padding = width.saturating_sub(display_width(cell));
            match self.alignments.get(idx).copied().unwrap_or_default() {
                Alignment::Left => {
                    line.push_str(cell);
                    line.extend(std::iter::repeat_n(' ', padding));
                }
                Alignment::Right => {
                    line.extend(std::iter::repeat_n(' ', padding));
                    line.push_str(cell);
                }
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

/// Terminal columns taken by `text`; East Asian wide characters count double.
fn display_width(text: &str) -> usize {
    text.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1F64F
            | 0x1F900..=0x1F9FF
            | 0x20000..=0x3FFFD
    )
}
