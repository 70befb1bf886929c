#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = truncate_text(value, *width);
                let padded = pad_cell(&text, *width, looks_numeric(&text));
                if options.color {
                    colorize(&padded, &text)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

const MIN_COLUMN_WIDTH: usize = 5;
const SEPARATOR: &str = "  ";

/// Shrink the widest column one character at a time until the table fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out = value.chars().take(width - 1).collect::<String>();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = " ".repeat(width.saturating_sub(value.chars().count()));
    if numeric {
        format!("{pad}{value}")
    } else {
        format!("{value}{pad}")
    }
}

/// Color coverage states: mitigated/active cells green, gaps red.
fn colorize(padded: &str, text: &str) -> String {
    let code = match text.to_ascii_lowercase().as_str() {
        "true" | "active" | "✓" => Some("32"),
        "false" | "disabled" => Some("31"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{padded}\u{1b}[0m"),
        None => padded.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_cells_are_truncated_to_fit() {
        let rows = vec![vec![
            "Endpoint Detection & Response".to_string(),
            "Monitors and responds to threats on devices".to_string(),
        ]];
        let table = render_entity_table(
            &["name", "description"],
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        for line in table.lines() {
            assert!(line.chars().count() <= 40, "{line}");
        }
        assert!(table.contains('…'));
    }

    #[test]
    fn numbers_are_right_aligned() {
        assert_eq!(pad_cell("3", 5, true), "    3");
        assert_eq!(pad_cell("abc", 5, false), "abc  ");
        assert!(looks_numeric("-1"));
        assert!(!looks_numeric("high"));
    }

    #[test]
    fn color_wraps_padding() {
        let colored = colorize("false ", "false");
        assert!(colored.starts_with("\u{1b}[31m"));
        assert!(colored.ends_with("\u{1b}[0m"));
        assert_eq!(colorize("high ", "high"), "high ");
    }
}
