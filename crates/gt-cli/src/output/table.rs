use gt_render::Style;
use gt_render::style::strip_ansi;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub style: Style,
}

const MIN_COLUMN: usize = 4;

/// Render an aligned table. The last column absorbs any width overflow.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|value| value.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(MIN_COLUMN)
                .max(MIN_COLUMN)
        })
        .collect();

    if let (Some(max), Some(last)) = (options.max_width, widths.len().checked_sub(1)) {
        let fixed = widths[..last].iter().sum::<usize>() + last * 2;
        widths[last] = widths[last].min(max.saturating_sub(fixed).max(MIN_COLUMN));
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&options.style.bold(&header.to_uppercase()), *width))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(strip_ansi(&header_line).chars().count());

    let mut lines = vec![header_line, divider];
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let cut = truncate(value, *width);
                pad(&colorize_status(&cut, options.style), *width)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out = value.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn pad(value: &str, width: usize) -> String {
    let visible = strip_ansi(value).chars().count();
    format!("{value}{}", " ".repeat(width.saturating_sub(visible)))
}

/// Colour well-known status words.
fn colorize_status(value: &str, style: Style) -> String {
    match value.to_ascii_lowercase().as_str() {
        "online" | "ok" | "true" | "signed_in" | "configured" | "keyring" => style.green(value),
        "env" | "config" | "file" | "pending" | "confirmation_required" => style.yellow(value),
        "offline" | "false" | "missing" | "signed_out" | "expired" | "error" => style.red(value),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use gt_render::Style;
    use pretty_assertions::assert_eq;

    use super::{TableOptions, render_table};

    fn plain(max_width: Option<usize>) -> TableOptions {
        TableOptions {
            max_width,
            style: Style::PLAIN,
        }
    }

    #[test]
    fn columns_align_on_character_width() {
        let rows = vec![
            vec!["1".to_string(), "Nestlé".to_string()],
            vec!["2".to_string(), "Monsanto (Bayer)".to_string()],
        ];
        let table = render_table(&["#", "query"], &rows, plain(None));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0].trim_end(), "#     QUERY");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "1     Nestlé");
        assert_eq!(lines[3], "2     Monsanto (Bayer)");
    }

    #[test]
    fn last_column_is_truncated_to_fit() {
        let rows = vec![vec!["1".to_string(), "a".repeat(100)]];
        let table = render_table(&["#", "query"], &rows, plain(Some(40)));
        let row = table.lines().nth(2).expect("row line");
        assert_eq!(row.chars().count(), 40);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn status_words_are_coloured_only_with_colour() {
        let rows = vec![vec!["gemini".to_string(), "online".to_string()]];
        let coloured = render_table(
            &["node", "status"],
            &rows,
            TableOptions {
                max_width: None,
                style: Style::COLOR,
            },
        );
        assert!(coloured.contains("\u{1b}[32monline"));
        assert!(!render_table(&["node", "status"], &rows, plain(None)).contains('\u{1b}'));
    }
}
