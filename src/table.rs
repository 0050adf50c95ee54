//! Fixed-width pipe-delimited table layout.
//!
//! Column widths are derived per render from the headers and cell contents;
//! nothing is cached between calls. The layout mirrors the service's own
//! console output: cells right-padded, joined with `" | "`, and each row
//! wrapped in a single leading and trailing space.

/// Render a table from headers and string rows.
///
/// The dash separator under the header is `sum(widths) + 2 + 3 * (n - 1)`
/// characters long, which covers the padding and separator characters of
/// the header row. With no data rows only the header row is produced, with
/// no separator line under it. That asymmetry is how the service's console
/// has always behaved, so it is kept as is.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    if rows.is_empty() {
        return render_row(headers, &widths);
    }

    // Rows may be ragged; a missing cell contributes nothing to the width.
    for row in rows {
        for (i, width) in widths.iter_mut().enumerate() {
            if let Some(cell) = row.get(i) {
                *width = (*width).max(cell.len());
            }
        }
    }

    let mut separator_len = widths.first().copied().unwrap_or(0) + 2;
    for width in widths.iter().skip(1) {
        separator_len += width + 3;
    }

    let mut lines = vec![render_row(headers, &widths), "-".repeat(separator_len)];
    for row in rows {
        lines.push(render_row(row, &widths));
    }

    lines.join("\n")
}

/// Render one table row, padding each cell to its column width.
///
/// Cells beyond the known columns are padded to zero width, i.e. emitted
/// unpadded rather than dropped.
pub fn render_row(values: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, value)| pad(value, widths.get(i).copied().unwrap_or(0)))
        .collect();
    format!(" {} ", cells.join(" | "))
}

fn pad(value: &str, width: usize) -> String {
    if value.len() >= width {
        return value.to_string();
    }
    format!("{}{}", value, " ".repeat(width - value.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_row_layout() {
        let output = render_table(&strings(&["A", "BB"]), &[strings(&["1", "2"])]);
        let lines: Vec<&str> = output.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " A | BB ");
        // widths 1 and 2: (1 + 2) + 2 + 3 = 8 dashes
        assert_eq!(lines[1], "--------");
        assert_eq!(lines[2], " 1 | 2  ");
    }

    #[test]
    fn test_cell_wider_than_header() {
        let output = render_table(
            &strings(&["Name", "Id"]),
            &[strings(&["pageviews_original", "1"])],
        );
        let lines: Vec<&str> = output.split('\n').collect();

        assert_eq!(lines[0], " Name               | Id ");
        assert_eq!(lines[1].len(), 18 + 2 + 2 + 3);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], " pageviews_original | 1  ");
    }

    #[test]
    fn test_empty_rows_renders_header_only() {
        let output = render_table(&strings(&["Property", "Value"]), &[]);
        assert_eq!(output, " Property | Value ");
        assert!(!output.contains('-'));
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_ragged_rows_do_not_panic() {
        let output = render_table(
            &strings(&["A", "B", "C"]),
            &[strings(&["1"]), strings(&["1", "2", "3", "4"])],
        );
        let lines: Vec<&str> = output.split('\n').collect();
        assert_eq!(lines.len(), 4);
        // The short row keeps its known cells, the long row keeps its extras.
        assert_eq!(lines[2], " 1 ");
        assert_eq!(lines[3], " 1 | 2 | 3 | 4 ");
    }

    #[test]
    fn test_idempotent_on_same_input() {
        let headers = strings(&["Kafka topic", "Partitions"]);
        let rows = vec![strings(&["pageviews", "4"]), strings(&["users", "2"])];
        let first = render_table(&headers, &rows);
        let second = render_table(&headers, &rows);
        assert_eq!(first, second);
        assert_eq!(first.split('\n').count(), 4);
    }
}
