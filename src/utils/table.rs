/// A plain-text table for terminal summaries
pub struct Table {
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

fn width(s: &str) -> usize {
    s.chars().count()
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| width(h)).collect();
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            title: None,
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Add a row; cells beyond the header count are ignored
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let row_strings: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|s| s.as_ref().to_string())
            .collect();

        for (i, col) in row_strings.iter().enumerate() {
            self.col_widths[i] = self.col_widths[i].max(width(col));
        }

        self.rows.push(row_strings);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a formatted string
    pub fn render(&self) -> String {
        let mut output = String::new();

        if let Some(title) = &self.title {
            output.push_str(title);
            output.push('\n');
        }

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    /// Render a single row, padding missing cells
    fn render_row(&self, row: &[String]) -> String {
        let cells: Vec<String> = self
            .col_widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = w.saturating_sub(width(cell));
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}
