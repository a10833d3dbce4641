use console::style;
use serde::Serialize;
use std::fmt::Display;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
        }
    }

    pub fn info(&self, message: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("{} {}", style("ℹ").blue().bold(), message);
        }
    }

    pub fn warning(&self, message: impl Display) {
        if let OutputFormat::Human = self.format {
            eprintln!("{} {}", style("⚠").yellow().bold(), message);
        }
    }

    pub fn section(&self, title: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("{}: {}", style(key).bold(), value);
        }
    }

    /// Render rows of named columns as a table, columns in the order given.
    /// JSON consumers get the same data from [`OutputWriter::result`], so
    /// this prints nothing in JSON mode.
    pub fn rows(&self, columns: &[String], rows: &[Vec<String>]) {
        if let OutputFormat::Human = self.format {
            if rows.is_empty() {
                println!("{}", style("(no matches)").dim());
                return;
            }

            let mut builder = Builder::default();
            builder.push_record(columns.iter().cloned());
            for row in rows {
                builder.push_record(row.iter().cloned());
            }
            let mut table = builder.build();
            table.with(Style::rounded());
            println!("{}", table);
        }
    }

    /// Emit a structured result. Human mode pretty-prints the bare value;
    /// JSON mode wraps it in a status envelope.
    pub fn result<T: Serialize>(&self, data: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(data)?);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "success",
                    "data": data,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}
