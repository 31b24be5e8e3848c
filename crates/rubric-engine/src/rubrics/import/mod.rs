mod normalizer;
mod parser;
mod tokenizer;

pub use parser::{ParseError, ShortRowPolicy};

use crate::rubrics::domain::{ParsedTable, TableFormat};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    UnknownFormat { path: PathBuf },
    FormatRequired { input: String },
    Parse(ParseError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read rubric table: {}", err),
            ImportError::UnknownFormat { path } => write!(
                f,
                "cannot infer table format from '{}' (use a .md or .csv extension)",
                path.display()
            ),
            ImportError::FormatRequired { input } => write!(
                f,
                "table format must be given explicitly when reading from {} (--format markdown or --format csv)",
                input
            ),
            ImportError::Parse(err) => write!(f, "malformed rubric table: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::UnknownFormat { .. } | ImportError::FormatRequired { .. } => None,
            ImportError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ParseError> for ImportError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

/// Turns Markdown or CSV rubric tables into an unassembled grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubricImporter {
    on_short_row: ShortRowPolicy,
}

impl RubricImporter {
    pub fn new(on_short_row: ShortRowPolicy) -> Self {
        Self { on_short_row }
    }

    pub fn short_row_policy(&self) -> ShortRowPolicy {
        self.on_short_row
    }

    pub fn parse(&self, format: TableFormat, raw: &str) -> Result<ParsedTable, ParseError> {
        let table = parser::parse_table(format, raw, self.on_short_row)?;
        debug!(
            %format,
            criteria = table.criteria.len(),
            levels = table.levels.len(),
            cells = table.cells.len(),
            "parsed rubric table"
        );
        Ok(table)
    }

    /// Read a table from disk; without `format` it is inferred from the extension.
    pub fn from_path<P: AsRef<Path>>(
        &self,
        path: P,
        format: Option<TableFormat>,
    ) -> Result<ParsedTable, ImportError> {
        let path = path.as_ref();
        let format = match format.or_else(|| TableFormat::detect(path)) {
            Some(format) => format,
            None => {
                return Err(ImportError::UnknownFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        let file = std::fs::File::open(path)?;
        self.from_reader(file, format)
    }

    pub fn from_reader<R: Read>(
        &self,
        mut reader: R,
        format: TableFormat,
    ) -> Result<ParsedTable, ImportError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Ok(self.parse(format, &raw)?)
    }
}
