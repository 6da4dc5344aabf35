use std::fs;
use std::path::Path;

use super::format::{Resolve, SyntaxError, Template};
use super::schema::ColumnSchema;
use super::IsaError;
use crate::metadata::MetadataRecord;

/// Assay template file name
pub const ASSAY_TEMPLATE: &str = "a_nmr_metabolite_profiling_NMR_spectroscopy.txt";
/// Study template file name
pub const STUDY_TEMPLATE: &str = "s_NMR_spectroscopy.txt";
/// Investigation template file name
pub const INVESTIGATION_TEMPLATE: &str = "i_Investigation.txt";

/// Header of the column new fields are inserted after (plus its term columns)
pub const INSERTION_ANCHOR: &str = "Parameter Value[Instrument]";
const ANCHOR_OFFSET: usize = 3;

const DEFAULT_ASSAY: &str = include_str!("../../templates/a_nmr_metabolite_profiling_NMR_spectroscopy.txt");
const DEFAULT_STUDY: &str = include_str!("../../templates/s_NMR_spectroscopy.txt");
const DEFAULT_INVESTIGATION: &str = include_str!("../../templates/i_Investigation.txt");

/// One output column: a header and the template of its cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text
    pub header: String,
    /// Cell template
    pub cell: Template,
}

impl Column {
    /// Create a column
    pub fn new(header: impl Into<String>, cell: Template) -> Self {
        Self {
            header: header.into(),
            cell,
        }
    }
}

fn read_rows(name: &str, text: &str) -> Result<Vec<Vec<String>>, IsaError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    log::trace!("{}: {} template rows", name, rows.len());
    Ok(rows)
}

fn parse_cell(template: &str, cell: &str) -> Result<Template, IsaError> {
    Template::parse(cell).map_err(|SyntaxError { position, message }| IsaError::TemplateSyntax {
        template: template.to_string(),
        cell: cell.to_string(),
        position,
        message,
    })
}

/// A header row plus one row of cell templates
#[derive(Debug, Clone, PartialEq)]
pub struct TableTemplate {
    name: String,
    columns: Vec<Column>,
}

impl TableTemplate {
    /// Parse a two-line, tab-separated, quoted template
    pub fn parse(name: &str, text: &str) -> Result<Self, IsaError> {
        let rows = read_rows(name, text)?;
        let [headers, cells] = rows.as_slice() else {
            return Err(IsaError::TemplateShape {
                template: name.to_string(),
                message: format!("expected a header line and a cell line, found {} lines", rows.len()),
            });
        };
        if headers.len() != cells.len() {
            return Err(IsaError::TemplateShape {
                template: name.to_string(),
                message: format!("{} headers but {} cells", headers.len(), cells.len()),
            });
        }

        let columns: Vec<Column> = headers
            .iter()
            .zip(cells)
            .map(|(header, cell)| Ok(Column::new(header.as_str(), parse_cell(name, cell)?)))
            .collect::<Result<_, IsaError>>()?;
        Ok(Self {
            name: name.to_string(),
            columns,
        })
    }

    /// Template file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header row
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    /// Whether a header is present
    pub fn has_header(&self, header: &str) -> bool {
        self.columns.iter().any(|c| c.header == header)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the template has no column
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Render one data row
    pub fn render_row(&self, context: &dyn Resolve) -> Vec<String> {
        self.columns.iter().map(|c| c.cell.render(context)).collect()
    }

    /// Replicate each entry-list group once per entry of the first record's
    /// list (or once, at index 0, when that list is empty)
    ///
    /// A group is a maximal run of consecutive columns whose cells iterate
    /// the same list through `[#]`.
    pub fn expand_entry_lists(&self, first: &MetadataRecord) -> Self {
        let mut columns = Vec::with_capacity(self.columns.len());
        let mut i = 0;

        while i < self.columns.len() {
            let Some(list) = self.columns[i].cell.entry_list() else {
                columns.push(self.columns[i].clone());
                i += 1;
                continue;
            };
            let end = self.columns[i..]
                .iter()
                .position(|c| c.cell.entry_list() != Some(list))
                .map_or(self.columns.len(), |offset| i + offset);
            let group = &self.columns[i..end];

            let repeats = first.entries(list).len().max(1);
            log::debug!("Expanding {} columns of {:?} {} times", group.len(), list, repeats);
            for index in 0..repeats {
                columns.extend(
                    group
                        .iter()
                        .map(|c| Column::new(c.header.as_str(), c.cell.with_entry_index(index))),
                );
            }
            i = end;
        }

        Self {
            name: self.name.clone(),
            columns,
        }
    }

    /// Insert the columns of every schema field whose header is not already
    /// present, after the instrument block. Returns the number of columns added.
    pub fn insert_schema_columns(&mut self, schema: &ColumnSchema) -> usize {
        let added: Vec<Column> = schema
            .iter()
            .filter(|d| !self.has_header(&d.display_name))
            .flat_map(|d| d.columns())
            .collect();
        let count = added.len();

        let at = match self.columns.iter().position(|c| c.header == INSERTION_ANCHOR) {
            Some(anchor) => (anchor + ANCHOR_OFFSET).min(self.columns.len()),
            None => {
                log::warn!(
                    "{}: no {:?} column, appending {} new columns at the end",
                    self.name,
                    INSERTION_ANCHOR,
                    count
                );
                self.columns.len()
            }
        };
        self.columns.splice(at..at, added);
        count
    }
}

/// Line-oriented investigation template: every line is a row of cell templates
#[derive(Debug, Clone, PartialEq)]
pub struct InvestigationTemplate {
    lines: Vec<Vec<Template>>,
}

impl InvestigationTemplate {
    /// Parse a tab-separated, quoted template
    pub fn parse(name: &str, text: &str) -> Result<Self, IsaError> {
        let lines = read_rows(name, text)?
            .iter()
            .map(|row| row.iter().map(|cell| parse_cell(name, cell)).collect())
            .collect::<Result<Vec<Vec<Template>>, IsaError>>()?;
        if lines.is_empty() {
            return Err(IsaError::TemplateShape {
                template: name.to_string(),
                message: "empty template".to_string(),
            });
        }
        Ok(Self { lines })
    }

    /// Template lines
    pub fn lines(&self) -> &[Vec<Template>] {
        &self.lines
    }
}

/// The three templates used for one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSet {
    /// Assay table template
    pub assay: TableTemplate,
    /// Study table template
    pub study: TableTemplate,
    /// Investigation template
    pub investigation: InvestigationTemplate,
}

impl TemplateSet {
    /// Templates bundled with the crate
    pub fn builtin() -> Result<Self, IsaError> {
        Ok(Self {
            assay: TableTemplate::parse(ASSAY_TEMPLATE, DEFAULT_ASSAY)?,
            study: TableTemplate::parse(STUDY_TEMPLATE, DEFAULT_STUDY)?,
            investigation: InvestigationTemplate::parse(INVESTIGATION_TEMPLATE, DEFAULT_INVESTIGATION)?,
        })
    }

    /// Templates from a directory; files that are absent fall back to the
    /// bundled ones
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, IsaError> {
        let dir = dir.as_ref();
        let load = |file: &str, default: &'static str| -> Result<String, IsaError> {
            let path = dir.join(file);
            if path.is_file() {
                log::info!("Using template {}", path.display());
                Ok(fs::read_to_string(&path)?)
            } else {
                Ok(default.to_string())
            }
        };

        Ok(Self {
            assay: TableTemplate::parse(ASSAY_TEMPLATE, &load(ASSAY_TEMPLATE, DEFAULT_ASSAY)?)?,
            study: TableTemplate::parse(STUDY_TEMPLATE, &load(STUDY_TEMPLATE, DEFAULT_STUDY)?)?,
            investigation: InvestigationTemplate::parse(
                INVESTIGATION_TEMPLATE,
                &load(INVESTIGATION_TEMPLATE, DEFAULT_INVESTIGATION)?,
            )?,
        })
    }
}
