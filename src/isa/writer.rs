use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use serde_json::Value;

use super::context::{Binding, Context};
use super::schema::{ColumnSchema, SchemaPolicy};
use super::template::{TableTemplate, TemplateSet};
use super::usermeta::{UserMeta, INVESTIGATION_CONTACTS, STUDY_CONTACTS};
use super::IsaError;
use crate::metadata::MetadataRecord;

/// Investigation file name
pub const INVESTIGATION_FILE: &str = "i_Investigation.txt";

/// Study file name for a study identifier
pub fn study_file_name(study: &str) -> String {
    format!("s_{}.txt", study)
}

/// Assay file name for a study identifier
pub fn assay_file_name(study: &str) -> String {
    format!("a_{}_metabolite_profiling_NMR_spectroscopy.txt", study)
}

/// Run-level values available to every template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunEnvironment {
    /// Study identifier (output directory name)
    pub study_identifier: String,
    /// Study file name
    pub study_file_name: String,
    /// Assay file name
    pub assay_file_name: String,
    /// Investigation file name
    pub investigation_file_name: String,
    /// Name of this converter
    pub converter: String,
    /// Version of this converter
    pub converter_version: String,
    /// Date of the run
    #[serde(serialize_with = "iso_date")]
    pub date: NaiveDate,
}

fn iso_date<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

impl RunEnvironment {
    /// Environment for a study, dated today
    pub fn new(study: &str) -> Self {
        Self {
            study_identifier: study.to_string(),
            study_file_name: study_file_name(study),
            assay_file_name: assay_file_name(study),
            investigation_file_name: INVESTIGATION_FILE.to_string(),
            converter: env!("CARGO_PKG_NAME").to_string(),
            converter_version: env!("CARGO_PKG_VERSION").to_string(),
            date: Local::now().date_naive(),
        }
    }

    /// Override the run date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// The environment as a JSON object
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// A rendered table: one header row (if any) and data rows
pub type Rows = Vec<Vec<String>>;

/// The three rendered ISA-Tab tables of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct IsaTables {
    /// Investigation lines
    pub investigation: Rows,
    /// Study header and one row per record
    pub study: Rows,
    /// Assay header and one row per record
    pub assay: Rows,
    /// Columns added to the assay template for fields it did not cover
    pub dynamic_columns: usize,
}

/// Paths of the files written for a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsaOutput {
    /// Study directory
    pub directory: PathBuf,
    /// Investigation file
    pub investigation: PathBuf,
    /// Study file
    pub study: PathBuf,
    /// Assay file
    pub assay: PathBuf,
    /// Columns added to the assay template
    pub dynamic_columns: usize,
}

impl IsaOutput {
    /// Every written file
    pub fn files(&self) -> [&Path; 3] {
        [self.investigation.as_path(), self.study.as_path(), self.assay.as_path()]
    }
}

/// Renders a batch of metadata records into ISA-Tab files
#[derive(Debug, Clone)]
pub struct IsaTabWriter {
    templates: TemplateSet,
    policy: SchemaPolicy,
    usermeta: UserMeta,
    date: Option<NaiveDate>,
}

impl IsaTabWriter {
    /// Writer over a template set
    pub fn new(templates: TemplateSet) -> Self {
        Self {
            templates,
            policy: SchemaPolicy::default(),
            usermeta: UserMeta::default(),
            date: None,
        }
    }

    /// Writer over the bundled templates
    pub fn with_builtin_templates() -> Result<Self, IsaError> {
        Ok(Self::new(TemplateSet::builtin()?))
    }

    /// Set the schema policy
    pub fn with_policy(mut self, policy: SchemaPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the user metadata overlay
    pub fn with_usermeta(mut self, usermeta: UserMeta) -> Self {
        self.usermeta = usermeta;
        self
    }

    /// Fix the run date instead of using today
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// The assay layout for a batch (entry lists expanded, then schema
    /// columns inserted) and the number of inserted columns
    pub fn assay_layout(&self, records: &[MetadataRecord]) -> Result<(TableTemplate, usize), IsaError> {
        let first = records.first().ok_or(IsaError::EmptyBatch)?;
        let schema = ColumnSchema::unify(records, self.policy);
        let mut layout = self.templates.assay.expand_entry_lists(first);
        let inserted = layout.insert_schema_columns(&schema);
        Ok((layout, inserted))
    }

    /// Render every table in memory
    pub fn render(&self, study: &str, records: &[MetadataRecord]) -> Result<IsaTables, IsaError> {
        let first = records.first().ok_or(IsaError::EmptyBatch)?;
        let mut env = RunEnvironment::new(study);
        if let Some(date) = self.date {
            env = env.with_date(date);
        }
        let env = env.to_value();

        let (layout, dynamic_columns) = self.assay_layout(records)?;

        Ok(IsaTables {
            investigation: self.render_investigation(first, &env),
            study: self.render_table(&self.templates.study, records, &env),
            assay: self.render_table(&layout, records, &env),
            dynamic_columns,
        })
    }

    fn render_table(&self, template: &TableTemplate, records: &[MetadataRecord], env: &Value) -> Rows {
        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(template.headers());
        for record in records {
            let context = Context::new()
                .layer(record)
                .layer(&self.usermeta)
                .layer(env);
            rows.push(template.render_row(&context));
        }
        rows
    }

    fn render_investigation(&self, first: &MetadataRecord, env: &Value) -> Rows {
        let base = Context::new().layer(first).layer(&self.usermeta).layer(env);

        self.templates
            .investigation
            .lines()
            .iter()
            .map(|line| {
                let label = line.first().map(|t| t.render(&base)).unwrap_or_default();
                let contacts = if label.starts_with("Study Person") {
                    Some(("study_contact", STUDY_CONTACTS))
                } else if label.starts_with("Investigation Person") {
                    Some(("investigation_contact", INVESTIGATION_CONTACTS))
                } else {
                    None
                };

                match contacts {
                    Some((binding, key)) => {
                        let cell = line.get(1);
                        let mut row = vec![label];
                        for contact in self.usermeta.contacts(key) {
                            let binding = Binding::new(binding, contact);
                            let context = Context::new()
                                .layer(first)
                                .layer(&binding)
                                .layer(&self.usermeta)
                                .layer(env);
                            row.push(cell.map(|t| t.render(&context)).unwrap_or_default());
                        }
                        row
                    }
                    None => line.iter().map(|t| t.render(&base)).collect(),
                }
            })
            .collect()
    }

    /// Render and write the three files under `<out_dir>/<study>/`
    pub fn write<P: AsRef<Path>>(
        &self,
        out_dir: P,
        study: &str,
        records: &[MetadataRecord],
    ) -> Result<IsaOutput, IsaError> {
        let tables = self.render(study, records)?;

        let directory = out_dir.as_ref().join(study);
        fs::create_dir_all(&directory)?;

        let output = IsaOutput {
            investigation: directory.join(INVESTIGATION_FILE),
            study: directory.join(study_file_name(study)),
            assay: directory.join(assay_file_name(study)),
            directory,
            dynamic_columns: tables.dynamic_columns,
        };

        write_rows(&output.investigation, &tables.investigation)?;
        write_rows(&output.study, &tables.study)?;
        write_rows(&output.assay, &tables.assay)?;

        log::info!(
            "Wrote {} records to {} ({} dynamic assay columns)",
            records.len(),
            output.directory.display(),
            output.dynamic_columns
        );
        Ok(output)
    }
}

/// Write rows as tab-separated values with every field quoted
pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<(), IsaError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Always)
        .flexible(true)
        .from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
