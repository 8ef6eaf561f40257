//! Client record assembly from a mapped row.

use chrono::{Local, NaiveDate};
use migra_map::{FieldNamespace, namespace_of};
use migra_model::{ClientRecord, ColumnMapping, ImportType, MigrationConfig, Row};
use tracing::trace;

use crate::error::{Result, TransformError};
use crate::transforms::apply_transform;

/// Date layout used in the provenance note.
pub const PROVENANCE_DATE_FORMAT: &str = "%d/%m/%Y";

/// The note appended to every migrated record.
pub fn provenance_note(source_label: &str, date: NaiveDate) -> String {
    format!(
        "[Migrated from {source_label} on {}]",
        date.format(PROVENANCE_DATE_FORMAT)
    )
}

/// Builds candidate [`ClientRecord`]s for one config.
///
/// Candidates carry no id or creation time; those belong to the executor.
#[derive(Debug, Clone)]
pub struct RecordBuilder<'a> {
    config: &'a MigrationConfig,
    date: NaiveDate,
    medical: bool,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(config: &'a MigrationConfig) -> Self {
        Self {
            config,
            date: Local::now().date_naive(),
            medical: config.import_type == ImportType::Complete && config.options.medical,
        }
    }

    /// Pin the provenance date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Whether medical-namespace mappings are applied.
    pub fn includes_medical(&self) -> bool {
        self.medical
    }

    pub fn build(&self, row: &Row) -> Result<ClientRecord> {
        let mut record = ClientRecord::default();
        for mapping in &self.config.column_mapping {
            if !self.medical && namespace_of(&mapping.target_field) == Some(FieldNamespace::Medical)
            {
                trace!(field = %mapping.target_field, "medical mapping skipped");
                continue;
            }
            let value = apply_transform(
                mapping.transform.as_deref(),
                row.value(&mapping.source_column),
            )?;
            if mapping.required && value.trim().is_empty() {
                return Err(TransformError::RequiredFieldEmpty {
                    field: mapping.target_field.clone(),
                    column: mapping.source_column.clone(),
                });
            }
            assign(&mut record, mapping, value)?;
        }
        record.append_note(&provenance_note(self.config.source_label(), self.date));
        Ok(record)
    }
}

fn assign(record: &mut ClientRecord, mapping: &ColumnMapping, value: String) -> Result<()> {
    let field = mapping.target_field.as_str();
    match field {
        "name" => record.name = value,
        "cpf" => record.cpf = value,
        "email" => record.email = value,
        "phone" => record.phone = value,
        "birthDate" => record.birth_date = value,
        "gender" => record.gender = value,
        "address" => record.address = value,
        "city" => record.city = value,
        "state" => record.state = value,
        "zipCode" => record.zip_code = value,
        "referralSource" => record.referral_source = value,
        "medicalHistory" | "allergies" | "medications" | "skinType" | "previousTreatments"
        | "observations" => {
            if !value.is_empty() {
                record.append_note(&format!("{field}: {value}"));
                record.medical.insert(field.to_string(), value);
            }
        }
        "tags" => {
            for tag in value.split([',', ';']) {
                record.add_tag(tag);
            }
        }
        "notes" => {
            if !value.is_empty() {
                record.append_note(&value);
            }
        }
        "originalId" => {
            if !value.is_empty() {
                record.original_id = Some(value);
            }
        }
        other => return Err(TransformError::UnknownField(other.to_string())),
    }
    Ok(())
}
