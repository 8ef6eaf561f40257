//! Named mapping presets for exports of known systems.

use migra_model::{ColumnMapping, MigrationConfig};

use crate::error::MapError;

#[derive(Debug)]
struct TemplateEntry {
    source: &'static str,
    target: &'static str,
    required: bool,
    transform: Option<&'static str>,
}

const fn entry(
    source: &'static str,
    target: &'static str,
    required: bool,
    transform: Option<&'static str>,
) -> TemplateEntry {
    TemplateEntry {
        source,
        target,
        required,
        transform,
    }
}

/// A complete column mapping for one source system's export layout.
#[derive(Debug)]
pub struct MigrationTemplate {
    pub key: &'static str,
    /// Label written to `MigrationConfig::source_system`.
    pub source_system: &'static str,
    pub description: &'static str,
    entries: &'static [TemplateEntry],
}

impl MigrationTemplate {
    pub fn mappings(&self) -> Vec<ColumnMapping> {
        self.entries
            .iter()
            .map(|e| ColumnMapping {
                source_column: e.source.to_string(),
                target_field: e.target.to_string(),
                required: e.required,
                transform: e.transform.map(str::to_string),
            })
            .collect()
    }

    pub fn source_columns(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|e| e.source)
    }

    /// Source columns whose mapping is required.
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().filter(|e| e.required).map(|e| e.source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[rustfmt::skip]
static TEMPLATES: &[MigrationTemplate] = &[
    MigrationTemplate {
        key: "clinicware",
        source_system: "ClinicWare",
        description: "Exportação de pacientes do ClinicWare",
        entries: &[
            entry("nome_completo", "name", true, None),
            entry("cpf", "cpf", false, Some("cpf_format")),
            entry("email", "email", false, Some("lowercase")),
            entry("telefone", "phone", true, Some("phone_format")),
            entry("data_nascimento", "birthDate", false, Some("date_format")),
            entry("sexo", "gender", false, None),
            entry("endereco", "address", false, None),
            entry("cidade", "city", false, None),
            entry("estado", "state", false, Some("uppercase")),
            entry("cep", "zipCode", false, None),
            entry("historico_medico", "medicalHistory", false, None),
            entry("alergias", "allergies", false, None),
            entry("medicamentos", "medications", false, None),
            entry("observacoes", "observations", false, None),
            entry("codigo", "originalId", false, None),
        ],
    },
    MigrationTemplate {
        key: "prontuario_online",
        source_system: "Prontuário Online",
        description: "Relatório de pacientes do Prontuário Online",
        entries: &[
            entry("Nome", "name", true, None),
            entry("CPF", "cpf", false, Some("cpf_format")),
            entry("E-mail", "email", false, Some("lowercase")),
            entry("Celular", "phone", true, Some("phone_format")),
            entry("Nascimento", "birthDate", false, Some("date_format")),
            entry("Sexo", "gender", false, None),
            entry("Endereço", "address", false, None),
            entry("Cidade", "city", false, None),
            entry("UF", "state", false, Some("uppercase")),
            entry("CEP", "zipCode", false, None),
            entry("Alergias", "allergies", false, None),
            entry("Medicamentos em uso", "medications", false, None),
            entry("Tipo de pele", "skinType", false, None),
            entry("Tratamentos anteriores", "previousTreatments", false, None),
            entry("Observações", "observations", false, None),
            entry("Como conheceu", "referralSource", false, None),
        ],
    },
    MigrationTemplate {
        key: "excel_generic",
        source_system: "Excel",
        description: "Planilha genérica (Excel/Google Sheets)",
        entries: &[
            entry("Nome", "name", true, None),
            entry("CPF", "cpf", false, Some("cpf_format")),
            entry("Email", "email", false, Some("lowercase")),
            entry("Telefone", "phone", true, Some("phone_format")),
            entry("Data de Nascimento", "birthDate", false, Some("date_format")),
            entry("Endereço", "address", false, None),
            entry("Cidade", "city", false, None),
            entry("Estado", "state", false, Some("uppercase")),
            entry("CEP", "zipCode", false, None),
            entry("Tags", "tags", false, None),
            entry("Observações", "notes", false, None),
        ],
    },
];

/// All templates, in presentation order.
pub fn templates() -> &'static [MigrationTemplate] {
    TEMPLATES
}

pub fn template(key: &str) -> Option<&'static MigrationTemplate> {
    TEMPLATES.iter().find(|t| t.key == key)
}

/// Replace the config's mapping with a template's and set its source system.
///
/// Unknown keys leave the config untouched.
pub fn apply_template(config: &mut MigrationConfig, key: &str) -> Result<(), MapError> {
    let template = template(key).ok_or_else(|| MapError::UnknownTemplate(key.to_string()))?;
    config.column_mapping = template.mappings();
    config.source_system = Some(template.source_system.to_string());
    tracing::debug!(
        template = template.key,
        mappings = template.len(),
        "applied template"
    );
    Ok(())
}
