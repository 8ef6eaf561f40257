//! Static catalog of importable client fields.
//!
//! The catalog is read-only metadata. [`FieldKind`] is a rendering hint for
//! form builders and does not change how the pipeline treats a value.

use std::fmt;

use serde::Serialize;

/// Group a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldNamespace {
    Basic,
    Medical,
    Metadata,
}

impl FieldNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Medical => "medical",
            Self::Metadata => "metadata",
        }
    }
}

impl fmt::Display for FieldNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value-kind hint used for rendering inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Date,
    Select,
    Textarea,
    Tags,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Tags => "tags",
        }
    }
}

/// A single importable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub id: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub namespace: FieldNamespace,
    /// Header spellings commonly seen in exports, used for suggestions.
    #[serde(skip)]
    pub aliases: &'static [&'static str],
}

const fn def(
    id: &'static str,
    label: &'static str,
    required: bool,
    kind: FieldKind,
    namespace: FieldNamespace,
    aliases: &'static [&'static str],
) -> FieldDef {
    FieldDef {
        id,
        label,
        required,
        kind,
        namespace,
        aliases,
    }
}

#[rustfmt::skip]
static FIELDS: &[FieldDef] = &[
    // basic
    def("name", "Nome completo", true, FieldKind::Text, FieldNamespace::Basic,
        &["nome", "nome completo", "cliente", "paciente"]),
    def("cpf", "CPF", false, FieldKind::Text, FieldNamespace::Basic,
        &["cpf", "documento", "cpf cliente"]),
    def("email", "E-mail", false, FieldKind::Email, FieldNamespace::Basic,
        &["email", "e mail", "correio eletronico"]),
    def("phone", "Telefone", true, FieldKind::Phone, FieldNamespace::Basic,
        &["telefone", "celular", "fone", "whatsapp", "contato"]),
    def("birthDate", "Data de nascimento", false, FieldKind::Date, FieldNamespace::Basic,
        &["data nascimento", "nascimento", "dt nasc", "data de nascimento"]),
    def("gender", "Sexo", false, FieldKind::Select, FieldNamespace::Basic,
        &["sexo", "genero"]),
    def("address", "Endereço", false, FieldKind::Text, FieldNamespace::Basic,
        &["endereco", "logradouro", "rua"]),
    def("city", "Cidade", false, FieldKind::Text, FieldNamespace::Basic,
        &["cidade", "municipio"]),
    def("state", "Estado", false, FieldKind::Select, FieldNamespace::Basic,
        &["estado", "uf"]),
    def("zipCode", "CEP", false, FieldKind::Text, FieldNamespace::Basic,
        &["cep", "codigo postal"]),
    def("referralSource", "Como conheceu", false, FieldKind::Select, FieldNamespace::Basic,
        &["origem", "como conheceu", "indicacao", "canal"]),
    // medical
    def("medicalHistory", "Histórico médico", false, FieldKind::Textarea, FieldNamespace::Medical,
        &["historico medico", "historico", "anamnese"]),
    def("allergies", "Alergias", false, FieldKind::Textarea, FieldNamespace::Medical,
        &["alergias", "alergia"]),
    def("medications", "Medicamentos em uso", false, FieldKind::Textarea, FieldNamespace::Medical,
        &["medicamentos", "medicacoes", "medicamentos em uso"]),
    def("skinType", "Tipo de pele", false, FieldKind::Select, FieldNamespace::Medical,
        &["tipo pele", "tipo de pele", "fototipo"]),
    def("previousTreatments", "Tratamentos anteriores", false, FieldKind::Textarea, FieldNamespace::Medical,
        &["tratamentos anteriores", "procedimentos anteriores", "procedimentos"]),
    def("observations", "Observações", false, FieldKind::Textarea, FieldNamespace::Medical,
        &["observacoes", "obs", "observacao"]),
    // metadata
    def("tags", "Tags", false, FieldKind::Tags, FieldNamespace::Metadata,
        &["tags", "etiquetas", "marcadores"]),
    def("notes", "Notas", false, FieldKind::Textarea, FieldNamespace::Metadata,
        &["notas", "anotacoes", "comentarios"]),
    def("originalId", "ID original", false, FieldKind::Text, FieldNamespace::Metadata,
        &["id", "codigo", "id cliente", "cod cliente"]),
];

/// Every field, in catalog order.
pub fn all_fields() -> &'static [FieldDef] {
    FIELDS
}

/// Look up a field by id.
pub fn field(id: &str) -> Option<&'static FieldDef> {
    FIELDS.iter().find(|f| f.id == id)
}

/// Fields of one namespace, in catalog order.
pub fn fields_in(namespace: FieldNamespace) -> impl Iterator<Item = &'static FieldDef> {
    FIELDS.iter().filter(move |f| f.namespace == namespace)
}

pub fn namespace_of(id: &str) -> Option<FieldNamespace> {
    field(id).map(|f| f.namespace)
}
