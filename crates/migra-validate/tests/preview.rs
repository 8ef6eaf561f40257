//! Preview validation over parsed CSV input.

use migra_ingest::parse_csv;
use migra_map::apply_template;
use migra_model::{ColumnMapping, MigrationConfig};
use migra_validate::{
    MSG_DUPLICATE_CPF, MSG_INVALID_CPF, MSG_INVALID_EMAIL, MSG_REQUIRED_EMPTY, Validator, preview,
};

fn basic_config() -> MigrationConfig {
    MigrationConfig::new("import")
        .with_mapping(ColumnMapping::new("nome", "name").required(true))
        .with_mapping(ColumnMapping::new("cpf", "cpf"))
        .with_mapping(ColumnMapping::new("email", "email"))
}

#[test]
fn required_field_empty_marks_row_invalid() {
    let rows = parse_csv("nome,cpf,email\n,529.982.247-25,ana@x.com\nBia,,\n").expect("parse");
    let result = preview(&rows, &basic_config());

    assert_eq!(result.total_rows, 2);
    assert_eq!(result.valid_rows, 1);
    assert_eq!(result.invalid_rows, 1);
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.row, 2);
    assert_eq!(error.field, "name");
    assert_eq!(error.message, MSG_REQUIRED_EMPTY);
}

#[test]
fn duplicate_cpf_flags_every_row_in_group() {
    let rows = parse_csv("nome,cpf\nAna,111.111.111-11\nBia,11111111111\n").expect("parse");
    let result = preview(&rows, &basic_config());

    let duplicates: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.message == MSG_DUPLICATE_CPF)
        .collect();
    assert_eq!(result.duplicates, 2);
    assert_eq!(duplicates.len(), 2);
    assert_eq!(duplicates[0].row, 2);
    assert_eq!(duplicates[1].row, 3);
    assert_eq!(duplicates[0].value, "111.111.111-11");
    assert_eq!(duplicates[1].value, "11111111111");
}

#[test]
fn duplicates_alone_do_not_invalidate() {
    let rows = parse_csv("nome,email\nAna,ana@x.com\nBia,ANA@x.com\n").expect("parse");
    let result = preview(&rows, &basic_config());

    assert_eq!(result.valid_rows, 2);
    assert_eq!(result.invalid_rows, 0);
    assert_eq!(result.duplicates, 2);
}

#[test]
fn errors_follow_row_then_mapping_order() {
    let rows = parse_csv("nome,cpf,email\nAna,123,bad\n,,\n").expect("parse");
    let result = preview(&rows, &basic_config());

    let summary: Vec<_> = result
        .errors
        .iter()
        .map(|e| (e.row, e.message.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (2, MSG_INVALID_CPF),
            (2, MSG_INVALID_EMAIL),
            (3, MSG_REQUIRED_EMPTY),
        ]
    );
    assert_eq!(result.valid_rows, 0);
}

#[test]
fn sample_holds_first_five_rows() {
    let mut text = String::from("nome\n");
    for i in 0..8 {
        text.push_str(&format!("Cliente {i}\n"));
    }
    let rows = parse_csv(&text).expect("parse");
    let result = preview(&rows, &basic_config());

    assert_eq!(result.total_rows, 8);
    assert_eq!(result.sample.len(), 5);
    assert_eq!(result.sample[4].value("nome"), "Cliente 4");
}

#[test]
fn template_config_validates_clinicware_export() {
    let mut config = MigrationConfig::new("clinicware");
    apply_template(&mut config, "clinicware").expect("template");
    let rows = parse_csv(
        "nome_completo,cpf,email,telefone\nAna,529.982.247-25,ana@x.com,11999999999\n",
    )
    .expect("parse");

    let result = Validator::new(&config).preview(&rows);
    assert_eq!(result.valid_rows, 1);
    assert!(result.errors.is_empty());
}

#[test]
fn empty_input_previews_cleanly() {
    let result = preview(&[], &basic_config());
    assert_eq!(result.total_rows, 0);
    assert_eq!(result.invalid_rows, 0);
    assert!(result.sample.is_empty());
}
