//! Record assembly against a template config.

use chrono::NaiveDate;
use migra_map::apply_template;
use migra_model::{MigrationConfig, Row};
use migra_transform::{RecordBuilder, Transform};
use proptest::{prop_assert_eq, proptest};

fn clinicware() -> MigrationConfig {
    let mut config = MigrationConfig::new("clinicware");
    apply_template(&mut config, "clinicware").expect("template");
    config
}

#[test]
fn clinicware_row_assembles() {
    let config = clinicware();
    let row: Row = [
        ("nome_completo", "Ana"),
        ("cpf", "111.111.111-11"),
        ("telefone", "11999999999"),
        ("email", "Ana@Clinica.COM"),
        ("estado", "pe"),
    ]
    .into_iter()
    .collect();

    let record = RecordBuilder::new(&config)
        .with_date(NaiveDate::from_ymd_opt(2025, 1, 31).expect("date"))
        .build(&row)
        .expect("record");

    assert_eq!(record.name, "Ana");
    assert_eq!(record.cpf, "11111111111");
    assert_eq!(record.phone, "(11) 99999-9999");
    assert_eq!(record.email, "ana@clinica.com");
    assert_eq!(record.state, "PE");
    assert!(record.id.is_empty());
    assert!(record.created_at.is_none());
    insta::assert_snapshot!(record.notes, @"[Migrated from ClinicWare on 31/01/2025]");
}

proptest! {
    #[test]
    fn cpf_format_is_idempotent(value in "\\PC{0,20}") {
        let once = Transform::CpfFormat.apply(&value);
        prop_assert_eq!(Transform::CpfFormat.apply(&once), once);
    }

    #[test]
    fn uppercase_is_idempotent(value in "[a-zA-Z0-9 áéíóúçãõ]{0,20}") {
        let once = Transform::Uppercase.apply(&value);
        prop_assert_eq!(Transform::Uppercase.apply(&once), once);
    }

    #[test]
    fn lowercase_is_idempotent(value in "[a-zA-Z0-9 @.ÁÉÍÓÚÇ]{0,20}") {
        let once = Transform::Lowercase.apply(&value);
        prop_assert_eq!(Transform::Lowercase.apply(&once), once);
    }

    #[test]
    fn phone_format_is_idempotent(value in "[0-9 ()+-]{0,16}") {
        let once = Transform::PhoneFormat.apply(&value);
        prop_assert_eq!(Transform::PhoneFormat.apply(&once), once);
    }
}
