//! End-to-end execution over parsed CSV input.

use std::cell::Cell;

use chrono::NaiveDate;
use migra_core::{
    CancellationToken, InMemoryStore, KvRecordStore, MemoryKv, MigrationExecutor, execute,
};
use migra_ingest::{CsvRowReader, parse_csv};
use migra_map::apply_template;
use migra_model::{ClientRecord, MigrationConfig, MigrationStatus, Row};
use proptest::collection::vec;
use proptest::{prop_assert, prop_assert_eq, proptest};

fn clinicware() -> MigrationConfig {
    let mut config = MigrationConfig::new("clinicware");
    apply_template(&mut config, "clinicware").expect("template");
    config
}

fn existing(cpf: &str, email: &str) -> ClientRecord {
    ClientRecord {
        id: "existing-1".to_string(),
        name: "Cadastro antigo".to_string(),
        cpf: cpf.to_string(),
        email: email.to_string(),
        ..ClientRecord::default()
    }
}

#[test]
fn clinicware_row_is_imported() {
    let rows = parse_csv("nome_completo,cpf,telefone\nAna,111.111.111-11,11999999999\n")
        .expect("parse");
    let config = clinicware();
    let store = InMemoryStore::new();

    let result = MigrationExecutor::new(&config, &store)
        .with_date(NaiveDate::from_ymd_opt(2025, 6, 9).expect("date"))
        .execute(&rows);

    assert_eq!(result.status, MigrationStatus::Success);
    assert_eq!(result.success_count, 1);
    assert_eq!(result.config_id, config.id);
    let record = &result.imported[0];
    assert_eq!(record.name, "Ana");
    assert_eq!(record.cpf, "11111111111");
    assert_eq!(record.phone, "(11) 99999-9999");
    assert!(record.notes.contains("[Migrated from ClinicWare on 09/06/2025]"));
    assert!(result.completed_at >= result.started_at);
}

#[test]
fn existing_cpf_is_skipped() {
    let rows = parse_csv("nome_completo,cpf,telefone\nAna,111.111.111-11,11999999999\n")
        .expect("parse");
    let store: InMemoryStore = [existing("11111111111", "")].into_iter().collect();

    let result = execute(&rows, &clinicware(), &store);

    assert_eq!(result.skipped_count, 1);
    assert_eq!(result.success_count, 0);
    assert!(result.imported_record_ids.is_empty());
    // nothing failed, so an all-skipped run still succeeds
    assert_eq!(result.status, MigrationStatus::Success);
}

#[test]
fn duplicates_import_when_skipping_is_off() {
    let rows = parse_csv("nome_completo,email,telefone\nAna,ANA@X.COM,11999999999\n")
        .expect("parse");
    let store: InMemoryStore = [existing("", "ana@x.com")].into_iter().collect();

    let mut config = clinicware();
    assert_eq!(execute(&rows, &config, &store).skipped_count, 1);

    config.options.skip_duplicates = false;
    let result = execute(&rows, &config, &store);
    assert_eq!(result.skipped_count, 0);
    assert_eq!(result.success_count, 1);
}

#[test]
fn malformed_file_completes_as_failed() {
    let rows = parse_csv("foo,bar\n1,2\n3,4\n").expect("parse");
    let result = execute(&rows, &clinicware(), &InMemoryStore::new());

    assert_eq!(result.status, MigrationStatus::Failed);
    assert_eq!(result.error_count, 2);
    assert_eq!(result.errors[1].row, 3);
    assert!(result.totals_consistent());
}

#[test]
fn mixed_rows_are_partial() {
    let rows = parse_csv(
        "nome_completo,telefone\nAna,11999999999\n,11988887777\nBia,1133334444\n",
    )
    .expect("parse");
    let result = execute(&rows, &clinicware(), &InMemoryStore::new());

    assert_eq!(result.status, MigrationStatus::Partial);
    assert_eq!((result.success_count, result.error_count), (2, 1));
    assert_eq!(result.errors[0].row, 3);
}

#[test]
fn cancelled_run_reports_progress_so_far() {
    let rows = parse_csv("nome_completo,telefone\nAna,1\nBia,2\nCaio,3\nDani,4\n").expect("parse");
    let config = clinicware();
    let store = InMemoryStore::new();
    let token = CancellationToken::new();
    let seen = Cell::new(0);

    let result = MigrationExecutor::new(&config, &store)
        .with_cancellation(token.clone())
        .on_progress(|processed| {
            seen.set(processed);
            if processed == 2 {
                token.cancel();
            }
        })
        .execute(&rows);

    assert!(result.cancelled);
    assert_eq!(result.total_processed, 2);
    assert_eq!(seen.get(), 2);
    assert!(result.totals_consistent());
}

#[test]
fn streams_rows_from_reader() {
    let text = "nome_completo,telefone\nAna,11999999999\nBia,1133334444\n";
    let reader = CsvRowReader::new(text.as_bytes());
    let config = clinicware();
    let store = InMemoryStore::new();

    let result = MigrationExecutor::new(&config, &store)
        .execute_rows(reader.map(|row| row.expect("row")));
    assert_eq!(result.success_count, 2);
}

#[test]
fn key_value_store_feeds_duplicate_check() {
    let mut store = KvRecordStore::load(MemoryKv::new()).expect("load");
    store
        .insert(existing("11111111111", ""))
        .expect("insert");

    let rows = parse_csv(
        "nome_completo,cpf,telefone\nAna,111.111.111-11,11999999999\nBia,,1133334444\n",
    )
    .expect("parse");
    let result = execute(&rows, &clinicware(), &store);

    assert_eq!(result.skipped_count, 1);
    assert_eq!(result.success_count, 1);
    for record in result.imported {
        store.insert(record).expect("insert");
    }
    assert_eq!(store.len(), 2);
}

proptest! {
    #[test]
    fn totals_always_add_up(cells in vec(("[A-Za-z ]{0,6}", "[0-9]{0,11}"), 0..20)) {
        let rows: Vec<Row> = cells
            .iter()
            .map(|(name, cpf)| {
                [
                    ("nome_completo", name.as_str()),
                    ("cpf", cpf.as_str()),
                    ("telefone", "11999999999"),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        let store: InMemoryStore = [existing("12345678901", "")].into_iter().collect();

        let result = execute(&rows, &clinicware(), &store);

        prop_assert!(result.totals_consistent());
        prop_assert_eq!(result.total_processed, rows.len());
        prop_assert_eq!(result.imported_record_ids.len(), result.success_count);
    }
}
