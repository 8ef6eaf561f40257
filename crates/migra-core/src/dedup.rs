//! Duplicate detection against records that already exist.

use std::collections::HashMap;

use migra_model::ClientRecord;

/// Read-only lookup over the client records a migration imports into.
pub trait ExistingRecords {
    /// Record whose CPF equals `cpf` exactly.
    fn find_by_cpf(&self, cpf: &str) -> Option<&ClientRecord>;

    /// Record whose email equals `email`, ignoring case.
    fn find_by_email(&self, email: &str) -> Option<&ClientRecord>;
}

/// The existing record a candidate collides with, if any.
///
/// Empty keys never match.
pub fn find_duplicate<'s, S>(store: &'s S, candidate: &ClientRecord) -> Option<&'s ClientRecord>
where
    S: ExistingRecords + ?Sized,
{
    let by_cpf = (!candidate.cpf.is_empty())
        .then(|| store.find_by_cpf(&candidate.cpf))
        .flatten();
    by_cpf.or_else(|| {
        (!candidate.email.is_empty())
            .then(|| store.find_by_email(&candidate.email))
            .flatten()
    })
}

/// Client records held in memory, indexed by CPF and lowercased email.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<ClientRecord>,
    by_cpf: HashMap<String, usize>,
    by_email: HashMap<String, usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: ClientRecord) {
        let idx = self.records.len();
        if !record.cpf.is_empty() {
            self.by_cpf.entry(record.cpf.clone()).or_insert(idx);
        }
        if !record.email.is_empty() {
            self.by_email
                .entry(record.email.to_lowercase())
                .or_insert(idx);
        }
        self.records.push(record);
    }

    /// Insert a record, replacing any record that has the same id.
    pub fn upsert(&mut self, record: ClientRecord) {
        match self.records.iter().position(|r| r.id == record.id) {
            Some(pos) => {
                self.records[pos] = record;
                self.reindex();
            }
            None => self.insert(record),
        }
    }

    fn reindex(&mut self) {
        let records = std::mem::take(&mut self.records);
        self.by_cpf.clear();
        self.by_email.clear();
        for record in records {
            self.insert(record);
        }
    }

    pub fn records(&self) -> &[ClientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ClientRecord> for InMemoryStore {
    fn from_iter<I: IntoIterator<Item = ClientRecord>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

impl ExistingRecords for InMemoryStore {
    fn find_by_cpf(&self, cpf: &str) -> Option<&ClientRecord> {
        self.by_cpf.get(cpf).map(|&idx| &self.records[idx])
    }

    fn find_by_email(&self, email: &str) -> Option<&ClientRecord> {
        self.by_email
            .get(&email.to_lowercase())
            .map(|&idx| &self.records[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cpf: &str, email: &str) -> ClientRecord {
        ClientRecord {
            cpf: cpf.to_string(),
            email: email.to_string(),
            ..ClientRecord::default()
        }
    }

    fn store() -> InMemoryStore {
        [record("11111111111", ""), record("", "Ana@Clinica.com")]
            .into_iter()
            .collect()
    }

    #[test]
    fn upsert_replaces_record_with_same_id() {
        let mut store = InMemoryStore::new();
        let first = ClientRecord {
            id: "r1".to_string(),
            ..record("11111111111", "ana@clinica.com")
        };
        let second = ClientRecord {
            id: "r1".to_string(),
            ..record("22222222222", "")
        };
        store.upsert(first);
        store.upsert(second);

        assert_eq!(store.len(), 1);
        assert!(store.find_by_cpf("11111111111").is_none());
        assert!(store.find_by_email("ana@clinica.com").is_none());
        assert_eq!(store.find_by_cpf("22222222222").map(|r| r.id.as_str()), Some("r1"));
    }

    #[test]
    fn matches_on_exact_cpf() {
        let store = store();
        assert!(find_duplicate(&store, &record("11111111111", "")).is_some());
        assert!(find_duplicate(&store, &record("111.111.111-11", "")).is_none());
    }

    #[test]
    fn matches_on_email_ignoring_case() {
        let store = store();
        assert!(find_duplicate(&store, &record("", "ana@clinica.COM")).is_some());
    }

    #[test]
    fn empty_keys_never_match() {
        let store: InMemoryStore = [record("", "")].into_iter().collect();
        assert!(find_duplicate(&store, &record("", "")).is_none());
    }
}
