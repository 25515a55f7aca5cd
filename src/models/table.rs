use crate::models::record::Record;
use crate::models::schema::Schema;

/// Ordered, append-only collection of records. Order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub schema: Schema,
    records: Vec<Record>,
}

impl Table {
    /// Empty table with the full column set of `schema`.
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    pub fn with_records(schema: Schema, records: Vec<Record>) -> Self {
        Self { schema, records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// New table equal to `self` with `record` at the end.
    pub fn appended(&self, record: Record) -> Table {
        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.extend_from_slice(&self.records);
        records.push(record);
        Table {
            schema: self.schema.clone(),
            records,
        }
    }

    /// Up to `limit` records, newest timestamp first. Equal timestamps put
    /// the later insertion first.
    pub fn recent(&self, limit: usize) -> Vec<&Record> {
        let mut indexed: Vec<(usize, &Record)> = self.records.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| b.timestamp.cmp(&a.timestamp).then(ib.cmp(ia)));
        indexed.into_iter().take(limit).map(|(_, r)| r).collect()
    }

    /// Records that carry a real photo, in insertion order.
    pub fn with_photos(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| r.has_photo()).collect()
    }
}
