//! The ordered sample table. Table order is the scan queue order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::columns;
use crate::record::SampleRecord;
use crate::stats::RegistryStats;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SampleTable {
    /// Column order used for display and export.
    columns: Vec<String>,
    records: Vec<SampleRecord>,
}

impl SampleTable {
    pub fn new(columns: Vec<String>, records: Vec<SampleRecord>) -> Self {
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SampleRecord> {
        self.records.get(index)
    }

    /// Mutable access for the registry's scan transitions.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut SampleRecord> {
        self.records.get_mut(index)
    }

    /// Index of the first record whose identifier equals the trimmed input.
    pub fn position_of(&self, sample_id: &str) -> Option<usize> {
        let wanted = sample_id.trim();
        self.records
            .iter()
            .position(|record| record.sample_id() == wanted)
    }

    /// First pending record in table order.
    pub fn first_pending(&self) -> Option<(usize, &SampleRecord)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, record)| record.is_pending())
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats::from_records(&self.records)
    }

    /// Identifiers occurring more than once, in first-occurrence order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.sample_id()).or_default() += 1;
        }
        let mut duplicates = Vec::new();
        for record in &self.records {
            let id = record.sample_id();
            if counts.get(id).is_some_and(|count| *count > 1)
                && !duplicates.iter().any(|seen: &String| seen == id)
            {
                duplicates.push(id.to_string());
            }
        }
        duplicates
    }

    /// Column order with the canonical priority columns first.
    pub fn display_columns(&self) -> Vec<String> {
        let mut ordered: Vec<String> = columns::PRIORITY_COLUMNS
            .iter()
            .filter(|name| self.columns.iter().any(|column| column == *name))
            .map(|name| (*name).to_string())
            .collect();
        for column in &self.columns {
            if !ordered.contains(column) {
                ordered.push(column.clone());
            }
        }
        ordered
    }
}
