//! RocksDB storage backend for committed passports.
//!
//! The registry itself is storage-agnostic; the node writes each
//! passport back here after a successful commit and reloads the full set
//! at startup. Values are JSON-encoded `Passport` records keyed by
//! controller account id.

use anyhow::Result;
use rocksdb::{ColumnFamilyDescriptor, IteratorMode, Options, DB};
use std::path::Path;

/// Column family names for different data types.
const CF_PASSPORTS: &str = "passports";
const CF_META: &str = "meta";

/// RocksDB-backed storage for the Passledger node.
pub struct Storage {
    db: DB,
}

impl Storage {
    /// Open or create a RocksDB database at the given path with column families.
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(CF_PASSPORTS, Options::default()),
            ColumnFamilyDescriptor::new(CF_META, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)?;

        Ok(Self { db })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| anyhow::anyhow!("column family '{}' not found", name))
    }

    /// Store a passport record, keyed by controller account id.
    pub fn put_passport(&self, account: &str, data: &[u8]) -> Result<()> {
        self.db.put_cf(self.cf(CF_PASSPORTS)?, account.as_bytes(), data)?;
        Ok(())
    }

    /// Get a passport record.
    pub fn get_passport(&self, account: &str) -> Result<Option<Vec<u8>>> {
        let value = self.db.get_cf(self.cf(CF_PASSPORTS)?, account.as_bytes())?;
        Ok(value)
    }

    /// All stored passport records.
    pub fn passports(&self) -> Result<Vec<Vec<u8>>> {
        let cf = self.cf(CF_PASSPORTS)?;
        let mut records = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(value.to_vec());
        }
        Ok(records)
    }

    /// Store node metadata.
    pub fn put_meta(&self, key: &str, data: &[u8]) -> Result<()> {
        self.db.put_cf(self.cf(CF_META)?, key.as_bytes(), data)?;
        Ok(())
    }

    /// Get node metadata.
    pub fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.db.get_cf(self.cf(CF_META)?, key.as_bytes())?;
        Ok(value)
    }
}
