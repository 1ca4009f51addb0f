//! Statistics persisted as JSON next to the game.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use log::debug;
use pysweeper_core::{GameRecord, SinkError, StatisticsSink, StatsTable};

#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    table: StatsTable,
}

impl StatsStore {
    /// Loads `statistics.json` from `data_dir`, starting empty if it does not exist yet.
    pub fn open(mut data_dir: PathBuf) -> anyhow::Result<Self> {
        data_dir.push("statistics.json");
        debug!("Statistics file: {data_dir:?}");

        let table = match File::open(&data_dir) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("reading {}", data_dir.display()))?,
            Err(error) if error.kind() == ErrorKind::NotFound => StatsTable::default(),
            Err(error) => return Err(error).context(format!("opening {}", data_dir.display())),
        };

        Ok(Self {
            path: data_dir,
            table,
        })
    }

    pub fn table(&self) -> &StatsTable {
        &self.table
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("creating {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.table)?;
        writer.flush()?;
        Ok(())
    }

    pub fn record(&mut self, record: &GameRecord) -> anyhow::Result<()> {
        self.table.record(record);
        self.save()
    }

    pub fn reset(&mut self) -> anyhow::Result<()> {
        self.table.reset();
        self.save()
    }
}

/// Lets the session record into the same store the menu reads from.
#[derive(Clone, Debug)]
pub struct SharedStats(pub Rc<RefCell<StatsStore>>);

impl StatisticsSink for SharedStats {
    fn record_game(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        self.0.borrow_mut().record(record).map_err(Into::into)
    }
}
