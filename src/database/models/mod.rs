pub mod radar_entry;

pub use radar_entry::RadarEntryRow;
