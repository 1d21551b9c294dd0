pub mod csv_record;
pub mod writer;

pub use csv_record::CsvRecord;
pub use writer::render_donors_csv;
