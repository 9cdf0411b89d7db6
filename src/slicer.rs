pub mod day_header;
