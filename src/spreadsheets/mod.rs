pub mod report_xlsx;
