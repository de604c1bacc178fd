pub mod date_input;
pub mod pagination_controls;
pub mod table;
